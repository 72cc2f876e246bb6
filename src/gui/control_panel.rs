//! Control Panel Widget
//! Left side panel with the location, date-range and metric filter controls.

use crate::data::{date_from_days, days_from_epoch, Dataset, FilterState, Metric, METRICS};
use egui::{Color32, ComboBox, RichText, ScrollArea};

/// Left side control panel holding the current widget values. The filter
/// state is rebuilt from these on every frame; nothing here is persisted.
pub struct ControlPanel {
    pub fips_options: Vec<String>,
    pub selected_fips: Vec<bool>,
    pub min_day: i64,
    pub max_day: i64,
    pub start_day: i64,
    pub end_day: i64,
    pub metric: Metric,
    pub progress: f32,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            fips_options: Vec::new(),
            selected_fips: Vec::new(),
            min_day: 0,
            max_day: 0,
            start_day: 0,
            end_day: 0,
            metric: Metric::default(),
            progress: 0.0,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the controls to the defaults for a freshly loaded dataset:
    /// first five locations selected, full date span, first metric.
    pub fn set_dataset(&mut self, dataset: &Dataset) {
        self.fips_options = dataset.unique_fips();
        let defaults = dataset.default_fips();
        self.selected_fips = self
            .fips_options
            .iter()
            .map(|f| defaults.contains(f))
            .collect();

        if let Some((min, max)) = dataset.date_bounds() {
            self.min_day = days_from_epoch(min);
            self.max_day = days_from_epoch(max);
        } else {
            self.min_day = 0;
            self.max_day = 0;
        }
        self.start_day = self.min_day;
        self.end_day = self.max_day;
        self.metric = Metric::default();
    }

    /// Locations currently checked, in encounter order.
    pub fn selected_fips(&self) -> Vec<String> {
        self.fips_options
            .iter()
            .zip(self.selected_fips.iter())
            .filter(|(_, &selected)| selected)
            .map(|(f, _)| f.clone())
            .collect()
    }

    /// Current filter selections, `None` until a dataset is loaded.
    pub fn filter_state(&self) -> Option<FilterState> {
        if self.fips_options.is_empty() {
            return None;
        }
        Some(FilterState {
            fips: self.selected_fips(),
            start: date_from_days(self.start_day)?,
            end: date_from_days(self.end_day)?,
            metric: self.metric,
        })
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌧 Drought Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Climate observations by location and date")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Location Section =====
        ui.label(RichText::new("📍 Locations (FIPS)").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                if self.fips_options.is_empty() {
                    ui.label(RichText::new("No data loaded").size(12.0).color(Color32::GRAY));
                } else {
                    ScrollArea::vertical()
                        .id_salt("fips_list")
                        .max_height(160.0)
                        .show(ui, |ui| {
                            for (i, fips) in self.fips_options.iter().enumerate() {
                                if i < self.selected_fips.len() {
                                    ui.checkbox(&mut self.selected_fips[i], fips);
                                }
                            }
                        });
                }
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.selected_fips.iter_mut().for_each(|v| *v = true);
            }
            if ui.small_button("Clear All").clicked() {
                self.selected_fips.iter_mut().for_each(|v| *v = false);
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Date Range Section =====
        ui.label(RichText::new("📅 Date Range").size(14.0).strong());
        ui.add_space(5.0);

        ui.add_enabled_ui(self.max_day > self.min_day, |ui| {
            ui.horizontal(|ui| {
                ui.add_sized([40.0, 20.0], egui::Label::new("From:"));
                ui.add(Self::date_slider(
                    &mut self.start_day,
                    self.min_day,
                    self.max_day,
                ));
            });
            ui.horizontal(|ui| {
                ui.add_sized([40.0, 20.0], egui::Label::new("To:"));
                ui.add(Self::date_slider(
                    &mut self.end_day,
                    self.min_day,
                    self.max_day,
                ));
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Metric Section =====
        ui.label(RichText::new("📊 Metric").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([55.0, 20.0], egui::Label::new("Metric:"));
            ComboBox::from_id_salt("metric")
                .width(180.0)
                .selected_text(format!("{} ({})", self.metric.column(), self.metric.label()))
                .show_ui(ui, |ui| {
                    for metric in METRICS {
                        ui.selectable_value(
                            &mut self.metric,
                            metric,
                            format!("{} ({})", metric.column(), metric.label()),
                        );
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            if ui.button("📂 Open another CSV…").clicked() {
                action = ControlPanelAction::BrowseCsv;
            }
            ui.add_space(5.0);
            ui.add_enabled_ui(!self.fips_options.is_empty(), |ui| {
                if ui.button("💾 Export filtered CSV…").clicked() {
                    action = ControlPanelAction::ExportCsv;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    fn date_slider(day: &mut i64, min: i64, max: i64) -> egui::Slider<'_> {
        egui::Slider::new(day, min..=max)
            .show_value(true)
            .custom_formatter(|v, _| {
                date_from_days(v.round() as i64)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    ExportCsv,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Observation;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn obs(fips: &str, d: NaiveDate) -> Observation {
        Observation {
            fips: fips.to_string(),
            date: d,
            prectot: 0.0,
            t2m: 0.0,
            t2m_max: 0.0,
            t2m_min: 0.0,
            ws10m: 0.0,
        }
    }

    #[test]
    fn test_set_dataset_selects_first_five() {
        let rows: Vec<Observation> = (0..7)
            .map(|i| obs(&format!("F{}", i), date(2020, 1, 1 + i)))
            .collect();
        let ds = Dataset::new(rows);

        let mut panel = ControlPanel::new();
        panel.set_dataset(&ds);

        assert_eq!(panel.fips_options.len(), 7);
        assert_eq!(panel.selected_fips(), vec!["F0", "F1", "F2", "F3", "F4"]);

        let filter = panel.filter_state().unwrap();
        assert_eq!(filter.start, date(2020, 1, 1));
        assert_eq!(filter.end, date(2020, 1, 7));
        assert_eq!(filter.metric, Metric::Prectot);
    }

    #[test]
    fn test_filter_state_none_before_load() {
        assert!(ControlPanel::new().filter_state().is_none());
    }

    #[test]
    fn test_filter_state_tracks_widget_values() {
        let ds = Dataset::new(vec![
            obs("A", date(2020, 1, 1)),
            obs("B", date(2020, 1, 10)),
        ]);
        let mut panel = ControlPanel::new();
        panel.set_dataset(&ds);

        panel.selected_fips[0] = false;
        panel.start_day += 2;
        panel.metric = Metric::Ws10m;

        let filter = panel.filter_state().unwrap();
        assert_eq!(filter.fips, vec!["B"]);
        assert_eq!(filter.start, date(2020, 1, 3));
        assert_eq!(filter.metric, Metric::Ws10m);
    }
}
