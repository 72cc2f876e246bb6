//! Drought Dashboard Main Application
//! Main window wiring the load -> filter -> render pipeline.

use crate::charts::{ChartData, ChartPlotter};
use crate::data::{DataLoader, Dataset, FilterState, Observation, METRICS};
use crate::gui::{ControlPanel, ControlPanelAction, DataTable};
use egui::{Color32, RichText, SidePanel};
use log::{debug, error};
use polars::prelude::*;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;

/// Source file loaded at startup.
pub const DEFAULT_DATA_PATH: &str = "data/cleaned_drought_data_part1.csv";

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(Dataset),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    /// Loaded once, shared read-only. Replaced only by an explicit re-load.
    dataset: Option<Arc<Dataset>>,
    control_panel: ControlPanel,

    /// Filtered view cached against the filter state that produced it, so a
    /// repaint without an interaction does not re-filter.
    view_cache: Option<(FilterState, Vec<Observation>, ChartData)>,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            dataset: None,
            control_panel: ControlPanel::new(),
            view_cache: None,
            load_rx: None,
            is_loading: false,
        };
        app.start_load(DEFAULT_DATA_PATH.to_string());
        app
    }

    /// Kick off a CSV load in a background thread.
    fn start_load(&mut self, path: String) {
        if self.is_loading {
            return;
        }
        self.is_loading = true;
        self.control_panel.set_progress(5.0, "Loading CSV file...");

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));
            match DataLoader::load_csv(&path) {
                Ok(dataset) => {
                    let _ = tx.send(LoadResult::Complete(dataset));
                }
                Err(e) => {
                    error!("failed to load {}: {}", path, e);
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(20.0, &status);
                    }
                    LoadResult::Complete(dataset) => {
                        self.control_panel.set_dataset(&dataset);
                        self.control_panel.set_progress(
                            100.0,
                            &format!(
                                "Loaded {} rows, {} locations",
                                dataset.len(),
                                dataset.unique_fips().len()
                            ),
                        );
                        self.dataset = Some(Arc::new(dataset));
                        self.view_cache = None;
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(message) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", message));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Handle CSV file selection for a re-load.
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_load(path.to_string_lossy().to_string());
        }
    }

    /// Write the current filtered view to a CSV chosen by the user.
    fn handle_export_csv(&mut self) {
        let Some((_, view, _)) = self.view_cache.as_ref() else {
            self.control_panel.set_progress(0.0, "Nothing to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("filtered_data.csv")
            .save_file()
        else {
            return; // User cancelled
        };

        match Self::export_view(view, &path) {
            Ok(count) => {
                self.control_panel
                    .set_progress(100.0, &format!("Exported {} rows", count));
            }
            Err(e) => {
                error!("export failed: {}", e);
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }

    /// Build a DataFrame from the view and write it with the Polars CSV writer.
    fn export_view(view: &[Observation], path: &Path) -> anyhow::Result<usize> {
        let fips: Vec<String> = view.iter().map(|r| r.fips.clone()).collect();
        let dates: Vec<String> = view
            .iter()
            .map(|r| r.date.format("%Y-%m-%d").to_string())
            .collect();

        let mut columns = vec![
            Column::new("fips".into(), fips),
            Column::new("date".into(), dates),
        ];
        for metric in METRICS {
            let values: Vec<f64> = view.iter().map(|r| r.value(metric)).collect();
            columns.push(Column::new(metric.column().into(), values));
        }

        let mut df = DataFrame::new(columns)?;
        let mut file = std::fs::File::create(path)?;
        CsvWriter::new(&mut file).finish(&mut df)?;
        Ok(view.len())
    }

    /// Recompute the filtered view and chart when the filter changed.
    fn refresh_view(&mut self) {
        let Some(dataset) = self.dataset.as_ref() else {
            return;
        };
        let Some(filter) = self.control_panel.filter_state() else {
            return;
        };

        let up_to_date = matches!(&self.view_cache, Some((cached, _, _)) if cached == &filter);
        if up_to_date {
            return;
        }

        let view = filter.apply(dataset.rows());
        debug!("filter changed: {} of {} rows", view.len(), dataset.len());
        let chart = ChartData::from_view(&view, filter.metric, &filter.fips);
        self.view_cache = Some((filter, view, chart));
    }

    fn show_central(&mut self, ui: &mut egui::Ui) {
        if self.is_loading {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        }

        let Some((filter, view, chart)) = self.view_cache.as_ref() else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ui.heading(format!("{} Over Time", filter.metric.column()));
        ui.add_space(5.0);

        if view.is_empty() {
            ui.label(
                RichText::new(
                    "⚠ No data available for the selected filters. Try adjusting your selection.",
                )
                .size(14.0)
                .color(Color32::from_rgb(255, 193, 7)),
            );
        } else {
            ChartPlotter::draw_time_series(ui, chart);
        }

        ui.add_space(10.0);
        ui.separator();

        ui.horizontal(|ui| {
            ui.heading("Filtered Dataset");
            ui.label(
                RichText::new(format!("{} rows", view.len()))
                    .size(12.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(5.0);
        DataTable::show(ui, view);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - filters
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::ExportCsv => self.handle_export_csv(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Filter runs after the panel so this frame's widget values apply.
        self.refresh_view();

        // Central panel - chart and table
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_central(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(fips: &str, day: u32, prectot: f64) -> Observation {
        Observation {
            fips: fips.to_string(),
            date: NaiveDate::from_ymd_opt(2020, 1, day).unwrap(),
            prectot,
            t2m: 1.0,
            t2m_max: 2.0,
            t2m_min: 0.5,
            ws10m: 3.0,
        }
    }

    #[test]
    fn test_export_view_round_trips_through_loader() {
        let view = vec![obs("06037", 1, 1.5), obs("01001", 2, 0.25)];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered.csv");
        let count = DashboardApp::export_view(&view, &path).unwrap();
        assert_eq!(count, 2);

        let reloaded = DataLoader::load_csv(path.to_str().unwrap()).unwrap();
        assert_eq!(reloaded.rows(), view.as_slice());
    }

    #[test]
    fn test_export_empty_view_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        let count = DashboardApp::export_view(&[], &path).unwrap();
        assert_eq!(count, 0);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("fips,date,PRECTOT"));
    }
}
