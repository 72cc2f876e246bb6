//! Data Table Widget
//! Scrollable table of the filtered rows (date, fips, five metrics).

use crate::data::{Observation, METRICS};
use egui::{RichText, ScrollArea};

const ROW_HEIGHT: f32 = 18.0;
const DATE_COL_WIDTH: f32 = 90.0;
const FIPS_COL_WIDTH: f32 = 70.0;
const METRIC_COL_WIDTH: f32 = 80.0;

/// Renders the filtered view as a virtualized table. Rendering an empty view
/// is fine and just shows the header.
pub struct DataTable;

impl DataTable {
    pub fn show(ui: &mut egui::Ui, view: &[Observation]) {
        // Header
        ui.horizontal(|ui| {
            Self::header_cell(ui, DATE_COL_WIDTH, "date");
            Self::header_cell(ui, FIPS_COL_WIDTH, "fips");
            for metric in METRICS {
                Self::header_cell(ui, METRIC_COL_WIDTH, metric.column());
            }
        });
        ui.separator();

        ScrollArea::vertical()
            .id_salt("data_table")
            .auto_shrink([false, false])
            .show_rows(ui, ROW_HEIGHT, view.len(), |ui, row_range| {
                for row in &view[row_range] {
                    ui.horizontal(|ui| {
                        Self::cell(ui, DATE_COL_WIDTH, row.date.format("%Y-%m-%d").to_string());
                        Self::cell(ui, FIPS_COL_WIDTH, row.fips.clone());
                        for metric in METRICS {
                            Self::cell(ui, METRIC_COL_WIDTH, format!("{:.2}", row.value(metric)));
                        }
                    });
                }
            });
    }

    fn header_cell(ui: &mut egui::Ui, width: f32, text: &str) {
        ui.add_sized(
            [width, ROW_HEIGHT],
            egui::Label::new(RichText::new(text).strong().size(12.0)),
        );
    }

    fn cell(ui: &mut egui::Ui, width: f32, text: String) {
        ui.add_sized(
            [width, ROW_HEIGHT],
            egui::Label::new(RichText::new(text).size(11.0)),
        );
    }
}
