//! Drought Dashboard - Interactive climate observation viewer
//!
//! Loads a CSV of drought/climate observations keyed by FIPS code and date,
//! filters it by location, date range and metric, and renders a time-series
//! chart plus the filtered table.

mod charts;
mod data;
mod gui;

use eframe::egui;
use gui::DashboardApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Drought Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Drought Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc)))),
    )
}
