//! GUI module - User interface components

mod app;
mod control_panel;
mod data_table;

pub use app::DashboardApp;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use data_table::DataTable;
