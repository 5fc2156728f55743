//! TUI module for displaying the research dashboard in a terminal.
//!
//! This module renders the snapshot served by `research-dash serve`:
//! animated KPI cards, department and yearly charts, the publication type
//! breakdown and the collaboration map.

mod app;
mod ui;

pub use app::{run_dashboard, App, DashboardConfig};
