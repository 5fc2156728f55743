//! # Research Dash - Research Overview Dashboard
//!
//! Renders a single-page research metrics dashboard for a university:
//! animated KPI cards, department and yearly publication charts, a
//! publication-type donut and a global collaboration map.
//!
//! ## Features
//!
//! - Departmental metrics loaded from CSV on every render
//! - KPI cards that count up to their values, streamed as Server-Sent Events
//! - Plotly figure specifications for every chart
//! - Terminal dashboard fed by the server's JSON snapshot
//!
//! ## Usage
//!
//! ### As a CLI
//!
//! ```bash
//! # Start the server
//! research-dash serve --port 8501 --data Data/h-index.csv
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use research_dash::{animation, compute_metrics, MetricsTable};
//!
//! let table = MetricsTable::from_path("Data/h-index.csv").unwrap();
//! let metrics = compute_metrics(&table);
//!
//! // Frames shown while the first card counts up
//! let frames = animation::frames(&metrics[0].value, animation::DEFAULT_STEPS);
//! ```

// Core library modules
pub mod animation;
pub mod charts;
pub mod dashboard;
pub mod data;
pub mod metrics;
pub mod page;
pub mod stream;

// CLI module (for `research-dash serve` command)
pub mod cli;

// TUI module (for `research-dash tui` command)
pub mod tui;

// Re-export commonly used types
pub use animation::{AnimationConfig, CounterState};
pub use charts::{DepartmentBars, GeoPoint, PublicationTypes, YearSeries};
pub use dashboard::DashboardSnapshot;
pub use data::{DataError, DepartmentRecord, MetricsTable};
pub use metrics::{compute_metrics, MetricEntry, MetricValue};
pub use page::render_page;
pub use stream::{CardFrame, CardStream};
