//! Dashboard snapshot: everything one render pass shows, fully computed.

use crate::charts::{
    collaboration_locations, geo_figure, DepartmentBars, GeoPoint, PublicationTypes, YearSeries,
};
use crate::data::{DataError, MetricsTable};
use crate::metrics::{compute_metrics, MetricEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const PAGE_TITLE: &str = "Research Dashboard | NIT Jalandhar";
pub const HEADING: &str = "🏠 Research Overview Dashboard";
pub const SUBHEADING: &str = "A summary of NIT Jalandhar’s Research Performance and Collaborations";
pub const TRENDS_HEADING: &str = "📊 Research Trends & Department Insights";
pub const TYPES_HEADING: &str = "📚 Distribution by Publication Type";
pub const MAP_HEADING: &str = "🗺️ Research Collaborations & Conference Locations";
pub const CAPTION: &str = "© 2025 NIT Jalandhar | Developed for Data Visualization Course Project";

/// Computed content of a dashboard page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub metrics: Vec<MetricEntry>,
    pub departments: DepartmentBars,
    pub yearly: YearSeries,
    pub publication_types: PublicationTypes,
    pub locations: Vec<GeoPoint>,
}

impl DashboardSnapshot {
    /// Build from an already loaded table
    pub fn from_table(table: &MetricsTable) -> Self {
        Self {
            generated_at: Utc::now(),
            metrics: compute_metrics(table),
            departments: DepartmentBars::from_table(table),
            yearly: YearSeries::default(),
            publication_types: PublicationTypes::default(),
            locations: collaboration_locations(),
        }
    }

    /// Read the metrics table and build the snapshot.
    /// Fails before anything is computed when the table can't be loaded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let table = MetricsTable::from_path(path)?;
        Ok(Self::from_table(&table))
    }

    /// Plotly figures keyed by chart id, in page order
    pub fn figures(&self) -> serde_json::Value {
        serde_json::json!({
            "bar": self.departments.figure(),
            "line": self.yearly.figure(),
            "donut": self.publication_types.figure(),
            "map": geo_figure(&self.locations),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DepartmentRecord;
    use crate::metrics::MetricValue;

    #[test]
    fn test_snapshot_from_table() {
        let table = MetricsTable::from_rows(vec![
            DepartmentRecord::new("CSE", 100, 500, 20.0),
            DepartmentRecord::new("ECE", 50, 300, 15.0),
        ])
        .unwrap();
        let snapshot = DashboardSnapshot::from_table(&table);

        assert_eq!(snapshot.metrics.len(), 5);
        assert_eq!(snapshot.metrics[0].value, MetricValue::Integer(150));
        assert_eq!(snapshot.departments.departments.len(), 2);
        assert_eq!(snapshot.locations.len(), 6);
    }

    #[test]
    fn test_locations_do_not_depend_on_table() {
        let small = MetricsTable::from_rows(vec![DepartmentRecord::new("X", 1, 1, 1.0)]).unwrap();
        let snapshot = DashboardSnapshot::from_table(&small);
        let names: Vec<&str> = snapshot.locations.iter().map(|p| p.location.as_str()).collect();
        assert_eq!(
            names,
            vec!["NIT Jalandhar", "Delhi", "Mumbai", "Tokyo", "London", "New York"]
        );
    }

    #[test]
    fn test_figures_keys() {
        let table = MetricsTable::from_rows(vec![DepartmentRecord::new("X", 1, 1, 1.0)]).unwrap();
        let figures = DashboardSnapshot::from_table(&table).figures();
        for key in ["bar", "line", "donut", "map"] {
            assert!(figures[key]["data"].is_array(), "{key}");
        }
    }

    #[test]
    fn test_load_missing_file() {
        assert!(DashboardSnapshot::load("missing/h-index.csv").is_err());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let table = MetricsTable::from_rows(vec![DepartmentRecord::new("X", 3, 9, 2.5)]).unwrap();
        let snapshot = DashboardSnapshot::from_table(&table);
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: DashboardSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.metrics, snapshot.metrics);
    }
}
