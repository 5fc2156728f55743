//! Chart datasets and their Plotly figure specifications.
//!
//! Only the department bar chart depends on the [`MetricsTable`]; the
//! yearly trend, publication types and collaboration locations are fixed
//! sample data.

use crate::data::MetricsTable;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Plotly `Set3` qualitative palette
pub const SET3: [&str; 12] = [
    "rgb(141,211,199)",
    "rgb(255,255,179)",
    "rgb(190,186,218)",
    "rgb(251,128,114)",
    "rgb(128,177,211)",
    "rgb(253,180,98)",
    "rgb(179,222,105)",
    "rgb(252,205,229)",
    "rgb(217,217,217)",
    "rgb(188,128,189)",
    "rgb(204,235,197)",
    "rgb(255,237,111)",
];

/// Plotly `RdBu` sequential palette
pub const RDBU: [&str; 11] = [
    "rgb(103,0,31)",
    "rgb(178,24,43)",
    "rgb(214,96,77)",
    "rgb(244,165,130)",
    "rgb(253,219,199)",
    "rgb(247,247,247)",
    "rgb(209,229,240)",
    "rgb(146,197,222)",
    "rgb(67,147,195)",
    "rgb(33,102,172)",
    "rgb(5,48,97)",
];

const YEARS: [u16; 10] = [2015, 2016, 2017, 2018, 2019, 2020, 2021, 2022, 2023, 2024];
const PUBS_BY_YEAR: [u64; 10] = [40, 55, 68, 72, 90, 105, 115, 130, 142, 160];
const PUBLICATION_TYPES: [&str; 4] = ["Journal", "Conference", "Book Chapter", "Workshop"];
const TYPE_COUNTS: [u64; 4] = [250, 180, 40, 20];

/// Donut hole as a fraction of the radius
pub const DONUT_HOLE: f64 = 0.4;

/// Publications per department, one bar each
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentBars {
    pub departments: Vec<String>,
    pub publications: Vec<u64>,
}

impl DepartmentBars {
    pub fn from_table(table: &MetricsTable) -> Self {
        Self {
            departments: table.rows().iter().map(|r| r.category.clone()).collect(),
            publications: table.rows().iter().map(|r| r.publications).collect(),
        }
    }

    /// Color of the bar at `index`, cycling through `Set3`
    pub fn color(index: usize) -> &'static str {
        SET3[index % SET3.len()]
    }

    /// One trace per department so each gets its own legend entry
    pub fn figure(&self) -> Value {
        let traces: Vec<Value> = self
            .departments
            .iter()
            .zip(&self.publications)
            .enumerate()
            .map(|(i, (dept, pubs))| {
                json!({
                    "type": "bar",
                    "name": dept,
                    "x": [dept],
                    "y": [pubs],
                    "marker": { "color": Self::color(i) },
                    "hovertemplate": "Department=%{x}<br>Number of Publications=%{y}<extra></extra>",
                })
            })
            .collect();

        json!({
            "data": traces,
            "layout": {
                "title": { "text": "Publications per Department" },
                "xaxis": { "title": { "text": "Department" } },
                "yaxis": { "title": { "text": "Number of Publications" } },
                "legend": { "title": { "text": "Department" } },
                "barmode": "relative",
            },
        })
    }
}

/// Publications per year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSeries {
    pub years: Vec<u16>,
    pub publications: Vec<u64>,
}

impl Default for YearSeries {
    fn default() -> Self {
        Self {
            years: YEARS.to_vec(),
            publications: PUBS_BY_YEAR.to_vec(),
        }
    }
}

impl YearSeries {
    pub fn figure(&self) -> Value {
        json!({
            "data": [{
                "type": "scatter",
                "mode": "lines+markers",
                "x": self.years,
                "y": self.publications,
                "hovertemplate": "Year=%{x}<br>Publications=%{y}<extra></extra>",
            }],
            "layout": {
                "title": { "text": "Publications by Year" },
                "xaxis": { "title": { "text": "Year" } },
                "yaxis": { "title": { "text": "Publications" } },
            },
        })
    }
}

/// Publication counts by type, rendered as a donut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationTypes {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

impl Default for PublicationTypes {
    fn default() -> Self {
        Self {
            labels: PUBLICATION_TYPES.iter().map(|s| s.to_string()).collect(),
            counts: TYPE_COUNTS.to_vec(),
        }
    }
}

impl PublicationTypes {
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Share of each slice in percent
    pub fn percentages(&self) -> Vec<f64> {
        slice_percentages(&self.counts)
    }

    /// `label percent%` annotation per slice, one decimal place
    pub fn slice_labels(&self) -> Vec<String> {
        self.labels
            .iter()
            .zip(self.percentages())
            .map(|(label, pct)| format!("{} {:.1}%", label, pct))
            .collect()
    }

    pub fn figure(&self) -> Value {
        let colors: Vec<&str> = (0..self.labels.len())
            .map(|i| RDBU[i % RDBU.len()])
            .collect();

        json!({
            "data": [{
                "type": "pie",
                "labels": self.labels,
                "values": self.counts,
                "hole": DONUT_HOLE,
                "textposition": "inside",
                "textinfo": "percent+label",
                "marker": { "colors": colors },
            }],
            "layout": {
                "legend": { "tracegroupgap": 0 },
            },
        })
    }
}

/// Percent share of each count. An all-zero input yields all zeros.
pub fn slice_percentages(counts: &[u64]) -> Vec<f64> {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    counts
        .iter()
        .map(|c| *c as f64 * 100.0 / total as f64)
        .collect()
}

/// A labelled collaboration or conference location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub location: String,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64, location: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            location: location.into(),
        }
    }
}

/// The fixed collaboration map locations
pub fn collaboration_locations() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(31.3959, 75.5358, "NIT Jalandhar"),
        GeoPoint::new(28.6139, 77.2090, "Delhi"),
        GeoPoint::new(19.0760, 72.8777, "Mumbai"),
        GeoPoint::new(35.6895, 139.6917, "Tokyo"),
        GeoPoint::new(51.5074, -0.1278, "London"),
        GeoPoint::new(40.7128, -74.0060, "New York"),
    ]
}

/// World scatter of the given points, natural earth projection
pub fn geo_figure(points: &[GeoPoint]) -> Value {
    let lat: Vec<f64> = points.iter().map(|p| p.lat).collect();
    let lon: Vec<f64> = points.iter().map(|p| p.lon).collect();
    let names: Vec<&str> = points.iter().map(|p| p.location.as_str()).collect();

    json!({
        "data": [{
            "type": "scattergeo",
            "mode": "markers",
            "lat": lat,
            "lon": lon,
            "hovertext": names,
            "hovertemplate": "<b>%{hovertext}</b><br><br>lat=%{lat}<br>lon=%{lon}<extra></extra>",
        }],
        "layout": {
            "title": { "text": "Global Collaboration Map" },
            "geo": { "projection": { "type": "natural earth" } },
        },
    })
}
