//! KPI metric entries shown as cards at the top of the dashboard.
//!
//! Five entries are built from the [`MetricsTable`]: three aggregates
//! (publication sum, citation sum, mean h-index) and two fixed values.

use crate::data::MetricsTable;
use serde::{Deserialize, Serialize};

pub const TOTAL_PUBLICATIONS: &str = "📚 Total Publications";
pub const TOTAL_CITATIONS: &str = "🧾 Total Citations";
pub const AVERAGE_H_INDEX: &str = "📈 Average H-index";
pub const TOP_RESEARCH_AREA: &str = "🔬 Top Research Area";
pub const ACTIVE_COLLABORATIONS: &str = "🤝 Active Collaborations";

/// Fixed value of the top research area card
pub const TOP_RESEARCH_AREA_VALUE: &str = "AI & IoT";

/// Fixed value of the active collaborations card
pub const ACTIVE_COLLABORATIONS_VALUE: u64 = 32;

/// Value carried by a metric card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    Integer(u64),
    Float(f64),
    Text(String),
}

impl MetricValue {
    /// Whether the card counts up to its value
    pub fn is_animated(&self) -> bool {
        !matches!(self, MetricValue::Text(_))
    }
}

/// One KPI card: label, value and background image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricEntry {
    pub label: String,
    pub value: MetricValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl MetricEntry {
    pub fn new(label: impl Into<String>, value: MetricValue) -> Self {
        let label = label.into();
        let image_url = background_for(&label).map(str::to_string);
        Self {
            label,
            value,
            image_url,
        }
    }
}

/// Background image for one of the five card labels
pub fn background_for(label: &str) -> Option<&'static str> {
    let url = match label {
        TOTAL_PUBLICATIONS => "https://images.unsplash.com/photo-1512820790803-83ca734da794",
        TOTAL_CITATIONS => "https://www.shutterstock.com/image-vector/luxury-gold-text-quote-symbol-600nw-2244631733.jpg",
        AVERAGE_H_INDEX => "https://scientific-publishing.webshop.elsevier.com/wp-content/uploads/2020/04/What-is-a-good-index.jpg",
        TOP_RESEARCH_AREA => "https://media.istockphoto.com/id/861104740/vector/health-care-icon-pattern-medical-innovation-concept-background-design.jpg?s=612x612&w=0&k=20&c=2T7h9lyPZLtrjmFn1xAfqxvziavz7520ML7UKlx5RhE=",
        ACTIVE_COLLABORATIONS => "https://images.unsplash.com/photo-1507537297725-24a1c029d3ca",
        _ => return None,
    };
    Some(url)
}

/// Compute the five KPI entries in display order
pub fn compute_metrics(table: &MetricsTable) -> Vec<MetricEntry> {
    vec![
        MetricEntry::new(
            TOTAL_PUBLICATIONS,
            MetricValue::Integer(table.total_publications()),
        ),
        MetricEntry::new(
            TOTAL_CITATIONS,
            MetricValue::Integer(table.total_citations()),
        ),
        MetricEntry::new(AVERAGE_H_INDEX, MetricValue::Float(table.mean_h_index())),
        MetricEntry::new(
            TOP_RESEARCH_AREA,
            MetricValue::Text(TOP_RESEARCH_AREA_VALUE.to_string()),
        ),
        MetricEntry::new(
            ACTIVE_COLLABORATIONS,
            MetricValue::Integer(ACTIVE_COLLABORATIONS_VALUE),
        ),
    ]
}
