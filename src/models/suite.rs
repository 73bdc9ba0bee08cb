//! Suite model: the fully aggregated report handed to the renderer.

use chrono::{DateTime, Local};

use super::{Feature, StatusCount};
use crate::config::IngressInfo;

/// Everything a report page needs. Built once per run and never mutated
/// after aggregation.
#[derive(Debug, Clone)]
pub struct Suite {
    pub features: Vec<Feature>,
    /// Features per category
    pub total_features_count: StatusCount,
    /// Scenarios per category across all features
    pub total_scenarios_count: StatusCount,
    /// Sum of feature durations
    pub total_duration: u64,
    /// Formatted `total_duration`
    pub total_time: String,
    /// Stylesheet inlined into every page
    pub style: String,
    pub duration_in_ms: bool,
    pub custom_metadata: bool,
    pub custom_data: Option<serde_json::Value>,
    pub page_footer: Option<String>,
    pub build_time: String,
    pub ingress: IngressInfo,
    pub generated_at: DateTime<Local>,
}
