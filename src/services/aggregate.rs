//! Feature and suite aggregation.
//!
//! Every scenario lands in exactly one category (its dominant step status)
//! and is counted once for its feature and once for the suite. Every feature
//! lands in exactly one category as well, counted once for the suite.

use chrono::Local;
use tracing::info;

use crate::config::ReportOptions;
use crate::models::feature::ZERO_TIME;
use crate::models::{Feature, Status, StatusCount, Suite, sanitize_id};
use crate::services::classify::{classify_scenario, format_duration};

/// Suite-wide counters, fed one scenario or feature at a time.
#[derive(Debug, Default)]
pub struct SuiteCounters {
    features: StatusCount,
    scenarios: StatusCount,
    duration: u64,
}

impl SuiteCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_scenario(&mut self, status: Status) {
        self.scenarios.record(status);
    }

    pub fn record_feature(&mut self, feature: &Feature) {
        self.features.record(feature.status);
        self.duration = self.duration.saturating_add(feature.duration);
    }
}

/// Category of a feature from its per-scenario counts.
///
/// Failed, ambiguous, not defined and pending win as soon as one scenario
/// has them. Skipped needs every counted scenario to be skipped; anything
/// else is passed.
pub fn feature_status(counts: &StatusCount) -> Status {
    [
        Status::Failed,
        Status::Ambiguous,
        Status::NotDefined,
        Status::Pending,
    ]
    .into_iter()
    .find(|s| counts.count(*s) > 0)
    .unwrap_or(if counts.total == counts.skipped.count {
        Status::Skipped
    } else {
        Status::Passed
    })
}

/// Classify every scenario of a feature and roll the results up.
///
/// A feature without scenarios keeps its zeroed state and counts as passed.
pub fn aggregate_feature(feature: &mut Feature, suite: &mut SuiteCounters, duration_in_ms: bool) {
    feature.id = sanitize_id(&feature.raw_id_text());
    feature.status = Status::Passed;
    feature.duration = 0;
    feature.time = ZERO_TIME.to_string();
    feature.scenario_counts = StatusCount::new();

    let Some(elements) = feature.elements.as_mut().filter(|e| !e.is_empty()) else {
        return;
    };

    let mut counts = StatusCount::new();
    let mut duration = 0u64;

    for scenario in elements.iter_mut() {
        classify_scenario(scenario, duration_in_ms);
        duration = duration.saturating_add(scenario.duration);

        if let Some(status) = scenario.status {
            counts.record(status);
            suite.record_scenario(status);
        }
    }

    feature.status = feature_status(&counts);
    feature.duration = duration;
    if duration > 0 {
        feature.time = format_duration(duration_in_ms, duration);
    }
    feature.scenario_counts = counts.with_percentages();
}

/// Aggregate all features into a suite ready for rendering.
pub fn aggregate_suite(mut features: Vec<Feature>, options: &ReportOptions, style: String) -> Suite {
    let mut counters = SuiteCounters::new();

    for feature in features.iter_mut() {
        aggregate_feature(feature, &mut counters, options.duration_in_ms);
        counters.record_feature(feature);
    }

    let SuiteCounters {
        features: total_features_count,
        scenarios: total_scenarios_count,
        duration: total_duration,
    } = counters;

    info!(
        "Aggregated {} feature(s), {} scenario(s)",
        total_features_count.total, total_scenarios_count.total
    );

    Suite {
        features,
        total_features_count: total_features_count.with_percentages(),
        total_scenarios_count: total_scenarios_count.with_percentages(),
        total_duration,
        total_time: format_duration(options.duration_in_ms, total_duration),
        style,
        duration_in_ms: options.duration_in_ms,
        custom_metadata: options.custom_metadata,
        custom_data: options.custom_data.clone(),
        page_footer: options.page_footer.clone(),
        build_time: options.build_time.clone(),
        ingress: options.ingress.clone(),
        generated_at: Local::now(),
    }
}
