//! Step/scenario classifier.

use crate::models::feature::ZERO_TIME;
use crate::models::{Scenario, StepCounts};

const NANOS_PER_MILLI: u64 = 1_000_000;

/// Format a duration as `m[m]s[s]`, dropping a zero minute part.
///
/// Durations are nanoseconds unless `duration_in_ms` is set. Minutes and
/// seconds are clock fields, so hours wrap away (`61m` renders as `1m0s`).
pub fn format_duration(duration_in_ms: bool, duration: u64) -> String {
    let millis = if duration_in_ms {
        duration
    } else {
        duration / NANOS_PER_MILLI
    };

    let minutes = (millis / 60_000) % 60;
    let seconds = (millis / 1_000) % 60;

    if minutes == 0 {
        format!("{}s", seconds)
    } else {
        format!("{}m{}s", minutes, seconds)
    }
}

/// Replace `\n` and `\r\n` with an HTML line break.
pub fn normalize_description(text: &str) -> String {
    text.replace("\r\n", "<br />").replace('\n', "<br />")
}

/// Count the steps of a scenario per category and total their duration.
///
/// Also formats step and scenario times, normalizes the description and
/// sets the scenario's dominant status.
pub fn classify_scenario(scenario: &mut Scenario, duration_in_ms: bool) {
    let mut counts = StepCounts::default();
    let mut duration = 0u64;

    for step in scenario.steps.iter_mut() {
        let Some(status) = step.counted_status() else {
            continue;
        };

        let step_duration = step.duration();
        if step_duration > 0 {
            duration = duration.saturating_add(step_duration);
            step.time = Some(format_duration(duration_in_ms, step_duration));
        }

        counts.record(status);
    }

    scenario.counts = counts;
    scenario.duration = duration;
    scenario.status = counts.dominant();
    scenario.time = if duration > 0 {
        format_duration(duration_in_ms, duration)
    } else {
        ZERO_TIME.to_string()
    };

    if let Some(description) = scenario.description.as_deref()
        && !description.is_empty()
    {
        scenario.description = Some(normalize_description(description));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use serde_json::json;

    fn scenario(steps: serde_json::Value) -> Scenario {
        let mut scenario: Scenario = serde_json::from_value(json!({ "steps": steps })).unwrap();
        scenario.splice_hooks();
        scenario
    }

    #[test]
    fn test_format_duration_nanoseconds() {
        assert_eq!(format_duration(false, 0), "0s");
        assert_eq!(format_duration(false, 500_000_000), "0s");
        assert_eq!(format_duration(false, 5_000_000_000), "5s");
        assert_eq!(format_duration(false, 65_000_000_000), "1m5s");
        assert_eq!(format_duration(false, 600_000_000_000), "10m0s");
    }

    #[test]
    fn test_format_duration_milliseconds() {
        assert_eq!(format_duration(true, 999), "0s");
        assert_eq!(format_duration(true, 5_000), "5s");
        assert_eq!(format_duration(true, 125_000), "2m5s");
        // Hours are not part of the format
        assert_eq!(format_duration(true, 3_661_000), "1m1s");
    }

    #[test]
    fn test_normalize_description() {
        assert_eq!(normalize_description("a\nb\r\nc"), "a<br />b<br />c");
        assert_eq!(normalize_description("no breaks"), "no breaks");
    }

    #[test]
    fn test_failed_step_wins() {
        let mut s = scenario(json!([
            {"result": {"status": "passed", "duration": 1}},
            {"result": {"status": "passed", "duration": 1}},
            {"result": {"status": "failed", "duration": 1}},
            {"result": {"status": "skipped"}}
        ]));
        classify_scenario(&mut s, false);

        assert_eq!(s.counts.passed, 2);
        assert_eq!(s.counts.failed, 1);
        assert_eq!(s.counts.skipped, 1);
        assert_eq!(s.status, Some(Status::Failed));
        assert_eq!(s.duration, 3);
    }

    #[test]
    fn test_counts_every_category() {
        let mut s = scenario(json!([
            {"result": {"status": "ambiguous"}},
            {"result": {"status": "undefined"}},
            {"result": {"status": "pending"}},
            {"result": {"status": "skipped"}},
            {"result": {"status": "passed"}},
            {"result": {"status": "mystery"}},
            {"name": "no result"}
        ]));
        classify_scenario(&mut s, false);

        assert_eq!(s.counts.ambiguous, 1);
        assert_eq!(s.counts.not_defined, 1);
        assert_eq!(s.counts.pending, 1);
        assert_eq!(s.counts.skipped, 2);
        assert_eq!(s.counts.passed, 1);
        assert_eq!(s.status, Some(Status::Ambiguous));
    }

    #[test]
    fn test_hooks_are_classified() {
        let mut s: Scenario = serde_json::from_value(json!({
            "steps": [{"result": {"status": "passed", "duration": 2_000_000_000u64}}],
            "after": [{"result": {"status": "failed", "duration": 1_000_000_000u64}}]
        }))
        .unwrap();
        s.splice_hooks();
        classify_scenario(&mut s, false);

        assert_eq!(s.status, Some(Status::Failed));
        assert_eq!(s.duration, 3_000_000_000);
        assert_eq!(s.time, "3s");
        assert_eq!(s.steps[1].time.as_deref(), Some("1s"));
    }

    #[test]
    fn test_huge_durations_saturate() {
        let mut s = scenario(json!([
            {"result": {"status": "passed", "duration": 1e30}},
            {"result": {"status": "passed", "duration": 1e30}}
        ]));
        classify_scenario(&mut s, false);
        assert_eq!(s.duration, u64::MAX);
        assert_eq!(s.status, Some(Status::Passed));
    }

    #[test]
    fn test_empty_scenario_has_no_status() {
        let mut s = scenario(json!([]));
        classify_scenario(&mut s, false);
        assert_eq!(s.status, None);
        assert_eq!(s.time, "0s");
        assert_eq!(s.counts, StepCounts::default());
    }

    #[test]
    fn test_description_line_breaks() {
        let mut s: Scenario =
            serde_json::from_value(json!({"description": "line one\nline two"})).unwrap();
        classify_scenario(&mut s, false);
        assert_eq!(s.description.as_deref(), Some("line one<br />line two"));
    }

    #[test]
    fn test_reclassify_resets_counters() {
        let mut s = scenario(json!([{"result": {"status": "passed", "duration": 10}}]));
        classify_scenario(&mut s, true);
        classify_scenario(&mut s, true);
        assert_eq!(s.counts.passed, 1);
        assert_eq!(s.duration, 10);
    }
}
