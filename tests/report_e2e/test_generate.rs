//! E2E tests: report generation from well-formed input.

use cucumber_report_lib::config::ReportOptions;
use cucumber_report_lib::error::AppError;
use cucumber_report_lib::models::Status;
use cucumber_report_lib::services::aggregate::aggregate_suite;
use cucumber_report_lib::services::collect::collect_jsons;
use cucumber_report_lib::services::{CollectingSink, generate_report_with};
use serde_json::{Value, json};

use super::test_helpers::*;

#[test]
fn test_writes_index_and_feature_pages() {
    let ws = Workspace::new();
    ws.write_json(
        "results.json",
        &json!([
            feature("Login / Logout Flow", vec![scenario("logs in", &["passed", "passed"])]),
            feature("checkout", vec![scenario("pays", &["passed", "failed"])])
        ]),
    );

    let sink = CollectingSink::new();
    let index = generate_report_with(&ws.options(), &sink).unwrap();

    assert_eq!(index, ws.output.join("index.html"));
    assert!(ws.output_exists("features/Login---Logout-Flow.html"));
    assert!(ws.output_exists("features/checkout.html"));
    assert!(sink.messages().is_empty());

    let html = ws.read_output("index.html");
    assert!(html.contains("features/Login---Logout-Flow.html"));
    assert!(html.contains("50.00"));

    let page = ws.read_output("features/checkout.html");
    assert!(page.contains("a failed step"));
}

#[test]
fn test_all_passed_counts() {
    let ws = Workspace::new();
    let n = 3;
    let m = 4;
    let features: Vec<Value> = (0..n)
        .map(|i| {
            let scenarios = (0..m)
                .map(|j| scenario(&format!("scenario {}", j), &["passed", "passed"]))
                .collect();
            feature(&format!("feature-{}", i), scenarios)
        })
        .collect();
    ws.write_json("all.json", &Value::Array(features));

    let sink = CollectingSink::new();
    let options = ws.options();
    let suite = aggregate_suite(collect_jsons(&options, &sink).unwrap(), &options, String::new());

    assert_eq!(suite.total_features_count.total, n);
    assert_eq!(suite.total_features_count.passed.count, n);
    assert_eq!(suite.total_scenarios_count.total, n * m);
    assert_eq!(suite.total_scenarios_count.passed.percentage, "100.00");
}

#[test]
fn test_files_are_read_in_name_order() {
    let ws = Workspace::new();
    ws.write_json("b.json", &json!(feature("second", vec![])));
    ws.write_json("a.json", &json!([feature("first", vec![])]));

    let sink = CollectingSink::new();
    let features = collect_jsons(&ws.options(), &sink).unwrap();
    let ids: Vec<String> = features.iter().map(|f| f.raw_id_text()).collect();
    assert_eq!(ids, vec!["first", "second"]);
}

#[test]
fn test_status_categories_across_features() {
    let ws = Workspace::new();
    ws.write_json(
        "mixed.json",
        &json!([
            feature("failing", vec![scenario("a", &["passed", "failed"]), scenario("b", &["pending"])]),
            feature("ambiguous", vec![scenario("a", &["ambiguous", "undefined"])]),
            feature("undefined", vec![scenario("a", &["undefined"]), scenario("b", &["passed"])]),
            feature("pending", vec![scenario("a", &["pending", "skipped"])]),
            feature("skipped", vec![scenario("a", &["skipped"]), scenario("b", &["skipped"])]),
            feature("partly-skipped", vec![scenario("a", &["skipped"]), scenario("b", &["passed"])]),
            json!({"id": "empty"})
        ]),
    );

    let sink = CollectingSink::new();
    let options = ws.options();
    let suite = aggregate_suite(collect_jsons(&options, &sink).unwrap(), &options, String::new());

    let statuses: Vec<Status> = suite.features.iter().map(|f| f.status).collect();
    assert_eq!(
        statuses,
        vec![
            Status::Failed,
            Status::Ambiguous,
            Status::NotDefined,
            Status::Pending,
            Status::Skipped,
            Status::Passed,
            Status::Passed,
        ]
    );

    let features = &suite.total_features_count;
    assert_eq!(features.total, 7);
    assert_eq!(features.categorized(), features.total);
    assert_eq!(features.passed.count, 2);
    assert_eq!(features.passed.percentage, "28.57");

    let scenarios = &suite.total_scenarios_count;
    assert_eq!(scenarios.total, 10);
    assert_eq!(scenarios.failed.count, 1);
    assert_eq!(scenarios.pending.count, 2);
    assert_eq!(scenarios.skipped.count, 3);
    assert_eq!(scenarios.categorized(), scenarios.total);
}

#[test]
fn test_report_time_and_metadata() {
    let ws = Workspace::new();
    ws.write_json("meta.json", &json!([feature("with-meta", vec![])]));

    let mut options = ws.options();
    options.display_report_time = true;
    options.custom_metadata = true;
    options.metadata.insert("cluster".to_string(), "kind".to_string());

    let sink = CollectingSink::new();
    generate_report_with(&options, &sink).unwrap();

    let html = ws.read_output("index.html");
    assert!(html.contains("reportTime"));
    assert!(html.contains("kind"));
}

#[test]
fn test_empty_input_directory_yields_empty_report() {
    let ws = Workspace::new();

    let sink = CollectingSink::new();
    let index = generate_report_with(&ws.options(), &sink).unwrap();

    assert!(index.exists());
    assert_eq!(sink.messages().len(), 1);
    assert!(sink.messages()[0].contains("NO REPORT CAN BE CREATED"));
}

#[test]
fn test_missing_input_directory_is_fatal() {
    let ws = Workspace::new();
    let options = ReportOptions::new(ws.input.join("missing"), &ws.output);

    let sink = CollectingSink::new();
    let result = generate_report_with(&options, &sink);
    assert!(matches!(result, Err(AppError::FileSystem(_))));
}
