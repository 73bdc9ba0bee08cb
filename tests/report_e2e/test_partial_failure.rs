//! E2E tests: malformed input is skipped without aborting the run.

use cucumber_report_lib::services::aggregate::aggregate_suite;
use cucumber_report_lib::services::collect::collect_jsons;
use cucumber_report_lib::services::{CollectingSink, generate_report_with};
use serde_json::json;

use super::test_helpers::*;

#[test]
fn test_malformed_file_among_valid_files() {
    let ws = Workspace::new();
    ws.write_json("a.json", &json!([feature("valid-a", vec![scenario("s", &["passed"])])]));
    ws.write("b.json", "{\"id\": \"truncated\", \"elements\": [");
    ws.write_json("c.json", &json!(feature("valid-c", vec![scenario("s", &["failed"])])));

    let sink = CollectingSink::new();
    let options = ws.options();
    let suite = aggregate_suite(collect_jsons(&options, &sink).unwrap(), &options, String::new());

    let ids: Vec<&str> = suite.features.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["valid-a", "valid-c"]);
    assert_eq!(suite.total_features_count.total, 2);

    let warnings = sink.messages();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("b.json"));
    assert!(warnings[0].contains("CONTENT WAS NOT LOADED"));
}

#[test]
fn test_empty_file_is_skipped() {
    let ws = Workspace::new();
    ws.write("empty.json", "");
    ws.write_json("ok.json", &json!([feature("ok", vec![scenario("s", &["passed"])])]));

    let sink = CollectingSink::new();
    let index = generate_report_with(&ws.options(), &sink).unwrap();

    assert!(index.exists());
    assert!(ws.output_exists("features/ok.html"));
    assert_eq!(sink.messages().len(), 1);
}

#[test]
fn test_invalid_feature_shape_is_skipped() {
    let ws = Workspace::new();
    ws.write_json(
        "shapes.json",
        &json!([
            {"id": "bad", "elements": "not a list"},
            "just a string",
            feature("good", vec![scenario("s", &["passed"])])
        ]),
    );

    let sink = CollectingSink::new();
    let features = collect_jsons(&ws.options(), &sink).unwrap();

    assert_eq!(features.len(), 1);
    assert_eq!(features[0].raw_id_text(), "good");
    assert_eq!(sink.messages().len(), 2);
}
