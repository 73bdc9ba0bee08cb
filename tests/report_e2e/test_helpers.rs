//! Shared test helpers for report E2E tests.

use std::fs;
use std::path::PathBuf;

use cucumber_report_lib::config::ReportOptions;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Input and output directories of one test run.
pub struct Workspace {
    _root: TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("json");
        let output = root.path().join("report");
        fs::create_dir_all(&input).unwrap();
        Workspace {
            _root: root,
            input,
            output,
        }
    }

    /// Write a result file into the input directory.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.input.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn write_json(&self, name: &str, value: &Value) -> PathBuf {
        self.write(name, &serde_json::to_string(value).unwrap())
    }

    pub fn options(&self) -> ReportOptions {
        ReportOptions::new(&self.input, &self.output)
    }

    pub fn read_output(&self, relative: &str) -> String {
        fs::read_to_string(self.output.join(relative)).unwrap()
    }

    pub fn output_exists(&self, relative: &str) -> bool {
        self.output.join(relative).exists()
    }
}

/// A scenario whose steps have the given statuses, 1ms each.
pub fn scenario(name: &str, statuses: &[&str]) -> Value {
    let steps: Vec<Value> = statuses
        .iter()
        .map(|s| {
            json!({
                "keyword": "Given ",
                "name": format!("a {} step", s),
                "result": {"status": s, "duration": 1_000_000}
            })
        })
        .collect();

    json!({"keyword": "Scenario", "name": name, "type": "scenario", "steps": steps})
}

/// A feature with the given scenarios.
pub fn feature(id: &str, scenarios: Vec<Value>) -> Value {
    json!({
        "id": id,
        "keyword": "Feature",
        "name": id,
        "uri": format!("features/{}.feature", id),
        "elements": scenarios
    })
}
