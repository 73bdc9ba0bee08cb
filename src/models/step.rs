//! Step and hook models from Cucumber JSON.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{Status, lenient};

/// Location shown for hooks that do not report one.
pub const UNKNOWN_LOCATION: &str = "can not be determined";

/// Execution result of a step or hook.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepResult {
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    /// Nanoseconds, or milliseconds when the report is configured for it
    #[serde(default, deserialize_with = "lenient::duration")]
    pub duration: u64,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub error_message: Option<String>,
}

impl StepResult {
    pub fn status(&self) -> Status {
        Status::parse(&self.status)
    }
}

/// Glue code location a step was matched to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepMatch {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub location: Option<String>,
}

/// Attachment produced while running a step or hook.
#[derive(Debug, Clone, Deserialize)]
pub struct Embedding {
    #[serde(default, alias = "mimeType", deserialize_with = "lenient::string")]
    pub mime_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub data: String,
}

/// Doc string argument of a step.
#[derive(Debug, Clone, Deserialize)]
pub struct DocString {
    #[serde(default, deserialize_with = "lenient::string")]
    pub value: String,
}

/// Data table row argument of a step.
#[derive(Debug, Clone, Deserialize)]
pub struct DataRow {
    #[serde(default, deserialize_with = "lenient::strings")]
    pub cells: Vec<String>,
}

/// A `before` / `after` hook attached to a scenario.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hook {
    #[serde(default)]
    pub result: Option<StepResult>,
    #[serde(default, rename = "match")]
    pub step_match: Option<StepMatch>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub embeddings: Vec<Embedding>,
}

/// A Given/When/Then step, or a hook spliced into the step list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Step {
    #[serde(default, deserialize_with = "lenient::string")]
    pub keyword: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub line: Option<u64>,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub hidden: bool,
    #[serde(default)]
    pub result: Option<StepResult>,
    #[serde(default, rename = "match")]
    pub step_match: Option<StepMatch>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub embeddings: Vec<Embedding>,
    #[serde(default)]
    pub doc_string: Option<DocString>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub rows: Vec<DataRow>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub output: Vec<JsonValue>,

    /// Formatted duration, set when the step has one
    #[serde(skip)]
    pub time: Option<String>,
}

impl Step {
    /// Turn a hook into a step labelled with `keyword` (`Before` / `After`).
    pub fn from_hook(hook: Hook, keyword: &str) -> Self {
        let location = hook
            .step_match
            .and_then(|m| m.location)
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

        Step {
            keyword: keyword.to_string(),
            name: "Hook".to_string(),
            result: hook.result,
            step_match: Some(StepMatch {
                location: Some(location),
            }),
            embeddings: hook.embeddings,
            ..Step::default()
        }
    }

    /// Category this step counts towards, `None` when it is not counted.
    ///
    /// Steps without a result and hidden passing steps are not counted.
    pub fn counted_status(&self) -> Option<Status> {
        let result = self.result.as_ref()?;
        let status = result.status();
        if self.hidden && status == Status::Passed {
            return None;
        }
        Some(status)
    }

    pub fn duration(&self) -> u64 {
        self.result.as_ref().map(|r| r.duration).unwrap_or(0)
    }
}

/// Number of steps per category within one scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepCounts {
    pub passed: u64,
    pub failed: u64,
    pub not_defined: u64,
    pub skipped: u64,
    pub pending: u64,
    pub ambiguous: u64,
}

impl StepCounts {
    pub fn record(&mut self, status: Status) {
        match status {
            Status::Passed => self.passed += 1,
            Status::Failed => self.failed += 1,
            Status::NotDefined => self.not_defined += 1,
            Status::Skipped => self.skipped += 1,
            Status::Pending => self.pending += 1,
            Status::Ambiguous => self.ambiguous += 1,
        }
    }

    pub fn get(&self, status: Status) -> u64 {
        match status {
            Status::Passed => self.passed,
            Status::Failed => self.failed,
            Status::NotDefined => self.not_defined,
            Status::Skipped => self.skipped,
            Status::Pending => self.pending,
            Status::Ambiguous => self.ambiguous,
        }
    }

    /// Highest-priority category with at least one step.
    pub fn dominant(&self) -> Option<Status> {
        Status::PRIORITY.into_iter().find(|s| self.get(*s) > 0)
    }
}
