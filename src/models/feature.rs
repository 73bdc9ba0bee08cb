//! Feature and scenario models from Cucumber JSON.
//!
//! Input fields are deserialized leniently; derived fields are filled in by
//! the classifier and aggregators and never read from the input.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value as JsonValue};

use super::step::{Hook, Step, StepCounts};
use super::{Status, StatusCount, lenient};

/// Formatted duration of anything that did not run.
pub const ZERO_TIME: &str = "0s";

fn zero_time() -> String {
    ZERO_TIME.to_string()
}

/// Gherkin tag, written either as `{"name": ...}` or as a bare string.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "JsonValue")]
pub struct Tag {
    pub name: String,
}

impl From<JsonValue> for Tag {
    fn from(value: JsonValue) -> Self {
        let name = match value {
            JsonValue::Object(mut map) => map.remove("name").and_then(lenient::text),
            other => lenient::text(other),
        };
        Tag {
            name: name.unwrap_or_default(),
        }
    }
}

/// One scenario (or background) of a feature.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub keyword: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub line: Option<u64>,
    #[serde(default, rename = "type", deserialize_with = "lenient::opt_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub tags: Vec<Tag>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub steps: Vec<Step>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub before: Vec<Hook>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub after: Vec<Hook>,

    /// Steps per category
    #[serde(skip)]
    pub counts: StepCounts,
    /// Sum of step durations
    #[serde(skip)]
    pub duration: u64,
    #[serde(skip, default = "zero_time")]
    pub time: String,
    /// Category this scenario counts towards, `None` when no step was counted
    #[serde(skip)]
    pub status: Option<Status>,
}

impl Scenario {
    /// Splice `before` hooks in front of the steps and `after` hooks behind them.
    pub fn splice_hooks(&mut self) {
        let before = std::mem::take(&mut self.before);
        let after = std::mem::take(&mut self.after);

        if !before.is_empty() {
            let mut steps: Vec<Step> = before
                .into_iter()
                .map(|hook| Step::from_hook(hook, "Before"))
                .collect();
            steps.append(&mut self.steps);
            self.steps = steps;
        }

        self.steps
            .extend(after.into_iter().map(|hook| Step::from_hook(hook, "After")));
    }
}

/// One Cucumber feature, usually one `.feature` file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feature {
    /// Identifier as found in the input (string, number or absent)
    #[serde(default, rename = "id")]
    pub raw_id: Option<JsonValue>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub keyword: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub uri: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub line: Option<u64>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub elements: Option<Vec<Scenario>>,
    #[serde(default, deserialize_with = "lenient_metadata")]
    pub metadata: Map<String, JsonValue>,

    /// Sanitized identifier, also the name of the feature page
    #[serde(skip)]
    pub id: String,
    #[serde(skip)]
    pub status: Status,
    /// Sum of scenario durations
    #[serde(skip)]
    pub duration: u64,
    #[serde(skip, default = "zero_time")]
    pub time: String,
    /// Scenarios of this feature per category
    #[serde(skip)]
    pub scenario_counts: StatusCount,
}

impl Feature {
    /// Scenarios of this feature, empty when the input had none.
    pub fn scenarios(&self) -> &[Scenario] {
        self.elements.as_deref().unwrap_or_default()
    }

    /// Identifier text before sanitizing.
    ///
    /// Numbers are stringified; a missing id falls back to the feature name.
    pub fn raw_id_text(&self) -> String {
        match &self.raw_id {
            Some(JsonValue::String(s)) => s.clone(),
            Some(JsonValue::Null) | None if !self.name.is_empty() => self.name.clone(),
            Some(JsonValue::Null) | None => "undefined".to_string(),
            Some(other) => other.to_string(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == Status::Failed
    }

    pub fn is_ambiguous(&self) -> bool {
        self.status == Status::Ambiguous
    }

    pub fn is_not_defined(&self) -> bool {
        self.status == Status::NotDefined
    }

    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }

    pub fn is_skipped(&self) -> bool {
        self.status == Status::Skipped
    }
}

/// Accept metadata as an object or as a list of `{name, value}` entries.
///
/// Any other shape yields no metadata.
fn lenient_metadata<'de, D>(deserializer: D) -> Result<Map<String, JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let metadata = match Option::<JsonValue>::deserialize(deserializer)? {
        Some(JsonValue::Object(map)) => map,
        Some(JsonValue::Array(entries)) => entries
            .into_iter()
            .filter_map(|entry| {
                let name = entry.get("name")?.as_str()?.to_string();
                let value = entry.get("value").cloned().unwrap_or(JsonValue::Null);
                Some((name, value))
            })
            .collect(),
        _ => Map::new(),
    };
    Ok(metadata)
}

/// Replace every character outside `[a-zA-Z0-9-_]` with `-`.
pub fn sanitize_id(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}
