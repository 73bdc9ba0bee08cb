//! Step, scenario and feature outcome categories.

use serde::{Deserialize, Serialize};

/// Outcome category of a step, scenario or feature.
///
/// Variants are declared in priority order: when a scenario or feature has
/// outcomes in several categories, the earliest one wins. Anything with no
/// other outcome is passed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Failed,
    Ambiguous,
    NotDefined,
    Pending,
    Skipped,
    #[default]
    Passed,
}

impl Status {
    /// All categories, highest priority first.
    pub const PRIORITY: [Status; 6] = [
        Status::Failed,
        Status::Ambiguous,
        Status::NotDefined,
        Status::Pending,
        Status::Skipped,
        Status::Passed,
    ];

    /// Convert to the Cucumber JSON status string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Failed => "failed",
            Self::Ambiguous => "ambiguous",
            Self::NotDefined => "undefined",
            Self::Pending => "pending",
            Self::Skipped => "skipped",
            Self::Passed => "passed",
        }
    }

    /// Parse a Cucumber JSON status string.
    ///
    /// Unknown statuses are treated as skipped.
    pub fn parse(s: &str) -> Self {
        match s {
            "passed" => Self::Passed,
            "failed" => Self::Failed,
            "ambiguous" => Self::Ambiguous,
            "pending" => Self::Pending,
            "undefined" | "not-defined" | "notDefined" => Self::NotDefined,
            _ => Self::Skipped,
        }
    }

    /// Human readable label for report pages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Failed => "Failed",
            Self::Ambiguous => "Ambiguous",
            Self::NotDefined => "Not defined",
            Self::Pending => "Pending",
            Self::Skipped => "Skipped",
            Self::Passed => "Passed",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
