//! Application configuration loaded from environment variables.

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Default values for optional settings.
pub mod defaults {
    pub const NOT_AVAILABLE: &str = "N/A";
    pub const PAGE_FOOTER: &str = "<p><a href=\"https://github.com/bfenetworks/ingress-bfe/tree/develop/test/e2e\">BFE ingress controller e2e test</a></p>";
}

/// Ingress controller under test, shown in the report header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngressInfo {
    pub controller: String,
    pub version: String,
}

impl Default for IngressInfo {
    fn default() -> Self {
        IngressInfo {
            controller: defaults::NOT_AVAILABLE.to_string(),
            version: defaults::NOT_AVAILABLE.to_string(),
        }
    }
}

/// Options consumed by the report generator.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Directory holding the Cucumber JSON result files
    pub json_dir: PathBuf,
    /// Directory the HTML report is written to
    pub report_path: PathBuf,
    /// Metadata merged into every feature
    pub metadata: BTreeMap<String, String>,
    /// Add a `reportTime` metadata entry from each file's creation time
    pub display_report_time: bool,
    /// Durations in the JSON are milliseconds instead of nanoseconds
    pub duration_in_ms: bool,
    /// Show feature metadata as a column of the overview table
    pub custom_metadata: bool,
    /// Free-form `{title, data: [{label, value}]}` block for the overview page
    pub custom_data: Option<serde_json::Value>,
    /// Raw HTML footer, `None` to omit it
    pub page_footer: Option<String>,
    pub build_time: String,
    pub ingress: IngressInfo,
    /// Stylesheet replacing the built-in one
    pub override_style: Option<PathBuf>,
    /// Stylesheet appended after the base one
    pub custom_style: Option<PathBuf>,
}

impl ReportOptions {
    /// Options with every optional setting at its default.
    pub fn new(json_dir: impl Into<PathBuf>, report_path: impl Into<PathBuf>) -> Self {
        ReportOptions {
            json_dir: json_dir.into(),
            report_path: report_path.into(),
            metadata: BTreeMap::new(),
            display_report_time: false,
            duration_in_ms: false,
            custom_metadata: false,
            custom_data: None,
            page_footer: None,
            build_time: defaults::NOT_AVAILABLE.to_string(),
            ingress: IngressInfo::default(),
            override_style: None,
            custom_style: None,
        }
    }

    /// Reject options that cannot produce a report.
    pub fn validate(&self) -> AppResult<()> {
        if self.json_dir.as_os_str().is_empty() {
            return Err(AppError::InvalidInput(
                "A path which holds the JSON files should be provided.".to_string(),
            ));
        }

        if self.report_path.as_os_str().is_empty() {
            return Err(AppError::InvalidInput(
                "An output path for the reports should be defined, no path was provided."
                    .to_string(),
            ));
        }

        Ok(())
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub report: ReportOptions,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `INPUT_DIRECTORY`: Directory with Cucumber JSON files - REQUIRED
    /// - `OUTPUT_DIRECTORY`: Report destination - REQUIRED
    /// - `INGRESS_CONTROLLER`: Controller name (default: N/A)
    /// - `CONTROLLER_VERSION`: Controller version (default: N/A)
    /// - `BUILD`: Build time shown in the header (default: N/A)
    /// - `PAGE_FOOTER`: Raw HTML footer, `false` or empty disables it
    /// - `DISPLAY_REPORT_TIME`: Add per-file report time to metadata (default: false)
    /// - `DURATION_IN_MS`: Treat durations as milliseconds (default: false)
    /// - `REPORT_METADATA`: `key=value` pairs separated by commas
    /// - `OVERRIDE_STYLE`: Stylesheet replacing the built-in one
    /// - `CUSTOM_STYLE`: Stylesheet appended to the built-in one
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let json_dir = lookup("INPUT_DIRECTORY")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingEnvVar("INPUT_DIRECTORY"))?;
        let report_path = lookup("OUTPUT_DIRECTORY")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingEnvVar("OUTPUT_DIRECTORY"))?;

        let mut report = ReportOptions::new(json_dir, report_path);

        let or_not_available = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| defaults::NOT_AVAILABLE.to_string())
        };
        report.ingress = IngressInfo {
            controller: or_not_available("INGRESS_CONTROLLER"),
            version: or_not_available("CONTROLLER_VERSION"),
        };
        report.build_time = or_not_available("BUILD");

        report.page_footer = match lookup("PAGE_FOOTER") {
            None => Some(defaults::PAGE_FOOTER.to_string()),
            Some(v) if v.is_empty() || v.eq_ignore_ascii_case("false") => None,
            Some(v) => Some(v),
        };

        if let Some(v) = lookup("DISPLAY_REPORT_TIME") {
            report.display_report_time = parse_bool(&v).ok_or(ConfigError::InvalidValue(
                "DISPLAY_REPORT_TIME must be true or false",
            ))?;
        }

        if let Some(v) = lookup("DURATION_IN_MS") {
            report.duration_in_ms = parse_bool(&v).ok_or(ConfigError::InvalidValue(
                "DURATION_IN_MS must be true or false",
            ))?;
        }

        if let Some(v) = lookup("REPORT_METADATA") {
            report.metadata = parse_metadata(&v).ok_or(ConfigError::InvalidValue(
                "REPORT_METADATA must be comma separated key=value pairs",
            ))?;
        }

        report.override_style = lookup("OVERRIDE_STYLE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        report.custom_style = lookup("CUSTOM_STYLE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Config { report })
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn parse_metadata(s: &str) -> Option<BTreeMap<String, String>> {
    let mut metadata = BTreeMap::new();

    for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        metadata.insert(key.to_string(), value.trim().to_string());
    }

    Some(metadata)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),
}
