//! Input normalizer: loads Cucumber JSON result files into features.
//!
//! A file that cannot be read or parsed contributes no features and a
//! warning; it never aborts the run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde_json::Value as JsonValue;
use tracing::info;

use crate::config::ReportOptions;
use crate::error::{AppError, AppResult, ParseError};
use crate::models::Feature;
use crate::services::diagnostics::WarningSink;

/// Metadata key holding the file creation time.
pub const REPORT_TIME_KEY: &str = "reportTime";

/// Contents of one successfully parsed result file.
#[derive(Debug)]
pub struct ParsedFile {
    /// Top-level JSON documents in file order
    pub documents: Vec<JsonValue>,
    /// Creation time of the file, if the platform reports one
    pub created: Option<SystemTime>,
}

/// List `*.json` files directly inside `dir`, sorted by name.
///
/// Entries that cannot be read are reported to `sink` and left out.
pub fn find_json_files(dir: &Path, sink: &dyn WarningSink) -> AppResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        AppError::FileSystem(format!(
            "There were issues reading JSON-files from '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                sink.warn(&format!(
                    "An entry of '{}' could not be read due to error: '{}'. It was skipped.",
                    dir.display(),
                    e
                ));
                continue;
            }
        };

        let is_json = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".json"));
        if is_json && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Split raw JSON text into its top-level documents.
///
/// A bare object becomes a single document; an array yields its items.
pub fn parse_documents(content: &str) -> Result<Vec<JsonValue>, ParseError> {
    match serde_json::from_str::<JsonValue>(content)? {
        JsonValue::Array(items) => Ok(items),
        object @ JsonValue::Object(_) => Ok(vec![object]),
        JsonValue::Null => Err(ParseError::Shape("null")),
        JsonValue::Bool(_) => Err(ParseError::Shape("a boolean")),
        JsonValue::Number(_) => Err(ParseError::Shape("a number")),
        JsonValue::String(_) => Err(ParseError::Shape("a string")),
    }
}

/// Read and parse one result file.
pub fn parse_result_file(path: &Path) -> Result<ParsedFile, ParseError> {
    let content = fs::read_to_string(path)?;
    let documents = parse_documents(&content)?;

    let created = fs::metadata(path)
        .ok()
        .and_then(|m| m.created().or_else(|_| m.modified()).ok());

    Ok(ParsedFile { documents, created })
}

/// Format a timestamp as `YYYY/MM/DD HH:mm:ss` in local time.
pub fn format_report_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y/%m/%d %H:%M:%S")
        .to_string()
}

/// Attach metadata and splice hook steps into one feature.
///
/// Keys already present in the feature's own metadata are kept; the
/// configured metadata fills in the rest. `report_time` is always applied.
pub fn normalize_feature(
    mut feature: Feature,
    options: &ReportOptions,
    report_time: Option<&str>,
) -> Feature {
    for (key, value) in &options.metadata {
        feature
            .metadata
            .entry(key.clone())
            .or_insert_with(|| JsonValue::String(value.clone()));
    }

    if options.display_report_time
        && let Some(time) = report_time
    {
        feature.metadata.insert(
            REPORT_TIME_KEY.to_string(),
            JsonValue::String(time.to_string()),
        );
    }

    if let Some(elements) = feature.elements.as_mut() {
        for scenario in elements.iter_mut() {
            scenario.splice_hooks();
        }
    }

    feature
}

/// Load every file into one feature list, in file order then document order.
pub fn collect_features(
    files: &[PathBuf],
    options: &ReportOptions,
    sink: &dyn WarningSink,
) -> Vec<Feature> {
    let mut features = Vec::new();

    for file in files {
        let parsed = match parse_result_file(file) {
            Ok(parsed) => parsed,
            Err(e) => {
                sink.warn(&format!(
                    "File: '{}' had no valid JSON data due to error: '{}'. CONTENT WAS NOT LOADED!",
                    file.display(),
                    e
                ));
                continue;
            }
        };

        let report_time = parsed.created.map(format_report_time);

        for (index, document) in parsed.documents.into_iter().enumerate() {
            if !document.is_object() {
                sink.warn(&format!(
                    "File: '{}' entry {} is not a JSON object and was skipped.",
                    file.display(),
                    index
                ));
                continue;
            }

            match serde_json::from_value::<Feature>(document) {
                Ok(feature) => {
                    features.push(normalize_feature(feature, options, report_time.as_deref()))
                }
                Err(e) => sink.warn(&format!(
                    "File: '{}' entry {} is not a valid feature due to error: '{}'. It was skipped.",
                    file.display(),
                    index,
                    e
                )),
            }
        }
    }

    features
}

/// Discover and load all result files of `options.json_dir`.
///
/// An empty directory yields an empty list and a warning.
pub fn collect_jsons(options: &ReportOptions, sink: &dyn WarningSink) -> AppResult<Vec<Feature>> {
    let files = find_json_files(&options.json_dir, sink)?;

    if files.is_empty() {
        sink.warn(&format!(
            "No JSON files found in '{}'. NO REPORT CAN BE CREATED!",
            options.json_dir.display()
        ));
        return Ok(Vec::new());
    }

    info!(
        "Found {} JSON file(s) in {:?}",
        files.len(),
        options.json_dir
    );

    Ok(collect_features(&files, options, sink))
}
