//! Report generation pipeline: collect, aggregate, render, write.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ReportOptions;
use crate::error::{AppError, AppResult};
use crate::models::Suite;
use crate::services::aggregate::aggregate_suite;
use crate::services::collect::collect_jsons;
use crate::services::diagnostics::{TracingSink, WarningSink};
use crate::services::render::{
    DEFAULT_STYLE, FEATURE_FOLDER, INDEX_HTML, render_feature, render_index,
};

/// Build the stylesheet from the built-in one and the configured overrides.
///
/// An unreadable override falls back to the built-in stylesheet; an
/// unreadable custom stylesheet is left out.
pub fn load_style(options: &ReportOptions, sink: &dyn WarningSink) -> String {
    let mut style = match &options.override_style {
        Some(path) => fs::read_to_string(path).unwrap_or_else(|e| {
            sink.warn(&format!(
                "Override stylesheet: '{}' could not be loaded due to '{}'. The default will be loaded.",
                path.display(),
                e
            ));
            DEFAULT_STYLE.to_string()
        }),
        None => DEFAULT_STYLE.to_string(),
    };

    if let Some(path) = &options.custom_style {
        match fs::read_to_string(path) {
            Ok(custom) => style.push_str(&custom),
            Err(e) => sink.warn(&format!(
                "Custom stylesheet: '{}' could not be loaded due to '{}'.",
                path.display(),
                e
            )),
        }
    }

    style
}

/// Create the report folder and its `features` sub folder.
pub fn create_report_folders(report_path: &Path) -> AppResult<()> {
    fs::create_dir_all(report_path.join(FEATURE_FOLDER)).map_err(|e| {
        AppError::FileSystem(format!(
            "Failed to create report folder '{}': {}",
            report_path.display(),
            e
        ))
    })
}

fn write_page(path: &Path, html: &str) -> AppResult<()> {
    fs::write(path, html).map_err(|e| {
        AppError::FileSystem(format!("Failed to write '{}': {}", path.display(), e))
    })
}

/// Write the overview page and one page per feature.
pub fn write_report(suite: &Suite, report_path: &Path) -> AppResult<PathBuf> {
    let index = report_path.join(INDEX_HTML);
    write_page(&index, &render_index(suite))?;

    let features_dir = report_path.join(FEATURE_FOLDER);
    for feature in &suite.features {
        let page = features_dir.join(format!("{}.html", feature.id));
        write_page(&page, &render_feature(suite, feature))?;
    }

    Ok(index)
}

/// Generate the report, logging input warnings through `tracing`.
///
/// Returns the path of the written overview page.
pub fn generate_report(options: &ReportOptions) -> AppResult<PathBuf> {
    generate_report_with(options, &TracingSink)
}

/// Generate the report, sending input warnings to `sink`.
pub fn generate_report_with(options: &ReportOptions, sink: &dyn WarningSink) -> AppResult<PathBuf> {
    options.validate()?;

    let style = load_style(options, sink);
    create_report_folders(&options.report_path)?;

    let features = collect_jsons(options, sink)?;
    let suite = aggregate_suite(features, options, style);
    let index = write_report(&suite, &options.report_path)?;

    info!(
        "Cucumber HTML report generated in: {}",
        index.display()
    );

    Ok(index)
}
