//! Report generation services.

pub mod aggregate;
pub mod classify;
pub mod collect;
pub mod diagnostics;
pub mod render;
pub mod report;

pub use diagnostics::{CollectingSink, TracingSink, WarningSink};
pub use report::{generate_report, generate_report_with};
