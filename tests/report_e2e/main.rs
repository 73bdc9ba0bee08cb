//! Report generation E2E test suite.
//!
//! Drives the full pipeline against fixture files in temporary directories.
//!
//! Run with: cargo test --test report_e2e

mod test_helpers;

mod test_generate;
mod test_partial_failure;
