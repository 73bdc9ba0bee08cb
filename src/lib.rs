//! Cucumber HTML report library.
//!
//! Loads Cucumber JSON result files, classifies every scenario and feature
//! into one status category, rolls up counts and percentages, and renders
//! a static multi-page HTML report.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
