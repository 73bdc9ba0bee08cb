//! Report data model.

pub mod feature;
mod lenient;
pub mod status;
pub mod status_count;
pub mod step;
pub mod suite;

// Re-export commonly used types
pub use feature::{Feature, Scenario, Tag, sanitize_id};
pub use status::Status;
pub use status_count::{CategoryCount, StatusCount};
pub use step::{Embedding, Hook, Step, StepCounts, StepResult};
pub use suite::Suite;
