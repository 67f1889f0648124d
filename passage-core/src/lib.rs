//! # passage-core
//!
//! Foundation crate for the Passage learning-progress engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PassageConfig;
pub use errors::{PassageError, PassageResult};
pub use models::{
    Certificate, CourseConfig, ProgressRecord, StageAccess, StageId, StageStatus, Submission,
};
