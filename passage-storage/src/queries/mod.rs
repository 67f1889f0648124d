//! Query modules, one per concern.

pub mod certificate_cache;
pub mod progress_crud;
