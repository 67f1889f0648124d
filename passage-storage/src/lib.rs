//! # passage-storage
//!
//! SQLite persistence for progress records and the certificate cache.
//! Owns connection handling, pragmas, versioned migrations, and the
//! query modules; exposes [`StorageEngine`] implementing the repository
//! traits from `passage-core`.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use passage_core::errors::{PassageError, StorageError};

/// Map a low-level SQLite failure into the storage error domain.
pub fn to_storage_err(message: impl Into<String>) -> PassageError {
    StorageError::Sqlite {
        message: message.into(),
    }
    .into()
}
