//! Trait seams between the engine and its collaborators.

mod repository;
mod transport;

pub use repository::{CertificateCache, ProgressRepository};
pub use transport::ProgressTransport;
