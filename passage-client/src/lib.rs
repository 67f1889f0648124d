//! # passage-client
//!
//! Everything that talks to the backend: the versioned wire protocol,
//! the REST endpoint map, the offline queue, and the [`Replicator`] that
//! pushes progress snapshots best-effort. The reqwest transport is gated
//! behind the `remote` feature; everything above it works against the
//! [`ProgressTransport`](passage_core::traits::ProgressTransport) trait.

pub mod endpoints;
pub mod offline;
pub mod protocol;
pub mod replicator;
pub mod transport;

pub use offline::OfflineQueue;
pub use replicator::{ReplicationOutcome, Replicator};
#[cfg(feature = "remote")]
pub use transport::http::HttpTransport;
