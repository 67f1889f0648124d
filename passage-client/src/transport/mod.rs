//! Transport implementations for the `ProgressTransport` trait.
//! HTTP lives behind the `remote` feature; tests use mocks.

#[cfg(feature = "remote")]
pub mod http;
