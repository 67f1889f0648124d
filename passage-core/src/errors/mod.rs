//! Error taxonomy: one enum per failure domain, aggregated into [`PassageError`].

mod api_error;
mod certificate_error;
mod gate_error;
mod storage_error;

pub use api_error::ApiError;
pub use certificate_error::CertificateError;
pub use gate_error::GateError;
pub use storage_error::StorageError;

/// Result alias used across the workspace.
pub type PassageResult<T> = Result<T, PassageError>;

/// Top-level error. Each subsystem error converts via `From`.
#[derive(Debug, thiserror::Error)]
pub enum PassageError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("api error: {0}")]
    Api(#[from] ApiError),

    #[error("gate error: {0}")]
    Gate(#[from] GateError),

    #[error("certificate error: {0}")]
    Certificate(#[from] CertificateError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {reason}")]
    Config { reason: String },
}

impl PassageError {
    /// Whether this error came from the network layer (replication paths treat
    /// those as retriable instead of terminal).
    pub fn is_network(&self) -> bool {
        matches!(self, PassageError::Api(ApiError::Network { .. }))
    }
}
