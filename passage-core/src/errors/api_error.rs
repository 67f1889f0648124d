/// Backend API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("unauthorized: bearer token missing or expired")]
    Unauthorized,

    #[error("malformed response: {reason}")]
    Decode { reason: String },

    #[error("backend rejected request: {reason}")]
    Rejected { reason: String },
}
