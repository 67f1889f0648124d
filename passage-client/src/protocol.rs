//! Versioned wire protocol: JSON envelopes with forward compatibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use passage_core::constants::PROTOCOL_VERSION;
use passage_core::errors::ApiError;

/// Envelope for all backend requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiRequest<T> {
    /// Protocol version for forward compatibility.
    pub version: String,
    /// Unique request ID for tracing.
    pub request_id: String,
    /// Timestamp of the request.
    pub timestamp: DateTime<Utc>,
    /// The actual payload.
    pub payload: T,
}

impl<T: Serialize> ApiRequest<T> {
    /// Wrap a payload in a fresh envelope.
    pub fn new(payload: T) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            request_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// Envelope for all backend responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Protocol version.
    pub version: String,
    /// Echoed request ID.
    pub request_id: String,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Error message if `success` is false.
    pub error: Option<String>,
    /// The response payload.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a success response (used by mock transports in tests).
    pub fn ok(request_id: String, data: T) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            request_id,
            success: true,
            error: None,
            data: Some(data),
        }
    }

    /// Create an error response.
    pub fn err(request_id: String, error: String) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            request_id,
            success: false,
            error: Some(error),
            data: None,
        }
    }

    /// Unwrap the payload, mapping a `success = false` envelope to
    /// [`ApiError::Rejected`].
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected {
                reason: self
                    .error
                    .unwrap_or_else(|| "backend reported failure without a reason".to_string()),
            });
        }
        self.data.ok_or(ApiError::Decode {
            reason: "success response missing data".to_string(),
        })
    }
}
