use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Certificate lifecycle. Transitions happen on the backend; the client
/// only requests and displays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    Pending,
    Approved,
    Rejected,
}

impl CertificateStatus {
    /// Wire name of the status, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateStatus::Pending => "pending",
            CertificateStatus::Approved => "approved",
            CertificateStatus::Rejected => "rejected",
        }
    }
}

/// A certificate as issued by the backend. The backend is the sole source
/// of truth for existence and status; the client never fabricates one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    pub id: String,
    pub course_id: String,
    pub user_id: String,
    pub user_name: String,
    pub certificate_number: String,
    pub completion_date: DateTime<Utc>,
    pub grade: u32,
    pub status: CertificateStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl Certificate {
    /// A certificate blocks re-requests while it is not rejected.
    pub fn blocks_rerequest(&self) -> bool {
        self.status != CertificateStatus::Rejected
    }
}

/// Identity equality: two certificates are equal if they have the same ID.
impl PartialEq for Certificate {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
