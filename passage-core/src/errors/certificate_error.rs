/// Certificate flow errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CertificateError {
    #[error("not eligible: overall progress {overall_progress}% is below the threshold")]
    NotEligible { overall_progress: f64 },

    #[error("a request for course {course_id} is already in flight")]
    RequestInFlight { course_id: String },

    #[error("certificate already exists for course {course_id} with status {status}")]
    AlreadyIssued { course_id: String, status: String },
}
