//! CertificateEligibility decides eligibility from the backend aggregate
//! and drives a request-once-per-eligibility-window certificate flow.

use chrono::{DateTime, Utc};

use passage_core::config::EligibilityConfig;
use passage_core::errors::CertificateError;
use passage_core::models::Certificate;

use crate::debounce::Debouncer;

/// Per-course eligibility state machine.
///
/// Eligibility is `overall_progress >= threshold` where the number comes
/// from the backend aggregate, never derived here from completed-step
/// counts; the two can legitimately disagree.
#[derive(Debug)]
pub struct CertificateEligibility {
    course_id: String,
    threshold_percent: f64,
    overall_progress: f64,
    timer: Debouncer,
    /// One auto-request per eligibility window.
    requested: bool,
    is_generating: bool,
    certificates: Vec<Certificate>,
}

impl CertificateEligibility {
    pub fn new(course_id: &str, config: &EligibilityConfig) -> Self {
        Self {
            course_id: course_id.to_string(),
            threshold_percent: config.threshold_percent,
            overall_progress: 0.0,
            timer: Debouncer::new(config.request_delay_secs),
            requested: false,
            is_generating: false,
            certificates: Vec::new(),
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.overall_progress >= self.threshold_percent
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    /// The known certificate for this course, if any.
    pub fn certificate(&self) -> Option<&Certificate> {
        self.certificates
            .iter()
            .find(|c| c.course_id == self.course_id)
    }

    fn has_blocking_certificate(&self) -> bool {
        self.certificate().is_some_and(Certificate::blocks_rerequest)
    }

    /// Feed the backend certificate list. A non-rejected certificate
    /// cancels any scheduled auto-request; a rejected one reopens the
    /// window.
    pub fn set_certificates(&mut self, certificates: Vec<Certificate>) {
        self.certificates = certificates;
        if self.has_blocking_certificate() {
            self.timer.reset();
        } else {
            self.requested = false;
        }
    }

    /// Feed the backend aggregate. Arms the auto-request debounce when
    /// eligibility becomes true with no certificate on file; cancels it
    /// when eligibility flips false. Oscillation inside the window
    /// (99 → 100 → 100) still yields exactly one scheduled request.
    pub fn update_progress(&mut self, overall_progress: f64, now: DateTime<Utc>) {
        self.overall_progress = overall_progress;
        if self.is_eligible() {
            if !self.requested && !self.has_blocking_certificate() {
                self.timer.arm(now);
            }
        } else {
            self.timer.reset();
        }
    }

    /// Whether the scheduled auto-request should fire now. Consumes the
    /// timer: fires at most once per eligibility window.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_eligible() || self.is_generating || self.has_blocking_certificate() {
            return false;
        }
        if self.timer.ready(now) {
            self.timer.reset();
            self.requested = true;
            return true;
        }
        false
    }

    /// Mark a request as in flight. Overlapping requests are dropped, not
    /// queued.
    pub fn begin_request(&mut self) -> Result<(), CertificateError> {
        if self.is_generating {
            return Err(CertificateError::RequestInFlight {
                course_id: self.course_id.clone(),
            });
        }
        if !self.is_eligible() {
            return Err(CertificateError::NotEligible {
                overall_progress: self.overall_progress,
            });
        }
        if let Some(cert) = self.certificate() {
            if cert.blocks_rerequest() {
                return Err(CertificateError::AlreadyIssued {
                    course_id: self.course_id.clone(),
                    status: cert.status.as_str().to_string(),
                });
            }
        }
        self.is_generating = true;
        Ok(())
    }

    /// Clear the in-flight guard. On failure the window reopens so a later
    /// eligibility update can schedule a retry.
    pub fn finish_request(&mut self, success: bool) {
        self.is_generating = false;
        if !success {
            self.requested = false;
        }
    }
}
