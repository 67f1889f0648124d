//! Blocking reqwest transport. Bearer-token auth, JSON envelopes, no
//! refresh flow; an expired token surfaces as a plain HTTP error.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use passage_core::errors::{ApiError, PassageResult};
use passage_core::models::{
    AttachmentRef, Certificate, CourseAggregate, Enrollment, LessonProgressPayload,
    ProgressSyncPayload, StageAccessMap, SurveyFeedback,
};
use passage_core::traits::ProgressTransport;

use crate::endpoints;
use crate::protocol::{ApiRequest, ApiResponse};

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

pub struct HttpTransport {
    http: reqwest::blocking::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> PassageResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network {
                reason: e.to_string(),
            })?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: None,
        })
    }

    pub fn set_bearer_token(&mut self, token: String) {
        self.bearer_token = Some(token);
    }

    pub fn clear_bearer_token(&mut self) {
        self.bearer_token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(
        &self,
        builder: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn map_send_err(e: reqwest::Error) -> ApiError {
        ApiError::Network {
            reason: e.to_string(),
        }
    }

    /// Check status, then decode the response envelope.
    fn decode<T: DeserializeOwned>(response: reqwest::blocking::Response) -> PassageResult<T> {
        let status = response.status();
        if status.as_u16() == 401 {
            return Err(ApiError::Unauthorized.into());
        }
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            }
            .into());
        }
        let envelope: ApiResponse<T> = response.json().map_err(|e| ApiError::Decode {
            reason: e.to_string(),
        })?;
        Ok(envelope.into_data()?)
    }

    fn post_json<P: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &P,
    ) -> PassageResult<T> {
        let request = ApiRequest::new(payload);
        let response = self
            .authorize(self.http.post(self.url(path)))
            .json(&request)
            .send()
            .map_err(Self::map_send_err)?;
        Self::decode(response)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> PassageResult<T> {
        let response = self
            .authorize(self.http.get(self.url(path)))
            .send()
            .map_err(Self::map_send_err)?;
        Self::decode(response)
    }
}

/// Backend acks carry no body beyond the envelope.
#[derive(Debug, serde::Deserialize)]
struct Ack {}

impl ProgressTransport for HttpTransport {
    fn sync_progress(&self, payload: &ProgressSyncPayload) -> PassageResult<()> {
        let _: Ack = self.post_json(&endpoints::sync_progress(), payload)?;
        Ok(())
    }

    fn update_lesson_progress(&self, payload: &LessonProgressPayload) -> PassageResult<()> {
        let _: Ack = self.post_json(&endpoints::lesson_progress(), payload)?;
        Ok(())
    }

    fn fetch_course_progress(&self, course_id: &str) -> PassageResult<CourseAggregate> {
        self.get_json(&endpoints::course_progress(course_id))
    }

    fn fetch_enrollments(&self) -> PassageResult<Vec<Enrollment>> {
        self.get_json(&endpoints::enrollments())
    }

    fn fetch_stage_access(&self, course_id: &str) -> PassageResult<StageAccessMap> {
        self.get_json(&endpoints::stage_access(course_id))
    }

    fn request_certificate(&self, course_id: &str) -> PassageResult<()> {
        let _: Ack = self.post_json(&endpoints::request_certificate(course_id), &())?;
        Ok(())
    }

    fn fetch_certificates(&self) -> PassageResult<Vec<Certificate>> {
        self.get_json(&endpoints::user_certificates())
    }

    fn submit_survey(&self, feedback: &SurveyFeedback) -> PassageResult<()> {
        let _: Ack = self.post_json(&endpoints::survey_feedback(), feedback)?;
        Ok(())
    }

    fn upload_file(&self, file_name: &str, bytes: &[u8]) -> PassageResult<AttachmentRef> {
        let response = self
            .authorize(self.http.post(self.url(&endpoints::upload_file())))
            .header("x-file-name", file_name)
            .body(bytes.to_vec())
            .send()
            .map_err(Self::map_send_err)?;
        Self::decode(response)
    }

    fn fetch_file(&self, file_id: &str) -> PassageResult<Vec<u8>> {
        let response = self
            .authorize(self.http.get(self.url(&endpoints::file(file_id))))
            .send()
            .map_err(Self::map_send_err)?;
        let status = response.status();
        if status.as_u16() == 401 {
            return Err(ApiError::Unauthorized.into());
        }
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: String::new(),
            }
            .into());
        }
        let bytes = response.bytes().map_err(Self::map_send_err)?;
        Ok(bytes.to_vec())
    }
}
