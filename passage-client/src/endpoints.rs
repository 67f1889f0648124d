//! REST endpoint map. Paths are relative to the backend's `/api` root;
//! all of them require a bearer token.

pub fn sync_progress() -> String {
    "/protected/progress/sync".to_string()
}

pub fn lesson_progress() -> String {
    "/protected/progress/lesson".to_string()
}

pub fn course_progress(course_id: &str) -> String {
    format!("/protected/courses/{course_id}/progress")
}

pub fn enrollments() -> String {
    "/protected/courses/enrollments".to_string()
}

pub fn stage_access(course_id: &str) -> String {
    format!("/protected/courses/{course_id}/stages/access")
}

pub fn request_certificate(course_id: &str) -> String {
    format!("/protected/courses/{course_id}/certificate")
}

pub fn user_certificates() -> String {
    "/protected/user/certificates".to_string()
}

pub fn survey_feedback() -> String {
    "/protected/surveys/feedback".to_string()
}

pub fn upload_file() -> String {
    "/protected/uploads/file".to_string()
}

pub fn file(file_id: &str) -> String {
    format!("/protected/uploads/file/{file_id}")
}
