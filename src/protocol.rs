//! HTTP request/response DTOs (serde ready).

use serde::{Deserialize, Serialize};

use crate::domain::{AnswerSubmission, ClientQuestion};

#[derive(Serialize)]
pub struct UploadOut {
    pub session_id: String,
    pub questions: Vec<ClientQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateIn {
    pub answers: AnswerSubmission,
    /// Session returned by `/upload`; the latest upload is graded when absent.
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Serialize)]
pub struct EvaluateOut {
    pub feedback: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
