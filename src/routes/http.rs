//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; failures render as `{"error": "..."}`.

use std::sync::Arc;
use axum::{
  body::Bytes,
  extract::{multipart::MultipartRejection, Multipart, State},
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::domain::to_client;
use crate::error::ApiError;
use crate::logic::{grade_submission, quiz_from_document};
use crate::protocol::*;
use crate::state::AppState;

/// Multipart field carrying the uploaded document.
const PDF_FIELD: &str = "pdf";

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip_all)]
pub async fn http_upload(
  State(state): State<Arc<AppState>>,
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadOut>, ApiError> {
  let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let mut document = None;
  while let Some(field) = multipart.next_field().await.map_err(|e| ApiError::BadRequest(e.to_string()))? {
    if field.name() != Some(PDF_FIELD) {
      continue;
    }
    let filename = field.file_name().unwrap_or_default().to_string();
    if filename.is_empty() {
      return Err(ApiError::BadRequest("No file selected".into()));
    }
    let bytes = field.bytes().await.map_err(|e| ApiError::BadRequest(e.to_string()))?;
    info!(target: "quiz", %filename, bytes = bytes.len(), "PDF received");
    document = Some(bytes);
    break;
  }
  let document = document.ok_or_else(|| ApiError::BadRequest("No PDF file uploaded".into()))?;

  let (session_id, questions) = quiz_from_document(&state, document).await?;
  info!(target: "quiz", %session_id, count = questions.len(), "HTTP upload served");
  Ok(Json(UploadOut { session_id, questions: to_client(&questions) }))
}

#[instrument(level = "info", skip_all, fields(body_len = body.len()))]
pub async fn http_evaluate(
  State(state): State<Arc<AppState>>,
  body: Bytes,
) -> Result<Json<EvaluateOut>, ApiError> {
  let req: EvaluateIn = serde_json::from_slice(&body)
    .map_err(|_| ApiError::BadRequest("Invalid request data".into()))?;

  let feedback = grade_submission(&state, req.session_id.as_deref(), &req.answers).await?;
  Ok(Json(EvaluateOut { feedback }))
}
