//! Core flows behind the HTTP handlers:
//!   - upload: extract text → generate questions → store under a new session
//!   - grade: look up the stored set → evaluate the submission

use axum::body::Bytes;
use tracing::{info, instrument, warn};

use crate::domain::{AnswerSubmission, Question};
use crate::error::{ApiError, QuizError};
use crate::evaluate::evaluate;
use crate::extract::extract_text;
use crate::generate::generate;
use crate::state::AppState;

/// Build a quiz from an uploaded PDF. Returns the new session id and the full set.
#[instrument(level = "info", skip(state, document), fields(bytes = document.len()))]
pub async fn quiz_from_document(state: &AppState, document: Bytes) -> Result<(String, Vec<Question>), QuizError> {
  let text = extract_off_thread(document, extract_text).await?;
  info!(target: "quiz", text_len = text.len(), "Document text extracted");

  let questions = generate(&state.llm, &state.settings, &text).await?;
  let session_id = state.sessions.insert(questions.clone()).await;
  let stored_sessions = state.sessions.count().await;
  info!(target: "quiz", %session_id, count = questions.len(), stored_sessions, "Question set stored");
  Ok((session_id, questions))
}

/// Run a PDF extractor on the blocking pool. A panic inside the extractor
/// surfaces as a JoinError and is reported as an extraction failure.
async fn extract_off_thread<F>(document: Bytes, extract: F) -> Result<String, QuizError>
where
  F: FnOnce(&[u8]) -> Result<String, QuizError> + Send + 'static,
{
  tokio::task::spawn_blocking(move || extract(&document))
    .await
    .map_err(|e| QuizError::Extraction(format!("extraction task failed: {e}")))?
}

/// Grade a submission against a stored set. Without a session id, the latest upload is used.
#[instrument(level = "info", skip(state, answers), fields(session_id = ?session_id, answered = answers.len()))]
pub async fn grade_submission(
  state: &AppState,
  session_id: Option<&str>,
  answers: &AnswerSubmission,
) -> Result<String, ApiError> {
  let stored = match session_id {
    Some(id) => state.sessions.get(id).await,
    None => state.sessions.latest().await,
  };
  let questions = match stored {
    Some(qs) if !qs.is_empty() => qs,
    _ => {
      warn!(target: "quiz", session_id = ?session_id, "No stored questions for evaluation");
      return Err(ApiError::BadRequest("Questions not found".into()));
    }
  };

  let feedback = evaluate(&state.llm, &state.settings, answers, &questions).await?;
  info!(target: "quiz", feedback_len = feedback.len(), "Submission evaluated");
  Ok(feedback)
}
