//! Error taxonomy for the quiz core and its HTTP rendering.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Failures of the extract → generate → evaluate pipeline.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
  /// The uploaded document could not be read as a PDF.
  #[error("Error extracting text from PDF: {0}")]
  Extraction(String),

  /// The remote model call failed or returned a non-success status.
  #[error("Error contacting the language model: {0}")]
  Transport(String),

  /// The model reply was not syntactically valid JSON.
  #[error("Error parsing questions: invalid JSON format ({0})")]
  Parse(#[from] serde_json::Error),

  /// The model reply was valid JSON but not a valid question set.
  #[error("Error validating questions: {0}")]
  Validation(#[from] ValidationError),
}

/// The first question-shape constraint a model reply violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
  #[error("reply must be a JSON array of question objects")]
  NotAnArray,

  #[error("question {index} must be an object")]
  NotAnObject { index: usize },

  #[error("question {index} is missing required key `{key}`")]
  MissingKey { index: usize, key: &'static str },

  #[error("question {index} has unexpected key `{key}`")]
  UnexpectedKey { index: usize, key: String },

  #[error("question {index}: `question` must be a string")]
  QuestionNotString { index: usize },

  #[error("question {index}: options must be a list")]
  OptionsNotList { index: usize },

  #[error("question {index}: options must be a list of exactly {expected} items, got {found}")]
  OptionsCount { index: usize, expected: usize, found: usize },

  #[error("question {index}: option {option} must be a string")]
  OptionNotString { index: usize, option: usize },

  #[error("question {index}: `correct_answer` must be a string")]
  CorrectAnswerNotString { index: usize },

  #[error("question {index}: correct answer must be one of the options")]
  CorrectAnswerNotInOptions { index: usize },

  #[error("expected {expected} questions, got {found}")]
  QuestionCount { expected: usize, found: usize },
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  #[error("{0}")]
  BadRequest(String),

  #[error(transparent)]
  Quiz(#[from] QuizError),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Quiz(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
