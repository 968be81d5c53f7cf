//! Domain models: generated questions, their client-facing view, and answer submissions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Every generated question carries exactly this many options.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// A validated multiple-choice question, including its correct answer.
/// Only ever built by `validate`, so `correct_answer` is always one of `options`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub question: String,
  pub options: [String; OPTIONS_PER_QUESTION],
  pub correct_answer: String,
}

/// Question as shown to the quiz taker (answer redacted).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClientQuestion {
  pub question: String,
  pub options: [String; OPTIONS_PER_QUESTION],
}

impl From<&Question> for ClientQuestion {
  fn from(q: &Question) -> Self {
    Self { question: q.question.clone(), options: q.options.clone() }
  }
}

/// Redact a full question set for the client.
pub fn to_client(questions: &[Question]) -> Vec<ClientQuestion> {
  questions.iter().map(ClientQuestion::from).collect()
}

/// User answers keyed by 0-based question index ("0", "1", ...).
/// Values are not checked against the question's options.
pub type AnswerSubmission = HashMap<String, String>;
