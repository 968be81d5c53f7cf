//! Answer evaluation: render questions with submitted and correct answers,
//! and ask the model for free-form feedback. The reply is returned verbatim.

use tracing::{error, instrument};

use crate::config::{Prompts, Settings};
use crate::domain::{AnswerSubmission, Question};
use crate::error::QuizError;
use crate::llm::ChatClient;

#[instrument(level = "info", skip_all, fields(questions = questions.len(), answered = answers.len()))]
pub async fn evaluate(
  client: &ChatClient,
  settings: &Settings,
  answers: &AnswerSubmission,
  questions: &[Question],
) -> Result<String, QuizError> {
  let user = build_evaluation_prompt(&settings.prompts, answers, questions);
  client
    .chat(&settings.prompts.evaluation_system, &user, settings.generation.evaluation_temperature)
    .await
    .inspect_err(|e| error!(target: "quiz", error = %e, "Model call failed during answer evaluation"))
}

/// One block per question, in order; unanswered indices get `prompts.not_answered`.
pub fn build_evaluation_prompt(prompts: &Prompts, answers: &AnswerSubmission, questions: &[Question]) -> String {
  let mut out = prompts.evaluation_preamble.clone();
  for (idx, q) in questions.iter().enumerate() {
    let given = answers.get(&idx.to_string()).map_or(prompts.not_answered.as_str(), String::as_str);
    out.push_str(&format!(
      "Question: {}\nUser's answer: {}\nCorrect answer: {}\n\n",
      q.question, given, q.correct_answer
    ));
  }
  out
}
