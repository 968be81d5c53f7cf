//! Question generation: prompt the model with document text, then clean, parse
//! and validate the reply into a question set.

use tracing::{error, info, instrument};

use crate::config::{GenerationSettings, Prompts, Settings};
use crate::domain::Question;
use crate::error::QuizError;
use crate::llm::ChatClient;
use crate::util::{fill_template, strip_code_fence, trunc_for_log, truncate_chars};
use crate::validate::validate_question_set;

/// Generate a validated question set from extracted document text. No retries.
#[instrument(level = "info", skip(client, settings, text), fields(text_len = text.len()))]
pub async fn generate(client: &ChatClient, settings: &Settings, text: &str) -> Result<Vec<Question>, QuizError> {
  let user = build_generation_prompt(&settings.prompts, &settings.generation, text);
  let reply = client
    .chat(&settings.prompts.generation_system, &user, settings.generation.generation_temperature)
    .await
    .inspect_err(|e| error!(target: "quiz", error = %e, "Model call failed during question generation"))?;

  let questions = parse_question_reply(&reply, &settings.generation)?;
  info!(target: "quiz", count = questions.len(), "Question set generated");
  Ok(questions)
}

/// User prompt for generation. Document text is cut to `max_input_chars` characters.
pub fn build_generation_prompt(prompts: &Prompts, gen: &GenerationSettings, text: &str) -> String {
  let count = gen.question_count.to_string();
  let text = truncate_chars(text, gen.max_input_chars);
  fill_template(&prompts.generation_user_template, &[("count", &count), ("text", text)])
}

/// Fence-strip, parse and validate a raw model reply.
pub fn parse_question_reply(reply: &str, gen: &GenerationSettings) -> Result<Vec<Question>, QuizError> {
  let cleaned = strip_code_fence(reply);
  let value: serde_json::Value = serde_json::from_str(cleaned).map_err(|e| {
    error!(target: "quiz", error = %e, content = %trunc_for_log(cleaned, 200), "Model reply is not valid JSON");
    QuizError::Parse(e)
  })?;

  let expected = gen.enforce_question_count.then_some(gen.question_count);
  validate_question_set(&value, expected).map_err(|e| {
    error!(target: "quiz", error = %e, "Model reply failed question validation");
    QuizError::Validation(e)
  })
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::error::ValidationError;

  fn reply_of(n: usize) -> String {
    let items: Vec<_> = (0..n)
      .map(|i| json!({
        "question": format!("Which stage comes {i}?"),
        "options": ["light", "dark", "calvin", "krebs"],
        "correct_answer": "calvin",
      }))
      .collect();
    serde_json::to_string_pretty(&items).unwrap()
  }

  #[test]
  fn prompt_names_count_and_fields() {
    let p = build_generation_prompt(&Prompts::default(), &GenerationSettings::default(), "Cells divide.");
    assert!(p.starts_with("Generate 10 multiple choice questions"));
    assert!(p.contains("exactly 10 question objects"));
    assert!(p.contains("\"correct_answer\": \"Paris\""));
    assert!(p.ends_with("Text: Cells divide."));
  }

  #[test]
  fn prompt_keeps_only_first_4000_chars() {
    let text = format!("{}{}", "a".repeat(4000), "TAIL");
    let p = build_generation_prompt(&Prompts::default(), &GenerationSettings::default(), &text);
    assert!(p.ends_with(&"a".repeat(4000)));
    assert!(!p.contains("TAIL"));
  }

  #[test]
  fn plain_reply_parses_to_questions() {
    let qs = parse_question_reply(&reply_of(10), &GenerationSettings::default()).unwrap();
    assert_eq!(qs.len(), 10);
    assert_eq!(qs[0].correct_answer, "calvin");
  }

  #[test]
  fn fenced_reply_matches_plain_reply() {
    let gen = GenerationSettings::default();
    let plain = parse_question_reply(&reply_of(10), &gen).unwrap();
    let fenced = parse_question_reply(&format!("```json\n{}\n```", reply_of(10)), &gen).unwrap();
    assert_eq!(plain, fenced);
    let chatty = parse_question_reply(&format!("``` json\n{}\n```\nGood luck!", reply_of(10)), &gen).unwrap();
    assert_eq!(plain, chatty);
  }

  #[test]
  fn invalid_json_is_a_parse_error() {
    let err = parse_question_reply("Sure! Here are your questions: [", &GenerationSettings::default()).unwrap_err();
    assert!(matches!(err, QuizError::Parse(_)));
  }

  #[test]
  fn three_options_is_a_validation_error() {
    let mut v: serde_json::Value = serde_json::from_str(&reply_of(10)).unwrap();
    v[6]["options"] = json!(["light", "dark", "calvin"]);
    let err = parse_question_reply(&v.to_string(), &GenerationSettings::default()).unwrap_err();
    assert!(matches!(
      err,
      QuizError::Validation(ValidationError::OptionsCount { index: 6, found: 3, .. })
    ));
  }

  #[test]
  fn short_set_depends_on_count_enforcement() {
    let mut gen = GenerationSettings::default();
    assert!(matches!(
      parse_question_reply(&reply_of(8), &gen).unwrap_err(),
      QuizError::Validation(ValidationError::QuestionCount { expected: 10, found: 8 })
    ));
    gen.enforce_question_count = false;
    assert_eq!(parse_question_reply(&reply_of(8), &gen).unwrap().len(), 8);
  }
}
