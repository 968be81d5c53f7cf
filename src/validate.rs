//! Structural validation of a parsed model reply into typed questions.
//!
//! Stops at the first offending element; there is no partial result.

use serde_json::{Map, Value};

use crate::domain::{Question, OPTIONS_PER_QUESTION};
use crate::error::ValidationError;

const REQUIRED_KEYS: [&str; 3] = ["question", "options", "correct_answer"];

/// Validate a whole question set. `expected_count` enforces the set length when given.
pub fn validate_question_set(
  value: &Value,
  expected_count: Option<usize>,
) -> Result<Vec<Question>, ValidationError> {
  let items = value.as_array().ok_or(ValidationError::NotAnArray)?;
  let questions = items
    .iter()
    .enumerate()
    .map(|(index, item)| validate_question(index, item))
    .collect::<Result<Vec<_>, _>>()?;

  if let Some(expected) = expected_count {
    if questions.len() != expected {
      return Err(ValidationError::QuestionCount { expected, found: questions.len() });
    }
  }
  Ok(questions)
}

/// Validate one element of the reply array.
pub fn validate_question(index: usize, value: &Value) -> Result<Question, ValidationError> {
  let obj = value.as_object().ok_or(ValidationError::NotAnObject { index })?;
  check_keys(index, obj)?;

  let question = obj["question"]
    .as_str()
    .ok_or(ValidationError::QuestionNotString { index })?
    .to_string();

  let raw_options = obj["options"].as_array().ok_or(ValidationError::OptionsNotList { index })?;
  if raw_options.len() != OPTIONS_PER_QUESTION {
    return Err(ValidationError::OptionsCount {
      index,
      expected: OPTIONS_PER_QUESTION,
      found: raw_options.len(),
    });
  }
  let options = raw_options
    .iter()
    .enumerate()
    .map(|(option, v)| {
      v.as_str().map(str::to_string).ok_or(ValidationError::OptionNotString { index, option })
    })
    .collect::<Result<Vec<_>, _>>()?;
  let options: [String; OPTIONS_PER_QUESTION] = options
    .try_into()
    .map_err(|v: Vec<String>| ValidationError::OptionsCount { index, expected: OPTIONS_PER_QUESTION, found: v.len() })?;

  let correct_answer = obj["correct_answer"]
    .as_str()
    .ok_or(ValidationError::CorrectAnswerNotString { index })?
    .to_string();
  if !options.contains(&correct_answer) {
    return Err(ValidationError::CorrectAnswerNotInOptions { index });
  }

  Ok(Question { question, options, correct_answer })
}

fn check_keys(index: usize, obj: &Map<String, Value>) -> Result<(), ValidationError> {
  if let Some(key) = REQUIRED_KEYS.into_iter().find(|k| !obj.contains_key(*k)) {
    return Err(ValidationError::MissingKey { index, key });
  }
  if let Some(key) = obj.keys().find(|k| !REQUIRED_KEYS.iter().any(|r| *r == k.as_str())) {
    return Err(ValidationError::UnexpectedKey { index, key: key.clone() });
  }
  Ok(())
}
