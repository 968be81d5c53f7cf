//! Loading runtime settings (prompts, generation knobs, server limits) from TOML,
//! and the remote model endpoint from the environment.
//!
//! See `Settings`, `Prompts` and `ModelSettings` for the expected schema.

use serde::Deserialize;
use tracing::{error, info, warn};

#[derive(Clone, Debug, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
  pub prompts: Prompts,
  pub generation: GenerationSettings,
  pub server: ServerSettings,
}

/// Prompts sent to the remote model. Defaults mirror the classic MCQ wording.
/// `generation_user_template` understands `{count}` and `{text}`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub generation_system: String,
  pub generation_user_template: String,
  pub evaluation_system: String,
  pub evaluation_preamble: String,
  pub not_answered: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      generation_system: "You are a helpful assistant that generates multiple choice questions. Always respond with valid JSON arrays containing question objects.".into(),
      generation_user_template: r#"Generate {count} multiple choice questions based on the following text.
For each question, provide 4 options where only one is correct.
Your response MUST be a valid JSON array containing exactly {count} question objects.
Each object must have exactly these fields: "question", "options" (array of 4 strings), and "correct_answer" (string matching one option).
Example format:
[
    {
        "question": "What is the capital of France?",
        "options": ["London", "Paris", "Berlin", "Madrid"],
        "correct_answer": "Paris"
    }
]

Text: {text}"#.into(),
      evaluation_system: "You are a helpful assistant that evaluates quiz answers and also provide scores based on the correct answers. Also provide a final score and some insights on the student performance. Also provide a pathway to ace this type of exam.".into(),
      evaluation_preamble: "Evaluate the following answers and provide detailed feedback:\n\n".into(),
      not_answered: "Not answered".into(),
    }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
  /// Document text beyond this many characters is dropped before prompting.
  pub max_input_chars: usize,
  pub question_count: usize,
  /// Reject replies whose question count differs from `question_count`.
  pub enforce_question_count: bool,
  pub generation_temperature: f32,
  pub evaluation_temperature: f32,
}

impl Default for GenerationSettings {
  fn default() -> Self {
    Self {
      max_input_chars: 4000,
      question_count: 10,
      enforce_question_count: true,
      generation_temperature: 0.3,
      evaluation_temperature: 0.7,
    }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
  pub static_dir: String,
  pub max_upload_bytes: usize,
  /// Oldest sessions are evicted beyond this many stored question sets.
  pub max_sessions: usize,
}

impl Default for ServerSettings {
  fn default() -> Self {
    Self { static_dir: "./static".into(), max_upload_bytes: 20 * 1024 * 1024, max_sessions: 256 }
  }
}

impl Settings {
  pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(s)
  }
}

/// Load `Settings` from QUIZ_CONFIG_PATH. Missing variable means defaults;
/// read/parse errors are logged and defaults are used.
pub fn load_settings_from_env() -> Settings {
  let Ok(path) = std::env::var("QUIZ_CONFIG_PATH") else {
    return Settings::default();
  };
  match std::fs::read_to_string(&path) {
    Ok(s) => match Settings::from_toml_str(&s) {
      Ok(cfg) => {
        info!(target: "mcq_backend", %path, "Loaded quiz config (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "mcq_backend", %path, error = %e, "Failed to parse TOML config; using defaults");
        Settings::default()
      }
    },
    Err(e) => {
      error!(target: "mcq_backend", %path, error = %e, "Failed to read TOML config file; using defaults");
      Settings::default()
    }
  }
}

/// Remote chat-completion endpoint (OpenAI-compatible; Groq by default).
#[derive(Clone, Debug)]
pub struct ModelSettings {
  pub api_key: String,
  pub base_url: String,
  pub model: String,
  pub timeout_secs: u64,
}

impl ModelSettings {
  /// Read GROQ_* variables. A missing key is not fatal: calls will be rejected upstream.
  pub fn from_env() -> Self {
    let api_key = std::env::var("GROQ_API_KEY").unwrap_or_else(|_| {
      warn!(target: "mcq_backend", "GROQ_API_KEY not set; model calls will fail authentication");
      String::new()
    });
    let base_url =
      std::env::var("GROQ_BASE_URL").unwrap_or_else(|_| "https://api.groq.com/openai/v1".into());
    let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| "llama-3.1-8b-instant".into());
    let timeout_secs = std::env::var("GROQ_TIMEOUT_SECS")
      .ok()
      .and_then(|v| v.parse::<u64>().ok())
      .unwrap_or(60);

    Self { api_key, base_url, model, timeout_secs }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_toml_gives_defaults() {
    let s = Settings::from_toml_str("").unwrap();
    assert_eq!(s.generation.max_input_chars, 4000);
    assert_eq!(s.generation.question_count, 10);
    assert!(s.generation.enforce_question_count);
    assert_eq!(s.server.max_sessions, 256);
    assert!(s.prompts.generation_user_template.contains("{text}"));
  }

  #[test]
  fn partial_sections_keep_other_defaults() {
    let s = Settings::from_toml_str(
      r#"
        [generation]
        question_count = 5
        enforce_question_count = false

        [prompts]
        not_answered = "(skipped)"
      "#,
    )
    .unwrap();
    assert_eq!(s.generation.question_count, 5);
    assert!(!s.generation.enforce_question_count);
    assert_eq!(s.generation.generation_temperature, 0.3);
    assert_eq!(s.prompts.not_answered, "(skipped)");
    assert!(s.prompts.evaluation_preamble.starts_with("Evaluate the following answers"));
  }

  #[test]
  fn wrong_types_are_rejected() {
    assert!(Settings::from_toml_str("[server]\nmax_sessions = \"many\"").is_err());
  }
}
