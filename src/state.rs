//! Application state shared by all handlers: settings, the model client and
//! the session store.

use tracing::{info, instrument};

use crate::config::{load_settings_from_env, ModelSettings, Settings};
use crate::error::QuizError;
use crate::llm::ChatClient;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub llm: ChatClient,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(settings: Settings, model: &ModelSettings) -> Result<Self, QuizError> {
        let llm = ChatClient::new(model)?;
        let sessions = SessionStore::new(settings.server.max_sessions);
        Ok(Self { settings, llm, sessions })
    }

    /// Build state from env: TOML settings plus GROQ_* model settings.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> Result<Self, QuizError> {
        let settings = load_settings_from_env();
        let model = ModelSettings::from_env();
        let state = Self::new(settings, &model)?;
        info!(
            target: "mcq_backend",
            base_url = %state.llm.base_url,
            model = %state.llm.model,
            question_count = state.settings.generation.question_count,
            max_sessions = state.settings.server.max_sessions,
            "Application state ready"
        );
        Ok(state)
    }
}
