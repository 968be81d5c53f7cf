//! PDF → multiple-choice quiz backend.
//!
//! Upload a PDF, get questions generated by an OpenAI-compatible chat model
//! (answers redacted), then submit answers for model-written feedback.

pub mod config;
pub mod domain;
pub mod error;
pub mod evaluate;
pub mod extract;
pub mod generate;
pub mod llm;
pub mod logic;
pub mod protocol;
pub mod routes;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod util;
pub mod validate;
