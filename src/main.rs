//! MCQ backend · PDF quiz generator
//!
//! - Axum HTTP API (`/upload`, `/evaluate`, `/health`)
//! - Question generation and grading via an OpenAI-compatible chat API (Groq by default)
//! - Static page from ./static
//!
//! Important env variables:
//!   PORT              : u16 (default 3003)
//!   GROQ_API_KEY      : bearer credential for the model API
//!   GROQ_BASE_URL     : default "https://api.groq.com/openai/v1"
//!   GROQ_MODEL        : default "llama-3.1-8b-instant"
//!   GROQ_TIMEOUT_SECS : per-call timeout (default 60)
//!   QUIZ_CONFIG_PATH  : path to TOML config (prompts, generation, server)
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "full"/"pretty" (default), "compact" or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use mcq_backend::routes::build_router;
use mcq_backend::state::AppState;
use mcq_backend::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let state = Arc::new(AppState::from_env()?);
  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3003)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "mcq_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(target: "mcq_backend", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  info!(target: "mcq_backend", "Shutdown signal received");
}
