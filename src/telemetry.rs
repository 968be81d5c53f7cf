//! Log output for the quiz server.
//!
//! - LOG_LEVEL: EnvFilter directives (e.g. "debug" or "info,quiz=trace").
//!   Unset or unparsable falls back to [`DEFAULT_DIRECTIVES`].
//! - LOG_FORMAT: see [`LogFormat`]. Unknown values fall back to the default.
//!
//! A rejected LOG_LEVEL or LOG_FORMAT is reported as a warning once the
//! subscriber is up. Per-request spans come from the router's TraceLayer.

use std::str::FromStr;

use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Quiz flow at debug, HTTP plumbing at info.
pub const DEFAULT_DIRECTIVES: &str = "info,quiz=debug,mcq_backend=debug,tower_http=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines with source file and line ("full" or "pretty").
    #[default]
    Full,
    /// Single-line output without source locations.
    Compact,
    /// One JSON object per event, fields flattened, current span attached.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "full" | "pretty" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown LOG_FORMAT {other:?}")),
        }
    }
}

/// Filter from LOG_LEVEL directives, plus the reason they were rejected, if they were.
fn build_filter(directives: Option<&str>) -> (EnvFilter, Option<String>) {
    match directives.map(EnvFilter::try_new) {
        Some(Ok(filter)) => (filter, None),
        Some(Err(e)) => (EnvFilter::new(DEFAULT_DIRECTIVES), Some(format!("invalid LOG_LEVEL: {e}"))),
        None => (EnvFilter::new(DEFAULT_DIRECTIVES), None),
    }
}

fn resolve_format(value: Option<&str>) -> (LogFormat, Option<String>) {
    match value.map(LogFormat::from_str) {
        Some(Ok(format)) => (format, None),
        Some(Err(e)) => (LogFormat::default(), Some(e)),
        None => (LogFormat::default(), None),
    }
}

pub fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").ok();
    let format = std::env::var("LOG_FORMAT").ok();
    let (filter, level_problem) = build_filter(level.as_deref());
    let (format, format_problem) = resolve_format(format.as_deref());

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    match format {
        LogFormat::Full => builder.with_file(true).with_line_number(true).init(),
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().flatten_event(true).with_current_span(true).init(),
    }

    for problem in [level_problem, format_problem].into_iter().flatten() {
        warn!(target: "quiz", %problem, "Logging configuration ignored");
    }
}
