//! Shared logging utilities for consistent tracing across the run pipeline

use crate::types::{RunId, RunStep};
use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

/// Log level used when none is configured
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Build the filter directive for the orchestrator crates at `base_level`
pub fn level_filter(base_level: &str) -> String {
    format!("run_orchestrator={base_level},shared={base_level},reqwest=warn,hyper=warn")
}

/// Initialize tracing subscriber with an optional log level
///
/// `RUST_LOG` still wins when set, so ad-hoc debugging does not need a flag.
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let base_level = log_level.unwrap_or(DEFAULT_LOG_LEVEL);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_filter(base_level)));

    // try_init so a second call (tests) is a no-op instead of a panic
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for step-aware info logging
#[macro_export]
macro_rules! step_info {
    ($step:expr, $($arg:tt)*) => {
        tracing::info!(
            run = %$crate::RunId::current(),
            step = %$step,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for step-aware warning logging
#[macro_export]
macro_rules! step_warn {
    ($step:expr, $($arg:tt)*) => {
        tracing::warn!(
            run = %$crate::RunId::current(),
            step = %$step,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for step-aware debug logging
#[macro_export]
macro_rules! step_debug {
    ($step:expr, $($arg:tt)*) => {
        tracing::debug!(
            run = %$crate::RunId::current(),
            step = %$step,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(details: &str) {
    info!(
        run = %RunId::current(),
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for failures before any step has started
pub fn log_startup_error(context: &str, error: &dyn std::fmt::Display) {
    error!(
        run = %RunId::current(),
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Debug dump of the resolved run settings
pub fn log_settings(settings: &str) {
    debug!(
        run = %RunId::current(),
        timestamp = format_timestamp(),
        "⚙️  Resolved settings: {}",
        settings
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(step: RunStep, context: &str, error: &dyn std::fmt::Display) {
    error!(
        run = %RunId::current(),
        step = %step,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(step: RunStep, message: &str) {
    info!(
        run = %RunId::current(),
        step = %step,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}

/// Contextual logging helper for progress updates
pub fn log_progress(step: RunStep, action: &str, details: &str) {
    info!(
        run = %RunId::current(),
        step = %step,
        timestamp = format_timestamp(),
        "📋 {}: {}",
        action,
        details
    );
}
