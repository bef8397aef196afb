//! Shared logging utilities for consistent tracing across the harness

use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Directive used when `RUST_LOG` is not set
pub fn default_filter(log_level: Option<&str>, verbose: bool) -> String {
    let base_level = match (log_level, verbose) {
        (Some(level), _) => level,
        (None, true) => "debug",
        (None, false) => "info",
    };
    format!("tester={base_level},shared={base_level}")
}

/// Initialize the stdout tracing subscriber
///
/// `RUST_LOG` takes precedence over the level passed on the command line.
pub fn init_tracing(log_level: Option<&str>, verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level, verbose)));

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(verbose)
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

/// Contextual logging helper for startup messages
pub fn log_startup(resource: &str, details: &str) {
    info!(
        resource = %resource,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for failures
pub fn log_failure(resource: &str, context: &str, error: &dyn std::fmt::Display) {
    error!(
        resource = %resource,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(resource: &str, message: &str) {
    info!(
        resource = %resource,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}

/// Contextual logging helper for progress updates
pub fn log_progress(resource: &str, action: &str, details: &str) {
    info!(
        resource = %resource,
        timestamp = format_timestamp(),
        "📋 {}: {}",
        action,
        details
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(None, false), "tester=info,shared=info");
        assert_eq!(default_filter(None, true), "tester=debug,shared=debug");
        assert_eq!(default_filter(Some("warn"), true), "tester=warn,shared=warn");
    }

    #[test]
    fn test_format_timestamp_shape() {
        let ts = format_timestamp();
        // HH:MM:SS.mmm
        assert_eq!(ts.len(), 12);
        assert_eq!(&ts[2..3], ":");
        assert_eq!(&ts[8..9], ".");
    }

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing(Some("debug"), false);
        init_tracing(None, true);
        log_progress("test-container", "probe", "attempt 1");
    }
}
