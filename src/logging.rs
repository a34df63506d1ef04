//! Structured JSONL logging plus human-readable stderr output.
//!
//! This module provides dual-output logging:
//! - **JSONL to file** (~/.nui-menu/logs/nui-menu.jsonl) - structured for tooling
//! - **Pretty to stderr** - human-readable for developers
//!
//! stdout is left alone: the driver binary uses it for its own JSONL output.
//!
//! # Usage
//!
//! ```rust,ignore
//! use nui_menu::logging;
//!
//! // Initialize logging - MUST keep guard alive for duration of program
//! let _guard = logging::init(None);
//!
//! tracing::info!(event_type = "menu", item_count = 3, "Menu opened");
//! ```

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_NAME: &str = "nui-menu.jsonl";

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the dual-output logging system.
///
/// `log_dir` overrides the default directory. When the log file cannot be
/// opened, only the stderr layer is installed.
pub fn init(log_dir: Option<&Path>) -> LoggingGuard {
    let log_dir = log_dir.map(Path::to_path_buf).unwrap_or_else(default_log_dir);
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }
    let log_path = log_dir.join(LOG_FILE_NAME);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| eprintln!("[LOGGING] Failed to open log file: {}", e))
        .ok();

    // Environment filter - default to info, allow override via RUST_LOG
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ureq=warn,rustls=warn"));

    // Pretty layer for stderr (human developers)
    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    let (json_layer, file_guard) = match file {
        Some(file) => {
            // Non-blocking writer so a slow disk never stalls event handling
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // try_init: tests and embedders may already own the global subscriber
    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            event_type = "app_lifecycle",
            action = "started",
            log_path = %log_path.display(),
            "Logging initialized"
        );
    }

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// Get the log directory path (~/.nui-menu/logs/)
fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".nui-menu").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("nui-menu-logs"))
}

/// Get the path to the JSONL log file in the default directory
pub fn log_path() -> PathBuf {
    default_log_dir().join(LOG_FILE_NAME)
}

// =============================================================================
// STRUCTURED LOGGING HELPERS
// =============================================================================

/// Log a UI event with structured fields
pub fn log_ui_event(surface: &str, action: &str, details: Option<&str>) {
    tracing::info!(
        event_type = "ui_event",
        surface = surface,
        action = action,
        details = details,
        "{} {}",
        surface,
        action
    );
}

/// Log a keyboard event with structured fields
pub fn log_key_event(key: &str, surface: &str) {
    tracing::debug!(
        event_type = "key_event",
        key = key,
        surface = surface,
        "Key {} on {}",
        key,
        surface
    );
}

/// Log an outbound callback with structured fields
pub fn log_callback(endpoint: &str, body: Option<&serde_json::Value>) {
    tracing::info!(
        event_type = "callback",
        endpoint = endpoint,
        body = ?body,
        "Posting {}",
        endpoint
    );
}
