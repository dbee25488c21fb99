use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name to an [`EnvFilter`] directive.
///
/// Unknown names are passed through unchanged so that full directives such as
/// `dashboard_data=trace` still work.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With `log_file` set, events are appended to that file without ANSI
/// colours. Otherwise they go to stderr, unless `allow_stderr` is `false`
/// (the TUI owns the terminal) in which case they are discarded. `RUST_LOG`
/// overrides `log_level` when present.
pub fn setup_logging(
    log_level: &str,
    log_file: Option<&Path>,
    allow_stderr: bool,
) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level_directive(log_level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };

    let stderr_layer = (file_layer.is_none() && allow_stderr).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialised")?;

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
