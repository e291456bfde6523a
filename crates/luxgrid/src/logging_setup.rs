use anyhow::{Context, Result};
use luxgrid_core::LogConfig;
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

/// Keeps the file writer thread alive; logs are flushed when dropped
pub struct LogSession {
    _guard: Option<WorkerGuard>,
}

/// Log file chosen for this run
#[derive(Debug)]
struct LogFilePlan {
    path: PathBuf,
    removed: usize,
    cleanup_error: Option<String>,
}

/// Create the log directory, prune old logs and pick this run's file.
///
/// Does nothing when file output is off, so a console-only run never touches
/// the filesystem.
fn plan_log_file(config: &LogConfig) -> Result<Option<LogFilePlan>> {
    if !config.file_output {
        return Ok(None);
    }
    config.ensure_log_directory().with_context(|| {
        format!(
            "Failed to create log directory {}",
            config.log_directory.display()
        )
    })?;
    let (removed, cleanup_error) = match config.cleanup_old_logs() {
        Ok(removed) => (removed, None),
        Err(e) => (0, Some(e.to_string())),
    };
    Ok(Some(LogFilePlan {
        path: config.current_log_path(),
        removed,
        cleanup_error,
    }))
}

/// Install the tracing subscriber for a run over `rig`.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LogConfig, rig: &Path) -> Result<LogSession> {
    let plan = plan_log_file(config)?;

    let config_filter = EnvFilter::builder()
        .with_default_directive(config.parse_level().into())
        .from_env_lossy();

    // stderr only; stdout carries the descriptor report
    let console_layer = if config.console_output {
        Some(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(false)
                .with_filter(config_filter.clone()),
        )
    } else {
        None
    };

    let (file_layer, guard) = match &plan {
        Some(plan) => {
            let file = File::create(&plan.path)
                .with_context(|| format!("Failed to create log file {}", plan.path.display()))?;
            let (non_blocking, worker_guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(config_filter);
            (Some(layer), Some(worker_guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!(
        "luxgrid {} reading rig {} (log level {})",
        env!("CARGO_PKG_VERSION"),
        rig.display(),
        config.level
    );
    if let Some(plan) = &plan {
        tracing::info!("Logging to file {}", plan.path.display());
        if let Some(e) = &plan.cleanup_error {
            tracing::warn!("Failed to clean up old log files: {}", e);
        } else if plan.removed > 0 {
            tracing::debug!("Removed {} old log files", plan.removed);
        }
    }

    Ok(LogSession { _guard: guard })
}
