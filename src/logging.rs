//! File logging bootstrap.
//!
//! Logs go to a rotating file under the configured directory, never to the
//! console, so menu output is not interleaved with diagnostics. Events use a
//! `event=... module=... status=...` key/value layout.

use std::path::Path;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use log::info;

use crate::error::{AgendaError, AgendaResult};

const LOG_FILE_BASENAME: &str = "agenda";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
const LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Lowercase and validate a level name.
pub fn normalize_level(level: &str) -> AgendaResult<&'static str> {
    let wanted = level.trim().to_ascii_lowercase();
    LEVELS
        .iter()
        .find(|l| **l == wanted)
        .copied()
        .ok_or_else(|| {
            AgendaError::Config(format!(
                "unsupported log level `{}` (expected one of: {})",
                level,
                LEVELS.join(", ")
            ))
        })
}

/// Start file logging. Returns `None` when the level is `off`.
///
/// The returned handle must be kept alive for the rest of the process.
pub fn init_logging(level: &str, log_dir: &Path) -> AgendaResult<Option<LoggerHandle>> {
    let level = normalize_level(level)?;
    if level == "off" {
        return Ok(None);
    }

    std::fs::create_dir_all(log_dir).map_err(|err| {
        AgendaError::Config(format!(
            "failed to create log directory `{}`: {err}",
            log_dir.display()
        ))
    })?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| AgendaError::Config(format!("invalid log level `{level}`: {err}")))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| AgendaError::Config(format!("failed to start logger: {err}")))?;

    info!(
        "event=app_start module=core status=ok platform={} version={} level={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        level
    );

    Ok(Some(handle))
}
