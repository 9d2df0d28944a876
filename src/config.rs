//! Runtime configuration.
//!
//! Each setting comes from a command-line flag, then its environment
//! variable (`AGENDA_DB`, `AGENDA_ENFORCE_FK`, `AGENDA_LOG`, `AGENDA_LOG_DIR`),
//! then the default below.

use std::path::PathBuf;

use crate::error::{AgendaError, AgendaResult};
use crate::logging::normalize_level;

const APP_DIR: &str = "agenda";
const DB_FILE_NAME: &str = "agenda.db";
const LOG_DIR_NAME: &str = "logs";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaConfig {
    pub db_path: PathBuf,
    /// Check category/contact references on write and block deleting
    /// referenced rows. Off by default: references may dangle.
    pub enforce_foreign_keys: bool,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl AgendaConfig {
    /// Fill in defaults for anything not given.
    pub fn resolve(
        db_path: Option<PathBuf>,
        enforce_foreign_keys: bool,
        log_level: &str,
        log_dir: Option<PathBuf>,
    ) -> AgendaResult<Self> {
        let log_level = normalize_level(log_level)?.to_string();
        let db_path = match db_path {
            Some(path) => path,
            None => app_dir()?.join(DB_FILE_NAME),
        };
        let log_dir = match log_dir {
            Some(dir) => dir,
            None => app_dir()?.join(LOG_DIR_NAME),
        };

        Ok(Self {
            db_path,
            enforce_foreign_keys,
            log_level,
            log_dir,
        })
    }
}

fn app_dir() -> AgendaResult<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| AgendaError::Config("could not find a data directory".into()))
}
