use std::path::PathBuf;

use thiserror::Error;

pub type AgendaResult<T> = Result<T, AgendaError>;

#[derive(Debug, Error)]
pub enum AgendaError {
    /// Storage could not be opened at startup.
    #[error("cannot open database at {}: {source}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("cannot create database directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A statement failed: malformed SQL, bad parameter count, constraint violation.
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("database connection is already closed")]
    AlreadyClosed,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AgendaError {
    /// True for errors that leave the session usable.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Query(_))
    }
}
