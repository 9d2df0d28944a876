use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, error, info, warn};
use rusqlite::types::Value;
use rusqlite::{Connection, Row, Statement, ToSql};

use crate::config::AgendaConfig;
use crate::error::{AgendaError, AgendaResult};

mod categories;
mod contacts;
mod events;
mod notes;
mod schema;

pub use categories::Categories;
pub use contacts::Contacts;
pub use events::Events;
pub use notes::{Notes, CREATED_AT_FORMAT};
pub use schema::SCHEMA_VERSION;

/// Selects what `execute` does with a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    /// Return every result row.
    Rows,
    /// Run the write; autocommit makes it durable before returning.
    Commit,
}

/// Result of `Executor::execute`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Rows(Vec<Vec<Value>>),
    Committed(usize),
}

/// Outcome of an update or delete addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Applied,
    /// No row had that id; nothing was touched.
    NoMatch,
}

impl Change {
    fn from_affected(rows: usize) -> Self {
        if rows > 0 {
            Self::Applied
        } else {
            Self::NoMatch
        }
    }
}

/// Statement execution shared by every record type.
pub trait Executor {
    /// Run a query and map each row with `map`.
    fn fetch_rows<T, F>(&self, sql: &str, params: &[&dyn ToSql], map: F) -> AgendaResult<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>;

    /// Run a write and return the number of affected rows.
    fn commit(&self, sql: &str, params: &[&dyn ToSql]) -> AgendaResult<usize>;

    fn last_insert_id(&self) -> AgendaResult<i64>;

    /// Execute `sql` with positional `params`.
    fn execute(&self, sql: &str, params: &[&dyn ToSql], fetch: Fetch) -> AgendaResult<Outcome> {
        match fetch {
            Fetch::Rows => self.fetch_rows(sql, params, row_values).map(Outcome::Rows),
            Fetch::Commit => self.commit(sql, params).map(Outcome::Committed),
        }
    }
}

/// Every column of a row, as untyped values.
fn row_values(row: &Row<'_>) -> rusqlite::Result<Vec<Value>> {
    let stmt: &Statement<'_> = row.as_ref();
    (0..stmt.column_count())
        .map(|i| row.get::<_, Value>(i))
        .collect()
}

/// Owns the single connection used for the whole session.
pub struct Database {
    conn: Option<Connection>,
    enforce_foreign_keys: bool,
}

impl Database {
    /// Open the database named by the configuration, bootstrapping tables if needed.
    pub fn open(config: &AgendaConfig) -> AgendaResult<Self> {
        Self::open_at(&config.db_path, config.enforce_foreign_keys)
    }

    pub fn open_at(path: &Path, enforce_foreign_keys: bool) -> AgendaResult<Self> {
        let started_at = Instant::now();
        info!("event=db_open module=db status=start mode=file");

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| AgendaError::Directory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let opened = Connection::open(path)
            .and_then(|conn| Self::bootstrap(conn, enforce_foreign_keys));

        match opened {
            Ok(conn) => {
                info!(
                    "event=db_open module=db status=ok mode=file enforce_fk={} duration_ms={}",
                    enforce_foreign_keys,
                    started_at.elapsed().as_millis()
                );
                Ok(Self {
                    conn: Some(conn),
                    enforce_foreign_keys,
                })
            }
            Err(source) => {
                error!(
                    "event=db_open module=db status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    source
                );
                Err(AgendaError::Connection {
                    path: PathBuf::from(path),
                    source,
                })
            }
        }
    }

    /// Open in-memory database for testing. Foreign keys are not enforced.
    pub fn open_memory() -> AgendaResult<Self> {
        Self::open_memory_with(false)
    }

    pub fn open_memory_with(enforce_foreign_keys: bool) -> AgendaResult<Self> {
        let conn = Connection::open_in_memory()
            .and_then(|conn| Self::bootstrap(conn, enforce_foreign_keys))
            .map_err(|source| AgendaError::Connection {
                path: PathBuf::from(":memory:"),
                source,
            })?;
        Ok(Self {
            conn: Some(conn),
            enforce_foreign_keys,
        })
    }

    fn bootstrap(conn: Connection, enforce_foreign_keys: bool) -> rusqlite::Result<Connection> {
        let pragma = if enforce_foreign_keys {
            "PRAGMA foreign_keys = ON;"
        } else {
            "PRAGMA foreign_keys = OFF;"
        };
        conn.execute_batch(pragma)?;
        schema::migrate(&conn)?;
        Ok(conn)
    }

    pub fn enforces_foreign_keys(&self) -> bool {
        self.enforce_foreign_keys
    }

    pub fn is_closed(&self) -> bool {
        self.conn.is_none()
    }

    /// Close the connection. A second call returns `AlreadyClosed`.
    pub fn close(&mut self) -> AgendaResult<()> {
        let conn = self.conn.take().ok_or(AgendaError::AlreadyClosed)?;
        match conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((_conn, err)) => {
                error!("event=db_close module=db status=error error={}", err);
                Err(AgendaError::Query(err))
            }
        }
    }

    pub fn categories(&self) -> Categories<'_> {
        Categories::new(self)
    }

    pub fn contacts(&self) -> Contacts<'_> {
        Contacts::new(self)
    }

    pub fn events(&self) -> Events<'_> {
        Events::new(self)
    }

    pub fn notes(&self) -> Notes<'_> {
        Notes::new(self)
    }

    fn conn(&self) -> AgendaResult<&Connection> {
        self.conn.as_ref().ok_or(AgendaError::AlreadyClosed)
    }
}

impl Executor for Database {
    fn commit(&self, sql: &str, params: &[&dyn ToSql]) -> AgendaResult<usize> {
        let started_at = Instant::now();
        match self.conn()?.execute(sql, params) {
            Ok(affected) => {
                debug!(
                    "event=db_execute module=db mode=commit status=ok affected={} duration_ms={}",
                    affected,
                    started_at.elapsed().as_millis()
                );
                Ok(affected)
            }
            Err(err) => {
                warn!("event=db_execute module=db mode=commit status=error error={}", err);
                Err(err.into())
            }
        }
    }

    fn fetch_rows<T, F>(&self, sql: &str, params: &[&dyn ToSql], map: F) -> AgendaResult<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let started_at = Instant::now();
        let conn = self.conn()?;
        let result = conn.prepare(sql).and_then(|mut stmt| {
            let rows = stmt
                .query_map(params, map)?
                .collect::<rusqlite::Result<Vec<_>>>();
            rows
        });
        match result {
            Ok(rows) => {
                debug!(
                    "event=db_execute module=db mode=rows status=ok rows={} duration_ms={}",
                    rows.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(rows)
            }
            Err(err) => {
                warn!("event=db_execute module=db mode=rows status=error error={}", err);
                Err(err.into())
            }
        }
    }

    fn last_insert_id(&self) -> AgendaResult<i64> {
        Ok(self.conn()?.last_insert_rowid())
    }
}

/// Reference ids come straight from the console; blank means "none".
pub(crate) fn reference(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
