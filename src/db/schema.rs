use log::info;
use rusqlite::{Connection, OptionalExtension};

pub const SCHEMA_VERSION: i32 = 1;

/// V1: the four agenda tables.
/// References carry no ON DELETE action; whether they are checked at all
/// depends on `PRAGMA foreign_keys` for the session.
pub const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    phone TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    category_id INTEGER REFERENCES categories(id)
);

CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    contact_id INTEGER REFERENCES contacts(id),
    category_id INTEGER REFERENCES categories(id),
    date TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_contact_category ON contacts(category_id);
CREATE INDEX IF NOT EXISTS idx_event_contact ON events(contact_id);
CREATE INDEX IF NOT EXISTS idx_event_category ON events(category_id);
"#;

pub(super) fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    let version = schema_version(conn)?;

    if version < 1 {
        conn.execute_batch(&format!("BEGIN TRANSACTION; {} COMMIT;", SCHEMA_V1))?;
        conn.execute(
            "INSERT OR REPLACE INTO schema_version (id, version) VALUES (1, ?1)",
            [SCHEMA_VERSION],
        )?;
        info!("event=db_migrate module=db status=ok from={} to={}", version, SCHEMA_VERSION);
    }

    Ok(())
}

fn schema_version(conn: &Connection) -> rusqlite::Result<i32> {
    let has_table: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !has_table {
        return Ok(0);
    }

    let version = conn
        .query_row("SELECT version FROM schema_version WHERE id = 1", [], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(version.unwrap_or(0))
}
