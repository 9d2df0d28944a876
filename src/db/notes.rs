use chrono::{Local, NaiveDateTime};
use rusqlite::{params, Row};

use super::{Change, Database, Executor};
use crate::error::AgendaResult;
use crate::models::{Note, NoteFields};

/// Format of `notes.created_at`.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct Notes<'a, E: Executor = Database> {
    exec: &'a E,
}

impl<'a, E: Executor> Notes<'a, E> {
    pub fn new(exec: &'a E) -> Self {
        Self { exec }
    }

    /// Insert a note stamped with the current local time.
    pub fn create(&self, fields: &NoteFields) -> AgendaResult<i64> {
        self.create_at(fields, Local::now().naive_local())
    }

    pub fn create_at(&self, fields: &NoteFields, created_at: NaiveDateTime) -> AgendaResult<i64> {
        let stamp = created_at.format(CREATED_AT_FORMAT).to_string();
        self.exec.commit(
            "INSERT INTO notes (title, content, created_at) VALUES (?1, ?2, ?3)",
            params![fields.title, fields.content, stamp],
        )?;
        self.exec.last_insert_id()
    }

    pub fn read(&self) -> AgendaResult<Vec<Note>> {
        self.exec.fetch_rows(
            "SELECT id, title, content, created_at FROM notes ORDER BY id DESC",
            params![],
            row_to_note,
        )
    }

    /// Replace title and content. `created_at` is left alone.
    pub fn update(&self, id: &str, fields: &NoteFields) -> AgendaResult<Change> {
        let rows = self.exec.commit(
            "UPDATE notes SET title = ?1, content = ?2 WHERE id = ?3",
            params![fields.title, fields.content, id.trim()],
        )?;
        Ok(Change::from_affected(rows))
    }

    pub fn delete(&self, id: &str) -> AgendaResult<Change> {
        let rows = self
            .exec
            .commit("DELETE FROM notes WHERE id = ?1", params![id.trim()])?;
        Ok(Change::from_affected(rows))
    }
}

fn row_to_note(row: &Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: row.get(3)?,
    })
}
