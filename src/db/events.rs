use rusqlite::{params, Row};

use super::{reference, Change, Database, Executor};
use crate::error::AgendaResult;
use crate::models::{Event, EventFields};

pub struct Events<'a, E: Executor = Database> {
    exec: &'a E,
}

impl<'a, E: Executor> Events<'a, E> {
    pub fn new(exec: &'a E) -> Self {
        Self { exec }
    }

    pub fn create(&self, fields: &EventFields) -> AgendaResult<i64> {
        self.exec.commit(
            "INSERT INTO events (contact_id, category_id, date, description) VALUES (?1, ?2, ?3, ?4)",
            params![
                reference(&fields.contact_id),
                reference(&fields.category_id),
                fields.date,
                fields.description,
            ],
        )?;
        self.exec.last_insert_id()
    }

    /// All events with contact and category names, newest first.
    pub fn read(&self) -> AgendaResult<Vec<Event>> {
        self.exec.fetch_rows(
            r#"SELECT e.id, e.date, e.description, c.name, cat.name
               FROM events e
               LEFT JOIN contacts c ON e.contact_id = c.id
               LEFT JOIN categories cat ON e.category_id = cat.id
               ORDER BY e.id DESC"#,
            params![],
            row_to_event,
        )
    }

    pub fn update(&self, id: &str, fields: &EventFields) -> AgendaResult<Change> {
        let rows = self.exec.commit(
            r#"UPDATE events
               SET contact_id = ?1, category_id = ?2, date = ?3, description = ?4
               WHERE id = ?5"#,
            params![
                reference(&fields.contact_id),
                reference(&fields.category_id),
                fields.date,
                fields.description,
                id.trim(),
            ],
        )?;
        Ok(Change::from_affected(rows))
    }

    pub fn delete(&self, id: &str) -> AgendaResult<Change> {
        let rows = self
            .exec
            .commit("DELETE FROM events WHERE id = ?1", params![id.trim()])?;
        Ok(Change::from_affected(rows))
    }
}

fn row_to_event(row: &Row) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        date: row.get(1)?,
        description: row.get(2)?,
        contact: row.get(3)?,
        category: row.get(4)?,
    })
}
