use anyhow::Result;
use serde::Serialize;

use crate::models::{Category, Contact, Event, Note};

/// One-line rendering of a row.
pub trait Render {
    fn line(&self) -> String;
}

impl Render for Category {
    fn line(&self) -> String {
        format!("ID: {}, Name: {}", self.id, self.name)
    }
}

impl Render for Contact {
    fn line(&self) -> String {
        format!(
            "ID: {}, Name: {}, Phone: {}, Email: {}, Category: {}",
            self.id,
            self.name,
            self.phone,
            self.email,
            self.category.as_deref().unwrap_or("")
        )
    }
}

impl Render for Event {
    fn line(&self) -> String {
        format!(
            "ID: {}, Date: {}, Description: {}, Contact: {}, Category: {}",
            self.id,
            self.date,
            self.description,
            self.contact.as_deref().unwrap_or(""),
            self.category.as_deref().unwrap_or("")
        )
    }
}

impl Render for Note {
    fn line(&self) -> String {
        format!(
            "ID: {}, Title: {}, Content: {}, Created: {}",
            self.id, self.title, self.content, self.created_at
        )
    }
}

/// Heading plus one line per row, or `empty` when there are no rows.
pub fn render<T: Render>(heading: &str, empty: &str, rows: &[T]) -> Vec<String> {
    if rows.is_empty() {
        return vec![empty.to_string()];
    }
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(heading.to_string());
    lines.extend(rows.iter().map(Render::line));
    lines
}

/// Like `render`, or a pretty JSON array when `json` is set.
pub fn to_lines<T: Render + Serialize>(
    heading: &str,
    empty: &str,
    rows: &[T],
    json: bool,
) -> Result<Vec<String>> {
    if json {
        Ok(vec![serde_json::to_string_pretty(rows)?])
    } else {
        Ok(render(heading, empty, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_join_renders_empty() {
        let contact = Contact {
            id: 4,
            name: "Ana".into(),
            phone: "555".into(),
            email: "ana@mail.com".into(),
            category: None,
        };
        assert_eq!(
            contact.line(),
            "ID: 4, Name: Ana, Phone: 555, Email: ana@mail.com, Category: "
        );
    }

    #[test]
    fn test_event_line() {
        let event = Event {
            id: 2,
            date: "2024-05-17".into(),
            description: "Dinner".into(),
            contact: Some("Ana".into()),
            category: None,
        };
        assert_eq!(
            event.line(),
            "ID: 2, Date: 2024-05-17, Description: Dinner, Contact: Ana, Category: "
        );
    }

    #[test]
    fn test_render_empty_and_full() {
        let none: Vec<Category> = vec![];
        assert_eq!(render("Categories", "No categories.", &none), vec!["No categories."]);

        let rows = vec![
            Category { id: 2, name: "Work".into() },
            Category { id: 1, name: "Home".into() },
        ];
        assert_eq!(
            render("Categories", "No categories.", &rows),
            vec!["Categories", "ID: 2, Name: Work", "ID: 1, Name: Home"]
        );
    }

    #[test]
    fn test_json_lines() {
        let rows = vec![Note {
            id: 1,
            title: "T".into(),
            content: "C".into(),
            created_at: "2024-01-01 00:00:00".into(),
        }];
        let lines = to_lines("Notes", "No notes.", &rows, true).unwrap();
        assert_eq!(lines.len(), 1);
        let parsed: Vec<Note> = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed, rows);
    }
}
