use rusqlite::{params, Row};

use super::{Change, Database, Executor};
use crate::error::AgendaResult;
use crate::models::Category;

pub struct Categories<'a, E: Executor = Database> {
    exec: &'a E,
}

impl<'a, E: Executor> Categories<'a, E> {
    pub fn new(exec: &'a E) -> Self {
        Self { exec }
    }

    /// Insert a category and return its id.
    pub fn create(&self, name: &str) -> AgendaResult<i64> {
        self.exec
            .commit("INSERT INTO categories (name) VALUES (?1)", params![name])?;
        self.exec.last_insert_id()
    }

    /// All categories, newest first.
    pub fn read(&self) -> AgendaResult<Vec<Category>> {
        self.exec.fetch_rows(
            "SELECT id, name FROM categories ORDER BY id DESC",
            params![],
            row_to_category,
        )
    }

    pub fn update(&self, id: &str, name: &str) -> AgendaResult<Change> {
        let rows = self.exec.commit(
            "UPDATE categories SET name = ?1 WHERE id = ?2",
            params![name, id.trim()],
        )?;
        Ok(Change::from_affected(rows))
    }

    /// Contacts and events pointing at the category keep their dangling id.
    pub fn delete(&self, id: &str) -> AgendaResult<Change> {
        let rows = self
            .exec
            .commit("DELETE FROM categories WHERE id = ?1", params![id.trim()])?;
        Ok(Change::from_affected(rows))
    }
}

fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgendaError;
    use crate::models::ContactFields;

    #[test]
    fn test_create_and_read() {
        let db = Database::open_memory().unwrap();
        let id = db.categories().create("Friends").unwrap();

        let rows = db.categories().read().unwrap();
        assert_eq!(
            rows,
            vec![Category {
                id,
                name: "Friends".to_string()
            }]
        );
    }

    #[test]
    fn test_read_newest_first() {
        let db = Database::open_memory().unwrap();
        for name in ["A", "B", "C"] {
            db.categories().create(name).unwrap();
        }

        let names: Vec<_> = db
            .categories()
            .read()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_update_touches_only_target() {
        let db = Database::open_memory().unwrap();
        let work = db.categories().create("Work").unwrap();
        let home = db.categories().create("Home").unwrap();

        let change = db.categories().update(&work.to_string(), "Office").unwrap();
        assert_eq!(change, Change::Applied);

        let rows = db.categories().read().unwrap();
        assert_eq!(rows[0], Category { id: home, name: "Home".into() });
        assert_eq!(rows[1], Category { id: work, name: "Office".into() });
    }

    #[test]
    fn test_update_missing_id_is_no_match() {
        let db = Database::open_memory().unwrap();
        db.categories().create("Work").unwrap();
        let before = db.categories().read().unwrap();

        let change = db.categories().update("99", "Ghost").unwrap();
        assert_eq!(change, Change::NoMatch);
        assert_eq!(db.categories().read().unwrap(), before);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let db = Database::open_memory().unwrap();
        let keep = db.categories().create("Keep").unwrap();
        let gone = db.categories().create("Drop").unwrap();

        assert_eq!(db.categories().delete(&gone.to_string()).unwrap(), Change::Applied);
        assert_eq!(db.categories().delete(&gone.to_string()).unwrap(), Change::NoMatch);

        let rows = db.categories().read().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, keep);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let db = Database::open_memory().unwrap();
        let first = db.categories().create("One").unwrap();
        db.categories().delete(&first.to_string()).unwrap();
        let second = db.categories().create("Two").unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_delete_referenced_category_leaves_dangling_reference() {
        let db = Database::open_memory().unwrap();
        let family = db.categories().create("Family").unwrap();
        db.contacts()
            .create(&ContactFields::new("Ana", "555-0101", "ana@example.com", &family.to_string()))
            .unwrap();

        assert_eq!(db.categories().delete(&family.to_string()).unwrap(), Change::Applied);

        let contacts = db.contacts().read().unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Ana");
        assert_eq!(contacts[0].category, None);
    }

    #[test]
    fn test_delete_referenced_category_rejected_when_enforced() {
        let db = Database::open_memory_with(true).unwrap();
        let family = db.categories().create("Family").unwrap();
        db.contacts()
            .create(&ContactFields::new("Ana", "", "", &family.to_string()))
            .unwrap();

        let err = db.categories().delete(&family.to_string()).unwrap_err();
        assert!(matches!(err, AgendaError::Query(_)));
        assert_eq!(db.categories().read().unwrap().len(), 1);
    }
}
