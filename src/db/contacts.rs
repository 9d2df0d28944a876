use rusqlite::{params, Row};

use super::{reference, Change, Database, Executor};
use crate::error::AgendaResult;
use crate::models::{Contact, ContactFields};

const SELECT_CONTACT: &str = r#"SELECT c.id, c.name, c.phone, c.email, cat.name
    FROM contacts c
    LEFT JOIN categories cat ON c.category_id = cat.id"#;

pub struct Contacts<'a, E: Executor = Database> {
    exec: &'a E,
}

impl<'a, E: Executor> Contacts<'a, E> {
    pub fn new(exec: &'a E) -> Self {
        Self { exec }
    }

    /// Insert a contact and return its id. The category id is not checked here.
    pub fn create(&self, fields: &ContactFields) -> AgendaResult<i64> {
        self.exec.commit(
            "INSERT INTO contacts (name, phone, email, category_id) VALUES (?1, ?2, ?3, ?4)",
            params![
                fields.name,
                fields.phone,
                fields.email,
                reference(&fields.category_id),
            ],
        )?;
        self.exec.last_insert_id()
    }

    /// All contacts with their category name, newest first.
    pub fn read(&self) -> AgendaResult<Vec<Contact>> {
        self.exec.fetch_rows(
            &format!("{} ORDER BY c.id DESC", SELECT_CONTACT),
            params![],
            row_to_contact,
        )
    }

    /// Contacts whose name, phone or email contains `criterion`.
    /// Row order is whatever the join produces.
    pub fn search(&self, criterion: &str) -> AgendaResult<Vec<Contact>> {
        let pattern = format!("%{}%", escape_like(criterion));
        self.exec.fetch_rows(
            &format!(
                r#"{}
    WHERE c.name LIKE ?1 ESCAPE '\' OR c.phone LIKE ?1 ESCAPE '\' OR c.email LIKE ?1 ESCAPE '\'"#,
                SELECT_CONTACT
            ),
            params![pattern],
            row_to_contact,
        )
    }

    /// Replace every field of the contact with `id`.
    pub fn update(&self, id: &str, fields: &ContactFields) -> AgendaResult<Change> {
        let rows = self.exec.commit(
            r#"UPDATE contacts
               SET name = ?1, phone = ?2, email = ?3, category_id = ?4
               WHERE id = ?5"#,
            params![
                fields.name,
                fields.phone,
                fields.email,
                reference(&fields.category_id),
                id.trim(),
            ],
        )?;
        Ok(Change::from_affected(rows))
    }

    pub fn delete(&self, id: &str) -> AgendaResult<Change> {
        let rows = self
            .exec
            .commit("DELETE FROM contacts WHERE id = ?1", params![id.trim()])?;
        Ok(Change::from_affected(rows))
    }
}

fn row_to_contact(row: &Row) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        category: row.get(4)?,
    })
}

/// Escape LIKE metacharacters (% _ \)
fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgendaError;
    use std::collections::HashSet;

    fn setup_test_db() -> (Database, i64, i64) {
        let db = Database::open_memory().unwrap();
        let friends = db.categories().create("Friends").unwrap();
        let work = db.categories().create("Work").unwrap();

        let contacts = db.contacts();
        contacts
            .create(&ContactFields::new("Ana", "555-0101", "a.lopez@mail.com", &friends.to_string()))
            .unwrap();
        contacts
            .create(&ContactFields::new("Juan", "555-0102", "juan@mail.com", &work.to_string()))
            .unwrap();
        contacts
            .create(&ContactFields::new("Pedro", "555-0103", "pedro@mail.com", ""))
            .unwrap();

        (db, friends, work)
    }

    #[test]
    fn test_create_round_trip() {
        let db = Database::open_memory().unwrap();
        let cat = db.categories().create("Family").unwrap();
        let fields = ContactFields::new("Lucia", "600 123 123", "lucia@example.com", &cat.to_string());
        let id = db.contacts().create(&fields).unwrap();

        let rows = db.contacts().read().unwrap();
        assert_eq!(
            rows,
            vec![Contact {
                id,
                name: "Lucia".into(),
                phone: "600 123 123".into(),
                email: "lucia@example.com".into(),
                category: Some("Family".into()),
            }]
        );
    }

    #[test]
    fn test_read_newest_first() {
        let (db, _, _) = setup_test_db();
        let names: Vec<_> = db.contacts().read().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Pedro", "Juan", "Ana"]);
    }

    #[test]
    fn test_blank_category_is_null() {
        let (db, _, _) = setup_test_db();
        let pedro = db
            .contacts()
            .read()
            .unwrap()
            .into_iter()
            .find(|c| c.name == "Pedro")
            .unwrap();
        assert_eq!(pedro.category, None);
    }

    #[test]
    fn test_unknown_category_is_stored_without_enforcement() {
        let db = Database::open_memory().unwrap();
        db.contacts()
            .create(&ContactFields::new("Eva", "", "", "77"))
            .unwrap();

        let rows = db.contacts().read().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, None);
    }

    #[test]
    fn test_unknown_category_rejected_with_enforcement() {
        let db = Database::open_memory_with(true).unwrap();
        let err = db
            .contacts()
            .create(&ContactFields::new("Eva", "", "", "77"))
            .unwrap_err();
        assert!(matches!(err, AgendaError::Query(_)));
        assert!(db.contacts().read().unwrap().is_empty());
    }

    #[test]
    fn test_search_matches_name_substring() {
        let (db, _, _) = setup_test_db();

        let found: HashSet<_> = db
            .contacts()
            .search("an")
            .unwrap()
            .into_iter()
            .map(|c| (c.name, c.category))
            .collect();

        let expected: HashSet<_> = [
            ("Ana".to_string(), Some("Friends".to_string())),
            ("Juan".to_string(), Some("Work".to_string())),
        ]
        .into_iter()
        .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_search_matches_phone_and_email() {
        let (db, _, _) = setup_test_db();

        let by_phone = db.contacts().search("0103").unwrap();
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].name, "Pedro");

        let by_email = db.contacts().search("lopez@").unwrap();
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].name, "Ana");
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let (db, _, _) = setup_test_db();
        assert!(db.contacts().search("%").unwrap().is_empty());
        assert!(db.contacts().search("_").unwrap().is_empty());
    }

    #[test]
    fn test_search_no_match() {
        let (db, _, _) = setup_test_db();
        assert!(db.contacts().search("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_update_replaces_all_fields() {
        let (db, _, work) = setup_test_db();
        let ana = db
            .contacts()
            .read()
            .unwrap()
            .into_iter()
            .find(|c| c.name == "Ana")
            .unwrap();
        let before: Vec<_> = db
            .contacts()
            .read()
            .unwrap()
            .into_iter()
            .filter(|c| c.id != ana.id)
            .collect();

        let change = db
            .contacts()
            .update(
                &ana.id.to_string(),
                &ContactFields::new("Ana Maria", "555-9999", "am@mail.com", &work.to_string()),
            )
            .unwrap();
        assert_eq!(change, Change::Applied);

        let after = db.contacts().read().unwrap();
        let updated = after.iter().find(|c| c.id == ana.id).unwrap();
        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.phone, "555-9999");
        assert_eq!(updated.email, "am@mail.com");
        assert_eq!(updated.category.as_deref(), Some("Work"));

        let others: Vec<_> = after.into_iter().filter(|c| c.id != ana.id).collect();
        assert_eq!(others, before);
    }

    #[test]
    fn test_update_missing_id_leaves_table_unchanged() {
        let (db, _, _) = setup_test_db();
        let before = db.contacts().read().unwrap();

        let change = db
            .contacts()
            .update("404", &ContactFields::new("Nobody", "", "", ""))
            .unwrap();
        assert_eq!(change, Change::NoMatch);
        assert_eq!(db.contacts().read().unwrap(), before);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let (db, _, _) = setup_test_db();
        let juan = db.contacts().search("Juan").unwrap().remove(0);

        assert_eq!(db.contacts().delete(&juan.id.to_string()).unwrap(), Change::Applied);
        let once = db.contacts().read().unwrap();
        assert_eq!(once.len(), 2);
        assert!(once.iter().all(|c| c.id != juan.id));

        assert_eq!(db.contacts().delete(&juan.id.to_string()).unwrap(), Change::NoMatch);
        assert_eq!(db.contacts().read().unwrap(), once);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c\\d"), "c\\\\d");
        assert_eq!(escape_like("plain"), "plain");
    }
}
