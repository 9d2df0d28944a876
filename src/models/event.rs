use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub contact: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFields {
    pub contact_id: String,
    pub category_id: String,
    /// Passed through unparsed; the menu asks for YYYY-MM-DD.
    pub date: String,
    pub description: String,
}

impl EventFields {
    pub fn new(contact_id: &str, category_id: &str, date: &str, description: &str) -> Self {
        Self {
            contact_id: contact_id.to_string(),
            category_id: category_id.to_string(),
            date: date.to_string(),
            description: description.to_string(),
        }
    }
}
