use serde::{Deserialize, Serialize};

/// A contact as read back, with its category name joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    /// `None` when the contact has no category or the category is gone.
    pub category: Option<String>,
}

/// Values written by create and update. Ids are raw console text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub category_id: String,
}

impl ContactFields {
    pub fn new(name: &str, phone: &str, email: &str, category_id: &str) -> Self {
        Self {
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            category_id: category_id.to_string(),
        }
    }
}
