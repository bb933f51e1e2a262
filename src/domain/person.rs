use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::amount::deserialize_lenient;
use crate::domain::common::*;

/// A registered contributor and their monthly pledge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: Uuid,
    /// Blank when the stored document has none; rows show it as unnamed.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub promised_amount: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Person {
    /// Creates a person with a fresh identity stamped at `created_at`.
    pub fn new(draft: PersonDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            phone: draft.phone,
            promised_amount: draft.promised_amount,
            created_at,
            updated_at: None,
        }
    }

    /// Applies an edit. Identity and creation time are never touched.
    pub fn apply(&mut self, draft: PersonDraft, updated_at: DateTime<Utc>) {
        self.name = draft.name;
        self.phone = draft.phone;
        self.promised_amount = draft.promised_amount;
        self.updated_at = Some(updated_at);
    }
}

impl Identifiable for Person {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Person {
    fn display_label(&self) -> String {
        format!("{} (Tel: {})", self.name, self.phone)
    }
}

/// The editable fields of a person, already validated by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonDraft {
    pub name: String,
    pub phone: String,
    pub promised_amount: f64,
}

impl PersonDraft {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, promised_amount: f64) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            promised_amount,
        }
    }
}
