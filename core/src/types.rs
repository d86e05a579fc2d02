//! Domain DTOs for the task list API.
//!
//! # Design
//! The deployed server is document-store backed and names the identifier
//! `_id`; fixtures and other servers use `id`. Both are accepted on input and
//! `_id` is written back. The id itself is opaque: it may arrive as a string,
//! any JSON number or some other JSON value, and is only ever compared and
//! echoed into URLs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Server-assigned identifier of an item.
///
/// Numbers keep their JSON text, so `-1` or `1.5` survive a round trip.
/// Anything that is neither a number nor a string (an extended-JSON
/// `{"$oid": ..}` object, say) is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
            ItemId::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<u64> for ItemId {
    fn from(n: u64) -> Self {
        ItemId::Number(n.into())
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Number(n.into())
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Text(s.to_string())
    }
}

/// A single item as held in the local collection.
///
/// `id` is `None` only for an item appended after a create whose response
/// body did not carry an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ItemId>,
    pub title: String,
    pub description: String,
}

impl Item {
    pub fn fields(&self) -> ItemFields {
        ItemFields {
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

/// Title and description: the create/update payload and the shape of both
/// form drafts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFields {
    pub title: String,
    pub description: String,
}

impl ItemFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Both fields must be non-blank after trimming. The untrimmed text is
    /// what gets sent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(ValidationError);
        }
        Ok(())
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Title => self.title = value,
            Field::Description => self.description = value,
        }
    }
}

/// Which input of a form is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
}
