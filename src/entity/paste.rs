//! The pastebin record

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::errors::{EntityError, EntityResult};
use super::table::{Entity, FieldTable, Record};
use super::value::{FieldKind, FieldValue};

/// Maximum poster length in characters
pub const POSTER_MAX_LEN: usize = 30;

/// Maximum syntax length in characters
pub const SYNTAX_MAX_LEN: usize = 30;

/// Maximum content length in characters
pub const CONTENT_MAX_LEN: usize = 255;

static PASTE_FIELDS: OnceLock<FieldTable<Paste>> = OnceLock::new();

/// A single paste
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paste {
    /// Auto-assigned primary key (0 until inserted)
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub syntax: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl Paste {
    /// Storage table name
    pub const TABLE_NAME: &'static str = "pasteBin";

    /// Creates an unsaved paste
    pub fn new(
        poster: impl Into<String>,
        syntax: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            poster: Some(poster.into()),
            syntax: Some(syntax.into()),
            content: Some(content.into()),
        }
    }

    /// Sets the primary key
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Checks column size limits
    pub fn validate(&self) -> EntityResult<()> {
        check_len("poster", self.poster.as_deref(), POSTER_MAX_LEN)?;
        check_len("syntax", self.syntax.as_deref(), SYNTAX_MAX_LEN)?;
        check_len("content", self.content.as_deref(), CONTENT_MAX_LEN)?;
        Ok(())
    }
}

fn check_len(field: &'static str, value: Option<&str>, max: usize) -> EntityResult<()> {
    let len = value.map(|v| v.chars().count()).unwrap_or(0);
    if len > max {
        return Err(EntityError::FieldTooLong { field, len, max });
    }
    Ok(())
}

impl Entity for Paste {
    fn field_table() -> &'static FieldTable<Self> {
        PASTE_FIELDS.get_or_init(|| {
            FieldTable::<Paste>::new(Paste::TABLE_NAME)
                .field("id", FieldKind::Int, |p| FieldValue::Int(p.id))
                .field("poster", FieldKind::Text, |p| p.poster.clone().into())
                .field("syntax", FieldKind::Text, |p| p.syntax.clone().into())
                .field("content", FieldKind::Text, |p| p.content.clone().into())
        })
    }
}

impl Record for Paste {
    fn key(&self) -> i64 {
        self.id
    }

    fn set_key(&mut self, key: i64) {
        self.id = key;
    }
}
