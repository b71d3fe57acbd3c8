//! Quote record - the single persisted entity

use serde::{Deserialize, Serialize};

/// A quote record.
///
/// `id` is assigned by the store on insert; a body without one
/// deserializes with `id == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Text fragments; most quotes carry exactly one
    #[serde(default)]
    pub quote_text: Option<Vec<String>>,
}

impl Quote {
    /// Create an unsaved quote (id 0) with a single text fragment
    pub fn new(author: impl Into<String>, tags: &[&str], text: impl Into<String>) -> Self {
        Self {
            id: 0,
            author: Some(author.into()),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            quote_text: Some(vec![text.into()]),
        }
    }

    /// Same record with a different id
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Author for human-readable messages; missing authors render empty
    pub fn author_name(&self) -> &str {
        self.author.as_deref().unwrap_or("")
    }
}
