//! Persisted toolbar state on top of a [`KeyValueStore`].

use crate::records::HighlightRecord;
use crate::storage::KeyValueStore;
use crate::{ColorKey, StorageError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

pub const HIGHLIGHT_COLOR_KEY: &str = "highlight.color";
const SAVED_PREFIX: &str = "highlights:";

/// Highlights saved for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedHighlights {
    pub page: String,
    pub saved_at: DateTime<Utc>,
    pub highlights: Vec<HighlightRecord>,
}

pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Last color the user highlighted with
    pub fn highlight_color(&self) -> Result<Option<ColorKey>, StorageError> {
        let Some(value) = self.store.get(HIGHLIGHT_COLOR_KEY)? else {
            return Ok(None);
        };
        match value {
            Value::String(key) => Ok(ColorKey::new(key).ok()),
            other => {
                warn!(value = %other, "Ignoring stored highlight color");
                Ok(None)
            }
        }
    }

    pub fn set_highlight_color(&mut self, color: &ColorKey) -> Result<(), StorageError> {
        self.store
            .set(HIGHLIGHT_COLOR_KEY, Value::String(color.to_string()))
    }

    pub fn saved_highlights(&self, page: &str) -> Result<Option<SavedHighlights>, StorageError> {
        match self.store.get(&saved_key(page))? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Replace what is saved for `page`
    pub fn save_highlights(
        &mut self,
        page: &str,
        highlights: Vec<HighlightRecord>,
    ) -> Result<SavedHighlights, StorageError> {
        let saved = SavedHighlights {
            page: page.to_string(),
            saved_at: Utc::now(),
            highlights,
        };
        self.store
            .set(&saved_key(page), serde_json::to_value(&saved)?)?;
        Ok(saved)
    }

    pub fn forget_highlights(&mut self, page: &str) -> Result<(), StorageError> {
        self.store.remove(&saved_key(page))
    }
}

fn saved_key(page: &str) -> String {
    format!("{}{}", SAVED_PREFIX, page)
}
