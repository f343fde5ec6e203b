use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressStatus {
    /// Parses the wire spelling; used by request validation so the
    /// error message can name the allowed set explicitly.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "not_started" => Some(Self::NotStarted),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub class_id: u32,
    pub status: ProgressStatus,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    /// Insert-or-update keyed on class id. A plain overwrite is the
    /// upsert here: at most one row per class by construction, and
    /// concurrent writers resolve at last-write-wins.
    pub fn upsert_progress(
        &self,
        class_id: u32,
        status: ProgressStatus,
    ) -> Result<ProgressEntry, StoreError> {
        let entry = ProgressEntry {
            class_id,
            status,
            updated_at: Utc::now(),
        };
        let key = keys::progress_key(class_id);
        self.progress
            .insert(key.as_bytes(), Self::serialize(&entry)?)?;
        Ok(entry)
    }

    /// All recorded progress rows, ascending by class id (key order).
    /// Absent classes are implicitly not_started; the API layer
    /// overlays that default.
    pub fn list_progress(&self) -> Result<Vec<ProgressEntry>, StoreError> {
        let mut entries = Vec::new();
        for item in self.progress.iter() {
            let (_, raw) = item?;
            entries.push(Self::deserialize::<ProgressEntry>(&raw)?);
        }
        Ok(entries)
    }
}
