use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: u64,
    pub class_id: u32,
    pub section_key: String,
    pub anchor_id: String,
    pub label: String,
    pub created_at: DateTime<Utc>,
}

impl Store {
    /// Inserts a bookmark, enforcing uniqueness on
    /// (classId, sectionKey, anchorId). The anchor index entry is
    /// claimed with compare_and_swap before the record is written, so
    /// two concurrent inserts of the same key cannot both succeed; the
    /// loser gets `Conflict`.
    pub fn insert_bookmark(
        &self,
        class_id: u32,
        section_key: &str,
        anchor_id: &str,
        label: &str,
    ) -> Result<Bookmark, StoreError> {
        let anchor_key = keys::bookmark_anchor_key(class_id, section_key, anchor_id);
        let id = self.next_id("Bookmark", keys::BOOKMARK_SEQ_KEY)?;
        let record_key = keys::bookmark_key(id);

        let claimed = self.bookmarks_by_anchor.compare_and_swap(
            anchor_key.as_bytes(),
            None as Option<&[u8]>,
            Some(record_key.as_bytes()),
        )?;
        if claimed.is_err() {
            return Err(StoreError::Conflict {
                entity: "Bookmark".to_string(),
                key: anchor_key,
            });
        }

        let record = Bookmark {
            id,
            class_id,
            section_key: section_key.to_string(),
            anchor_id: anchor_id.to_string(),
            label: label.to_string(),
            created_at: Utc::now(),
        };
        self.bookmarks
            .insert(record_key.as_bytes(), Self::serialize(&record)?)?;
        Ok(record)
    }

    /// Returns false when no row matched.
    pub fn delete_bookmark(&self, bookmark_id: u64) -> Result<bool, StoreError> {
        let key = keys::bookmark_key(bookmark_id);
        let Some(raw) = self.bookmarks.remove(key.as_bytes())? else {
            return Ok(false);
        };

        let record: Bookmark = Self::deserialize(&raw)?;
        let anchor_key =
            keys::bookmark_anchor_key(record.class_id, &record.section_key, &record.anchor_id);
        self.bookmarks_by_anchor.remove(anchor_key.as_bytes())?;
        Ok(true)
    }

    /// All bookmarks, newest first.
    pub fn list_bookmarks(&self) -> Result<Vec<Bookmark>, StoreError> {
        let mut bookmarks = Vec::new();
        for item in self.bookmarks.iter() {
            let (_, raw) = item?;
            bookmarks.push(Self::deserialize::<Bookmark>(&raw)?);
        }
        bookmarks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(bookmarks)
    }
}
