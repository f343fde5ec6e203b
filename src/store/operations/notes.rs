use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_CAS_RETRIES;
use crate::store::keys;
use crate::store::{Store, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: u64,
    pub class_id: u32,
    pub section_key: String,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    /// Inserts a note with a server-assigned id. Callers pass already
    /// trimmed and validated text; the store does not re-validate.
    /// `created_at == updated_at` on insert.
    pub fn insert_note(
        &self,
        class_id: u32,
        section_key: &str,
        note: &str,
    ) -> Result<Note, StoreError> {
        let id = self.next_id("Note", keys::NOTE_SEQ_KEY)?;
        let now = Utc::now();
        let record = Note {
            id,
            class_id,
            section_key: section_key.to_string(),
            note: note.to_string(),
            created_at: now,
            updated_at: now,
        };

        let key = keys::note_key(id);
        self.notes.insert(key.as_bytes(), Self::serialize(&record)?)?;
        self.notes_by_class.insert(
            keys::note_class_index_key(class_id, id).as_bytes(),
            key.as_bytes(),
        )?;
        Ok(record)
    }

    /// Replaces the note text and bumps updated_at. created_at and
    /// class_id never change on update.
    ///
    /// The read-modify-write goes through compare_and_swap: a plain
    /// get-then-insert could resurrect a row that a concurrent delete
    /// removed between the two steps, stranding it without its
    /// class-index entry.
    pub fn update_note(&self, note_id: u64, note: &str) -> Result<Note, StoreError> {
        let key = keys::note_key(note_id);

        for _ in 0..MAX_CAS_RETRIES {
            let Some(raw) = self.notes.get(key.as_bytes())? else {
                return Err(StoreError::NotFound {
                    entity: "Note".to_string(),
                    key: note_id.to_string(),
                });
            };

            let mut record: Note = Self::deserialize(&raw)?;
            record.note = note.to_string();
            record.updated_at = Utc::now();

            let swapped = self.notes.compare_and_swap(
                key.as_bytes(),
                Some(raw),
                Some(Self::serialize(&record)?),
            )?;
            if swapped.is_ok() {
                return Ok(record);
            }
        }

        Err(StoreError::CasRetryExhausted {
            entity: "Note".to_string(),
            key: note_id.to_string(),
            attempts: MAX_CAS_RETRIES,
        })
    }

    /// Returns false when no row matched; the deletion is then a no-op.
    pub fn delete_note(&self, note_id: u64) -> Result<bool, StoreError> {
        let key = keys::note_key(note_id);
        let Some(raw) = self.notes.remove(key.as_bytes())? else {
            return Ok(false);
        };

        let record: Note = Self::deserialize(&raw)?;
        self.notes_by_class
            .remove(keys::note_class_index_key(record.class_id, note_id).as_bytes())?;
        Ok(true)
    }

    /// All notes for a class, newest-updated first.
    pub fn list_notes_by_class(&self, class_id: u32) -> Result<Vec<Note>, StoreError> {
        let prefix = keys::note_class_prefix(class_id);
        let mut notes = Vec::new();

        for item in self.notes_by_class.scan_prefix(prefix.as_bytes()) {
            let (_, note_key) = item?;
            if let Some(raw) = self.notes.get(&note_key)? {
                notes.push(Self::deserialize::<Note>(&raw)?);
            }
        }

        // Equal timestamps fall back to id so the order is stable
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(notes)
    }
}
