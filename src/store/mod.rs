pub mod keys;
pub mod migrate;
pub mod operations;
pub mod trees;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::Db;
use thiserror::Error;

use crate::constants::MAX_CAS_RETRIES;

/// sled-backed user-data store: three entity trees plus two secondary
/// index trees and a `meta` tree (schema version, id counters).
#[derive(Debug)]
pub struct Store {
    db: Db,
    pub progress: sled::Tree,
    pub notes: sled::Tree,
    pub notes_by_class: sled::Tree,
    pub bookmarks: sled::Tree,
    pub bookmarks_by_anchor: sled::Tree,
    pub meta: sled::Tree,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("not found: entity={entity}, key={key}")]
    NotFound { entity: String, key: String },
    #[error("conflict: entity={entity}, key={key}")]
    Conflict { entity: String, key: String },
    #[error("CAS retry exhausted after {attempts} attempts: entity={entity}, key={key}")]
    CasRetryExhausted {
        entity: String,
        key: String,
        attempts: u32,
    },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("migration error at version {version}: {message}")]
    Migration { version: u32, message: String },
}

impl Store {
    pub fn open(sled_path: &str) -> Result<Self, StoreError> {
        let db = sled::open(sled_path)?;
        let progress = db.open_tree(trees::PROGRESS)?;
        let notes = db.open_tree(trees::NOTES)?;
        let notes_by_class = db.open_tree(trees::NOTES_BY_CLASS)?;
        let bookmarks = db.open_tree(trees::BOOKMARKS)?;
        let bookmarks_by_anchor = db.open_tree(trees::BOOKMARKS_BY_ANCHOR)?;
        let meta = db.open_tree(trees::META)?;

        Ok(Self {
            db,
            progress,
            notes,
            notes_by_class,
            bookmarks,
            bookmarks_by_anchor,
            meta,
        })
    }

    pub fn run_migrations(&self) -> Result<(), StoreError> {
        migrate::run(self)
    }

    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }

    /// Allocates the next id in a monotonic per-entity sequence.
    /// Ids start at 1; the counter lives in the meta tree and is
    /// advanced with a bounded CAS loop.
    pub(crate) fn next_id(&self, entity: &str, seq_key: &str) -> Result<u64, StoreError> {
        for _ in 0..MAX_CAS_RETRIES {
            let current = self.meta.get(seq_key.as_bytes())?;
            let next: u64 = match &current {
                Some(raw) => Self::deserialize::<u64>(raw)? + 1,
                None => 1,
            };
            let swapped = self.meta.compare_and_swap(
                seq_key.as_bytes(),
                current,
                Some(Self::serialize(&next)?),
            )?;
            if swapped.is_ok() {
                return Ok(next);
            }
        }
        Err(StoreError::CasRetryExhausted {
            entity: entity.to_string(),
            key: seq_key.to_string(),
            attempts: MAX_CAS_RETRIES,
        })
    }

    pub(crate) fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec(value)?)
    }

    pub(crate) fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (tempfile::TempDir, Store) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store =
            Store::open(tmp.path().join("store-test.sled").to_str().unwrap()).expect("open");
        (tmp, store)
    }

    #[test]
    fn next_id_is_dense_and_starts_at_one() {
        let (_tmp, store) = open_temp();
        assert_eq!(store.next_id("Note", "seq:notes").unwrap(), 1);
        assert_eq!(store.next_id("Note", "seq:notes").unwrap(), 2);
        assert_eq!(store.next_id("Note", "seq:notes").unwrap(), 3);
    }

    #[test]
    fn sequences_are_independent_per_entity() {
        let (_tmp, store) = open_temp();
        assert_eq!(store.next_id("Note", "seq:notes").unwrap(), 1);
        assert_eq!(store.next_id("Bookmark", "seq:bookmarks").unwrap(), 1);
        assert_eq!(store.next_id("Note", "seq:notes").unwrap(), 2);
    }

    #[test]
    fn next_id_survives_reopen() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("reopen.sled");
        {
            let store = Store::open(path.to_str().unwrap()).expect("open");
            assert_eq!(store.next_id("Note", "seq:notes").unwrap(), 1);
            store.flush().expect("flush");
        }
        let store = Store::open(path.to_str().unwrap()).expect("reopen");
        assert_eq!(store.next_id("Note", "seq:notes").unwrap(), 2);
    }
}
