use crate::store::keys::SCHEMA_VERSION_KEY;
use crate::store::{Store, StoreError};

/// Current on-disk schema version. Version 1 is the baseline layout
/// (entity trees + index trees + meta).
pub const CURRENT_VERSION: u32 = 1;

pub fn run(store: &Store) -> Result<(), StoreError> {
    let recorded: u32 = match store.meta.get(SCHEMA_VERSION_KEY.as_bytes())? {
        Some(raw) => Store::deserialize(&raw)?,
        None => 0,
    };

    if recorded > CURRENT_VERSION {
        return Err(StoreError::Migration {
            version: recorded,
            message: format!(
                "store was written by a newer schema (supported: {CURRENT_VERSION})"
            ),
        });
    }

    if recorded < CURRENT_VERSION {
        tracing::info!(from = recorded, to = CURRENT_VERSION, "Migrating store schema");
        store.meta.insert(
            SCHEMA_VERSION_KEY.as_bytes(),
            Store::serialize(&CURRENT_VERSION)?,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_is_stamped_with_current_version() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = Store::open(tmp.path().join("m.sled").to_str().unwrap()).expect("open");
        run(&store).expect("migrate");

        let raw = store
            .meta
            .get(SCHEMA_VERSION_KEY.as_bytes())
            .unwrap()
            .expect("version stamped");
        let version: u32 = Store::deserialize(&raw).unwrap();
        assert_eq!(version, CURRENT_VERSION);
    }

    #[test]
    fn newer_schema_is_rejected() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = Store::open(tmp.path().join("m2.sled").to_str().unwrap()).expect("open");
        store
            .meta
            .insert(
                SCHEMA_VERSION_KEY.as_bytes(),
                Store::serialize(&(CURRENT_VERSION + 1)).unwrap(),
            )
            .unwrap();

        let err = run(&store).unwrap_err();
        assert!(matches!(err, StoreError::Migration { .. }));
    }

    #[test]
    fn rerun_is_idempotent() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = Store::open(tmp.path().join("m3.sled").to_str().unwrap()).expect("open");
        run(&store).expect("first");
        run(&store).expect("second");
    }
}
