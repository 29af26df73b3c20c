use rusqlite::{params, OptionalExtension};

use crate::db::SelectionStore;
use crate::error::{StoreError, StoreResult};
use crate::models::SelectionKey;

/// Read the persisted value for `key`. An absent row is the normal first-run
/// state and comes back as `Ok(None)`, not as an error.
pub fn get_selection(store: &SelectionStore, key: SelectionKey) -> StoreResult<Option<String>> {
    store
        .connection()
        .query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key.as_str()],
            |row| row.get(0),
        )
        .optional()
        .map_err(|source| StoreError::ReadFailed { key, source })
}

/// Insert or replace the value for `key`. The single `ON CONFLICT` statement
/// runs inside SQLite's write lock, so readers see either the old value or the
/// new one and the table never holds two rows for the same key. The value is
/// stored as-is; it is not checked against the catalog.
pub fn set_selection(store: &SelectionStore, key: SelectionKey, value: &str) -> StoreResult<()> {
    store
        .connection()
        .execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key.as_str(), value],
        )
        .map_err(|source| StoreError::WriteFailed { key, source })?;

    tracing::debug!(%key, value, "selection saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_count(store: &SelectionStore, key: SelectionKey) -> i64 {
        store
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM settings WHERE key = ?1",
                [key.as_str()],
                |row| row.get(0),
            )
            .unwrap()
    }

    #[test]
    fn fresh_store_has_no_selections() {
        let store = SelectionStore::open_in_memory().unwrap();

        assert_eq!(get_selection(&store, SelectionKey::Background).unwrap(), None);
        assert_eq!(get_selection(&store, SelectionKey::Sound).unwrap(), None);
    }

    #[test]
    fn last_write_wins_without_duplicate_rows() {
        let store = SelectionStore::open_in_memory().unwrap();

        set_selection(&store, SelectionKey::Background, "Autumn_Rain.mov").unwrap();
        set_selection(&store, SelectionKey::Background, "River_Fire.mov").unwrap();

        assert_eq!(
            get_selection(&store, SelectionKey::Background).unwrap().as_deref(),
            Some("River_Fire.mov")
        );
        assert_eq!(row_count(&store, SelectionKey::Background), 1);
    }

    #[test]
    fn keys_are_independent() {
        let store = SelectionStore::open_in_memory().unwrap();

        set_selection(&store, SelectionKey::Background, "River_Fire.mov").unwrap();
        set_selection(&store, SelectionKey::Sound, "rain.mp3").unwrap();

        assert_eq!(
            get_selection(&store, SelectionKey::Background).unwrap().as_deref(),
            Some("River_Fire.mov")
        );
        assert_eq!(
            get_selection(&store, SelectionKey::Sound).unwrap().as_deref(),
            Some("rain.mp3")
        );
    }

    #[test]
    fn empty_value_is_stored_verbatim() {
        let store = SelectionStore::open_in_memory().unwrap();

        set_selection(&store, SelectionKey::Sound, "").unwrap();

        assert_eq!(get_selection(&store, SelectionKey::Sound).unwrap().as_deref(), Some(""));
    }

    #[test]
    fn selection_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("settings.db");

        {
            let store = SelectionStore::open(&db_path).unwrap();
            set_selection(&store, SelectionKey::Background, "River_Fire.mov").unwrap();
        }

        let store = SelectionStore::open(&db_path).unwrap();
        assert_eq!(
            get_selection(&store, SelectionKey::Background).unwrap().as_deref(),
            Some("River_Fire.mov")
        );
    }

    #[test]
    fn read_failure_is_reported_not_swallowed() {
        let store = SelectionStore::open_in_memory().unwrap();
        store.connection().execute("DROP TABLE settings", []).unwrap();

        let err = get_selection(&store, SelectionKey::Sound).unwrap_err();
        assert!(matches!(err, StoreError::ReadFailed { key: SelectionKey::Sound, .. }));

        let err = set_selection(&store, SelectionKey::Sound, "rain.mp3").unwrap_err();
        assert!(matches!(err, StoreError::WriteFailed { key: SelectionKey::Sound, .. }));
    }
}
