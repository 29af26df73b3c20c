use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use directories::BaseDirs;
use rusqlite::Connection;

use crate::error::{StoreError, StoreResult};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".ambient-room";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "settings.db";

/// How long a writer waits on a lock held by another connection.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Schema for the key/value table. `key` is unique so the upsert in
/// `selections.rs` can target it with `ON CONFLICT`.
const CREATE_SETTINGS_TABLE: &str = "CREATE TABLE IF NOT EXISTS settings (
    id INTEGER PRIMARY KEY,
    key TEXT NOT NULL UNIQUE,
    value TEXT NOT NULL
)";

/// Handle to the durable selection store. The connection sits behind a mutex
/// so one handle can be shared (via `Arc`) by every request task; SQLite's own
/// locking still governs other processes touching the same file.
#[derive(Debug)]
pub struct SelectionStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SelectionStore {
    /// Open (creating if necessary) the database at `path` and make sure the
    /// `settings` table exists. Safe to call on every startup.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let unavailable = |source: Box<dyn std::error::Error + Send + Sync>| {
            StoreError::Unavailable {
                path: path.to_path_buf(),
                source,
            }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| unavailable(err.into()))?;
        }

        let conn = Connection::open(path).map_err(|err| unavailable(err.into()))?;
        // WAL lets readers in other processes proceed while a write is in flight.
        conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get::<_, String>(0))
            .map_err(|err| unavailable(err.into()))?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|err| unavailable(err.into()))?;
        ensure_schema(&conn).map_err(|err| unavailable(err.into()))?;

        tracing::debug!(path = %path.display(), "selection store ready");
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Throwaway store used by tests and by callers that do not need
    /// persistence.
    pub fn open_in_memory() -> StoreResult<Self> {
        let unavailable = |err: rusqlite::Error| StoreError::Unavailable {
            path: PathBuf::from(":memory:"),
            source: err.into(),
        };
        let conn = Connection::open_in_memory().map_err(unavailable)?;
        ensure_schema(&conn).map_err(unavailable)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Location of the backing file, or `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Borrow the connection. A poisoned lock only means another request
    /// panicked mid-query; SQLite rolled that statement back, so the
    /// connection is still usable.
    pub(crate) fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Idempotent DDL, split out so both constructors share it.
fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(CREATE_SETTINGS_TABLE, []).map(|_| ())
}

/// Resolve the default database path inside the user's home directory.
pub fn default_db_path() -> anyhow::Result<PathBuf> {
    let base_dirs =
        BaseDirs::new().ok_or_else(|| anyhow::anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_count(store: &SelectionStore) -> i64 {
        store
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'settings'",
                [],
                |row| row.get(0),
            )
            .unwrap()
    }

    #[test]
    fn open_creates_settings_table_and_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("settings.db");

        let store = SelectionStore::open(&db_path).unwrap();

        assert!(db_path.exists());
        assert_eq!(table_count(&store), 1);
        assert_eq!(store.path(), Some(db_path.as_path()));
    }

    #[test]
    fn open_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("settings.db");

        drop(SelectionStore::open(&db_path).unwrap());
        let store = SelectionStore::open(&db_path).unwrap();

        assert_eq!(table_count(&store), 1);
    }

    #[test]
    fn open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = SelectionStore::open(blocker.join("settings.db")).unwrap_err();

        assert!(matches!(err, StoreError::Unavailable { .. }));
    }
}
