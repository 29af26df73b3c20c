//! Error taxonomy for the library half of the crate. Scanner errors and store
//! errors are kept apart because callers treat them very differently: a
//! missing media directory degrades to an empty catalog, while a storage
//! failure must always reach the client.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::SelectionKey;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("background directory {} is unavailable: {source}", path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum StoreError {
    /// The database file or its parent directory could not be opened or
    /// created. Fatal at startup.
    #[error("selection store at {} is unavailable: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to read {key}: {source}")]
    ReadFailed {
        key: SelectionKey,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to write {key}: {source}")]
    WriteFailed {
        key: SelectionKey,
        #[source]
        source: rusqlite::Error,
    },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
