//! Core library surface for the ambient room server.
//!
//! Two independent pieces do the real work: `catalog` turns a directory of
//! media into selectable backgrounds (plus a fixed list of sounds), and `db`
//! persists the user's current picks in SQLite. `server` wires both into an
//! HTTP front-end; `main.rs` only handles bootstrapping.
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod server;

/// Catalog builder entry points used when rendering the page.
pub use catalog::{list_backgrounds, list_sounds, DiscoveryMode};

/// Selection store handle and its two operations.
pub use db::{get_selection, set_selection, SelectionStore};

pub use error::{CatalogError, StoreError};

/// The data types passed between layers.
pub use models::{BackgroundEntry, MediaKind, SelectionKey, SoundEntry};
