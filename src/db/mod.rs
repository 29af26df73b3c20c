//! Persistence for the user's chosen background and sound. `connection.rs`
//! opens the SQLite file and owns the schema; `selections.rs` holds the two
//! queries run against the `settings` table.

mod connection;
mod selections;

pub use connection::{default_db_path, SelectionStore};
pub use selections::{get_selection, set_selection};
