//! Binary entry point: parse configuration, open the selection store, and run
//! the HTTP server until it is interrupted.
use std::sync::Arc;

use ambient_room::config::Cli;
use ambient_room::logging::init_tracing;
use ambient_room::server::serve;
use ambient_room::SelectionStore;
use anyhow::Context;
use clap::Parser;

/// A store that cannot be opened is fatal: the server must not start without
/// somewhere to persist selections.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let config = Cli::parse().resolve()?;

    let store = SelectionStore::open(&config.database).with_context(|| {
        format!(
            "failed to initialize selection store at {}",
            config.database.display()
        )
    })?;
    tracing::info!(database = %config.database.display(), "selection store opened");

    serve(&config, Arc::new(store)).await
}
