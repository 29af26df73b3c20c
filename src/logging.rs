use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "ambient_room=info";

/// Install the global tracing subscriber. Output goes to stderr; verbosity is
/// controlled through `RUST_LOG`. Calling it twice returns an error instead of
/// panicking.
pub fn init_tracing() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(
            fmt::Layer::default()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(filter)
        .try_init()?;

    tracing::debug!(
        target: "ambient_room::logging",
        "Tracing initialized. Filter configured via RUST_LOG env var."
    );
    Ok(())
}
