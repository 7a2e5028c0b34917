use color_eyre::eyre::eyre;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

/// Routes `tracing` output to a file. The terminal belongs to the game, so
/// nothing is written to stdout or stderr while it runs.
pub fn init(path: impl AsRef<Path>) -> color_eyre::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))
}
