use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use color_eyre::{Result, eyre::WrapErr};
use tracing_subscriber::EnvFilter;

/// Sends tracing output to `path`; the terminal belongs to the game while it runs.
///
/// Honours `RUST_LOG`, defaulting to `info`.
pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| color_eyre::eyre::eyre!("failed to install log subscriber: {err}"))?;
    Ok(())
}
