use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::Context;
use env_logger::{Builder, Env, Target};

/// Environment variable holding the log filter, e.g. `TYPESPEED_LOG=debug`
pub const LOG_ENV: &str = "TYPESPEED_LOG";

/// Send log output to `path`. The terminal belongs to the UI, so nothing is
/// ever written to stdout or stderr.
pub fn init(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    Builder::from_env(Env::default().filter_or(LOG_ENV, "info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("installing logger")?;

    log::info!("typespeed {} starting", env!("CARGO_PKG_VERSION"));
    Ok(())
}
