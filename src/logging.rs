//! File-backed tracing setup
//!
//! The dashboard owns the alternate screen, so log output goes to
//! `souq-tui.log` under the config directory instead of stdout.
//! `SOUQ_TUI_LOG` overrides the default `info` filter.

use anyhow::Result;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub fn init(config_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(config_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config_dir.join("souq-tui.log"))?;

    let filter = EnvFilter::try_from_env("SOUQ_TUI_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    Ok(())
}
