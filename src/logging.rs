use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const HARVEST_LOG_FILE: &str = "data_refresh.log";
const TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Harvester logging: console echo plus `<log_dir>/data_refresh.log`.
pub fn init_harvest(log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;
    let log_path = log_dir.join(HARVEST_LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open {:?}", log_path))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            fmt::layer()
                .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
                .with_writer(io::stdout),
        )
        .with(
            fmt::layer()
                .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;
    Ok(())
}

/// Splitter logging. Errors always reach stdout; progress and skipped-line
/// warnings only when `verbose`.
pub fn init_console(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::ERROR
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stdout)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(anyhow::Error::msg)
}
