// src/logger.rs
//! File logging. The terminal belongs to the UI, so log lines go to a file.

use crate::config::LoggingConfig;
use chrono::Local;
use log::LevelFilter;
use std::path::Path;

pub fn init(config: &LoggingConfig, file: &Path) -> Result<(), fern::InitError> {
    if !config.enabled {
        return Ok(());
    }
    if let Some(parent) = file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let level = config.level.parse().unwrap_or(LevelFilter::Info);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] {:<5} {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(fern::log_file(file)?)
        .apply()?;

    log::info!("logging to {}", file.display());
    Ok(())
}
