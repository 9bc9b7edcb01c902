// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! File logging for the binary. The terminal belongs to the TUI, so nothing
//! is written to stderr once the UI is up.

use anyhow::{Context, Result, bail};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use std::fs;
use std::path::Path;

const LOG_FILE_BASENAME: &str = "estate";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Starts rotating file logs in `log_dir`. Keep the returned handle alive for
/// the lifetime of the process; dropping it flushes and stops the logger.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<LoggerHandle> {
    let level = normalize_level(level)?;
    fs::create_dir_all(log_dir)
        .with_context(|| format!("create log directory {}", log_dir.display()))?;

    let handle = Logger::try_with_str(level)
        .with_context(|| format!("invalid log level {level:?}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .with_context(|| {
            format!(
                "start file logger in {} -- set [log].dir to a writable directory",
                log_dir.display()
            )
        })?;

    info!(
        "estate {} starting, level={level} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        log_dir.display()
    );
    Ok(handle)
}

/// Case-insensitive match against [`LOG_LEVELS`]; config validation uses the
/// same check.
pub fn normalize_level(level: &str) -> Result<&'static str> {
    let wanted = level.trim().to_ascii_lowercase();
    match LOG_LEVELS.into_iter().find(|known| *known == wanted) {
        Some(known) => Ok(known),
        None => bail!(
            "unsupported log level {wanted:?}; expected {}",
            LOG_LEVELS.join("|")
        ),
    }
}
