//! Process-wide `tracing` setup.
//!
//! Filtering follows `RUST_LOG` and defaults to `info`. File output goes to
//! `<dir>/<unix_nanos>.log`, one file per process start, through a
//! non-blocking writer: keep the returned guard alive until exit or the tail
//! of the log is lost.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Where log lines go.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LogTarget {
    Stdout,
    Dir(PathBuf),
}

/// Installs the global subscriber. Returns the file writer's guard, if any.
pub fn init(target: &LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match target {
        LogTarget::Stdout => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .try_init()
                .map_err(|e| Error::Logging(e.to_string()))?;
            Ok(None)
        }
        LogTarget::Dir(dir) => {
            fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::never(dir, log_file_name());
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| Error::Logging(e.to_string()))?;
            Ok(Some(guard))
        }
    }
}

fn log_file_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{nanos}.log")
}
