//! Opt-in logging for the pandera dtypes library.
//!
//! The library only emits through the `log` facade. This module installs an
//! `env_logger` backend for callers that have no logger of their own, most
//! notably the Python extension module.

use log::LevelFilter;
use std::fs::{File, OpenOptions};
use std::sync::Once;

use crate::error::DtypeError;

static INIT_LOGGER: Once = Once::new();

/// What a call to [`enable_verbose_logging`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerStatus {
    /// This call installed the logger, with the requested target.
    Installed,
    /// A logger was already in place. The requested target was not applied
    /// and no log file was created.
    AlreadyInstalled,
}

/// Opens `filename` for appending, creating it if needed.
fn open_log_file(filename: &str) -> Result<File, DtypeError> {
    Ok(OpenOptions::new().append(true).create(true).open(filename)?)
}

/// Installs an `env_logger` at `Info` level, once per process.
///
/// Records are written as `[LEVEL] message`, to stderr or, if `log_file` is
/// given, appended to that file. Returns `LoggerStatus::AlreadyInstalled`
/// if this function already ran, or if another logger was installed by
/// someone else; in that case `log_file` is not touched.
pub fn enable_verbose_logging(log_file: Option<&str>) -> Result<LoggerStatus, DtypeError> {
    if INIT_LOGGER.is_completed() {
        return Ok(LoggerStatus::AlreadyInstalled);
    }

    // Open the file up front so a bad path surfaces as an error, not a panic.
    let file = log_file.map(open_log_file).transpose()?;

    let mut status = LoggerStatus::AlreadyInstalled;
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Info);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        if builder.try_init().is_ok() {
            status = LoggerStatus::Installed;
        }
    });
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_rejects_bad_path() {
        let result = open_log_file("/nonexistent-dir/pandera-dtypes/log.txt");
        assert!(matches!(result, Err(DtypeError::Io(_))));
    }

    #[test]
    fn test_second_call_reports_already_installed() {
        // The first call may or may not win, depending on test order.
        assert!(enable_verbose_logging(None).is_ok());

        let path = std::env::temp_dir().join(format!(
            "pandera-dtypes-second-call-{}.log",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let status = enable_verbose_logging(path.to_str()).unwrap();
        assert_eq!(status, LoggerStatus::AlreadyInstalled);
        assert!(!path.exists(), "log file created by a no-op call");

        log::info!("verbose logging enabled twice");
    }
}
