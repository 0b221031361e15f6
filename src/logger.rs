//! Custom logging module.
//!
//! This module provides a small `log` backend that formats entries with a
//! UTC timestamp and writes them to standard error, keeping diagnostic
//! output away from the banner lines on standard output.

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Logger writing formatted records to standard error.
///
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_log(record));
        }
    }

    fn flush(&self) {
        // No-op
    }
}

/// Install the stderr logger at the given level. Returns an error if a
/// logger was already installed.
///
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(StderrLogger))?;
    log::set_max_level(level);
    Ok(())
}
