//! Logger setup.
//!
//! Standard output carries the XML document, so log records go to standard
//! error only. The level is read from the `SOL25C_LOG` environment variable
//! (`error`, `warn`, `info`, `debug`, `trace`); logging is off by default.

use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        eprintln!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// Install the stderr logger. Safe to call more than once; only the first
/// call wins.
pub fn init() {
    let level = std::env::var("SOL25C_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Off);

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        log::debug!("no panic expected");
    }

    #[test]
    fn test_level_filter_parsing() {
        assert_eq!("debug".parse::<LevelFilter>().ok(), Some(LevelFilter::Debug));
        assert_eq!("OFF".parse::<LevelFilter>().ok(), Some(LevelFilter::Off));
        assert!("nonsense".parse::<LevelFilter>().is_err());
    }
}
