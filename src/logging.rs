#![cfg(feature = "std")]

//! Diagnostics for the program's operator.
//!
//! Everything the player needs to see goes through the console. Log records
//! are written to stderr so they can be redirected away from the game.

use std::env;
use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable that overrides the command-line verbosity.
pub const LOG_ENV: &str = "INTERJECT_LOG";

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut err = std::io::stderr().lock();
        let _ = writeln!(
            err,
            "[{:<5} {}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

/// Pick the log level: a valid `env` value wins, otherwise each `-v` raises
/// the level one step above `warn`.
pub fn log_level(env: Option<&str>, verbose: u8) -> LevelFilter {
    if let Some(level) = env.and_then(|lvl| lvl.trim().parse().ok()) {
        return level;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the stderr logger. Later calls keep the first logger.
pub fn init_logging(verbose: u8) {
    let level = log_level(env::var(LOG_ENV).ok().as_deref(), verbose);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
