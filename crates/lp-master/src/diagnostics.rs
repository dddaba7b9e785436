//! Diagnostic sink: prints engine trace lines to stderr.
//!
//! Every line is prefixed with its source location and module:
//! `TRACE sequencer.rs:212 @ lp_engine::sequencer(): [1.07] start degree 3 on layer 0`.
//! The engine puts the musical time at the front of each message.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: DiagnosticLogger = DiagnosticLogger;

pub struct DiagnosticLogger;

impl DiagnosticLogger {
    /// Install as the global logger, passing records up to `level`.
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_logger(&LOGGER)?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for DiagnosticLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}{}", prefix(record), record.args());
        }
    }

    fn flush(&self) {}
}

/// `LEVEL file:line @ module(): `, with the file reduced to its name.
pub fn prefix(record: &Record) -> String {
    let file = record
        .file()
        .map(|f| f.rsplit(['/', '\\']).next().unwrap_or(f))
        .unwrap_or("?");
    format!(
        "{:<5} {}:{} @ {}(): ",
        record.level(),
        file,
        record.line().unwrap_or(0),
        record.module_path().unwrap_or("?")
    )
}
