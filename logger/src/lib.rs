#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Explicitly-configured sink logger for the Grid Runner binary.
//!
//! The logger is a caller-constructed value with a controlled lifetime: the
//! process builds the sink set and severity floor once at startup and
//! installs the result behind the [`log`] facade. There is no lazily
//! constructed global and therefore no "configure before first use" ordering
//! hazard; a second install attempt is rejected by the facade and surfaces as
//! a non-fatal [`LoggerError::AlreadyInstalled`].
//!
//! Output strategies form a closed set: console (stderr), line-buffered file
//! append, and a composite that fans out to its children in registration
//! order. Records that pass the severity filter are formatted as
//! `[YYYY-MM-DD HH:MM:SS] LEVEL: message`. Sink write failures are swallowed;
//! logging never aborts the process.

use std::{
    fs::OpenOptions,
    io::{LineWriter, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::Local;
use log::{LevelFilter, Metadata, Record};
use thiserror::Error;

/// Errors reported by logger construction and installation.
///
/// Both variants are non-fatal by design: callers report them and continue
/// with whatever logging remains available.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// A logger has already been installed for this process.
    #[error("a logger is already installed for this process")]
    AlreadyInstalled,
    /// A file sink could not open its backing file.
    #[error("failed to open log file {path}: {source}")]
    OpenFile {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// One output strategy for formatted log lines.
#[derive(Debug)]
pub enum Sink {
    /// Writes lines to standard error.
    Console,
    /// Appends lines to a file, flushing on every newline.
    File(Mutex<LineWriter<std::fs::File>>),
    /// Fans lines out to every child in registration order.
    Composite(Vec<Sink>),
}

impl Sink {
    /// Creates a console sink.
    #[must_use]
    pub fn console() -> Self {
        Self::Console
    }

    /// Creates a file sink appending to `path`, creating the file if needed.
    pub fn file(path: impl AsRef<Path>) -> Result<Self, LoggerError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LoggerError::OpenFile {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::File(Mutex::new(LineWriter::new(file))))
    }

    /// Creates a composite sink that forwards to `children` in order.
    #[must_use]
    pub fn composite(children: Vec<Sink>) -> Self {
        Self::Composite(children)
    }

    fn write_line(&self, line: &str) {
        match self {
            Self::Console => eprintln!("{line}"),
            Self::File(writer) => {
                if let Ok(mut writer) = writer.lock() {
                    let _ = writeln!(writer, "{line}");
                }
            }
            Self::Composite(children) => {
                for child in children {
                    child.write_line(line);
                }
            }
        }
    }
}

/// Severity-filtered logger that forwards formatted records to one [`Sink`].
#[derive(Debug)]
pub struct SinkLogger {
    level: LevelFilter,
    sink: Sink,
}

impl SinkLogger {
    /// Creates a logger with the given severity floor and sink.
    #[must_use]
    pub fn new(level: LevelFilter, sink: Sink) -> Self {
        Self { level, sink }
    }

    /// Installs the logger behind the [`log`] facade.
    ///
    /// The facade accepts exactly one logger per process; subsequent calls
    /// fail with [`LoggerError::AlreadyInstalled`] and leave the previously
    /// installed configuration untouched.
    pub fn install(self) -> Result<(), LoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self)).map_err(|_| LoggerError::AlreadyInstalled)?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for SinkLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            self.sink.write_line(&format_record(record));
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record<'_>) -> String {
    format!(
        "[{}] {}: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        record.level(),
        record.args()
    )
}
