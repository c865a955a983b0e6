//! Logger configuration object with pluggable sinks.
//!
//! A [`Logger`] owns its sinks and thresholds; nothing here touches
//! process-wide state. Messages are rendered through the format engine, so
//! templates use the same `{index[,alignment][:param]}` syntax as
//! [`format`](crate::format::format).

use std::fmt;
use std::panic::Location;

use crate::error::Result;
use crate::format::{FormatArg, format};
use crate::text::OString;

/// Log severity, ordered from least to most severe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Verbose,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rendered log message as seen by a sink.
#[derive(Clone, Debug)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: OString,
    /// Call site, present when the logger was built with locations on.
    pub location: Option<&'static Location<'static>>,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.level)?;
        if let Some(loc) = self.location {
            write!(f, "[{}:{}] ", loc.file(), loc.line())?;
        }
        write!(f, "{}", self.message)
    }
}

type Sink = Box<dyn Fn(&LogRecord) + Send + Sync + 'static>;

struct SinkEntry {
    min_level: LogLevel,
    sink: Sink,
}

/// Explicit logging configuration.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use openstring::log::{LogLevel, Logger};
/// use openstring::ofmt_args;
///
/// let lines = Arc::new(Mutex::new(Vec::new()));
/// let captured = Arc::clone(&lines);
/// let logger = Logger::new().with_sink(LogLevel::Info, move |record| {
///     captured.lock().unwrap().push(record.to_string());
/// });
///
/// logger.info("loaded {0} of {1}", ofmt_args![3, 4]).unwrap();
/// logger.debug("not shown", &[]).unwrap();
/// assert_eq!(*lines.lock().unwrap(), vec!["[info] loaded 3 of 4".to_string()]);
/// ```
pub struct Logger {
    min_level: LogLevel,
    with_location: bool,
    sinks: Vec<SinkEntry>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .field("with_location", &self.with_location)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl Logger {
    /// A logger with no sinks that accepts every level.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Verbose,
            with_location: false,
            sinks: Vec::new(),
        }
    }

    /// Drop messages below `level` before any formatting happens.
    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Attach the caller's file and line to every record.
    #[must_use]
    pub fn with_location(mut self, enabled: bool) -> Self {
        self.with_location = enabled;
        self
    }

    #[must_use]
    pub fn with_sink<F>(mut self, min_level: LogLevel, sink: F) -> Self
    where
        F: Fn(&LogRecord) + Send + Sync + 'static,
    {
        self.add_sink(min_level, sink);
        self
    }

    /// Register a sink receiving records at `min_level` and above.
    pub fn add_sink<F>(&mut self, min_level: LogLevel, sink: F)
    where
        F: Fn(&LogRecord) + Send + Sync + 'static,
    {
        self.sinks.push(SinkEntry {
            min_level,
            sink: Box::new(sink),
        });
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    #[must_use]
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Whether a message at `level` would reach at least one sink.
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level && self.sinks.iter().any(|s| level >= s.min_level)
    }

    /// Format `template` with `args` and hand the record to matching sinks.
    ///
    /// Messages that no sink would accept are not formatted.
    ///
    /// # Errors
    ///
    /// Any error from the format engine.
    #[track_caller]
    pub fn log(
        &self,
        level: LogLevel,
        template: impl AsRef<[u16]>,
        args: &[FormatArg<'_>],
    ) -> Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }
        let location = if self.with_location {
            Some(Location::caller())
        } else {
            None
        };
        let record = LogRecord {
            level,
            message: format(template, args)?,
            location,
        };
        for entry in self.sinks.iter().filter(|s| level >= s.min_level) {
            (entry.sink)(&record);
        }
        Ok(())
    }

    /// [`log`](Self::log) with a UTF-8 template.
    #[track_caller]
    pub fn log_str(
        &self,
        level: LogLevel,
        template: &str,
        args: &[FormatArg<'_>],
    ) -> Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }
        self.log(level, OString::from(template), args)
    }

    #[track_caller]
    pub fn verbose(&self, template: &str, args: &[FormatArg<'_>]) -> Result<()> {
        self.log_str(LogLevel::Verbose, template, args)
    }

    #[track_caller]
    pub fn debug(&self, template: &str, args: &[FormatArg<'_>]) -> Result<()> {
        self.log_str(LogLevel::Debug, template, args)
    }

    #[track_caller]
    pub fn info(&self, template: &str, args: &[FormatArg<'_>]) -> Result<()> {
        self.log_str(LogLevel::Info, template, args)
    }

    #[track_caller]
    pub fn warn(&self, template: &str, args: &[FormatArg<'_>]) -> Result<()> {
        self.log_str(LogLevel::Warn, template, args)
    }

    #[track_caller]
    pub fn error(&self, template: &str, args: &[FormatArg<'_>]) -> Result<()> {
        self.log_str(LogLevel::Error, template, args)
    }

    #[track_caller]
    pub fn fatal(&self, template: &str, args: &[FormatArg<'_>]) -> Result<()> {
        self.log_str(LogLevel::Fatal, template, args)
    }
}

/// Sink that re-emits records as `tracing` events.
///
/// `Verbose` maps to TRACE and `Fatal` to ERROR.
pub fn tracing_sink(record: &LogRecord) {
    let message = record.message.to_utf8();
    let (file, line) = record
        .location
        .map_or(("", 0), |loc| (loc.file(), loc.line()));
    match record.level {
        LogLevel::Verbose => {
            tracing::trace!(caller.file = file, caller.line = line, "{message}");
        }
        LogLevel::Debug => {
            tracing::debug!(caller.file = file, caller.line = line, "{message}");
        }
        LogLevel::Info => {
            tracing::info!(caller.file = file, caller.line = line, "{message}");
        }
        LogLevel::Warn => {
            tracing::warn!(caller.file = file, caller.line = line, "{message}");
        }
        LogLevel::Error => {
            tracing::error!(caller.file = file, caller.line = line, "{message}");
        }
        LogLevel::Fatal => {
            tracing::error!(caller.file = file, caller.line = line, fatal = true, "{message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ofmt_args;
    use std::sync::{Arc, Mutex};

    fn capture(logger: Logger, level: LogLevel) -> (Logger, Arc<Mutex<Vec<LogRecord>>>) {
        let records = Arc::new(Mutex::new(Vec::new()));
        let sink_records = Arc::clone(&records);
        let logger = logger.with_sink(level, move |record| {
            sink_records.lock().unwrap().push(record.clone());
        });
        (logger, records)
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(LogLevel::Verbose < LogLevel::Debug);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn test_sink_level_gate() {
        let (logger, records) = capture(Logger::new(), LogLevel::Warn);
        logger.info("quiet", &[]).unwrap();
        logger.warn("loud {0}", ofmt_args![1]).unwrap();
        logger.fatal("louder", &[]).unwrap();

        let records = records.lock().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "loud 1");
        assert_eq!(records[1].level, LogLevel::Fatal);
    }

    #[test]
    fn test_logger_min_level() {
        let (logger, records) = capture(Logger::new(), LogLevel::Verbose);
        let logger = logger.with_min_level(LogLevel::Error);
        assert!(!logger.enabled(LogLevel::Warn));
        logger.warn("dropped", &[]).unwrap();
        logger.error("kept", &[]).unwrap();
        assert_eq!(records.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_location_decoration() {
        let (logger, records) = capture(Logger::new().with_location(true), LogLevel::Verbose);
        logger.info("here", &[]).unwrap();
        let line = line!() - 1;

        let records = records.lock().unwrap();
        let loc = records[0].location.expect("location");
        assert!(loc.file().ends_with("log.rs"));
        assert_eq!(loc.line(), line);
        assert_eq!(
            records[0].to_string(),
            format!("[info] [{}:{line}] here", loc.file())
        );
    }

    #[test]
    fn test_format_errors_propagate() {
        let (logger, records) = capture(Logger::new(), LogLevel::Verbose);
        assert!(logger.info("{0}", &[]).is_err());
        assert!(records.lock().unwrap().is_empty());
    }

    #[test]
    fn test_filtered_message_is_not_formatted() {
        let (logger, _records) = capture(Logger::new(), LogLevel::Error);
        // Malformed, but never rendered
        assert!(logger.debug("{0", &[]).is_ok());
    }

    #[test]
    fn test_tracing_sink_forwards() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();

        let logger = Logger::new()
            .with_location(true)
            .with_sink(LogLevel::Verbose, tracing_sink);
        for level in [
            LogLevel::Verbose,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
            LogLevel::Fatal,
        ] {
            logger.log_str(level, "level {0}", ofmt_args![level.as_str()]).unwrap();
        }
    }
}
