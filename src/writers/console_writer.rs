use crate::{
    util::with_formatted_line, writers::LogWriter, DeferredNow, FormatFunction, Level, LogEvent,
};
use std::io::Write;

/// Writes log lines to stderr or to stdout.
///
/// Use [`ConsoleWriter::builder`] to configure it,
/// or the factory [`console_handler`](crate::handlers::console_handler).
pub struct ConsoleWriter {
    stdout: bool,
    format: FormatFunction,
    min_level: Level,
}

impl ConsoleWriter {
    /// Instantiates a builder for `ConsoleWriter`.
    ///
    /// By default, the writer writes to stderr all levels in the default format.
    #[must_use]
    pub fn builder() -> ConsoleWriterBuilder {
        ConsoleWriterBuilder {
            stdout: false,
            format: crate::handlers::DEFAULT_CONSOLE_FORMAT,
            min_level: Level::Debug,
        }
    }
}

impl LogWriter for ConsoleWriter {
    #[inline]
    fn write(&self, now: &mut DeferredNow, event: &LogEvent) -> std::io::Result<()> {
        with_formatted_line(self.format, now, event, b"\n", |line| {
            if self.stdout {
                std::io::stdout().lock().write_all(line)
            } else {
                std::io::stderr().lock().write_all(line)
            }
        })
    }

    #[inline]
    fn flush(&self) -> std::io::Result<()> {
        if self.stdout {
            std::io::stdout().flush()
        } else {
            std::io::stderr().flush()
        }
    }

    fn min_level(&self) -> Level {
        self.min_level
    }
}

/// Builder for [`ConsoleWriter`].
#[allow(clippy::module_name_repetitions)]
pub struct ConsoleWriterBuilder {
    stdout: bool,
    format: FormatFunction,
    min_level: Level,
}

impl ConsoleWriterBuilder {
    /// Makes the writer write to stdout rather than to stderr.
    #[must_use]
    pub fn stdout(mut self) -> Self {
        self.stdout = true;
        self
    }

    /// Makes the writer use the provided format function for the log lines.
    #[must_use]
    pub fn format(mut self, format: FormatFunction) -> Self {
        self.format = format;
        self
    }

    /// Lines with a lower level are not written.
    #[must_use]
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Produces the `ConsoleWriter`.
    #[must_use]
    pub fn build(self) -> ConsoleWriter {
        ConsoleWriter {
            stdout: self.stdout,
            format: self.format,
            min_level: self.min_level,
        }
    }
}
