use crate::{
    writers::{ConsoleWriter, FileLogWriter, LogWriter},
    Level,
};

/// Describes how [`TgLogger::get_logger`](crate::TgLogger::get_logger) reconfigures the
/// local logger.
///
/// All parts are optional; an empty `LoggerSpec` leaves the logger as it is.
///
/// ```rust,ignore
/// use tg_logger::{handlers, FileSpec, Level, LoggerSpec};
///
/// tg_logger.get_logger(
///     LoggerSpec::new()
///         .name("billing")
///         .level(Level::Info)
///         .console_handler(handlers::console_handler(None, None))
///         .file_handler(handlers::rotating_file_handler(
///             FileSpec::default().directory("log_files"),
///             None,
///             None,
///         )?),
/// );
/// ```
#[derive(Default)]
pub struct LoggerSpec {
    pub(crate) o_name: Option<String>,
    pub(crate) o_level: Option<Level>,
    pub(crate) writers: Vec<Box<dyn LogWriter>>,
}

impl LoggerSpec {
    /// An empty spec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A name different from the current one replaces the local logger
    /// with a fresh one of this name.
    #[must_use]
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.o_name = Some(name.into());
        self
    }

    /// Sets the level threshold of the local logger.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.o_level = Some(level);
        self
    }

    /// Attaches a console writer.
    #[must_use]
    pub fn console_handler(self, writer: ConsoleWriter) -> Self {
        self.writer(Box::new(writer))
    }

    /// Attaches a file writer.
    #[must_use]
    pub fn file_handler(self, writer: FileLogWriter) -> Self {
        self.writer(Box::new(writer))
    }

    /// Attaches any other writer.
    #[must_use]
    pub fn writer(mut self, writer: Box<dyn LogWriter>) -> Self {
        self.writers.push(writer);
        self
    }

    /// Returns true if applying this spec changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.o_name.is_none() && self.o_level.is_none() && self.writers.is_empty()
    }
}
