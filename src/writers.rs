//! Contains the trait [`LogWriter`] for extending the [`LocalLogger`](crate::LocalLogger)
//! with additional outputs, and the concrete implementations
//!
//! * [`ConsoleWriter`] for writing to stderr or stdout,
//! * [`FileLogWriter`] for writing to files, with optional rotation and cleanup,
//! * [`BufferWriter`] for keeping the latest log lines in memory,
//! * [`LogCrateWriter`] for forwarding to the logger that is installed in the `log` crate.
//!
//! You can also use your own implementations of [`LogWriter`].
//!
//! Each writer has its own minimal level; a log line is handed to a writer only if
//! it passes the level of the local logger and the level of the writer.
//!
//! ```rust,ignore
//! use tg_logger::{handlers, writers::BufferWriter, Level, LoggerSpec, TgLogger};
//!
//! let mut logger = TgLogger::with_credentials("app", "123:abc", 4711)?;
//! let alerts = BufferWriter::new(64 * 1024, tg_logger::simple_format)
//!     .with_min_level(Level::Warning);
//! logger.get_logger(
//!     LoggerSpec::default()
//!         .console_handler(handlers::console_handler(None, None))
//!         .writer(Box::new(alerts.clone())),
//! );
//! ```

mod buffer_writer;
mod console_writer;
pub(crate) mod file_log_writer;
mod log_crate_writer;
mod log_writer;

pub use self::buffer_writer::BufferWriter;
pub use self::console_writer::{ConsoleWriter, ConsoleWriterBuilder};
pub use self::file_log_writer::{FileLogWriter, FileLogWriterBuilder};
pub use self::log_crate_writer::LogCrateWriter;
pub use self::log_writer::LogWriter;
