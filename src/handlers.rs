//! Factories for the two standard outputs of a local logger.
//!
//! Both accept an optional level and an optional format function; if omitted,
//! the documented defaults are used.
use crate::{
    writers::{ConsoleWriter, FileLogWriter},
    Cleanup, FileSpec, FormatFunction, Level, TgLoggerError,
};

/// Level that [`console_handler`] uses if none is given.
pub const DEFAULT_CONSOLE_LEVEL: Level = Level::Debug;

/// Level that [`rotating_file_handler`] uses if none is given.
pub const DEFAULT_FILE_LEVEL: Level = Level::Info;

/// Size in bytes over which [`rotating_file_handler`] rotates its output file (10 MiB).
pub const DEFAULT_ROTATE_SIZE: u64 = 10 * 1024 * 1024;

/// Number of rotated files that [`rotating_file_handler`] keeps.
pub const DEFAULT_BACKUP_COUNT: usize = 5;

#[cfg(feature = "colors")]
pub(crate) const DEFAULT_CONSOLE_FORMAT: FormatFunction = crate::colored_default_format;
#[cfg(not(feature = "colors"))]
pub(crate) const DEFAULT_CONSOLE_FORMAT: FormatFunction = crate::default_format;

/// Produces a writer for stderr.
///
/// Defaults: level [`DEFAULT_CONSOLE_LEVEL`], format
/// [`colored_default_format`](crate::colored_default_format) with feature `colors`,
/// [`default_format`](crate::default_format) otherwise.
#[must_use]
pub fn console_handler(level: Option<Level>, format: Option<FormatFunction>) -> ConsoleWriter {
    ConsoleWriter::builder()
        .min_level(level.unwrap_or(DEFAULT_CONSOLE_LEVEL))
        .format(format.unwrap_or(DEFAULT_CONSOLE_FORMAT))
        .build()
}

/// Produces a writer for a rotating set of files.
///
/// The writer appends to an existing `rCURRENT` file, rotates it over
/// [`DEFAULT_ROTATE_SIZE`] bytes and keeps [`DEFAULT_BACKUP_COUNT`] rotated files.
/// Defaults: level [`DEFAULT_FILE_LEVEL`], format [`default_format`](crate::default_format).
///
/// # Errors
///
/// `TgLoggerError::OutputIo` if the output directory cannot be created,
/// `TgLoggerError::OutputBadDirectory` if it is not a directory.
pub fn rotating_file_handler(
    file_spec: FileSpec,
    level: Option<Level>,
    format: Option<FormatFunction>,
) -> Result<FileLogWriter, TgLoggerError> {
    FileLogWriter::builder(file_spec)
        .min_level(level.unwrap_or(DEFAULT_FILE_LEVEL))
        .format(format.unwrap_or(crate::default_format))
        .rotate(
            DEFAULT_ROTATE_SIZE,
            Cleanup::KeepLogFiles(DEFAULT_BACKUP_COUNT),
        )
        .append()
        .try_build()
}
