use super::{
    config::{Config, RotationConfig, UNIX_LINE_ENDING, WINDOWS_LINE_ENDING},
    FileLogWriter,
};
use crate::{formats::default_format, Cleanup, FileSpec, FormatFunction, Level, TgLoggerError};

/// Builder for [`FileLogWriter`].
#[allow(clippy::module_name_repetitions)]
pub struct FileLogWriterBuilder {
    config: Config,
    format: FormatFunction,
    o_rotation_config: Option<RotationConfig>,
    min_level: Level,
    cleanup_in_background_thread: bool,
}

impl FileLogWriterBuilder {
    pub(crate) fn new(file_spec: FileSpec) -> FileLogWriterBuilder {
        FileLogWriterBuilder {
            config: Config {
                append: false,
                file_spec,
                line_ending: UNIX_LINE_ENDING,
            },
            format: default_format,
            o_rotation_config: None,
            min_level: Level::Debug,
            cleanup_in_background_thread: true,
        }
    }

    /// The format function for the lines; the default is
    /// [`default_format`](crate::default_format).
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

    /// With `false`, rotated files are cleaned up within the log call that causes the
    /// rotation; by default, a background thread does it.
    #[must_use]
    pub fn cleanup_in_background_thread(mut self, use_background_thread: bool) -> Self {
        self.cleanup_in_background_thread = use_background_thread;
        self
    }

    /// Rotates the output file when it exceeds `max_size` bytes.
    ///
    /// The lines are written to the file with infix `rCURRENT`. On rotation it is renamed
    /// to the next free number infix, and writing continues in a fresh `rCURRENT` file:
    ///
    /// ```text
    /// billing_r00000.log
    /// billing_r00001.log
    /// billing_rCURRENT.log
    /// ```
    ///
    /// `cleanup` decides what happens with the rotated files.
    #[must_use]
    pub fn rotate(mut self, max_size: u64, cleanup: Cleanup) -> Self {
        self.o_rotation_config = Some(RotationConfig { max_size, cleanup });
        self
    }

    /// Continues an existing output file; by default, it is truncated, or with rotation,
    /// renamed to a rotated file.
    #[must_use]
    pub fn append(mut self) -> Self {
        self.config.append = true;
        self
    }

    /// Ends lines with `\r\n`.
    #[must_use]
    pub fn use_windows_line_ending(mut self) -> Self {
        self.config.line_ending = WINDOWS_LINE_ENDING;
        self
    }

    /// Produces the `FileLogWriter`.
    ///
    /// The output directory is created if necessary; the output file is created
    /// with the first log line.
    ///
    /// # Errors
    ///
    /// `TgLoggerError::OutputIo` if the directory cannot be created,
    /// `TgLoggerError::OutputBadDirectory` if the specified path is not a directory.
    pub fn try_build(self) -> Result<FileLogWriter, TgLoggerError> {
        let dir = self.config.file_spec.get_directory();
        if std::fs::metadata(dir).is_ok_and(|metadata| !metadata.is_dir()) {
            return Err(TgLoggerError::OutputBadDirectory);
        }
        std::fs::create_dir_all(dir)?;

        Ok(FileLogWriter::new(
            self.format,
            self.min_level,
            self.config,
            self.o_rotation_config,
            self.cleanup_in_background_thread,
        ))
    }
}
