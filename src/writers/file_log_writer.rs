mod builder;
mod config;
mod state;

pub use self::builder::FileLogWriterBuilder;

use self::{
    config::{Config, RotationConfig},
    state::State,
};
use crate::{
    util::{eprint_err, io_err, with_formatted_line, ErrorCode},
    writers::LogWriter,
    DeferredNow, FileSpec, FormatFunction, Level, LogEvent, TgLoggerError,
};
use std::{
    path::PathBuf,
    sync::{Mutex, MutexGuard},
};

/// A configurable [`LogWriter`] implementation that writes to a file or a sequence of files.
///
/// See [`FileLogWriterBuilder`] for the configuration options,
/// and [`rotating_file_handler`](crate::handlers::rotating_file_handler) for the common case.
#[allow(clippy::module_name_repetitions)]
pub struct FileLogWriter {
    format: FormatFunction,
    line_ending: &'static [u8],
    min_level: Level,
    state: Mutex<State>,
}

impl FileLogWriter {
    pub(crate) fn new(
        format: FormatFunction,
        min_level: Level,
        config: Config,
        o_rotation_config: Option<RotationConfig>,
        cleanup_in_background_thread: bool,
    ) -> Self {
        Self {
            format,
            line_ending: config.line_ending,
            min_level,
            state: Mutex::new(State::new(
                config,
                o_rotation_config,
                cleanup_in_background_thread,
            )),
        }
    }

    /// Instantiates a builder for `FileLogWriter`.
    #[must_use]
    pub fn builder(file_spec: FileSpec) -> FileLogWriterBuilder {
        FileLogWriterBuilder::new(file_spec)
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, State>, std::io::Error> {
        self.state.lock().map_err(|_e| io_err("Poison"))
    }

    /// The file to which the log lines are currently written,
    /// or `None` if nothing was written yet.
    ///
    /// # Errors
    ///
    /// `TgLoggerError::Poison` if some mutex is poisoned.
    pub fn current_path(&self) -> Result<Option<PathBuf>, TgLoggerError> {
        Ok(self
            .state
            .lock()
            .map_err(|_| TgLoggerError::Poison)?
            .current_path())
    }

    /// Returns the rotated log files (plain or compressed), youngest first.
    ///
    /// # Errors
    ///
    /// `TgLoggerError::Poison` if some mutex is poisoned.
    pub fn rotated_log_files(&self) -> Result<Vec<PathBuf>, TgLoggerError> {
        let state = self.state.lock().map_err(|_| TgLoggerError::Poison)?;
        Ok(state::list_of_rotated_files(&state.config().file_spec))
    }

    /// Rotates the current output file, independently of its size.
    ///
    /// # Errors
    ///
    /// `TgLoggerError::OutputIo` if renaming or opening a file fails,
    /// `TgLoggerError::Poison` if some mutex is poisoned.
    pub fn trigger_rotation(&self) -> Result<(), TgLoggerError> {
        let mut state = self.state.lock().map_err(|_| TgLoggerError::Poison)?;
        Ok(state.trigger_rotation()?)
    }
}

impl LogWriter for FileLogWriter {
    fn write(&self, now: &mut DeferredNow, event: &LogEvent) -> std::io::Result<()> {
        with_formatted_line(self.format, now, event, self.line_ending, |line| {
            self.lock_state()?.write_buffer(line)
        })
    }

    fn flush(&self) -> std::io::Result<()> {
        self.lock_state()?.flush()
    }

    fn min_level(&self) -> Level {
        self.min_level
    }

    fn shutdown(&self) {
        match self.lock_state() {
            Ok(mut state) => state.shutdown(),
            Err(e) => eprint_err(ErrorCode::Poison, "shutdown of file writer failed", &e),
        }
    }
}

impl Drop for FileLogWriter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod test {
    use super::FileLogWriter;
    use crate::{writers::LogWriter, Cleanup, DeferredNow, FileSpec, Level, LogEvent};
    use std::panic::Location;

    fn write_lines(writer: &FileLogWriter, count: usize) {
        for i in 0..count {
            let msg = format!("line {i:03} with some padding to fill the file");
            let event = LogEvent::new("test", Level::Info, &msg, Location::caller());
            writer.write(&mut DeferredNow::new(), &event).unwrap();
        }
        writer.flush().unwrap();
    }

    #[test]
    fn writes_into_plain_file() {
        let dir = temp_dir::TempDir::new().unwrap();
        let writer =
            FileLogWriter::builder(FileSpec::default().directory(dir.path()).basename("plain"))
                .format(crate::message_format)
                .try_build()
                .unwrap();
        assert!(writer.current_path().unwrap().is_none());
        write_lines(&writer, 3);
        let path = writer.current_path().unwrap().unwrap();
        assert_eq!(path, dir.path().join("plain.log"));
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.starts_with("line 000"));
    }

    #[test]
    fn rotates_and_cleans_up() {
        let dir = temp_dir::TempDir::new().unwrap();
        let writer =
            FileLogWriter::builder(FileSpec::default().directory(dir.path()).basename("rot"))
                .format(crate::message_format)
                .rotate(200, Cleanup::KeepLogFiles(2))
                .cleanup_in_background_thread(false)
                .try_build()
                .unwrap();
        write_lines(&writer, 40);

        let rotated = writer.rotated_log_files().unwrap();
        assert_eq!(rotated.len(), 2, "{rotated:?}");
        // youngest first
        assert!(rotated[0].file_name() > rotated[1].file_name());
        assert!(dir.path().join("rot_rCURRENT.log").exists());
        assert!(!dir.path().join("rot_r00000.log").exists());
    }
}
