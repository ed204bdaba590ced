use crate::{writers::LogWriter, DeferredNow, Level, LogEvent};

/// Forwards log lines to the logger that is installed in the [`log`] crate.
///
/// This lets the facade mirror its lines into whatever `log` backend the application uses.
/// The logger name becomes the record's target, [`Level::Critical`] is forwarded as
/// `log::Level::Error`.
pub struct LogCrateWriter {
    min_level: Level,
}

impl LogCrateWriter {
    /// Forwards all levels.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: Level::Debug,
        }
    }

    /// Lines with a lower level are not forwarded.
    #[must_use]
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }
}

impl Default for LogCrateWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LogWriter for LogCrateWriter {
    fn write(&self, _now: &mut DeferredNow, event: &LogEvent) -> std::io::Result<()> {
        let level = event.level().to_log_level();
        if level <= log::max_level() {
            log::logger().log(
                &log::Record::builder()
                    .args(format_args!("{}", event.message()))
                    .level(level)
                    .target(event.target())
                    .file(Some(event.file()))
                    .line(Some(event.line()))
                    .build(),
            );
        }
        Ok(())
    }

    fn flush(&self) -> std::io::Result<()> {
        log::logger().flush();
        Ok(())
    }

    fn min_level(&self) -> Level {
        self.min_level
    }
}
