use crate::{
    util::{eprint_err, ErrorCode},
    writers::{ConsoleWriter, LogWriter},
    DeferredNow, Level, LogEvent,
};

/// A named logger with a level threshold and a list of writers.
///
/// A line is written to a writer if its level passes both the logger's level and the
/// writer's [`min_level`](LogWriter::min_level).
///
/// A logger without writers uses a last-resort writer that prints lines of level
/// [`Level::Warning`] or higher, with only the message text, to stderr.
///
/// Errors of the writers are reported on stderr and do not abort the log call.
pub struct LocalLogger {
    name: String,
    level: Level,
    writers: Vec<Box<dyn LogWriter>>,
    last_resort: ConsoleWriter,
}

impl LocalLogger {
    /// Creates a logger with the given name, level [`Level::Debug`], and no writers.
    #[must_use]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            level: Level::Debug,
            writers: Vec::new(),
            last_resort: ConsoleWriter::builder()
                .format(crate::message_format)
                .min_level(Level::Warning)
                .build(),
        }
    }

    /// The name of the logger; it is the target of all lines it writes.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lines below this level are discarded.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Sets the level threshold.
    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    /// Adds a writer.
    pub fn add_writer(&mut self, writer: Box<dyn LogWriter>) {
        self.writers.push(writer);
    }

    /// The number of attached writers.
    #[must_use]
    pub fn writer_count(&self) -> usize {
        self.writers.len()
    }

    /// Returns true if lines of the given level are written anywhere.
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.level
            && if self.writers.is_empty() {
                level >= self.last_resort.min_level()
            } else {
                self.writers.iter().any(|w| level >= w.min_level())
            }
    }

    /// Hands a log line to all writers that accept its level.
    pub fn write(&self, now: &mut DeferredNow, event: &LogEvent) {
        if event.level() < self.level {
            return;
        }
        if self.writers.is_empty() {
            write_to(&self.last_resort, now, event);
        } else {
            for writer in &self.writers {
                write_to(writer.as_ref(), now, event);
            }
        }
    }

    /// Flushes all writers.
    pub fn flush(&self) {
        for writer in &self.writers {
            writer
                .flush()
                .unwrap_or_else(|e| eprint_err(ErrorCode::Flush, "flushing failed", &e));
        }
    }

    /// Flushes all writers and stops their background threads.
    pub fn shutdown(&self) {
        self.flush();
        for writer in &self.writers {
            writer.shutdown();
        }
    }
}

fn write_to(writer: &dyn LogWriter, now: &mut DeferredNow, event: &LogEvent) {
    if event.level() >= writer.min_level() {
        writer
            .write(now, event)
            .unwrap_or_else(|e| eprint_err(ErrorCode::Write, "writing failed", &e));
    }
}

impl std::fmt::Debug for LocalLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalLogger")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("writers", &self.writers.len())
            .finish()
    }
}
