use crate::{DeferredNow, Level, LogEvent};
use std::io;

/// Writes to a single log output stream.
///
/// Boxed instances of `LogWriter` are the handlers of a
/// [`LocalLogger`](crate::LocalLogger).
pub trait LogWriter: Sync + Send {
    /// Writes out a log line.
    ///
    /// # Errors
    ///
    /// [`std::io::Error`]
    fn write(&self, now: &mut DeferredNow, event: &LogEvent) -> io::Result<()>;

    /// Flushes any buffered log lines.
    ///
    /// # Errors
    ///
    /// [`std::io::Error`]
    fn flush(&self) -> io::Result<()>;

    /// Provides the lowest level that is to be written.
    ///
    /// Log lines with a lower level are not handed to this writer.
    fn min_level(&self) -> Level {
        Level::Debug
    }

    /// Cleanup open resources, if necessary.
    fn shutdown(&self) {}
}
