use crate::Level;
use std::panic::Location;

/// A single log line on its way to the writers and the notification client.
///
/// Is constructed and consumed within a single log call.
#[derive(Clone, Copy, Debug)]
pub struct LogEvent<'a> {
    target: &'a str,
    level: Level,
    message: &'a str,
    location: &'static Location<'static>,
}

impl<'a> LogEvent<'a> {
    /// Constructor.
    #[must_use]
    pub fn new(
        target: &'a str,
        level: Level,
        message: &'a str,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            target,
            level,
            message,
            location,
        }
    }

    /// Name of the local logger that produced this line.
    #[must_use]
    pub fn target(&self) -> &'a str {
        self.target
    }

    /// Severity of this line.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// The fully composed message text.
    #[must_use]
    pub fn message(&self) -> &'a str {
        self.message
    }

    /// Source location of the log call.
    #[must_use]
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Source file of the log call.
    #[must_use]
    pub fn file(&self) -> &'static str {
        self.location.file()
    }

    /// Source line of the log call.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.location.line()
    }
}
