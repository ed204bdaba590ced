use crate::TgLoggerError;
use std::{fmt, str::FromStr};

/// Severity of a log line.
///
/// The order is `Debug < Info < Warning < Error < Critical`.
/// Lines with level [`Level::Error`] or [`Level::Critical`] are also sent to the
/// notification client.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Designates lower priority information, for debugging.
    Debug,
    /// Designates useful information.
    Info,
    /// Designates hazardous situations.
    Warning,
    /// Designates serious errors.
    Error,
    /// Designates errors the program might not survive.
    Critical,
}

impl Level {
    /// All levels, in ascending order.
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// The upper-case name of the level, as it is written into log lines.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Returns true if lines of this level are forwarded to the notification client.
    #[must_use]
    pub fn is_alert(self) -> bool {
        self >= Level::Error
    }

    /// The closest level of the `log` crate.
    ///
    /// `log` knows no critical level, so `Critical` maps to `log::Level::Error`.
    #[must_use]
    pub fn to_log_level(self) -> log::Level {
        match self {
            Level::Debug => log::Level::Debug,
            Level::Info => log::Level::Info,
            Level::Warning => log::Level::Warn,
            Level::Error | Level::Critical => log::Level::Error,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = TgLoggerError;

    /// Parses the level names `debug`, `info`, `warning`, `error` and `critical`,
    /// ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| TgLoggerError::InvalidLevel(s.to_string()))
    }
}

impl<'de> serde::Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
