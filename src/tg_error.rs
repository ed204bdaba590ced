use thiserror::Error;

/// Describes errors in the configuration and the operation of `tg_logger`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TgLoggerError {
    /// Bot token or recipient id are missing or empty.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A level name could not be parsed.
    #[error("Invalid log level: {0:?}")]
    InvalidLevel(String),

    /// The chat endpoint rejected a message.
    #[error("Delivery failed with status {status}: {description}")]
    Delivery {
        /// HTTP status code, or the `error_code` reported by the bot API.
        status: u16,
        /// Description of the failure, as reported by the bot API.
        description: String,
    },

    /// The HTTP request to the chat endpoint failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Log file cannot be written because the specified path is not a directory.
    #[error("Log file cannot be written because the specified path is not a directory")]
    OutputBadDirectory,

    /// Log cannot be written, e.g. because the configured output directory is not accessible.
    #[error("Log cannot be written, e.g. because the configured output directory is not accessible")]
    OutputIo(#[from] std::io::Error),

    /// The configuration file could not be parsed.
    #[error("Configuration file could not be parsed")]
    Toml(#[from] toml::de::Error),

    /// Some synchronization object is poisoned.
    #[error("Some synchronization object is poisoned")]
    Poison,
}

impl TgLoggerError {
    /// Returns true if repeating the failed delivery might succeed.
    ///
    /// Transport failures, rate limiting (429) and server-side errors (5xx) are transient;
    /// authorization and request errors are not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => !e.is_builder() && !e.is_decode(),
            Self::Delivery { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
