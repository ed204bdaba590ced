//! Delivery of alert messages to a remote chat.
//!
//! [`TgLogger`](crate::TgLogger) hands the text of every error and critical log line to a
//! [`NotificationClient`]. The production implementation is [`TelegramClient`];
//! tests and other chat systems can provide their own implementation.

mod telegram;

pub use self::telegram::{
    TelegramClient, TelegramClientBuilder, DEFAULT_API_URL, MAX_MESSAGE_CHARS,
};

use crate::TgLoggerError;
use std::time::Duration;

/// Sends a text message to a fixed recipient.
pub trait NotificationClient: Send + Sync {
    /// Delivers one message.
    ///
    /// # Errors
    ///
    /// `TgLoggerError::Http` if the endpoint cannot be reached,
    /// `TgLoggerError::Delivery` if the endpoint rejects the message.
    fn send(&self, text: &str) -> Result<(), TgLoggerError>;

    /// A short name for diagnostics.
    fn name(&self) -> &'static str {
        "notification client"
    }
}

/// How often a failed delivery is repeated.
///
/// Only transient failures (see [`TgLoggerError::is_transient`]) are repeated.
/// The delay before the n-th repetition is `backoff * 2^(n-1)`.
///
/// The default is a single attempt, i.e. delivery is best-effort.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl RetryPolicy {
    /// A single attempt, no repetition.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    /// At most `max_attempts` attempts (at least one), starting with the given delay.
    #[must_use]
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// The maximal number of attempts.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The delay before the first repetition.
    #[must_use]
    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    /// Calls `attempt` until it succeeds, fails permanently, or the attempts are used up.
    ///
    /// # Errors
    ///
    /// The error of the last attempt.
    pub fn run<F>(&self, mut attempt: F) -> Result<(), TgLoggerError>
    where
        F: FnMut() -> Result<(), TgLoggerError>,
    {
        let mut delay = self.backoff;
        let mut attempts = 1;
        loop {
            match attempt() {
                Ok(()) => return Ok(()),
                Err(e) if e.is_transient() && attempts < self.max_attempts => {
                    std::thread::sleep(delay);
                    delay = delay.saturating_mul(2);
                    attempts += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
