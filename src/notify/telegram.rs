use super::{NotificationClient, RetryPolicy};
use crate::{RecipientId, Settings, TgLoggerError};
use serde::Deserialize;
use serde_json::{json, Value};
use std::{fmt, time::Duration};

/// Base URL of the Telegram bot API.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Telegram rejects longer messages; longer texts are truncated.
pub const MAX_MESSAGE_CHARS: usize = 4096;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends messages through a Telegram bot.
///
/// Each message is a `POST <api_url>/bot<token>/sendMessage` with a JSON body
/// `{"chat_id": <recipient>, "text": <text>}`.
/// A delivery counts as successful if the bot API answers with a 2xx status and `"ok": true`.
pub struct TelegramClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    recipient_id: RecipientId,
    retry_policy: RetryPolicy,
}

impl TelegramClient {
    /// Instantiates a builder for `TelegramClient`.
    #[must_use]
    pub fn builder(settings: Settings) -> TelegramClientBuilder {
        TelegramClientBuilder {
            settings,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// The chat to which the messages are sent.
    #[must_use]
    pub fn recipient_id(&self) -> &RecipientId {
        &self.recipient_id
    }

    fn send_once(&self, payload: &Value) -> Result<(), TgLoggerError> {
        // reqwest errors carry the URL, which contains the bot token
        let response = self
            .http
            .post(&self.endpoint)
            .json(payload)
            .send()
            .map_err(|e| TgLoggerError::Http(e.without_url()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| TgLoggerError::Http(e.without_url()))?;

        match serde_json::from_str::<ApiReply>(&body) {
            Ok(reply) if reply.ok && status.is_success() => Ok(()),
            Ok(reply) => Err(TgLoggerError::Delivery {
                status: reply.error_code.unwrap_or(status.as_u16()),
                description: reply.description.unwrap_or(body),
            }),
            Err(_) => Err(TgLoggerError::Delivery {
                status: status.as_u16(),
                description: body,
            }),
        }
    }
}

impl NotificationClient for TelegramClient {
    fn send(&self, text: &str) -> Result<(), TgLoggerError> {
        let payload = json!({
            "chat_id": self.recipient_id,
            "text": truncate(text, MAX_MESSAGE_CHARS),
        });
        self.retry_policy.run(|| self.send_once(&payload))
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient")
            .field("recipient_id", &self.recipient_id)
            .field("retry_policy", &self.retry_policy)
            .finish_non_exhaustive()
    }
}

// The reply of the bot API; only the fields we evaluate
#[derive(Deserialize)]
struct ApiReply {
    ok: bool,
    error_code: Option<u16>,
    description: Option<String>,
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Builder for [`TelegramClient`].
#[allow(clippy::module_name_repetitions)]
pub struct TelegramClientBuilder {
    settings: Settings,
    api_url: String,
    timeout: Duration,
    retry_policy: RetryPolicy,
}

impl TelegramClientBuilder {
    /// Sends to a different bot API server, e.g. a self-hosted one.
    ///
    /// The default is [`DEFAULT_API_URL`].
    #[must_use]
    pub fn api_url<S: Into<String>>(mut self, api_url: S) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Timeout for a single HTTP request; the default is 10 seconds.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Defines how failed deliveries are repeated; by default they are not.
    #[must_use]
    pub fn retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Produces the `TelegramClient`.
    ///
    /// # Errors
    ///
    /// `TgLoggerError::Configuration` if bot token or recipient id are empty,
    /// `TgLoggerError::Http` if the HTTP client cannot be initialized.
    pub fn try_build(self) -> Result<TelegramClient, TgLoggerError> {
        self.settings.validate()?;
        let http = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let (bot_token, recipient_id) = self.settings.into_parts();
        Ok(TelegramClient {
            http,
            endpoint: format!(
                "{}/bot{bot_token}/sendMessage",
                self.api_url.trim_end_matches('/')
            ),
            recipient_id,
            retry_policy: self.retry_policy,
        })
    }
}
