use crate::{
    notify::DEFAULT_API_URL,
    settings::{BOT_TOKEN_VAR, RECIPIENT_ID_VAR},
    Level, RecipientId, RetryPolicy, Settings, TgLoggerError,
};
use serde::Deserialize;
use std::{path::Path, time::Duration};

/// Name of the local logger if the configuration does not specify one.
pub const DEFAULT_LOGGER_NAME: &str = "app";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Process-wide configuration, read once at startup from a TOML file.
///
/// ```toml
/// [telegram]
/// bot_token = "123:abc"
/// recipient_id = 4711          # or "@my_channel"
/// api_url = "https://api.telegram.org"   # optional
/// timeout_secs = 10                      # optional
///
/// [telegram.retry]                       # optional
/// max_attempts = 3
/// backoff_ms = 500
///
/// [logger]                               # optional
/// name = "app"
/// level = "info"
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TgLoggerConfig {
    #[serde(default)]
    telegram: TelegramSection,
    #[serde(default)]
    logger: LoggerSection,
}

#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TelegramSection {
    bot_token: Option<String>,
    recipient_id: Option<RecipientId>,
    api_url: Option<String>,
    timeout_secs: Option<u64>,
    retry: Option<RetrySection>,
}

impl std::fmt::Debug for TelegramSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSection")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "***"))
            .field("recipient_id", &self.recipient_id)
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("retry", &self.retry)
            .finish()
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RetrySection {
    max_attempts: u32,
    #[serde(default)]
    backoff_ms: u64,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggerSection {
    name: Option<String>,
    level: Option<Level>,
}

impl TgLoggerConfig {
    /// Reads the configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// `TgLoggerError::OutputIo` if the file cannot be read,
    /// `TgLoggerError::Toml` if it cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TgLoggerError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Parses the configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// `TgLoggerError::Toml` if the string cannot be parsed.
    pub fn from_toml_str(s: &str) -> Result<Self, TgLoggerError> {
        Ok(toml::from_str(s)?)
    }

    /// Lets the environment variables `TG_LOGGER_BOT_TOKEN` and `TG_LOGGER_RECIPIENT_ID`
    /// override the respective values.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    pub(crate) fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bot_token) = lookup(BOT_TOKEN_VAR) {
            self.telegram.bot_token = Some(bot_token);
        }
        if let Some(recipient_id) = lookup(RECIPIENT_ID_VAR) {
            self.telegram.recipient_id = Some(recipient_id.into());
        }
        self
    }

    /// The credentials.
    ///
    /// # Errors
    ///
    /// `TgLoggerError::Configuration` if bot token or recipient id are missing or empty.
    pub fn settings(&self) -> Result<Settings, TgLoggerError> {
        Settings::resolve(
            self.telegram.bot_token.clone(),
            self.telegram.recipient_id.clone(),
            None,
        )
    }

    /// The base URL of the bot API.
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.telegram.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// The timeout for a single HTTP request.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.telegram.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// The retry policy for failed deliveries.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.telegram.retry.map_or_else(RetryPolicy::none, |retry| {
            RetryPolicy::new(retry.max_attempts, Duration::from_millis(retry.backoff_ms))
        })
    }

    /// The name of the local logger.
    #[must_use]
    pub fn logger_name(&self) -> &str {
        self.logger.name.as_deref().unwrap_or(DEFAULT_LOGGER_NAME)
    }

    /// The level of the local logger, if configured.
    #[must_use]
    pub fn logger_level(&self) -> Option<Level> {
        self.logger.level
    }
}

#[cfg(test)]
mod test {
    use super::TgLoggerConfig;
    use crate::{Level, RecipientId, RetryPolicy, Settings, TgLoggerError};
    use std::time::Duration;

    const FULL: &str = r#"
        [telegram]
        bot_token = "123:abc"
        recipient_id = 4711
        api_url = "http://localhost:8081"
        timeout_secs = 3

        [telegram.retry]
        max_attempts = 3
        backoff_ms = 20

        [logger]
        name = "billing"
        level = "warning"
    "#;

    #[test]
    fn parses_full_config() {
        let config = TgLoggerConfig::from_toml_str(FULL).unwrap();
        assert_eq!(
            config.settings().unwrap(),
            Settings::new("123:abc", 4711_i64)
        );
        assert_eq!(config.api_url(), "http://localhost:8081");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(
            config.retry_policy(),
            RetryPolicy::new(3, Duration::from_millis(20))
        );
        assert_eq!(config.logger_name(), "billing");
        assert_eq!(config.logger_level(), Some(Level::Warning));
    }

    #[test]
    fn uses_defaults() {
        let config = TgLoggerConfig::from_toml_str(
            r#"
            [telegram]
            bot_token = "123:abc"
            recipient_id = "@alerts"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.settings().unwrap().recipient_id(),
            &RecipientId::Name("@alerts".to_string())
        );
        assert_eq!(config.api_url(), "https://api.telegram.org");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.retry_policy(), RetryPolicy::none());
        assert_eq!(config.logger_name(), "app");
        assert_eq!(config.logger_level(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            TgLoggerConfig::from_toml_str("[telegram]\nbot_tokn = \"x\"\n"),
            Err(TgLoggerError::Toml(_))
        ));
        assert!(matches!(
            TgLoggerConfig::from_toml_str("[logger]\nlevel = \"loud\"\n"),
            Err(TgLoggerError::Toml(_))
        ));
        assert!(matches!(
            TgLoggerConfig::from_toml_str("").unwrap().settings(),
            Err(TgLoggerError::Configuration(_))
        ));
    }

    #[test]
    fn environment_overrides_file() {
        let config = TgLoggerConfig::from_toml_str(FULL)
            .unwrap()
            .with_overrides_from(|name| {
                (name == "TG_LOGGER_RECIPIENT_ID").then(|| "-100200".to_string())
            });
        assert_eq!(
            config.settings().unwrap(),
            Settings::new("123:abc", -100_200_i64)
        );
    }
}
