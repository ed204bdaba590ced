use crate::TgLoggerError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Name of the environment variable that [`Settings::from_env`] reads the bot token from.
pub const BOT_TOKEN_VAR: &str = "TG_LOGGER_BOT_TOKEN";

/// Name of the environment variable that [`Settings::from_env`] reads the recipient id from.
pub const RECIPIENT_ID_VAR: &str = "TG_LOGGER_RECIPIENT_ID";

/// Identifies the chat that receives the notifications.
///
/// Telegram accepts numeric chat ids and `@channelname` strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipientId {
    /// Numeric chat id; group chats have negative ids.
    Int(i64),
    /// Public channel name, like `@my_alerts`.
    Name(String),
}

impl RecipientId {
    /// Returns true for an empty channel name.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Int(_) => false,
            Self::Name(name) => name.trim().is_empty(),
        }
    }
}

impl From<i64> for RecipientId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}
impl From<i32> for RecipientId {
    fn from(id: i32) -> Self {
        Self::Int(id.into())
    }
}
impl From<&str> for RecipientId {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| Self::Name(s.to_string()))
    }
}
impl From<String> for RecipientId {
    fn from(s: String) -> Self {
        match s.trim().parse::<i64>() {
            Ok(id) => Self::Int(id),
            Err(_) => Self::Name(s),
        }
    }
}

impl FromStr for RecipientId {
    type Err = std::convert::Infallible;

    /// Numeric strings become [`RecipientId::Int`], everything else [`RecipientId::Name`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i64>() {
            Ok(id) => Self::Int(id),
            Err(_) => Self::Name(s.to_string()),
        })
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Credentials for the Telegram bot: the bot token and the recipient of the messages.
///
/// The `Debug` output does not reveal the token.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    bot_token: String,
    recipient_id: RecipientId,
}

impl Settings {
    /// Constructor, without validation.
    #[must_use]
    pub fn new<S: Into<String>, R: Into<RecipientId>>(bot_token: S, recipient_id: R) -> Self {
        Self {
            bot_token: bot_token.into(),
            recipient_id: recipient_id.into(),
        }
    }

    /// Combines explicitly given values with defaults.
    ///
    /// An explicitly given value wins; a missing one is taken from `defaults`.
    ///
    /// # Errors
    ///
    /// `TgLoggerError::Configuration` if a value is missing and no defaults are given,
    /// or if the resulting token or recipient id is empty.
    pub fn resolve(
        bot_token: Option<String>,
        recipient_id: Option<RecipientId>,
        defaults: Option<&Settings>,
    ) -> Result<Self, TgLoggerError> {
        let bot_token = match (bot_token, defaults) {
            (Some(token), _) => token,
            (None, Some(defaults)) => defaults.bot_token.clone(),
            (None, None) => {
                return Err(TgLoggerError::Configuration(
                    "no bot token given, and no default settings available".to_string(),
                ))
            }
        };
        let recipient_id = match (recipient_id, defaults) {
            (Some(recipient_id), _) => recipient_id,
            (None, Some(defaults)) => defaults.recipient_id.clone(),
            (None, None) => {
                return Err(TgLoggerError::Configuration(
                    "no recipient id given, and no default settings available".to_string(),
                ))
            }
        };
        let settings = Self {
            bot_token,
            recipient_id,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Reads the settings from the environment variables
    /// [`TG_LOGGER_BOT_TOKEN`](BOT_TOKEN_VAR) and [`TG_LOGGER_RECIPIENT_ID`](RECIPIENT_ID_VAR).
    ///
    /// Returns `Ok(None)` if neither is set.
    ///
    /// # Errors
    ///
    /// `TgLoggerError::Configuration` if only one of them is set, or if a value is empty.
    pub fn from_env() -> Result<Option<Self>, TgLoggerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Option<Self>, TgLoggerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match (lookup(BOT_TOKEN_VAR), lookup(RECIPIENT_ID_VAR)) {
            (None, None) => Ok(None),
            (Some(bot_token), Some(recipient_id)) => {
                let settings = Self::new(bot_token, recipient_id);
                settings.validate()?;
                Ok(Some(settings))
            }
            (Some(_), None) => Err(TgLoggerError::Configuration(format!(
                "{BOT_TOKEN_VAR} is set, but {RECIPIENT_ID_VAR} is not"
            ))),
            (None, Some(_)) => Err(TgLoggerError::Configuration(format!(
                "{RECIPIENT_ID_VAR} is set, but {BOT_TOKEN_VAR} is not"
            ))),
        }
    }

    /// Checks that neither token nor recipient id is empty.
    ///
    /// # Errors
    ///
    /// `TgLoggerError::Configuration` otherwise.
    pub fn validate(&self) -> Result<(), TgLoggerError> {
        if self.bot_token.trim().is_empty() {
            return Err(TgLoggerError::Configuration(
                "the bot token must not be empty".to_string(),
            ));
        }
        if self.recipient_id.is_empty() {
            return Err(TgLoggerError::Configuration(
                "the recipient id must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The bot token.
    #[must_use]
    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }

    /// The recipient of the messages.
    #[must_use]
    pub fn recipient_id(&self) -> &RecipientId {
        &self.recipient_id
    }

    pub(crate) fn into_parts(self) -> (String, RecipientId) {
        (self.bot_token, self.recipient_id)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("bot_token", &"***")
            .field("recipient_id", &self.recipient_id)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::{RecipientId, Settings, BOT_TOKEN_VAR, RECIPIENT_ID_VAR};
    use crate::TgLoggerError;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| vars.get(name).map(|v| (*v).to_string())
    }

    #[test]
    fn recipient_id_parsing() {
        assert_eq!(RecipientId::from("4711"), RecipientId::Int(4711));
        assert_eq!(RecipientId::from("-100123"), RecipientId::Int(-100_123));
        assert_eq!(
            RecipientId::from("@alerts"),
            RecipientId::Name("@alerts".to_string())
        );
        assert!(RecipientId::from("").is_empty());
        assert_eq!(RecipientId::Int(42).to_string(), "42");
    }

    #[test]
    fn recipient_id_serializes_untagged() {
        assert_eq!(serde_json::to_string(&RecipientId::Int(42)).unwrap(), "42");
        assert_eq!(
            serde_json::to_string(&RecipientId::from("@alerts")).unwrap(),
            "\"@alerts\""
        );
    }

    #[test]
    fn integer_literals_are_chat_ids() {
        let settings = Settings::new("123:abc", 4711);
        assert_eq!(settings.recipient_id(), &RecipientId::Int(4711));
        let settings = Settings::new("123:abc", -100_200);
        assert_eq!(settings.recipient_id(), &RecipientId::Int(-100_200));
    }

    #[test]
    fn explicit_values_win() {
        let defaults = Settings::new("default-token", 1_i64);
        let settings =
            Settings::resolve(Some("token".to_string()), None, Some(&defaults)).unwrap();
        assert_eq!(settings.bot_token(), "token");
        assert_eq!(settings.recipient_id(), &RecipientId::Int(1));
    }

    #[test]
    fn missing_values_without_defaults_fail() {
        assert!(matches!(
            Settings::resolve(None, None, None),
            Err(TgLoggerError::Configuration(_))
        ));
        assert!(matches!(
            Settings::resolve(Some("token".to_string()), None, None),
            Err(TgLoggerError::Configuration(_))
        ));
        assert!(matches!(
            Settings::resolve(Some(String::new()), Some(5_i64.into()), None),
            Err(TgLoggerError::Configuration(_))
        ));
    }

    #[test]
    fn env_lookup() {
        assert!(Settings::from_lookup(lookup_in(&[])).unwrap().is_none());

        let settings = Settings::from_lookup(lookup_in(&[
            (BOT_TOKEN_VAR, "123:abc"),
            (RECIPIENT_ID_VAR, "4711"),
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(settings, Settings::new("123:abc", 4711_i64));

        let only_token = lookup_in(&[(BOT_TOKEN_VAR, "123:abc")]);
        assert!(Settings::from_lookup(only_token).is_err());
        let only_recipient = lookup_in(&[(RECIPIENT_ID_VAR, "4711")]);
        assert!(Settings::from_lookup(only_recipient).is_err());
    }

    #[test]
    fn debug_hides_token() {
        let output = format!("{:?}", Settings::new("secret-token", 1_i64));
        assert!(!output.contains("secret-token"), "{output}");
    }
}
