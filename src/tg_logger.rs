use crate::{
    formats::NotificationFormat,
    model,
    notify::{NotificationClient, TelegramClient},
    DeferredNow, Level, LocalLogger, LogEvent, LoggerSpec, Settings, TgLoggerConfig, TgLoggerError,
};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::{fmt::Write, panic::Location};

/// Placeholder text for [`TgLogger::log_message`] calls without message.
pub const SHRUG: &str = "¯\\_(ツ)_/¯";

/// The logger facade.
///
/// Every log line is written to the wrapped [`LocalLogger`]. Lines with level
/// [`Level::Error`] or [`Level::Critical`] are additionally sent, exactly once per call,
/// to the [`NotificationClient`].
///
/// Delivery is best-effort: if sending fails, a warning line describing the failure is
/// written to the local logger, and the log call returns normally.
///
/// All log methods take `&self`; a `TgLogger` can be shared across threads behind an `Arc`.
///
/// ```rust,ignore
/// use tg_logger::{handlers, Level, LoggerSpec, TgLogger};
///
/// let mut logger = TgLogger::with_credentials("billing", "123:abc", 4711)?;
/// logger.get_logger(
///     LoggerSpec::new()
///         .level(Level::Info)
///         .console_handler(handlers::console_handler(None, None)),
/// );
///
/// logger.info("started");
/// logger.error("payment provider unreachable"); // also arrives in the chat
/// ```
pub struct TgLogger {
    logger: LocalLogger,
    client: Box<dyn NotificationClient>,
    notification_format: NotificationFormat,
    start_time: DateTime<Local>,
}

impl TgLogger {
    /// Creates a facade that notifies through a Telegram bot.
    ///
    /// The local logger gets the given name and has no writers yet,
    /// see [`get_logger`](TgLogger::get_logger).
    ///
    /// # Errors
    ///
    /// `TgLoggerError::Configuration` if token or recipient id are empty,
    /// `TgLoggerError::Http` if the HTTP client cannot be initialized.
    pub fn try_new<S: Into<String>>(name: S, settings: Settings) -> Result<Self, TgLoggerError> {
        let client = TelegramClient::builder(settings).try_build()?;
        Ok(Self::with_client(name, Box::new(client)))
    }

    /// Creates a facade from explicit credentials.
    ///
    /// # Errors
    ///
    /// See [`try_new`](TgLogger::try_new).
    pub fn with_credentials<S, T, R>(
        name: S,
        bot_token: T,
        recipient_id: R,
    ) -> Result<Self, TgLoggerError>
    where
        S: Into<String>,
        T: Into<String>,
        R: Into<crate::RecipientId>,
    {
        Self::try_new(name, Settings::new(bot_token, recipient_id))
    }

    /// Creates a facade as described by the configuration.
    ///
    /// # Errors
    ///
    /// See [`try_new`](TgLogger::try_new).
    pub fn from_config(config: &TgLoggerConfig) -> Result<Self, TgLoggerError> {
        let client = TelegramClient::builder(config.settings()?)
            .api_url(config.api_url())
            .timeout(config.timeout())
            .retry_policy(config.retry_policy())
            .try_build()?;
        let mut tg_logger = Self::with_client(config.logger_name(), Box::new(client));
        if let Some(level) = config.logger_level() {
            tg_logger.logger.set_level(level);
        }
        Ok(tg_logger)
    }

    /// Creates a facade that uses the given notification client.
    #[must_use]
    pub fn with_client<S: Into<String>>(name: S, client: Box<dyn NotificationClient>) -> Self {
        Self {
            logger: LocalLogger::new(name),
            client,
            notification_format: crate::default_notification_format,
            start_time: Local::now(),
        }
    }

    /// Makes the facade use the given function for producing the notification texts.
    ///
    /// The default is [`default_notification_format`](crate::default_notification_format).
    #[must_use]
    pub fn notification_format(mut self, format: NotificationFormat) -> Self {
        self.notification_format = format;
        self
    }

    /// The point in time when the facade was created.
    #[must_use]
    pub fn start_time(&self) -> DateTime<Local> {
        self.start_time
    }

    /// The wrapped local logger.
    #[must_use]
    pub fn local_logger(&self) -> &LocalLogger {
        &self.logger
    }

    /// Reconfigures the local logger.
    ///
    /// A name different from the current one replaces the local logger with a fresh one;
    /// then the writers of the spec are attached and its level is set.
    pub fn get_logger(&mut self, spec: LoggerSpec) -> &mut Self {
        if spec.is_empty() {
            return self;
        }
        if let Some(name) = spec.o_name {
            if name != self.logger.name() {
                std::mem::replace(&mut self.logger, LocalLogger::new(name)).shutdown();
            }
        }
        if let Some(level) = spec.o_level {
            self.logger.set_level(level);
        }
        for writer in spec.writers {
            self.logger.add_writer(writer);
        }
        self
    }

    /// Logs at level [`Level::Debug`].
    #[track_caller]
    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    /// Logs at level [`Level::Info`].
    #[track_caller]
    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    /// Logs at level [`Level::Warning`].
    #[track_caller]
    pub fn warning(&self, message: &str) {
        self.log(Level::Warning, message);
    }

    /// Logs at level [`Level::Error`] and sends a notification.
    #[track_caller]
    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    /// Logs at level [`Level::Critical`] and sends a notification.
    #[track_caller]
    pub fn critical(&self, message: &str) {
        self.log(Level::Critical, message);
    }

    /// Logs at the given level; sends a notification for error and critical lines.
    #[track_caller]
    pub fn log(&self, level: Level, message: &str) {
        self.log_at(level, message, Location::caller());
    }

    /// Logs `"<name>: <message>"`, followed by ` key=value` for each extra pair.
    ///
    /// The level name is parsed ignoring case. An unknown level name is reported with
    /// an error line on the local logger, and the message is then logged as error.
    /// A missing message is replaced with [`SHRUG`].
    #[track_caller]
    pub fn log_message(
        &self,
        name: &str,
        log_level: &str,
        message: Option<&str>,
        extra: &[(&str, &str)],
    ) {
        let location = Location::caller();
        let level: Level = log_level.parse().unwrap_or_else(|_| {
            let diagnostic = format!("{name}: Invalid log_level={log_level:?}.");
            self.write_local(Level::Error, &diagnostic, location);
            Level::Error
        });

        let mut text = format!("{name}: {}", message.unwrap_or(SHRUG));
        for (key, value) in extra {
            write!(text, " {key}={value}").ok();
        }
        self.log_at(level, &text, location);
    }

    /// Logs a message under an event category; same as
    /// `log_message(category, log_level, Some(message), &[])`.
    #[track_caller]
    pub fn event(&self, category: &str, log_level: &str, message: &str) {
        self.log_message(category, log_level, Some(message), &[]);
    }

    /// Returns a handle for logging under the given category, optionally with extra
    /// key-value pairs.
    ///
    /// ```rust,ignore
    /// logger
    ///     .category("payment")
    ///     .with("order", "4711")
    ///     .log("error", "card declined");
    /// // logs "payment: card declined order=4711" as error
    /// ```
    #[must_use]
    pub fn category<'a>(&'a self, name: &'a str) -> Category<'a> {
        Category {
            tg_logger: self,
            name,
            extra: Vec::new(),
        }
    }

    /// Logs a change of a data record.
    ///
    /// The text is `"<Type> with <fields> was <method>."`, or
    /// `"<user> <method> <Type> with <fields>."` if a user is given;
    /// `add_info` is appended. `<fields>` is the JSON rendering of the model,
    /// or `None` if the model does not serialize to a JSON object.
    /// The text is logged with [`log_message`](TgLogger::log_message) under the name `model_log`.
    #[track_caller]
    pub fn model_log<M: Serialize + ?Sized>(
        &self,
        log_level: &str,
        model: &M,
        method: &str,
        user: Option<&str>,
        add_info: Option<&str>,
    ) {
        let text = model::describe(model, method, user, add_info);
        self.log_message("model_log", log_level, Some(&text), &[]);
    }

    /// Flushes the writers of the local logger.
    pub fn flush(&self) {
        self.logger.flush();
    }

    /// Flushes the writers of the local logger and stops their background threads.
    pub fn shutdown(&self) {
        self.logger.shutdown();
    }

    fn log_at(&self, level: Level, message: &str, location: &'static Location<'static>) {
        let mut now = DeferredNow::new();
        let event = LogEvent::new(self.logger.name(), level, message, location);
        self.logger.write(&mut now, &event);
        if level.is_alert() {
            self.notify(&mut now, &event);
        }
    }

    fn write_local(&self, level: Level, message: &str, location: &'static Location<'static>) {
        let event = LogEvent::new(self.logger.name(), level, message, location);
        self.logger.write(&mut DeferredNow::new(), &event);
    }

    fn notify(&self, now: &mut DeferredNow, event: &LogEvent) {
        let text = (self.notification_format)(now, event);
        if let Err(e) = self.client.send(&text) {
            let message = format!(
                "failed to deliver notification via {}: {e}",
                self.client.name()
            );
            self.write_local(Level::Warning, &message, event.location());
        }
    }
}

impl std::fmt::Debug for TgLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TgLogger")
            .field("logger", &self.logger)
            .field("client", &self.client.name())
            .field("start_time", &self.start_time)
            .finish_non_exhaustive()
    }
}

/// Logs under a fixed category, with extra key-value pairs.
///
/// Is returned by [`TgLogger::category`].
#[derive(Debug)]
pub struct Category<'a> {
    tg_logger: &'a TgLogger,
    name: &'a str,
    extra: Vec<(String, String)>,
}

impl Category<'_> {
    /// Adds a key-value pair that is appended to each message.
    #[must_use]
    pub fn with<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.extra.push((key.into(), value.to_string()));
        self
    }

    /// Logs the message; see [`TgLogger::log_message`].
    #[track_caller]
    pub fn log(&self, log_level: &str, message: &str) {
        let extra: Vec<(&str, &str)> = self
            .extra
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        self.tg_logger
            .log_message(self.name, log_level, Some(message), &extra);
    }
}
