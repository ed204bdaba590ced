// only enables the `doc_cfg` feature when the `docsrs` configuration attribute is defined
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::unused_self)]
#![allow(clippy::module_name_repetitions)]
//! A logger facade that writes log lines to local outputs and forwards errors to a chat.
//!
//! [`TgLogger`] wraps a named [`LocalLogger`] with a level threshold and a list of writers
//! (stderr, rotating files, memory buffers, the `log` crate). Every call writes to the
//! local logger; calls with level [`Level::Error`] or [`Level::Critical`] are additionally
//! sent as text message through a Telegram bot.
//!
//! ```rust,ignore
//! use tg_logger::{handlers, FileSpec, Level, LoggerSpec, TgLogger, TgLoggerConfig};
//!
//! let config = TgLoggerConfig::from_file("tg_logger.toml")?.with_env_overrides();
//! let mut logger = TgLogger::from_config(&config)?;
//! logger.get_logger(
//!     LoggerSpec::new()
//!         .level(Level::Info)
//!         .console_handler(handlers::console_handler(None, None))
//!         .file_handler(handlers::rotating_file_handler(
//!             FileSpec::default().directory("log_files"),
//!             None,
//!             None,
//!         )?),
//! );
//!
//! logger.info("service started");
//! logger.log_message("import", "warning", Some("skipped rows"), &[("count", "3")]);
//! logger.critical("database unreachable"); // also arrives in the chat
//! ```
//!
//! Delivery to the chat is best-effort: failures are logged locally as warnings and never
//! reach the caller. A [`RetryPolicy`] can be configured for transient failures.
//!
//! See
//!
//! * [`TgLogger`] for all log methods,
//! * [`Settings`] and [`TgLoggerConfig`] for the credentials and the configuration file,
//! * the module [`handlers`] for the standard console and file outputs,
//! * the module [`writers`] for all writers and for implementing your own.
//!
//! By default, i.e. if feature `colors` is not switched off, the log lines that appear on your
//! terminal are coloured.

mod config;
mod deferred_now;
mod file_spec;
mod formats;
mod level;
mod local_logger;
mod log_event;
mod logger_spec;
mod model;
mod parameters;
mod settings;
mod tg_error;
mod tg_logger;
mod util;

pub mod handlers;
pub mod notify;
pub mod writers;

pub use crate::config::{TgLoggerConfig, DEFAULT_LOGGER_NAME};
pub use crate::deferred_now::DeferredNow;
pub use crate::file_spec::FileSpec;
pub use crate::formats::*;
pub use crate::level::Level;
pub use crate::local_logger::LocalLogger;
pub use crate::log_event::LogEvent;
pub use crate::logger_spec::LoggerSpec;
pub use crate::notify::{NotificationClient, RetryPolicy, TelegramClient};
pub use crate::parameters::Cleanup;
pub use crate::settings::{RecipientId, Settings, BOT_TOKEN_VAR, RECIPIENT_ID_VAR};
pub use crate::tg_error::TgLoggerError;
pub use crate::tg_logger::{Category, TgLogger, SHRUG};
