use crate::{DeferredNow, LogEvent};
#[cfg(feature = "colors")]
use {
    crate::Level,
    nu_ansi_term::{Color, Style},
};
use std::io::Write;

/// Timestamp format used by [`default_format`] and [`colored_default_format`].
pub const TS_DASHES_BLANK_COLONS_DOT_BLANK: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Function type for format functions of the local writers.
///
/// If you want to write the log lines in your own format,
/// implement a function with this signature and provide it to one of the writer builders,
/// or to one of the handler factories.
///
/// Checkout the code of the provided format functions
/// if you want to start with a template.
///
/// ## Parameters
///
/// - `write`: the output stream
/// - `now`: the timestamp that you should use if you want a timestamp to appear in the log line
/// - `event`: the log line, with its target, level, message and source location
pub type FormatFunction =
    fn(write: &mut dyn Write, now: &mut DeferredNow, event: &LogEvent) -> std::io::Result<()>;

/// Function type for producing the text that is sent to the notification client.
pub type NotificationFormat = fn(now: &mut DeferredNow, event: &LogEvent) -> String;

/// A logline-formatter that produces log lines like <br>
/// ```2024-05-01 10:00:00.123 ERROR [app] src/billing.rs:26: payment: card declined```
///
/// i.e. with timestamp, level, logger name, source location and message.
///
/// # Errors
///
/// See `std::write`
pub fn default_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    event: &LogEvent,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} [{}] {}:{}: {}",
        now.format(TS_DASHES_BLANK_COLONS_DOT_BLANK),
        event.level(),
        event.target(),
        event.file(),
        event.line(),
        event.message()
    )
}

/// A colored version of the logline-formatter `default_format`.
///
/// See method [`style`] if you want to influence coloring.
///
/// # Errors
///
/// See `std::write`
#[cfg(feature = "colors")]
#[cfg_attr(docsrs, doc(cfg(feature = "colors")))]
pub fn colored_default_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    event: &LogEvent,
) -> Result<(), std::io::Error> {
    let level = event.level();
    write!(
        w,
        "{} {} [{}] {}:{}: {}",
        now.format(TS_DASHES_BLANK_COLONS_DOT_BLANK),
        style(level).paint(level.as_str()),
        event.target(),
        event.file(),
        event.line(),
        style(level).paint(event.message())
    )
}

/// A logline-formatter that produces log lines like <br>
/// ```ERROR [app] payment: card declined```
///
/// i.e. without timestamp and location.
///
/// # Errors
///
/// See `std::write`
pub fn simple_format(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    event: &LogEvent,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} [{}] {}",
        event.level(),
        event.target(),
        event.message()
    )
}

/// A logline-formatter that writes only the message.
///
/// Is used when a local logger has no writers at all.
///
/// # Errors
///
/// See `std::write`
pub fn message_format(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    event: &LogEvent,
) -> Result<(), std::io::Error> {
    w.write_all(event.message().as_bytes())
}

/// Produces notification texts like <br>
/// ```ERROR [app] payment: card declined```
#[must_use]
pub fn default_notification_format(_now: &mut DeferredNow, event: &LogEvent) -> String {
    format!("{} [{}] {}", event.level(), event.target(), event.message())
}

/// Produces notification texts that start with the timestamp of the log line, like <br>
/// ```2024-05-01 10:00:00 ERROR [app] payment: card declined```
#[must_use]
pub fn timestamped_notification_format(now: &mut DeferredNow, event: &LogEvent) -> String {
    format!(
        "{} {} [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S"),
        event.level(),
        event.target(),
        event.message()
    )
}

/// Helper function that is used in the provided coloring format functions to apply
/// colors based on the log level.
#[cfg(feature = "colors")]
#[cfg_attr(docsrs, doc(cfg(feature = "colors")))]
#[must_use]
pub fn style(level: Level) -> Style {
    match level {
        Level::Critical => Color::Fixed(196).bold().reverse(),
        Level::Error => Color::Fixed(196).bold(),
        Level::Warning => Color::Fixed(208).bold(),
        Level::Info => Style::new(),
        Level::Debug => Color::Fixed(7).normal(),
    }
}
