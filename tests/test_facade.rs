
use serde::Serialize;
use std::sync::Arc;
use test_utils::{facade, facade_with, RecordingClient};
use tg_logger::{
    default_format, simple_format, writers::BufferWriter, Level, LoggerSpec, Settings, TgLogger,
    TgLoggerError, SHRUG,
};

#[derive(Serialize)]
struct Invoice {
    id: u32,
    amount: u64,
}

#[test]
fn info_stays_local() {
    let (tg_logger, buffer, client) = facade("app");
    tg_logger.log_message("foo", "INFO", Some("bar"), &[]);

    assert_eq!(buffer.lines(), vec!["INFO [app] foo: bar"]);
    assert!(client.sent().is_empty());
}

#[test]
fn only_error_and_critical_are_sent() {
    let (tg_logger, buffer, client) = facade("app");
    tg_logger.debug("d");
    tg_logger.info("i");
    tg_logger.warning("w");
    assert!(client.sent().is_empty());

    tg_logger.error("disk full");
    assert_eq!(client.sent(), vec!["ERROR [app] disk full"]);

    tg_logger.critical("going down");
    assert_eq!(
        client.sent(),
        vec!["ERROR [app] disk full", "CRITICAL [app] going down"]
    );

    assert_eq!(
        buffer.lines(),
        vec![
            "DEBUG [app] d",
            "INFO [app] i",
            "WARNING [app] w",
            "ERROR [app] disk full",
            "CRITICAL [app] going down",
        ]
    );
}

#[test]
fn invalid_level_falls_back_to_error() {
    let (tg_logger, buffer, client) = facade("app");
    tg_logger.log_message("foo", "NOPE", Some("bar"), &[]);

    assert_eq!(
        buffer.lines(),
        vec![
            r#"ERROR [app] foo: Invalid log_level="NOPE"."#,
            "ERROR [app] foo: bar",
        ]
    );
    assert_eq!(client.sent(), vec!["ERROR [app] foo: bar"]);
}

#[test]
fn level_names_ignore_case() {
    let (tg_logger, buffer, client) = facade("app");
    tg_logger.log_message("a", "warning", Some("x"), &[]);
    tg_logger.log_message("b", "Critical", Some("y"), &[]);

    assert_eq!(
        buffer.lines(),
        vec!["WARNING [app] a: x", "CRITICAL [app] b: y"]
    );
    assert_eq!(client.sent(), vec!["CRITICAL [app] b: y"]);
}

#[test]
fn missing_message_is_shrug() {
    let (tg_logger, buffer, _client) = facade("app");
    tg_logger.log_message("foo", "info", None, &[]);
    assert_eq!(buffer.lines(), vec![format!("INFO [app] foo: {SHRUG}")]);
}

#[test]
fn extras_are_appended_in_order() {
    let (tg_logger, buffer, _client) = facade("app");
    tg_logger.log_message(
        "import",
        "info",
        Some("done"),
        &[("rows", "12"), ("file", "a.csv")],
    );
    assert_eq!(
        buffer.lines(),
        vec!["INFO [app] import: done rows=12 file=a.csv"]
    );
}

#[test]
fn event_and_category() {
    let (tg_logger, buffer, client) = facade("app");
    tg_logger.event("payment", "info", "received");
    tg_logger.log_message("payment", "info", Some("received"), &[]);
    tg_logger
        .category("payment")
        .with("order", 4711)
        .with("provider", "acme")
        .log("critical", "refund failed");

    let lines = buffer.lines();
    assert_eq!(lines[0], lines[1]);
    assert_eq!(
        lines[2],
        "CRITICAL [app] payment: refund failed order=4711 provider=acme"
    );
    assert_eq!(client.sent().len(), 1);
}

#[test]
fn delivery_failure_is_logged_locally() {
    let client = RecordingClient::failing();
    let (tg_logger, buffer) = facade_with("app", client.clone());

    tg_logger.error("boom");

    assert_eq!(client.sent().len(), 1);
    assert_eq!(
        buffer.lines(),
        vec![
            "ERROR [app] boom",
            "WARNING [app] failed to deliver notification via recorder: \
             Delivery failed with status 403: Forbidden: bot was blocked by the user",
        ]
    );
}

#[test]
fn model_log() {
    let (tg_logger, buffer, client) = facade("app");
    let invoice = Invoice { id: 7, amount: 990 };

    tg_logger.model_log("info", &invoice, "created", None, None);
    tg_logger.model_log(
        "info",
        &invoice,
        "deleted",
        Some("alice"),
        Some("on request"),
    );
    tg_logger.model_log("error", &42_u8, "updated", None, None);

    assert_eq!(
        buffer.lines(),
        vec![
            r#"INFO [app] model_log: Invoice with {"id":7,"amount":990} was created."#,
            r#"INFO [app] model_log: alice deleted Invoice with {"id":7,"amount":990}. on request"#,
            "ERROR [app] model_log: u8 with None was updated.",
        ]
    );
    assert_eq!(
        client.sent(),
        vec!["ERROR [app] model_log: u8 with None was updated."]
    );
}

#[test]
fn model_fields_keep_declaration_order() {
    #[derive(Serialize)]
    struct Payment {
        zeta: u32,
        alpha: u32,
    }

    let (tg_logger, buffer, client) = facade("app");
    tg_logger.model_log(
        "ERROR",
        &Payment { zeta: 1, alpha: 2 },
        "update",
        Some("alice"),
        None,
    );

    let expected = r#"ERROR [app] model_log: alice update Payment with {"zeta":1,"alpha":2}."#;
    assert_eq!(buffer.lines(), vec![expected]);
    assert_eq!(client.sent(), vec![expected]);
}

#[test]
fn empty_spec_is_noop() {
    let (mut tg_logger, _buffer, _client) = facade("app");
    let start_time = tg_logger.start_time();
    tg_logger.get_logger(LoggerSpec::new());

    assert_eq!(tg_logger.local_logger().name(), "app");
    assert_eq!(tg_logger.local_logger().writer_count(), 1);
    assert_eq!(tg_logger.start_time(), start_time);
}

#[test]
fn new_name_replaces_local_logger() {
    let (mut tg_logger, old_buffer, client) = facade("app");
    let new_buffer = BufferWriter::new(10_000, simple_format);

    tg_logger
        .get_logger(
            LoggerSpec::new()
                .name("billing")
                .level(Level::Warning)
                .writer(Box::new(new_buffer.clone())),
        )
        .info("not written");
    tg_logger.error("written");

    assert!(old_buffer.lines().is_empty());
    assert_eq!(new_buffer.lines(), vec!["ERROR [billing] written"]);
    assert_eq!(client.sent(), vec!["ERROR [billing] written"]);
    assert_eq!(tg_logger.local_logger().level(), Level::Warning);
}

#[test]
fn same_name_keeps_writers() {
    let (mut tg_logger, buffer, _client) = facade("app");
    let second = BufferWriter::new(10_000, simple_format);
    tg_logger.get_logger(
        LoggerSpec::new()
            .name("app")
            .writer(Box::new(second.clone())),
    );
    tg_logger.info("twice");

    assert_eq!(buffer.lines(), vec!["INFO [app] twice"]);
    assert_eq!(second.lines(), vec!["INFO [app] twice"]);
}

#[test]
fn level_threshold_does_not_suppress_notification() {
    let (mut tg_logger, buffer, client) = facade("app");
    tg_logger.get_logger(LoggerSpec::new().level(Level::Critical));
    tg_logger.error("quiet locally");

    assert!(buffer.lines().is_empty());
    assert_eq!(client.sent(), vec!["ERROR [app] quiet locally"]);
}

#[test]
fn lines_carry_the_call_site() {
    let buffer = BufferWriter::new(10_000, default_format);
    let mut tg_logger = TgLogger::with_client("app", Box::new(RecordingClient::default()));
    tg_logger.get_logger(LoggerSpec::new().writer(Box::new(buffer.clone())));

    tg_logger.info("here");
    let line = &buffer.lines()[0];
    assert!(line.contains("test_facade.rs:"), "{line}");
    assert!(line.ends_with(": here"), "{line}");
}

#[test]
fn shared_between_threads() {
    let (tg_logger, buffer, client) = facade("app");
    let tg_logger = Arc::new(tg_logger);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let tg_logger = Arc::clone(&tg_logger);
            std::thread::spawn(move || {
                for i in 0..10 {
                    tg_logger.error(&format!("thread {t} line {i}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(client.sent().len(), 40);
    assert_eq!(buffer.lines().len(), 40);
}

#[test]
fn construction_requires_credentials() {
    assert!(matches!(
        TgLogger::with_credentials("app", "", 4711_i64),
        Err(TgLoggerError::Configuration(_))
    ));
    assert!(matches!(
        TgLogger::with_credentials("app", "123:abc", ""),
        Err(TgLoggerError::Configuration(_))
    ));
    assert!(matches!(
        Settings::resolve(None, None, None),
        Err(TgLoggerError::Configuration(_))
    ));
}

#[test]
fn construction_with_valid_credentials() {
    let tg_logger = TgLogger::with_credentials("app", "123:abc", "@alerts").unwrap();
    assert_eq!(tg_logger.local_logger().name(), "app");
    assert!(tg_logger.start_time() <= chrono::Local::now());
}
