use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;
use std::{net::TcpListener, time::Duration};
use tg_logger::{
    notify::MAX_MESSAGE_CHARS, simple_format, writers::BufferWriter, LoggerSpec,
    NotificationClient, RetryPolicy, Settings, TelegramClient, TgLogger, TgLoggerConfig,
    TgLoggerError,
};

const OK_REPLY: &str = r#"{"ok":true,"result":{"message_id":1}}"#;
const SEND_MESSAGE: &str = "/bot123:abc/sendMessage";

fn client(server: &ServerGuard, retry_policy: RetryPolicy) -> TelegramClient {
    TelegramClient::builder(Settings::new("123:abc", 4711_i64))
        .api_url(server.url())
        .timeout(Duration::from_secs(5))
        .retry_policy(retry_policy)
        .try_build()
        .unwrap()
}

// Expects exactly one sendMessage call with the given JSON body
fn expect_message(
    server: &mut ServerGuard,
    body: serde_json::Value,
    status: usize,
    reply: &str,
) -> Mock {
    server
        .mock("POST", SEND_MESSAGE)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(body))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(reply)
        .expect(1)
        .create()
}

#[test]
fn posts_json_to_send_message() {
    let mut server = Server::new();
    let mock = expect_message(
        &mut server,
        json!({"chat_id": 4711, "text": "hello"}),
        200,
        OK_REPLY,
    );

    client(&server, RetryPolicy::none()).send("hello").unwrap();
    mock.assert();
}

#[test]
fn channel_names_are_sent_as_strings() {
    let mut server = Server::new();
    let mock = expect_message(
        &mut server,
        json!({"chat_id": "@alerts", "text": "hi"}),
        200,
        OK_REPLY,
    );

    // a trailing slash of the api url is ignored
    TelegramClient::builder(Settings::new("123:abc", "@alerts"))
        .api_url(format!("{}/", server.url()))
        .try_build()
        .unwrap()
        .send("hi")
        .unwrap();
    mock.assert();
}

#[test]
fn not_ok_is_a_delivery_error() {
    let mut server = Server::new();
    let mock = expect_message(
        &mut server,
        json!({"chat_id": 4711, "text": "x"}),
        400,
        r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
    );

    let result = client(&server, RetryPolicy::new(3, Duration::ZERO)).send("x");
    match result {
        Err(TgLoggerError::Delivery {
            status,
            description,
        }) => {
            assert_eq!(status, 400);
            assert_eq!(description, "Bad Request: chat not found");
        }
        other => panic!("unexpected result {other:?}"),
    }
    // client errors are not repeated
    mock.assert();
}

#[test]
fn ok_false_with_success_status_fails() {
    let mut server = Server::new();
    let mock = expect_message(
        &mut server,
        json!({"chat_id": 4711, "text": "x"}),
        200,
        r#"{"ok":false}"#,
    );

    let result = client(&server, RetryPolicy::none()).send("x");
    assert!(matches!(
        result,
        Err(TgLoggerError::Delivery { status: 200, .. })
    ));
    mock.assert();
}

#[test]
fn retries_server_errors() {
    let mut server = Server::new();
    let body = json!({"chat_id": 4711, "text": "again"});
    // each mock answers once, in the order of creation
    let bad_gateway = expect_message(
        &mut server,
        body.clone(),
        502,
        r#"{"ok":false,"error_code":502,"description":"Bad Gateway"}"#,
    );
    let too_many = expect_message(
        &mut server,
        body.clone(),
        429,
        r#"{"ok":false,"error_code":429,"description":"Too Many Requests"}"#,
    );
    let ok = expect_message(&mut server, body, 200, OK_REPLY);

    client(&server, RetryPolicy::new(3, Duration::from_millis(10)))
        .send("again")
        .unwrap();

    bad_gateway.assert();
    too_many.assert();
    ok.assert();
}

#[test]
fn long_texts_are_truncated() {
    let mut server = Server::new();
    let text = "ä".repeat(MAX_MESSAGE_CHARS + 100);
    let mock = expect_message(
        &mut server,
        json!({"chat_id": 4711, "text": "ä".repeat(MAX_MESSAGE_CHARS)}),
        200,
        OK_REPLY,
    );

    client(&server, RetryPolicy::none()).send(&text).unwrap();
    mock.assert();
}

#[test]
fn unreachable_endpoint() {
    // a port on which nobody listens anymore
    let url = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let result = TelegramClient::builder(Settings::new("123:abc", 4711_i64))
        .api_url(url)
        .timeout(Duration::from_secs(2))
        .try_build()
        .unwrap()
        .send("x");

    match result {
        Err(e @ TgLoggerError::Http(_)) => {
            assert!(e.is_transient());
            assert!(!format!("{e:?}").contains("123:abc"), "{e:?}");
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn empty_credentials_are_rejected() {
    assert!(matches!(
        TelegramClient::builder(Settings::new("", 4711_i64)).try_build(),
        Err(TgLoggerError::Configuration(_))
    ));
    assert!(matches!(
        TelegramClient::builder(Settings::new("123:abc", " ")).try_build(),
        Err(TgLoggerError::Configuration(_))
    ));
}

#[test]
fn facade_from_config() {
    let mut server = Server::new();
    let mock = expect_message(
        &mut server,
        json!({
            "chat_id": -100_200,
            "text": "ERROR [billing] payment provider unreachable"
        }),
        200,
        OK_REPLY,
    );
    let config = TgLoggerConfig::from_toml_str(&format!(
        r#"
        [telegram]
        bot_token = "123:abc"
        recipient_id = -100200
        api_url = "{}"
        timeout_secs = 5

        [logger]
        name = "billing"
        level = "info"
        "#,
        server.url()
    ))
    .unwrap();

    let tg_logger = TgLogger::from_config(&config).unwrap();
    tg_logger.info("stays local");
    tg_logger.error("payment provider unreachable");
    mock.assert();
}

#[test]
fn facade_survives_rejection() {
    let mut server = Server::new();
    let mock = expect_message(
        &mut server,
        json!({"chat_id": 4711, "text": "CRITICAL [app] boom"}),
        401,
        r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#,
    );
    let buffer = BufferWriter::new(10_000, simple_format);
    let mut tg_logger =
        TgLogger::with_client("app", Box::new(client(&server, RetryPolicy::none())));
    tg_logger.get_logger(LoggerSpec::new().writer(Box::new(buffer.clone())));

    tg_logger.critical("boom");

    assert_eq!(
        buffer.lines(),
        vec![
            "CRITICAL [app] boom",
            "WARNING [app] failed to deliver notification via telegram: \
             Delivery failed with status 401: Unauthorized",
        ]
    );
    mock.assert();
}
