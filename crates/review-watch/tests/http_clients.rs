use std::collections::HashMap;

use mockito::{Matcher, Server};
use review_watch::clients::{PracticumClient, TelegramNotifier};
use review_watch::config::{ConfigError, PracticumConfig, Secret, TelegramConfig};
use review_watch::error::AppError;
use review_watch::review::{CycleOutcome, DeliveryError, FetchError, Notifier, ReviewApi};
use review_watch::service::{prepare, WatchOverrides};
use serde_json::json;

fn practicum(endpoint: String) -> PracticumClient {
    PracticumClient::new(&PracticumConfig {
        endpoint,
        token: Secret::new("practicum-token"),
    })
    .expect("client builds")
}

fn telegram(api_url: String) -> TelegramNotifier {
    TelegramNotifier::new(&TelegramConfig {
        api_url,
        token: Secret::new("123:abc"),
        chat_id: "42".to_string(),
    })
    .expect("notifier builds")
}

#[tokio::test]
async fn practicum_client_sends_token_and_timestamp() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/user_api/homework_statuses/")
        .match_header("authorization", "OAuth practicum-token")
        .match_query(Matcher::UrlEncoded(
            "from_date".into(),
            "1700000000".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"homeworks": [], "current_date": 1700000600}"#)
        .create_async()
        .await;

    let client = practicum(format!("{}/api/user_api/homework_statuses/", server.url()));
    let payload = client
        .homework_statuses(1_700_000_000)
        .await
        .expect("fetch succeeds");

    assert_eq!(payload["homeworks"], json!([]));
    mock.assert_async().await;
}

#[tokio::test]
async fn practicum_client_rejects_non_ok_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let endpoint = format!("{}/api/", server.url());
    let err = practicum(endpoint.clone())
        .homework_statuses(1)
        .await
        .expect_err("503 is a fetch failure");

    assert_eq!(
        err,
        FetchError::Status {
            endpoint,
            status: 503
        }
    );
}

#[tokio::test]
async fn practicum_client_rejects_malformed_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = practicum(format!("{}/api/", server.url()))
        .homework_statuses(1)
        .await
        .expect_err("html is not json");
    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn practicum_transport_errors_mention_the_polled_timestamp() {
    let err = practicum("http://127.0.0.1:1/api/".to_string())
        .homework_statuses(1_700_000_000)
        .await
        .expect_err("nothing listens on port 1");

    match err {
        FetchError::Transport { reason, .. } => assert!(reason.contains("from_date=1700000000")),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn telegram_notifier_posts_chat_message() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/bot123:abc/sendMessage")
        .match_body(Matcher::Json(json!({"chat_id": "42", "text": "привет"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": true, "result": {"message_id": 7}}"#)
        .create_async()
        .await;

    telegram(server.url())
        .send("привет")
        .await
        .expect("message delivered");
    mock.assert_async().await;
}

#[tokio::test]
async fn telegram_notifier_surfaces_api_rejections() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/bot123:abc/sendMessage")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#)
        .create_async()
        .await;

    let err = telegram(format!("{}/", server.url()))
        .send("привет")
        .await
        .expect_err("rejected by api");
    assert_eq!(
        err,
        DeliveryError::Rejected {
            status: 400,
            description: "Bad Request: chat not found".to_string()
        }
    );
}

#[tokio::test]
async fn telegram_transport_errors_do_not_leak_the_token() {
    let err = telegram("http://127.0.0.1:1".to_string())
        .send("привет")
        .await
        .expect_err("nothing listens on port 1");

    assert!(matches!(err, DeliveryError::Transport(_)));
    assert!(!err.to_string().contains("123:abc"));
}

fn environment(practicum_url: &str, telegram_url: &str) -> HashMap<&'static str, String> {
    HashMap::from([
        ("PRACTICUM_TOKEN", "practicum-token".to_string()),
        ("TELEGRAM_TOKEN", "123:abc".to_string()),
        ("TELEGRAM_CHAT_ID", "42".to_string()),
        ("PRACTICUM_ENDPOINT", practicum_url.to_string()),
        ("TELEGRAM_API_URL", telegram_url.to_string()),
    ])
}

#[tokio::test]
async fn missing_chat_id_stops_before_any_fetch() {
    let mut server = Server::new_async().await;
    let fetch = server
        .mock("GET", "/api/")
        .expect(0)
        .create_async()
        .await;

    let mut vars = environment(&format!("{}/api/", server.url()), &server.url());
    vars.remove("TELEGRAM_CHAT_ID");

    let result = prepare(|name| vars.get(name).cloned(), &WatchOverrides::default());
    match result {
        Err(AppError::Config(ConfigError::MissingVariables(names))) => {
            assert_eq!(names, vec!["TELEGRAM_CHAT_ID"]);
        }
        Err(other) => panic!("expected missing variable error, got {other}"),
        Ok(_) => panic!("watcher must not be built without a chat id"),
    }
    fetch.assert_async().await;
}

#[tokio::test]
async fn prepared_watcher_reports_status_change_over_http() {
    let mut server = Server::new_async().await;
    let fetch = server
        .mock("GET", "/api/")
        .match_query(Matcher::UrlEncoded("from_date".into(), "1000".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"homeworks": [{"homework_name": "proj1", "status": "approved", "date_updated": "2024-03-02T10:00:00Z"}]}"#,
        )
        .create_async()
        .await;
    let expected =
        "Изменился статус проверки работы \"proj1\". Работа проверена: ревьюеру всё понравилось. Ура!";
    let send = server
        .mock("POST", "/bot123:abc/sendMessage")
        .match_body(Matcher::Json(json!({"chat_id": "42", "text": expected})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": true}"#)
        .create_async()
        .await;

    let vars = environment(&format!("{}/api/", server.url()), &server.url());
    let overrides = WatchOverrides {
        from_date: Some(1_000),
        ..WatchOverrides::default()
    };
    let mut watcher = prepare(|name| vars.get(name).cloned(), &overrides).expect("watcher builds");

    assert_eq!(
        watcher.run_cycle().await,
        CycleOutcome::Notified {
            message: expected.to_string()
        }
    );
    fetch.assert_async().await;
    send.assert_async().await;
}
