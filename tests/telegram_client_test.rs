//! Bot API client against a mock server.

use episort::bot::Transport;
use episort::config::TelegramConfig;
use episort::telegram::TelegramClient;
use episort_common::{ChatId, FileHandle, MediaKind};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123:test-token";

fn client_for(server: &MockServer) -> TelegramClient {
    let config = TelegramConfig {
        api_url: server.uri(),
        ..TelegramConfig::default()
    };
    TelegramClient::new(&config, TOKEN)
}

fn ok(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": result }))
}

#[tokio::test]
async fn send_message_uses_markdown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .and(body_partial_json(json!({
            "chat_id": 42,
            "text": "Stored ✔",
            "parse_mode": "Markdown"
        })))
        .respond_with(ok(json!({ "message_id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .send_message(ChatId::from(42), "Stored ✔")
        .await
        .unwrap();
}

#[tokio::test]
async fn media_kind_picks_endpoint() {
    let server = MockServer::start().await;
    for (endpoint, field) in [
        ("sendDocument", "document"),
        ("sendVideo", "video"),
        ("sendAudio", "audio"),
    ] {
        let mut body = json!({ "chat_id": 7 });
        body[field] = json!("FILE-ID");
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/{endpoint}")))
            .and(body_partial_json(body))
            .respond_with(ok(json!({ "message_id": 2 })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    let handle = FileHandle::from("FILE-ID");
    for kind in [MediaKind::Document, MediaKind::Video, MediaKind::Audio] {
        client
            .send_file(ChatId::from(7), &handle, kind)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn throttled_request_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "ok": false,
            "error_code": 429,
            "description": "Too Many Requests: retry after 0",
            "parameters": { "retry_after": 0 }
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .respond_with(ok(json!({ "message_id": 3 })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .send_message(ChatId::from(1), "hi")
        .await
        .unwrap();
}

#[tokio::test]
async fn throttling_gives_up_after_retries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "ok": false,
            "error_code": 429,
            "description": "Too Many Requests: retry after 0",
            "parameters": { "retry_after": 0 }
        })))
        .expect(4)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_message(ChatId::from(1), "hi")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn transport_error_hides_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: wrong file identifier/HTTP URL specified"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_file(ChatId::from(1), &FileHandle::from("x"), MediaKind::Video)
        .await
        .unwrap_err();

    let text = err.to_string();
    assert!(text.contains("wrong file identifier"), "{text}");
    assert!(!text.contains(TOKEN));
}

#[tokio::test]
async fn get_updates_parses_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getUpdates")))
        .and(body_partial_json(json!({ "offset": 10, "timeout": 1 })))
        .respond_with(ok(json!([
            {
                "update_id": 10,
                "message": {
                    "message_id": 1,
                    "from": { "id": 99, "is_bot": false, "first_name": "A" },
                    "chat": { "id": 99, "type": "private" },
                    "document": {
                        "file_id": "BQAC",
                        "file_unique_id": "AgAD",
                        "file_name": "Show.S01E04.mkv",
                        "file_size": 1024
                    }
                }
            },
            {
                "update_id": 11,
                "message": {
                    "message_id": 2,
                    "from": { "id": 99, "is_bot": false },
                    "chat": { "id": 99, "type": "private" },
                    "text": "/sort"
                }
            },
            { "update_id": 12, "edited_message": { "message_id": 1 } }
        ])))
        .mount(&server)
        .await;

    let updates = client_for(&server).get_updates(Some(10), 1).await.unwrap();
    assert_eq!(updates.len(), 3);

    let upload = updates[0].message.as_ref().unwrap().upload().unwrap();
    assert_eq!(upload.name, "Show.S01E04.mkv");
    assert_eq!(upload.handle, FileHandle::from("BQAC"));
    assert_eq!(upload.kind, MediaKind::Document);

    assert!(updates[1].message.as_ref().unwrap().upload().is_none());
    assert!(updates[2].message.is_none());
}

#[tokio::test]
async fn get_me_reads_username() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getMe")))
        .respond_with(ok(json!({ "id": 5, "is_bot": true, "username": "episort_bot" })))
        .mount(&server)
        .await;

    let me = client_for(&server).get_me().await.unwrap();
    assert_eq!(me.id, 5);
    assert_eq!(me.username.as_deref(), Some("episort_bot"));
}
