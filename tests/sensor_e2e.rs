//! End-to-end tests driving the orchestrator against a mock management API.

use pretty_assertions::assert_eq;
use std::time::Duration;
use trueconf_prtg_sensor::{
    report,
    Collector,
    Config,
    Connection,
    Orchestrator,
    SensorError,
};
use url::Url;
use wiremock::matchers::{
    method,
    path,
    query_param,
    query_param_is_missing,
};
use wiremock::{
    Mock,
    MockServer,
    ResponseTemplate,
};

const TOKEN: &str = "test-token";

fn test_config(base: &str) -> Config {
    let base_url = Url::parse(&format!("{base}/api/v4/")).expect("base url");
    Config {
        connection: Connection::with_base_url(base_url, TOKEN),
        request_timeout: Duration::from_secs(5),
        timezone_offset_minutes: 180,
        long_window: Duration::from_secs(300),
        short_window: Duration::from_secs(60),
    }
}

async fn mount_empty_event_log(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v4/logs/events"))
        .and(query_param("access_token", TOKEN))
        .and(query_param("timezone", "180"))
        .and(query_param("page_size", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "list": [],
            "cnt": 0
        })))
        // One fetch per window; the two windows are never served from one.
        .expect(2)
        .mount(mock_server)
        .await;
}

/// The documented scenario: 2 users (1 online, 1 offline), 1 running
/// conference with 2 participants (1 guest, 1 user), 0 stopped conferences
/// and empty event logs for both windows.
#[tokio::test]
async fn full_poll_emits_all_channels_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/users"))
        .and(query_param("access_token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [{"status": 1}, {"status": 0}],
            "next_page_id": -1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v4/conferences"))
        .and(query_param("access_token", TOKEN))
        .and(query_param("page_size", "300"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "conferences": [{"id": "conf-1", "state": "running"}],
            "cnt": 1
        })))
        // Conference and participant collectors each fetch the list.
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v4/conferences/conf-1/participants"))
        .and(query_param("access_token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "participants": [{"id": "#guest123@vcs.example"}, {"id": "alice@vcs.example"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_empty_event_log(&mock_server).await;

    let mut orchestrator = Orchestrator::new(test_config(&mock_server.uri())).unwrap();
    orchestrator.collect().await.unwrap();

    let channels = orchestrator.channels();
    let names: Vec<&str> = channels.iter().map(|c| c.channel.as_str()).collect();
    let values: Vec<i64> = channels.iter().map(|c| c.value).collect();

    assert_eq!(
        names,
        vec![
            "Users Online",
            "Users Offline",
            "Conferences Total",
            "Conferences Running",
            "Conferences Stopped",
            "Conference Participants Total",
            "Conference Participants Users",
            "Conference Participants Guests",
            "User Login Errors (5m)",
            "Admin Login Errors (5m)",
            "User Login Errors (1m)",
            "Admin Login Errors (1m)",
        ]
    );
    assert_eq!(values, vec![1, 1, 1, 1, 0, 2, 1, 1, 0, 0, 0, 0]);

    // Every channel is an integer with limit checking on.
    let value = serde_json::to_value(report::success_document(channels)).unwrap();
    for entry in value["prtg"]["result"].as_array().unwrap() {
        assert_eq!(entry["float"], 0);
        assert_eq!(entry["limitmode"], 1);
    }
}

/// Users spread over three cursor pages; the page cursor is threaded
/// through and all pages are accumulated.
#[tokio::test]
async fn cursor_pagination_follows_next_page_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/users"))
        .and(query_param("access_token", TOKEN))
        .and(query_param_is_missing("page_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [{"status": 1}, {"status": 2}],
            "next_page_id": 2
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v4/users"))
        .and(query_param("page_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [{"status": 0}, {"status": 5}, {"status": 99}],
            "next_page_id": -1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v4/conferences"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "conferences": [],
            "cnt": 0
        })))
        .mount(&mock_server)
        .await;

    mount_empty_event_log(&mock_server).await;

    let mut orchestrator = Orchestrator::new(test_config(&mock_server.uri())).unwrap();
    orchestrator.collect().await.unwrap();

    let channels = orchestrator.channels();
    // 1, 2 and 5 are online; 0 is offline; 99 is dropped from both buckets.
    assert_eq!(channels[0].value, 3, "online");
    assert_eq!(channels[1].value, 1, "offline");
}

/// A server that hands out the same users page forever must stall the
/// paginator, not hang the poll.
#[tokio::test]
async fn repeating_page_stalls_pagination() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [{"status": 1}],
            "next_page_id": 2
        })))
        .mount(&mock_server)
        .await;

    let mut orchestrator = Orchestrator::new(test_config(&mock_server.uri())).unwrap();
    let err = orchestrator.collect().await.unwrap_err();

    assert!(matches!(err, SensorError::PaginationStalled { .. }), "got {err:?}");
}

/// Transport failure on the very first call aborts the run; the error
/// document carries no result array.
#[tokio::test]
async fn transport_failure_yields_error_document() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    // Shutting the server down turns every request into a refused connection.
    drop(mock_server);

    let mut orchestrator = Orchestrator::new(test_config(&base)).unwrap();
    let err = orchestrator.collect().await.unwrap_err();
    assert!(matches!(err, SensorError::Transport(_)), "got {err:?}");

    let value = serde_json::to_value(report::error_document(err.to_string())).unwrap();
    assert_eq!(value["prtg"]["error"], 1);
    assert!(value["prtg"]["text"].as_str().unwrap().starts_with("transport error"));
    assert!(value["prtg"].get("result").is_none());
}

/// Non-200 responses become http errors carrying the response body.
#[tokio::test]
async fn http_status_failure_carries_the_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/users"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error": "invalid token"}"#))
        .mount(&mock_server)
        .await;

    let mut orchestrator = Orchestrator::new(test_config(&mock_server.uri())).unwrap();
    let err = orchestrator.collect().await.unwrap_err();

    match err {
        SensorError::HttpStatus { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid token"));
        }
        other => panic!("expected http error, got {other:?}"),
    }
}

/// Malformed JSON on a 200 response is a parse error.
#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let mut orchestrator = Orchestrator::new(test_config(&mock_server.uri())).unwrap();
    let err = orchestrator.collect().await.unwrap_err();

    assert!(matches!(err, SensorError::Parse(_)), "got {err:?}");
}

/// Failed logins in the window are classified per object type.
#[tokio::test]
async fn login_errors_are_counted_per_window() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [],
            "next_page_id": -1
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v4/conferences"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "conferences": [],
            "cnt": 0
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v4/logs/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "list": [
                {"event_type": "login", "object_type": "admin", "payload": {"result": "1"}},
                {"event_type": "login", "object_type": "admin", "payload": {"result": "0"}},
                {"event_type": "login", "object_type": "user", "payload": {"error": "bad password"}},
                {"event_type": "login", "object_type": "user", "payload": {}},
                {"event_type": "logout", "object_type": "user", "payload": {"error": "ignored"}}
            ],
            "cnt": 5
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut orchestrator = Orchestrator::new(test_config(&mock_server.uri())).unwrap();
    orchestrator.collect().await.unwrap();

    let channels = orchestrator.channels();
    let by_name = |name: &str| {
        channels
            .iter()
            .find(|c| c.channel == name)
            .unwrap_or_else(|| panic!("missing channel {name}"))
            .value
    };

    assert_eq!(by_name("User Login Errors (5m)"), 1);
    assert_eq!(by_name("Admin Login Errors (5m)"), 1);
    assert_eq!(by_name("User Login Errors (1m)"), 1);
    assert_eq!(by_name("Admin Login Errors (1m)"), 1);
}
