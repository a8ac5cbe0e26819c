mod common;

use std::time::Duration;

use chrono::Utc;
use common::{client, client_with, config, API_KEY, API_SECRET};
use serde_json::{json, Value};
use trading212_api::{ClientConfig, Environment, Error, Method};
use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rate_headers(template: ResponseTemplate, remaining: u64, reset: i64) -> ResponseTemplate {
    template
        .insert_header("x-ratelimit-limit", "60")
        .insert_header("x-ratelimit-period", "60")
        .insert_header("x-ratelimit-remaining", remaining.to_string().as_str())
        .insert_header("x-ratelimit-reset", reset.to_string().as_str())
        .insert_header("x-ratelimit-used", (60 - remaining).to_string().as_str())
}

#[tokio::test]
async fn sends_basic_auth_and_default_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/equity/positions"))
        .and(basic_auth(API_KEY, API_SECRET))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, sleeper) = client(&mock_server);
    let positions = client.get_positions().await.unwrap().collect_all().await;
    assert!(positions.unwrap().is_empty());
    assert!(sleeper.slept().is_empty());
}

#[tokio::test]
async fn content_type_only_with_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/equity/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v0/equity/custom"))
        .and(body_json(json!({"ticker": "AAPL_US_EQ"})))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .mount(&mock_server)
        .await;

    let (client, _) = client(&mock_server);
    client.get_pending_orders().await.unwrap();
    let response = client
        .request::<Value, _>(
            Method::POST,
            "/api/v0/equity/custom",
            None,
            Some(&json!({"ticker": "AAPL_US_EQ"})),
        )
        .await
        .unwrap();
    assert_eq!(response.first().await.unwrap(), json!({"ok": true}));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].headers.get("content-type").is_none());
    assert_eq!(
        requests[1].headers.get("content-type").unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn retries_up_to_ceiling_with_linear_backoff() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/equity/positions"))
        .respond_with(ResponseTemplate::new(429))
        .expect(10)
        .mount(&mock_server)
        .await;

    let (client, sleeper) = client(&mock_server);
    let result = client.get_positions().await;
    assert!(matches!(result.err(), Some(Error::RateLimited)));

    let expected: Vec<Duration> = (1..10).map(Duration::from_secs).collect();
    assert_eq!(sleeper.slept(), expected);
}

#[tokio::test]
async fn custom_retry_ceiling_on_timeout_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/equity/account/summary"))
        .respond_with(ResponseTemplate::new(408))
        .expect(3)
        .mount(&mock_server)
        .await;

    let (client, sleeper) = client_with(config(&mock_server).with_max_retries(3));
    let result = client.get_account_summary().await;
    assert!(matches!(result, Err(Error::Timeout)));
    assert_eq!(
        sleeper.slept(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
}

#[tokio::test]
async fn succeeds_after_transient_rate_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/equity/positions"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v0/equity/positions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, sleeper) = client(&mock_server);
    let response = client.get_positions().await.unwrap();
    assert_eq!(response.request().retries(), 2);
    assert_eq!(
        sleeper.slept(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
}

#[tokio::test]
async fn unauthorized_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/equity/positions"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, sleeper) = client(&mock_server);
    assert!(matches!(
        client.get_positions().await.err(),
        Some(Error::Unauthorized)
    ));
    assert!(sleeper.slept().is_empty());
}

#[tokio::test]
async fn forbidden_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v0/equity/orders/7"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, sleeper) = client(&mock_server);
    assert!(matches!(client.cancel_order(7).await, Err(Error::Forbidden)));
    assert!(sleeper.slept().is_empty());
}

#[tokio::test]
async fn server_error_is_unexpected_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/equity/orders/42"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _) = client(&mock_server);
    assert!(matches!(
        client.get_pending_order(42).await,
        Err(Error::UnexpectedStatus { status: 503 })
    ));
}

#[tokio::test]
async fn records_rate_window_and_throttles_next_call() {
    let mock_server = MockServer::start().await;
    let reset = Utc::now().timestamp() + 30;

    Mock::given(method("GET"))
        .and(path("/api/v0/equity/positions"))
        .respond_with(rate_headers(
            ResponseTemplate::new(200).set_body_string("[]"),
            0,
            reset,
        ))
        .expect(2)
        .mount(&mock_server)
        .await;

    let (client, sleeper) = client(&mock_server);
    client.get_positions().await.unwrap();

    let window = client
        .rate_limiter()
        .window("/api/v0/equity/positions")
        .unwrap();
    assert_eq!(window.limit, 60);
    assert_eq!(window.remaining, 0);
    assert_eq!(window.used, 60);
    assert_eq!(window.reset_at.timestamp(), reset);
    assert!(sleeper.slept().is_empty());

    client.get_positions().await.unwrap();
    let slept = sleeper.slept();
    assert_eq!(slept.len(), 1);
    assert!(slept[0] > Duration::from_secs(25) && slept[0] <= Duration::from_secs(30));
}

#[tokio::test]
async fn windows_are_tracked_per_path() {
    let mock_server = MockServer::start().await;
    let reset = Utc::now().timestamp() + 30;

    Mock::given(method("GET"))
        .and(path("/api/v0/equity/positions"))
        .respond_with(rate_headers(
            ResponseTemplate::new(200).set_body_string("[]"),
            0,
            reset,
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v0/equity/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&mock_server)
        .await;

    let (client, sleeper) = client(&mock_server);
    client.get_positions().await.unwrap();
    client.get_pending_orders().await.unwrap();
    assert!(sleeper.slept().is_empty());
    assert!(client.rate_limiter().window("/api/v0/equity/orders").is_none());
}

#[tokio::test]
async fn malformed_rate_headers_do_not_fail_the_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/equity/positions"))
        .respond_with(
            rate_headers(ResponseTemplate::new(200).set_body_string("[]"), 5, 0)
                .insert_header("x-ratelimit-reset", "soon"),
        )
        .mount(&mock_server)
        .await;

    let (client, _) = client(&mock_server);
    assert!(client.get_positions().await.is_ok());
    assert!(client
        .rate_limiter()
        .window("/api/v0/equity/positions")
        .is_none());
}

#[tokio::test]
async fn transport_failure_is_reported() {
    // Bind then release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = ClientConfig::new(Environment::Demo, API_KEY, API_SECRET)
        .with_base_url(&format!("http://127.0.0.1:{}", port));
    let (client, sleeper) = client_with(config);
    assert!(matches!(
        client.get_account_summary().await,
        Err(Error::Transport(_))
    ));
    assert!(sleeper.slept().is_empty());
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/proxy/api/v0/equity/positions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base_url = format!("{}/proxy", mock_server.uri());
    let (client, _) = client_with(config(&mock_server).with_base_url(&base_url));
    let response = client.get_positions().await.unwrap();
    assert_eq!(
        response.request().rate_limit_path(),
        "/proxy/api/v0/equity/positions"
    );
}

#[tokio::test]
async fn invalid_config_is_rejected() {
    let mock_server = MockServer::start().await;
    let result = trading212_api::Client::new(config(&mock_server).with_base_url("not a url"));
    assert!(matches!(result.err(), Some(Error::InvalidConfig(_))));

    let result = trading212_api::Client::demo("", "secret");
    assert!(matches!(result.err(), Some(Error::InvalidConfig(_))));
}
