use std::time::Duration;

use subfetch::constants::defaults::DEFAULT_USER_AGENT;
use subfetch::utils::http::{build_client, default_client, download_with_retry, RetryPolicy};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        delay: Duration::ZERO,
    }
}

#[tokio::test]
async fn test_retries_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sub"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sub"))
        .respond_with(ResponseTemplate::new(200).set_body_string("vmess://a"))
        .expect(1)
        .mount(&server)
        .await;

    let client = default_client().unwrap();
    let body = download_with_retry(&client, &format!("{}/sub", server.uri()), &fast_policy(3)).await;
    assert_eq!(body.as_deref(), Some("vmess://a"));
}

#[tokio::test]
async fn test_gives_up_after_max_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sub"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;

    let client = default_client().unwrap();
    let body = download_with_retry(&client, &format!("{}/sub", server.uri()), &fast_policy(3)).await;
    assert!(body.is_none());
}

#[tokio::test]
async fn test_empty_body_is_returned_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = default_client().unwrap();
    let body =
        download_with_retry(&client, &format!("{}/empty", server.uri()), &fast_policy(3)).await;
    assert_eq!(body.as_deref(), Some(""));
}

#[tokio::test]
async fn test_timeout_is_retried_like_other_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(2)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_body_string("vless://b"))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(Duration::from_millis(200), DEFAULT_USER_AGENT).unwrap();
    let body = download_with_retry(&client, &format!("{}/slow", server.uri()), &fast_policy(3)).await;
    assert_eq!(body.as_deref(), Some("vless://b"));
}

#[tokio::test]
async fn test_persistent_timeout_gives_up() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .expect(2)
        .mount(&server)
        .await;

    let client = build_client(Duration::from_millis(200), DEFAULT_USER_AGENT).unwrap();
    let body = download_with_retry(&client, &format!("{}/slow", server.uri()), &fast_policy(2)).await;
    assert!(body.is_none());
}
