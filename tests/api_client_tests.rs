use std::time::Duration;

use serde_json::{json, Value};
use subfetch::api::DnsApiClient;
use subfetch::constants::defaults::DEFAULT_USER_AGENT;
use subfetch::models::Zone;
use subfetch::Error;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> DnsApiClient {
    DnsApiClient::new(
        &server.uri(),
        "test-token",
        Duration::from_secs(5),
        DEFAULT_USER_AGENT,
    )
    .unwrap()
}

fn zone_page(start: usize, count: usize, page: u32, total_pages: u32) -> Value {
    let result: Vec<Value> = (start..start + count)
        .map(|i| json!({"id": format!("z{}", i), "name": format!("zone{}.com", i)}))
        .collect();
    json!({
        "success": true,
        "errors": [],
        "result": result,
        "result_info": {"page": page, "per_page": 50, "total_pages": total_pages}
    })
}

async fn mount_page(server: &MockServer, page: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("page", page))
        .and(query_param("per_page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_pagination_concatenates_every_page_once() {
    let server = MockServer::start().await;
    mount_page(&server, "1", zone_page(0, 50, 1, 3)).await;
    mount_page(&server, "2", zone_page(50, 50, 2, 3)).await;
    mount_page(&server, "3", zone_page(100, 10, 3, 3)).await;

    let zones = client(&server).list_zones().await.unwrap();
    assert_eq!(zones.len(), 110);
    assert_eq!(zones[0].name, "zone0.com");
    assert_eq!(zones[109].name, "zone109.com");
}

#[tokio::test]
async fn test_missing_result_info_is_single_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": [{"id": "1", "name": "example.com"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let zones = client(&server).list_zones().await.unwrap();
    assert_eq!(
        zones,
        vec![Zone {
            id: "1".to_string(),
            name: "example.com".to_string()
        }]
    );
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/zones/abc/dns_records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "errors": [{"code": 1003, "message": "Invalid zone identifier"}],
            "result": null
        })))
        .mount(&server)
        .await;

    match client(&server).list_dns_records("abc").await {
        Err(Error::Api { message }) => assert_eq!(message, "Invalid zone identifier"),
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failure_mid_pagination_discards_earlier_pages() {
    let server = MockServer::start().await;
    mount_page(&server, "1", zone_page(0, 50, 1, 2)).await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&server)
        .await;

    match client(&server).list_zones().await {
        Err(Error::Http { status }) => assert_eq!(status, 502),
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_forbidden_is_fatal_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "errors": [{"code": 9109, "message": "Unauthorized to access requested resource"}]
        })))
        .mount(&server)
        .await;

    let err = client(&server).list_zones().await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_record_pages_use_record_page_size() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/zones/z1/dns_records"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": [
                {"name": "www.example.com", "type": "A", "content": "1.2.3.4"},
                {"name": "example.com", "type": "MX", "content": "mx.example.com"}
            ],
            "result_info": {"page": 1, "per_page": 100, "total_pages": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let records = client(&server).list_dns_records("z1").await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].record_type.as_deref(), Some("A"));
}
