//! Gateway and resolver tests against a mock Cloudflare API

use std::time::Duration;

use cfddns::{CloudflareClient, DnsProvider, DnsRecord, Error};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EMAIL: &str = "admin@example.com";
const KEY: &str = "c2547eb745079dac9320b638f5e225cf483cc5cfdda41";

fn client(server: &MockServer) -> CloudflareClient {
    CloudflareClient::new(
        &format!("{}/client/v4", server.uri()),
        EMAIL,
        KEY,
        Duration::from_secs(5),
    )
    .unwrap()
}

fn zones_body() -> serde_json::Value {
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": [
            {"id": "z-other", "name": "example.org", "status": "active"},
            {"id": "z-main", "name": "example.com", "status": "active"},
            {"id": "z-dup", "name": "example.com", "status": "pending"}
        ]
    })
}

fn records_body() -> serde_json::Value {
    json!({
        "success": true,
        "errors": [],
        "result": [
            {
                "id": "r-www",
                "type": "CNAME",
                "name": "www.example.com",
                "content": "example.com",
                "proxied": true,
                "ttl": 1
            },
            {
                "id": "r-home",
                "type": "A",
                "name": "home.example.com",
                "content": "203.0.113.9",
                "proxiable": true,
                "proxied": false,
                "ttl": 120,
                "locked": false,
                "zone_id": "z-main",
                "zone_name": "example.com",
                "created_on": "2024-01-01T00:00:00Z",
                "modified_on": "2024-02-01T00:00:00Z"
            }
        ]
    })
}

#[tokio::test]
async fn resolve_zone_sends_auth_headers_and_matches_exactly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/client/v4/zones"))
        .and(header("X-Auth-Email", EMAIL))
        .and(header("X-Auth-Key", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(zones_body()))
        .expect(1)
        .mount(&server)
        .await;

    let zone = client(&server).resolve_zone("example.com").await.unwrap();
    assert_eq!(zone.id, "z-main");
    assert_eq!(zone.status, "active");
}

#[tokio::test]
async fn resolve_zone_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/client/v4/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(zones_body()))
        .mount(&server)
        .await;

    let err = client(&server).resolve_zone("EXAMPLE.COM").await.unwrap_err();
    match err {
        Error::ZoneNotFound { name } => assert_eq!(name, "EXAMPLE.COM"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn resolve_record_scoped_to_zone() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/client/v4/zones/z-main/dns_records"))
        .and(header("X-Auth-Email", EMAIL))
        .and(header("X-Auth-Key", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(records_body()))
        .expect(1)
        .mount(&server)
        .await;

    let record = client(&server)
        .resolve_record("home.example.com", "z-main")
        .await
        .unwrap();
    assert_eq!(record.id, "r-home");
    assert_eq!(record.record_type, "A");
    assert_eq!(record.content, "203.0.113.9");
    assert_eq!(record.ttl, Some(120));
}

#[tokio::test]
async fn resolve_record_not_found_names_record_and_zone() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/client/v4/zones/z-main/dns_records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(records_body()))
        .mount(&server)
        .await;

    let err = client(&server)
        .resolve_record("nas.example.com", "z-main")
        .await
        .unwrap_err();
    let msg = err.to_string();
    assert!(err.is_not_found());
    assert!(msg.contains("nas.example.com"));
    assert!(msg.contains("z-main"));
}

#[tokio::test]
async fn update_record_puts_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/client/v4/zones/z-main/dns_records/r-home"))
        .and(header("X-Auth-Email", EMAIL))
        .and(header("X-Auth-Key", KEY))
        .and(header("Content-Type", "application/json"))
        .and(body_partial_json(json!({
            "id": "r-home",
            "type": "A",
            "name": "home.example.com",
            "content": "203.0.113.10",
            "proxiable": true,
            "ttl": 120
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut record = DnsRecord::new("r-home", "A", "home.example.com", "203.0.113.10");
    record.proxiable = Some(true);
    record.proxied = Some(false);
    record.ttl = Some(120);

    let result = client(&server).update_record("z-main", &record).await.unwrap();
    assert!(result.success);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let obj = body.as_object().unwrap();
    assert!(!obj.contains_key("proxied"));
    assert!(!obj.contains_key("locked"));
    assert!(!obj.contains_key("zone_id"));
}

#[tokio::test]
async fn update_record_prefers_record_zone_id() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/client/v4/zones/z-record/dns_records/r-home"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut record = DnsRecord::new("r-home", "A", "home.example.com", "203.0.113.10");
    record.zone_id = Some("z-record".to_string());

    let result = client(&server).update_record("z-main", &record).await.unwrap();
    assert!(result.success);
}

#[tokio::test]
async fn non_success_status_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/client/v4/zones"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "errors": [{"code": 9103, "message": "Unknown X-Auth-Key or X-Auth-Email"}],
            "messages": [],
            "result": null
        })))
        .mount(&server)
        .await;

    let err = client(&server).resolve_zone("example.com").await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "[9103] Unknown X-Auth-Key or X-Auth-Email");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_json_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/client/v4/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"result\": [{\"id\": "))
        .mount(&server)
        .await;

    let err = client(&server).resolve_zone("example.com").await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn transport_failure_is_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let cf = CloudflareClient::new(
        &format!("http://127.0.0.1:{port}/client/v4"),
        EMAIL,
        KEY,
        Duration::from_secs(5),
    )
    .unwrap();

    let err = cf.resolve_zone("example.com").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got {err:?}");
}
