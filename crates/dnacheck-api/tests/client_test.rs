#![allow(clippy::unwrap_used)]
// Integration tests for `DnacClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dnacheck_api::{CommandRunnerRequest, DnacClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DnacClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = DnacClient::with_client(reqwest::Client::new(), base_url)
        .with_token(SecretString::from("tok-123".to_string()));
    (server, client)
}

fn envelope(response: serde_json::Value) -> serde_json::Value {
    json!({ "response": response, "version": "1.0" })
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_stores_token() {
    let server = MockServer::start().await;
    let mut client =
        DnacClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());

    Mock::given(method("POST"))
        .and(path("/api/system/v1/auth/token"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Token": "abc" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/network-device/"))
        .and(header("X-auth-token", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    assert!(!client.is_authenticated());
    let secret = SecretString::from("pw".to_string());
    client.login("admin", &secret).await.unwrap();
    assert!(client.is_authenticated());

    let devices = client.get_network_devices().await.unwrap();
    assert!(devices.is_empty());
}

#[tokio::test]
async fn test_login_failure() {
    let server = MockServer::start().await;
    let mut client =
        DnacClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());

    Mock::given(method("POST"))
        .and(path("/api/system/v1/auth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let secret = SecretString::from("wrong".to_string());
    let result = client.login("admin", &secret).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_calls_without_token_are_refused() {
    let server = MockServer::start().await;
    let client =
        DnacClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());

    let result = client.get_images().await;
    assert!(matches!(result, Err(Error::NotAuthenticated)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Status policy ───────────────────────────────────────────────────

#[tokio::test]
async fn test_get_accepts_no_content() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/image/importation"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let resp = client.get("/api/v1/image/importation").await.unwrap();
    assert_eq!(resp.status().as_u16(), 204);
}

#[tokio::test]
async fn test_get_rejects_other_success_codes() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/image/importation"))
        .respond_with(ResponseTemplate::new(202).set_body_json(envelope(json!([]))))
        .mount(&server)
        .await;

    let result = client.get_images().await;
    match result {
        Err(Error::Status { status, ref path, .. }) => {
            assert_eq!(status, 202);
            assert_eq!(path, "/api/v1/image/importation");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_server_error_is_fatal() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.get_task("T1").await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 500, .. }), "got: {err:?}");
    assert!(err.to_string().contains("boom"));
}

#[tokio::test]
async fn test_expired_token_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.get_network_devices().await.unwrap_err();
    assert!(err.is_auth(), "expected auth error, got: {err:?}");
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/network-device/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let result = client.get_network_devices().await;
    match result {
        Err(Error::Deserialization { ref body, .. }) => assert_eq!(body, "<html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Endpoint tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_fabric_devices_by_site_uses_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/data/customer-facing-service/DeviceInfo"))
        .and(query_param("siteDeviceList", "S1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "networkDeviceId": "d1", "roles": ["EDGENODE", "BORDERNODE"] },
            { "networkDeviceId": "d2" }
        ]))))
        .mount(&server)
        .await;

    let devices = client.get_fabric_devices_by_site("S1").await.unwrap();
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].network_device_id, "d1");
    assert_eq!(
        devices[0].roles.as_deref(),
        Some(&["EDGENODE".to_string(), "BORDERNODE".to_string()][..])
    );
    assert!(devices[1].roles.is_none());
}

#[tokio::test]
async fn test_submit_command_runner_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/network-device-poller/cli/read-request"))
        .and(header("X-auth-token", "tok-123"))
        .and(body_json(json!({
            "name": "command-runner",
            "description": "command-runner-network-poller",
            "deviceUuids": ["d1", "d2"],
            "commands": ["show vrf", "show vlan"]
        })))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_json(envelope(json!({ "taskId": "T1", "url": "/api/v1/task/T1" }))),
        )
        .mount(&server)
        .await;

    let request = CommandRunnerRequest::new(
        vec!["d1".into(), "d2".into()],
        vec!["show vrf".into(), "show vlan".into()],
    );
    let handle = client.submit_command_runner(&request).await.unwrap();
    assert_eq!(handle.task_id, "T1");
}

#[tokio::test]
async fn test_get_task_reads_progress_and_status_url() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/task/T9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "taskId": "T9",
            "progress": "{\"fileId\":\"F1\"}",
            "isError": false,
            "endTime": 1_563_000_000_000_i64,
            "additionalStatusURL": "/api/v1/file/onetime/download/abc"
        }))))
        .mount(&server)
        .await;

    let task = client.get_task("T9").await.unwrap();
    assert_eq!(task.task_id.as_deref(), Some("T9"));
    assert_eq!(task.progress, Some(json!("{\"fileId\":\"F1\"}")));
    assert!(!task.is_error);
    assert_eq!(
        task.additional_status_url.as_deref(),
        Some("/api/v1/file/onetime/download/abc")
    );
}

#[tokio::test]
async fn test_get_file_is_not_enveloped() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/file/F1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "lines": ["vrf Mgmt"] })))
        .mount(&server)
        .await;

    let file = client.get_file("F1").await.unwrap();
    assert_eq!(file, json!({ "lines": ["vrf Mgmt"] }));
}

#[tokio::test]
async fn test_download_uses_file_name_header() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/file/onetime/download/abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("fileName", "upgrade-report.csv")
                .set_body_bytes(b"a,b,c\n".to_vec()),
        )
        .mount(&server)
        .await;

    let download = client
        .download("/api/v1/file/onetime/download/abc")
        .await
        .unwrap();
    assert_eq!(download.file_name, "upgrade-report.csv");
    assert_eq!(&download.bytes[..], b"a,b,c\n");
}

#[tokio::test]
async fn test_download_without_file_name_header() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"x".to_vec()))
        .mount(&server)
        .await;

    let result = client.download("/api/v1/file/onetime/download/abc").await;
    assert!(matches!(result, Err(Error::MissingHeader("fileName"))));
}

#[tokio::test]
async fn test_client_health_window() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/assurance/v1/host/dash/healthdetail"))
        .and(body_json(json!({
            "typeList": {
                "type": "SITE",
                "startTime": 1_000_000 - 300_000,
                "endTime": 1_000_000,
                "timeAPITime": 1_000_000
            },
            "option": "CLIENT",
            "selectedTypeIdList": ["__global__"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "scoreDetail": [
                { "scoreCategory": { "value": "WIRED" }, "clientUniqueCount": 12 },
                { "scoreCategory": { "value": "WIRELESS" }, "clientUniqueCount": 30 }
            ]
        }]))))
        .mount(&server)
        .await;

    let sites = client.get_client_health(1_000_000).await.unwrap();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].score_detail[1].client_unique_count, Some(30));
}
