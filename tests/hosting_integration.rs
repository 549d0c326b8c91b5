//! End-to-end tests for the hosting client running under the retry
//! dispatcher, against a wiremock server.

use std::fs;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tempfile::TempDir;
use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hosting::{retry, Credentials, HostingClient, HostingError, RetryPolicy, UploadRequest};

fn test_credentials() -> Credentials {
    Credentials::resolve(
        Some("alice".to_string()),
        Some("key123".to_string()),
        Some("the-org".to_string()),
    )
    .unwrap()
}

fn quick_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(max_retries, Duration::from_millis(10))
}

fn upload_request(dir: &TempDir) -> UploadRequest {
    let file = dir.path().join("editor-setup.exe");
    fs::write(&file, b"binary payload").unwrap();

    UploadRequest {
        repo: "releases".to_string(),
        package: "editor".to_string(),
        version: "8.0.123".to_string(),
        file,
        remote_path: None,
        publish: true,
        override_existing: true,
        explode: false,
    }
}

#[tokio::test]
async fn upload_retries_until_the_server_accepts() {
    let server = MockServer::start().await;
    let upload_path = "/content/the-org/releases/editor/8.0.123/editor-setup.exe";

    // Two transient failures, then success. Mount order matters: the
    // limited mock is consumed first.
    Mock::given(method("PUT"))
        .and(path(upload_path))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend hiccup"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(upload_path))
        .and(query_param("publish", "1"))
        .and(query_param("override", "1"))
        .and(query_param("explode", "0"))
        .and(basic_auth("alice", "key123"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let request = upload_request(&dir);
    let client = HostingClient::new(&server.uri(), test_credentials()).unwrap();

    retry(quick_policy(3), || client.upload(&request))
        .await
        .unwrap();
}

#[tokio::test]
async fn upload_exhausts_the_retry_budget() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500).set_body_string("still broken"))
        .expect(2)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let request = upload_request(&dir);
    let client = HostingClient::new(&server.uri(), test_credentials()).unwrap();

    let error = retry(quick_policy(1), || client.upload(&request))
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        HostingError::RetryExhausted { max_retries: 1 }
    ));
}

#[tokio::test]
async fn publish_sends_the_expected_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/content/the-org/releases/editor/8.0.123/publish"))
        .and(body_json(serde_json::json!({
            "discard": false,
            "publish_wait_for_secs": -1,
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = HostingClient::new(&server.uri(), test_credentials()).unwrap();

    retry(quick_policy(0), || {
        client.publish("releases", "editor", "8.0.123", false)
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn unexpected_publish_status_is_recoverable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let client = HostingClient::new(&server.uri(), test_credentials()).unwrap();
    let error = client
        .publish("releases", "editor", "8.0.123", false)
        .await
        .unwrap_err();

    assert!(error.is_recoverable());
    assert!(error.user_message().contains("409"));
}

#[tokio::test]
async fn download_list_and_version_operations_hit_their_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/file_metadata/the-org/releases/editor-setup.exe"))
        .and(body_json(serde_json::json!({ "list_in_downloads": true })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/packages/the-org/releases/editor/versions/8.0.123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = HostingClient::new(&server.uri(), test_credentials()).unwrap();

    client
        .set_download_list("releases", "editor-setup.exe", true)
        .await
        .unwrap();
    client
        .delete_version("releases", "editor", "8.0.123")
        .await
        .unwrap();
}

#[tokio::test]
async fn transport_failures_are_fatal_and_never_retried() {
    // Nothing listens on this port; the connection is refused before any
    // HTTP status exists to classify as recoverable.
    let client = HostingClient::new("http://127.0.0.1:9/", test_credentials()).unwrap();
    let attempts = AtomicU32::new(0);

    let error = retry(quick_policy(3), || {
        attempts.fetch_add(1, Ordering::SeqCst);
        client.delete_version("releases", "editor", "8.0.123")
    })
    .await
    .unwrap_err();

    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert!(matches!(error, HostingError::Http(_)));
}
