//! Transfer client tests against a mock transfer.sh server

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use edwh_files_http::{
    DownloadOptions, HttpConfig, HttpError, StatusCode, TransferClient, UploadOptions,
};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client(server: &MockServer) -> TransferClient {
    TransferClient::new(HttpConfig::default().with_retry_count(0), server.uri()).unwrap()
}

#[tokio::test]
async fn test_upload_returns_url_and_delete_link() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("Max-Downloads", "2"))
        .and(header("Max-Days", "5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("https://files.edwh.nl/abc/notes.txt\n")
                .insert_header("x-url-delete", "https://files.edwh.nl/abc/notes.txt/del"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, b"hello transfer").unwrap();

    let options = UploadOptions {
        max_downloads: Some(2),
        max_days: Some(5),
        encrypt: None,
    };
    let receipt = client(&server).upload(&file, &options, None).await.unwrap();

    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.url, "https://files.edwh.nl/abc/notes.txt");
    assert_eq!(
        receipt.delete.as_deref(),
        Some("https://files.edwh.nl/abc/notes.txt/del")
    );
}

#[tokio::test]
async fn test_upload_sends_file_as_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(|request: &Request| {
            let body = String::from_utf8_lossy(&request.body).to_string();
            let content_type = request
                .headers
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            if content_type.starts_with("multipart/form-data")
                && body.contains("filename=\"data.csv\"")
                && body.contains("a,b,c")
            {
                ResponseTemplate::new(200).set_body_string("ok-url")
            } else {
                ResponseTemplate::new(400).set_body_string("bad form")
            }
        })
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("data.csv");
    std::fs::write(&file, b"a,b,c\n1,2,3\n").unwrap();

    let seen = Arc::new(AtomicU64::new(0));
    let progress_seen = seen.clone();
    let receipt = client(&server)
        .upload(
            &file,
            &UploadOptions::default(),
            Some(Arc::new(move |sent, _total| {
                progress_seen.store(sent, Ordering::SeqCst);
            })),
        )
        .await
        .unwrap();

    assert_eq!(receipt.url, "ok-url");
    assert_eq!(receipt.delete, None);
    assert_eq!(seen.load(Ordering::SeqCst), 12);
}

#[tokio::test]
async fn test_upload_with_encryption_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("X-Encrypt-Password", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("encrypted-url"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("secret.bin");
    std::fs::write(&file, [0u8, 1, 2, 3]).unwrap();

    let options = UploadOptions {
        encrypt: Some("secret".to_string()),
        ..Default::default()
    };
    let receipt = client(&server).upload(&file, &options, None).await.unwrap();
    assert_eq!(receipt.url, "encrypted-url");
}

#[tokio::test]
async fn test_upload_missing_file() {
    let server = MockServer::start().await;
    let result = client(&server)
        .upload(
            std::path::Path::new("/definitely/not/here.txt"),
            &UploadOptions::default(),
            None,
        )
        .await;
    assert!(matches!(result, Err(HttpError::Io(_))));
}

#[tokio::test]
async fn test_download_writes_file_and_reports_progress() {
    let server = MockServer::start().await;
    let payload = vec![7u8; 64 * 1024];
    Mock::given(method("GET"))
        .and(path("/abc/blob.bin"))
        .and(header("X-Decrypt-Password", "pw"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("nested").join("blob.bin");
    let last = Arc::new(AtomicU64::new(0));
    let total = Arc::new(AtomicU64::new(0));
    let (last_cb, total_cb) = (last.clone(), total.clone());

    let receipt = client(&server)
        .download(
            &format!("{}/abc/blob.bin", server.uri()),
            &target,
            &DownloadOptions {
                decrypt: Some("pw".to_string()),
            },
            Some(Arc::new(move |done, size| {
                last_cb.store(done, Ordering::SeqCst);
                total_cb.store(size.unwrap_or(0), Ordering::SeqCst);
            })),
        )
        .await
        .unwrap();

    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.bytes, payload.len() as u64);
    assert_eq!(std::fs::read(&target).unwrap(), payload);
    assert_eq!(last.load(Ordering::SeqCst), payload.len() as u64);
    assert_eq!(total.load(Ordering::SeqCst), payload.len() as u64);
}

#[tokio::test]
async fn test_download_error_does_not_create_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found\n"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("missing.txt");

    let result = client(&server)
        .download(
            &format!("{}/nope/missing.txt", server.uri()),
            &target,
            &DownloadOptions::default(),
            None,
        )
        .await;

    match result {
        Err(HttpError::HttpStatus { status, message }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected HttpStatus error, got {other:?}"),
    }
    assert!(!target.exists());
}

#[tokio::test]
async fn test_download_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("eventually"))
        .mount(&server)
        .await;

    let config = HttpConfig {
        retry_count: 2,
        retry_delay: std::time::Duration::from_millis(10),
        ..HttpConfig::default()
    };
    let client = TransferClient::new(config, server.uri()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("flaky.txt");
    client
        .download(
            &format!("{}/x/flaky.txt", server.uri()),
            &target,
            &DownloadOptions::default(),
            None,
        )
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&target).unwrap(), "eventually");
}

#[tokio::test]
async fn test_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/abc/notes.txt/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Deleted\n"))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = client(&server)
        .delete(&format!("{}/abc/notes.txt/token", server.uri()))
        .await
        .unwrap();

    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.response, "Deleted");
}

#[tokio::test]
async fn test_delete_without_headers() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Could not find file"))
        .mount(&server)
        .await;

    let result = client(&server)
        .delete(&format!("{}/abc/gone.txt/token", server.uri()))
        .await;
    assert!(matches!(
        result,
        Err(HttpError::HttpStatus { status: StatusCode::NOT_FOUND, .. })
    ));
}

#[test]
fn test_receipt_serializes_as_json() {
    let receipt = edwh_files_http::UploadReceipt {
        status: 200,
        url: "https://files.edwh.nl/a/b".to_string(),
        delete: None,
    };
    let json = serde_json::to_value(&receipt).unwrap();
    assert_eq!(json["status"], 200);
    assert_eq!(json["url"], "https://files.edwh.nl/a/b");
    assert!(json["delete"].is_null());
}
