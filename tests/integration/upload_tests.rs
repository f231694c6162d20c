use std::sync::Arc;

use imgpost_client::{
    FileInputControl, HttpUploadClient, LogEntry, MemoryLog, SubmitControl, TransportConfig,
    UploadHandler, UploadOutcome,
};
use imgpost_core::{FileSelection, SelectedFile};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

fn file_a() -> SelectedFile {
    SelectedFile::new("fileA.png", PNG_BYTES.to_vec())
}

fn make_handler(
    base_url: &str,
    selection: FileSelection,
) -> (UploadHandler, Arc<FileInputControl>, Arc<MemoryLog>) {
    let client = HttpUploadClient::new(&TransportConfig::new(base_url)).unwrap();
    let input = Arc::new(FileInputControl::new());
    input.select(selection);
    let log = Arc::new(MemoryLog::new());
    let handler = UploadHandler::new(input.clone(), Arc::new(client), log.clone());
    (handler, input, log)
}

async fn mount_json(server: &MockServer, status: u16, body: serde_json::Value, times: u64) {
    Mock::given(method("POST"))
        .and(path("/api/image_upload"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

fn body_text(req: &Request) -> String {
    String::from_utf8_lossy(&req.body).into_owned()
}

fn content_type(req: &Request) -> String {
    req.headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

// === Successful upload: decoded body reaches the log ===
#[tokio::test]
async fn test_status_ok_is_logged() {
    let server = MockServer::start().await;
    mount_json(&server, 200, json!({"status": "ok"}), 1).await;

    let (handler, _input, log) = make_handler(&server.uri(), FileSelection::from(vec![file_a()]));
    let (control, _stream) = SubmitControl::new();
    let activation = control.activate().unwrap();

    let outcome = handler.handle_activation(&activation).await.unwrap();

    assert_eq!(activation.prevent_count(), 1);
    assert_eq!(outcome, UploadOutcome::Success(json!({"status": "ok"})));
    assert_eq!(log.entries(), vec![LogEntry::Response(json!({"status": "ok"}))]);
}

// === Wire format: one multipart part named `file` carrying the first entry ===
#[tokio::test]
async fn test_multipart_body_has_single_file_part() {
    let server = MockServer::start().await;
    mount_json(&server, 201, json!({"id": 42}), 1).await;

    let other = SelectedFile::new("fileB.gif", b"GIF89a".to_vec());
    let (handler, _input, log) =
        make_handler(&server.uri(), FileSelection::from(vec![file_a(), other]));
    let (control, _stream) = SubmitControl::new();

    handler
        .handle_activation(&control.activate().unwrap())
        .await
        .unwrap();

    assert_eq!(log.entries(), vec![LogEntry::Response(json!({"id": 42}))]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert!(content_type(req).starts_with("multipart/form-data; boundary="));

    let body = body_text(req);
    assert_eq!(body.matches("Content-Disposition").count(), 1);
    assert!(body.contains("name=\"file\"; filename=\"fileA.png\""));
    assert!(body.contains("Content-Type: image/png"));
    assert!(body.contains("not really a png"));
    assert!(!body.contains("fileB.gif"));

    // The file part is sized up front, so the body is not sent chunked.
    let content_length = req
        .headers
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    assert_eq!(content_length, Some(req.body.len()));
}

// === Empty selection: the POST still goes out, with an empty file part ===
#[tokio::test]
async fn test_empty_selection_posts_empty_part() {
    let server = MockServer::start().await;
    mount_json(&server, 400, json!({"error": "Bad Request"}), 1).await;

    let (handler, _input, log) = make_handler(&server.uri(), FileSelection::empty());
    let (control, _stream) = SubmitControl::new();
    let activation = control.activate().unwrap();

    handler.handle_activation(&activation).await.unwrap();

    assert!(activation.default_prevented());
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = body_text(&requests[0]);
    assert!(body.contains("name=\"file\""));
    assert!(!body.contains("filename="));
    // The missing file is sent as an empty text value.
    assert!(body.contains("name=\"file\"\r\n\r\n\r\n--"));
    // An HTTP error status with a JSON body is still a logged response.
    assert_eq!(
        log.entries(),
        vec![LogEntry::Response(json!({"error": "Bad Request"}))]
    );
}

// === Server-side rejection bodies are logged as responses ===
#[tokio::test]
async fn test_unsupported_type_response_is_logged() {
    let server = MockServer::start().await;
    let rejection = json!({
        "error": "Unsupported Media Type",
        "message": "File is not an image of type 'png','jpg','jpeg' or 'gif'."
    });
    mount_json(&server, 415, rejection.clone(), 1).await;

    let selection = FileSelection::from(vec![SelectedFile::new("notes.txt", b"hi".to_vec())]);
    let (handler, _input, log) = make_handler(&server.uri(), selection.clone());

    let outcome = handler.submit_upload(&selection).await.unwrap();

    assert_eq!(outcome, UploadOutcome::Success(rejection.clone()));
    assert_eq!(log.entries(), vec![LogEntry::Response(rejection)]);
}

// === Undecodable body: error is logged and the request is not retried ===
#[tokio::test]
async fn test_non_json_body_logs_error_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/image_upload"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Internal Server Error</h1>"))
        .expect(1)
        .mount(&server)
        .await;

    let (handler, _input, log) = make_handler(&server.uri(), FileSelection::from(vec![file_a()]));
    let (control, _stream) = SubmitControl::new();

    let outcome = handler
        .handle_activation(&control.activate().unwrap())
        .await
        .unwrap();

    assert!(!outcome.is_success());
    let entries = log.entries();
    assert_eq!(entries.len(), 1);
    match &entries[0] {
        LogEntry::Error(reason) => assert!(reason.starts_with("response is not valid JSON")),
        other => panic!("expected error entry, got {other:?}"),
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

// === Network failure: connection refused is logged ===
#[tokio::test]
async fn test_network_failure_is_logged() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (handler, _input, log) =
        make_handler(&format!("http://{addr}"), FileSelection::from(vec![file_a()]));
    let (control, _stream) = SubmitControl::new();

    let outcome = handler
        .handle_activation(&control.activate().unwrap())
        .await
        .unwrap();

    assert!(matches!(outcome, UploadOutcome::Failure(_)));
    let entries = log.entries();
    assert_eq!(entries.len(), 1);
    assert!(matches!(&entries[0], LogEntry::Error(reason) if reason.starts_with("http error")));
}

// === N activations produce N independent requests ===
#[tokio::test]
async fn test_repeated_activations_are_not_coalesced() {
    let server = MockServer::start().await;
    mount_json(&server, 201, json!({"filepath": "static/images/a.png"}), 4).await;

    let (handler, _input, log) = make_handler(&server.uri(), FileSelection::from(vec![file_a()]));
    let (control, stream) = SubmitControl::new();
    let bound = handler.bind(stream);

    let activations: Vec<_> = (0..4).map(|_| control.activate().unwrap()).collect();
    drop(control);

    assert_eq!(bound.await.unwrap(), 4);
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
    assert_eq!(log.len(), 4);
    assert!(activations.iter().all(|a| a.prevent_count() == 1));
}

// === Files picked from disk flow through unchanged ===
#[tokio::test]
async fn test_selection_read_from_disk() {
    let server = MockServer::start().await;
    mount_json(&server, 201, json!({"filepath": "static/images/b.jpg"}), 1).await;

    let tmp = tempfile::tempdir().unwrap();
    let photo = tmp.path().join("holiday.jpg");
    std::fs::write(&photo, b"jpeg payload").unwrap();

    let (handler, input, log) = make_handler(&server.uri(), FileSelection::empty());
    input.select(FileSelection::read_all(&[&photo]).unwrap());
    let (control, _stream) = SubmitControl::new();

    handler
        .handle_activation(&control.activate().unwrap())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = body_text(&requests[0]);
    assert!(body.contains("filename=\"holiday.jpg\""));
    assert!(body.contains("Content-Type: image/jpeg"));
    assert!(body.contains("jpeg payload"));
    assert_eq!(log.len(), 1);
}
