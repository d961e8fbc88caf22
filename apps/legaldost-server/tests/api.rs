//! HTTP API tests against an in-memory store and a scripted model

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use legal_ai::{AiError, MockModel};
use legaldost_server::{router, AppState, DocumentStore, ServerConfig};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;

const RENT_TEXT: &str = "Rent is Rs. 25,000 per month.";
const TERMINATION_TEXT: &str =
    "The landlord may exercise unilateral termination of this agreement at any time.";

async fn server_with(model: MockModel) -> (TestServer, TempDir) {
    let (server, _store, dir) = server_with_limit(model, ServerConfig::default().max_upload_bytes).await;
    (server, dir)
}

async fn server_with_limit(
    model: MockModel,
    max_upload_bytes: usize,
) -> (TestServer, DocumentStore, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::in_memory().await.unwrap();
    let config = ServerConfig {
        upload_dir: dir.path().to_path_buf(),
        max_upload_bytes,
        ..Default::default()
    };
    let state = AppState::from_parts(store.clone(), Arc::new(model), config);
    (TestServer::new(router(state)).unwrap(), store, dir)
}

fn stored_files(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}

fn owner_header() -> HeaderName {
    HeaderName::from_static("x-user-id")
}

fn owner(id: &'static str) -> HeaderValue {
    HeaderValue::from_static(id)
}

async fn upload(
    server: &TestServer,
    user: &'static str,
    file_name: &str,
    mime_type: &str,
    bytes: &[u8],
) -> TestResponse {
    let form = MultipartForm::new().add_text("title", "Rental Agreement").add_part(
        "document",
        Part::bytes(bytes.to_vec())
            .file_name(file_name)
            .mime_type(mime_type),
    );

    server
        .post("/api/documents/upload")
        .add_header(owner_header(), owner(user))
        .multipart(form)
        .await
}

async fn upload_text(server: &TestServer, text: &str) -> String {
    let response = upload(server, "user-1", "lease.txt", "text/plain", text.as_bytes()).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["documentId"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn get_document(server: &TestServer, id: &str) -> Value {
    server
        .get(&format!("/api/documents/{id}"))
        .add_header(owner_header(), owner("user-1"))
        .await
        .json::<Value>()
}

#[tokio::test]
async fn health_reports_service() {
    let (server, _dir) = server_with(MockModel::replying("")).await;
    let body = server.get("/health").await.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "legaldost-server");
}

#[tokio::test]
async fn plain_text_upload_is_stored_verbatim() {
    let (server, _dir) = server_with(MockModel::replying("")).await;

    let response = upload(&server, "user-1", "lease.txt", "text/plain", RENT_TEXT.as_bytes()).await;
    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Document uploaded successfully");
    assert_eq!(body["document"]["title"], "Rental Agreement");
    assert_eq!(body["document"]["fileType"], "text");
    assert_eq!(body["document"]["fileName"], "lease.txt");
    assert_eq!(body["document"]["status"], "processing");

    let id = body["documentId"].as_str().unwrap();
    let document = get_document(&server, id).await;
    assert_eq!(document["originalText"], RENT_TEXT);
    assert_eq!(document["chatHistory"], json!([]));
}

#[tokio::test]
async fn listing_omits_text_and_history() {
    let (server, _dir) = server_with(MockModel::replying("")).await;
    let first = upload_text(&server, RENT_TEXT).await;
    let second = upload_text(&server, TERMINATION_TEXT).await;

    let list = server
        .get("/api/documents")
        .add_header(owner_header(), owner("user-1"))
        .await
        .json::<Value>();
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], second.as_str());
    assert_eq!(list[1]["id"], first.as_str());
    assert!(list[0].get("originalText").is_none());
    assert!(list[0].get("chatHistory").is_none());
}

#[tokio::test]
async fn requests_without_identity_are_rejected() {
    let (server, _dir) = server_with(MockModel::replying("")).await;

    let response = server.get("/api/documents").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn other_owners_documents_are_not_found() {
    let (server, _dir) = server_with(MockModel::replying("")).await;
    let id = upload_text(&server, RENT_TEXT).await;

    server
        .get(&format!("/api/documents/{id}"))
        .add_header(owner_header(), owner("user-2"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .post(&format!("/api/analysis/analyze/{id}"))
        .add_header(owner_header(), owner("user-2"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn disallowed_file_type_is_rejected() {
    let (server, _dir) = server_with(MockModel::replying("")).await;
    let response = upload(
        &server,
        "user-1",
        "lease.docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        b"PK",
    )
    .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Only PDF, image, and text files are allowed"
    );
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let (server, _store, dir) = server_with_limit(MockModel::replying(""), 1024).await;

    let response = upload(&server, "user-1", "lease.txt", "text/plain", &[b'a'; 1025]).await;
    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "FILE_TOO_LARGE");
    assert_eq!(body["error"], "File too large. Maximum size is 1 KB");
    assert_eq!(body["retryable"], false);
    assert_eq!(stored_files(&dir), 0);
}

#[tokio::test]
async fn upload_at_size_limit_is_accepted() {
    let (server, _store, dir) = server_with_limit(MockModel::replying(""), 1024).await;

    upload(&server, "user-1", "lease.txt", "text/plain", &[b'a'; 1024])
        .await
        .assert_status(StatusCode::CREATED);
    assert_eq!(stored_files(&dir), 1);
}

#[tokio::test]
async fn failed_insert_removes_stored_file() {
    let (server, store, dir) =
        server_with_limit(MockModel::replying(""), ServerConfig::default().max_upload_bytes).await;
    store.close().await;

    let response = upload(&server, "user-1", "lease.txt", "text/plain", RENT_TEXT.as_bytes()).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["code"], "STORAGE_ERROR");
    assert_eq!(stored_files(&dir), 0);
}

#[tokio::test]
async fn image_upload_is_transcribed_by_the_model() {
    let (server, _dir) = server_with(MockModel::replying("Security deposit: Rs. 50,000\n")).await;

    let response = upload(
        &server,
        "user-1",
        "scan.png",
        "image/png",
        &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a],
    )
    .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["document"]["fileType"], "image");

    let id = response.json::<Value>()["documentId"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(
        get_document(&server, &id).await["originalText"],
        "Security deposit: Rs. 50,000"
    );
}

#[tokio::test]
async fn unreadable_pdf_is_stored_as_failed() {
    let (server, _dir) = server_with(MockModel::replying("")).await;

    let response = upload(
        &server,
        "user-1",
        "lease.pdf",
        "application/pdf",
        b"definitely not a pdf",
    )
    .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["code"], "EXTRACTION_FAILED");

    let list = server
        .get("/api/documents")
        .add_header(owner_header(), owner("user-1"))
        .await
        .json::<Value>();
    assert_eq!(list[0]["status"], "failed");
}

#[tokio::test]
async fn analysis_with_malformed_model_output_keeps_rule_violation() {
    let (server, _dir) = server_with(MockModel::replying("I think this is a high risk lease.")).await;
    let id = upload_text(&server, TERMINATION_TEXT).await;

    let response = server
        .post(&format!("/api/analysis/analyze/{id}"))
        .add_header(owner_header(), owner("user-1"))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Analysis completed successfully");
    assert_eq!(body["analysis"]["riskLevel"], "high");

    let violations = body["analysis"]["violations"].as_array().unwrap();
    assert!(violations.iter().any(|v| {
        v["clause"] == "unilateral termination"
            && v["governmentClause"] == "Consumer Protection Act, 2019 - Section 2(47)"
    }));

    let document = get_document(&server, &id).await;
    assert_eq!(document["status"], "completed");
    assert_eq!(document["analysis"], body["analysis"]);
}

#[tokio::test]
async fn rate_limited_model_fails_analysis_as_retryable() {
    let (server, _dir) = server_with(MockModel::failing(AiError::RateLimited)).await;
    let id = upload_text(&server, TERMINATION_TEXT).await;

    let response = server
        .post(&format!("/api/analysis/analyze/{id}"))
        .add_header(owner_header(), owner("user-1"))
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "AI_RATE_LIMITED");
    assert_eq!(body["retryable"], true);

    assert_eq!(get_document(&server, &id).await["status"], "failed");
}

#[tokio::test]
async fn chat_turns_are_recorded() {
    let (server, _dir) = server_with(MockModel::replying("**Direct Answer**\n• Rs. 25,000")).await;
    let id = upload_text(&server, RENT_TEXT).await;

    let response = server
        .post(&format!("/api/analysis/chat/{id}"))
        .add_header(owner_header(), owner("user-1"))
        .json(&json!({ "question": "What is the rent?" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["answer"], "**Direct Answer**\n• Rs. 25,000");

    let history = server
        .get(&format!("/api/analysis/chat/{id}"))
        .add_header(owner_header(), owner("user-1"))
        .await
        .json::<Value>();
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["question"], "What is the rent?");
}

#[tokio::test]
async fn failed_chat_leaves_history_empty() {
    let (server, _dir) = server_with(MockModel::failing(AiError::AuthFailed)).await;
    let id = upload_text(&server, RENT_TEXT).await;

    let response = server
        .post(&format!("/api/analysis/chat/{id}"))
        .add_header(owner_header(), owner("user-1"))
        .json(&json!({ "question": "What is the rent?" }))
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["retryable"], false);

    assert_eq!(get_document(&server, &id).await["chatHistory"], json!([]));
}

#[tokio::test]
async fn empty_chat_question_is_rejected() {
    let (server, _dir) = server_with(MockModel::replying("unused")).await;
    let id = upload_text(&server, RENT_TEXT).await;

    server
        .post(&format!("/api/analysis/chat/{id}"))
        .add_header(owner_header(), owner("user-1"))
        .json(&json!({ "question": "  " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn explain_echoes_selected_text() {
    let (server, _dir) = server_with(MockModel::replying("It means the company owes you nothing.")).await;

    let response = server
        .post("/api/analysis/explain")
        .json(&json!({ "text": "no liability", "documentType": "Terms of Service" }))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "explanation": "It means the company owes you nothing.",
            "selectedText": "no liability"
        })
    );

    server
        .post("/api/analysis/explain")
        .json(&json!({ "text": "" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_record_and_file() {
    let (server, _dir) = server_with(MockModel::replying("")).await;
    let id = upload_text(&server, RENT_TEXT).await;

    let stored = PathBuf::from(get_document(&server, &id).await["filePath"].as_str().unwrap());
    assert!(stored.exists());

    server
        .delete(&format!("/api/documents/{id}"))
        .add_header(owner_header(), owner("user-1"))
        .await
        .assert_status_ok();

    assert!(!stored.exists());
    server
        .get(&format!("/api/documents/{id}"))
        .add_header(owner_header(), owner("user-1"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rule_table_is_listed() {
    let (server, _dir) = server_with(MockModel::replying("")).await;
    let body = server.get("/api/analysis/rules").await.json::<Value>();
    assert_eq!(body["count"], 5);
    assert_eq!(body["rules"][1]["id"], "excessive_penalty");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let (server, _dir) = server_with(MockModel::replying("")).await;
    let response = server.get("/api/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "ROUTE_NOT_FOUND");
    assert_eq!(body["availableEndpoints"]["explain"], "POST /api/analysis/explain");
}
