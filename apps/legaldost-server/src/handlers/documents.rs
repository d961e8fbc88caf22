//! Document upload and management

use std::path::{Path as FsPath, PathBuf};

use axum::{
    extract::{multipart::Field, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use shared_types::{Document, DocumentStatus, DocumentSummary, FileKind};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::Owner;
use crate::error::ApiError;
use crate::state::AppState;

/// Accepted extensions; MIME types must contain one of these too
const ALLOWED_TYPES: &[&str] = &["jpeg", "jpg", "png", "pdf", "txt"];

const MULTIPART_FILE_FIELD: &str = "document";
const MULTIPART_TITLE_FIELD: &str = "title";

/// A checked upload, ready to store
#[derive(Debug, PartialEq, Eq)]
pub struct UploadType {
    pub extension: String,
    pub mime_type: String,
    pub kind: FileKind,
}

/// Check an upload's name and declared MIME type.
///
/// The extension must be one of [`ALLOWED_TYPES`] and the MIME type must
/// mention one of them or be `text/plain`. Without a declared MIME type the
/// one implied by the extension is used.
pub fn check_upload_type(file_name: &str, content_type: Option<&str>) -> Result<UploadType, ApiError> {
    let rejected = || ApiError::InvalidRequest("Only PDF, image, and text files are allowed".into());

    let extension = FsPath::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .filter(|e| ALLOWED_TYPES.contains(&e.as_str()))
        .ok_or_else(rejected)?;

    let mime_type = content_type
        .map(str::to_lowercase)
        .or_else(|| {
            mime_guess::from_ext(&extension)
                .first()
                .map(|m| m.essence_str().to_string())
        })
        .ok_or_else(rejected)?;

    let mime_allowed =
        mime_type == "text/plain" || ALLOWED_TYPES.iter().any(|t| mime_type.contains(t));
    if !mime_allowed {
        return Err(rejected());
    }

    Ok(UploadType {
        kind: FileKind::from_mime(&mime_type),
        extension,
        mime_type,
    })
}

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

async fn read_file_field(field: Field<'_>, max_bytes: usize) -> Result<UploadedFile, ApiError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::TooLarge(max_bytes)
        } else {
            ApiError::InvalidRequest(format!("Invalid upload: {}", e.body_text()))
        }
    })?;

    if bytes.len() > max_bytes {
        return Err(ApiError::TooLarge(max_bytes));
    }

    Ok(UploadedFile {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    })
}

/// Upload response body
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: &'static str,
    pub document_id: String,
    pub document: UploadedDocument,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocument {
    pub id: String,
    pub title: String,
    #[serde(rename = "fileType")]
    pub file_kind: FileKind,
    pub file_name: String,
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&Document> for UploadedDocument {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.title.clone(),
            file_kind: doc.file_kind,
            file_name: doc.file_name.clone(),
            status: doc.status,
            created_at: doc.created_at,
        }
    }
}

/// Handler: POST /api/documents/upload
///
/// Multipart fields: `document` (the file) and optional `title`. The text is
/// extracted before the record is created; if extraction fails the record
/// is still stored, with status `failed`, and 422 is returned.
pub async fn upload(
    State(state): State<AppState>,
    owner: Owner,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let max_bytes = state.config.max_upload_bytes;
    let mut file = None;
    let mut title = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::TooLarge(max_bytes)
        } else {
            ApiError::InvalidRequest(format!("Invalid upload: {}", e.body_text()))
        }
    })? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(MULTIPART_FILE_FIELD) => file = Some(read_file_field(field, max_bytes).await?),
            Some(MULTIPART_TITLE_FIELD) => {
                title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::InvalidRequest(e.body_text()))?,
                )
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| ApiError::InvalidRequest("No file uploaded".into()))?;
    let upload_type = check_upload_type(&file.file_name, file.content_type.as_deref())?;

    let stored_path = state.config.upload_dir.join(format!(
        "{}-{}.{}",
        MULTIPART_FILE_FIELD,
        Uuid::new_v4(),
        upload_type.extension
    ));
    tokio::fs::write(&stored_path, &file.bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("writing {}: {}", stored_path.display(), e)))?;

    let title = title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| file.file_name.clone());

    info!(
        "Upload from {}: {} ({}, {} bytes)",
        owner.as_str(),
        file.file_name,
        upload_type.mime_type,
        file.bytes.len()
    );

    let extracted = state.extractor.extract(&stored_path, upload_type.kind).await;
    let text = match &extracted {
        Ok(text) => text.clone(),
        Err(_) => String::new(),
    };

    let mut document = Document::new(
        owner.as_str(),
        title,
        file.file_name,
        upload_type.kind,
        text,
    )
    .with_file_path(stored_path.display().to_string());

    if extracted.is_err() {
        document.status = DocumentStatus::Failed;
    }

    if let Err(e) = state.store.insert(&document).await {
        remove_stored_file(&stored_path).await;
        return Err(e.into());
    }

    if let Err(e) = extracted {
        return Err(e.into());
    }

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Document uploaded successfully",
            document_id: document.id.clone(),
            document: UploadedDocument::from(&document),
        }),
    ))
}

async fn remove_stored_file(path: &FsPath) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!("Could not remove stored file {}: {}", path.display(), e);
    }
}

/// Handler: GET /api/documents
pub async fn list(
    State(state): State<AppState>,
    owner: Owner,
) -> Result<Json<Vec<DocumentSummary>>, ApiError> {
    let documents = state.store.list(owner.as_str()).await?;
    Ok(Json(documents.iter().map(Document::summary).collect()))
}

/// Handler: GET /api/documents/:id
pub async fn get(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    state
        .store
        .get(owner.as_str(), &id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Document"))
}

/// Handler: DELETE /api/documents/:id
pub async fn delete(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let document = state
        .store
        .delete(owner.as_str(), &id)
        .await?
        .ok_or(ApiError::NotFound("Document"))?;

    if let Some(path) = document.file_path.map(PathBuf::from) {
        remove_stored_file(&path).await;
    }

    info!("Deleted document {} for {}", id, owner.as_str());
    Ok(Json(json!({ "message": "Document deleted successfully" })))
}
