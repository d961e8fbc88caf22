//! Analysis, chat and explanation endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use compliance_engine::ViolationRule;
use serde::{Deserialize, Serialize};
use shared_types::{Analysis, ChatTurn, Document};
use tracing::info;

use crate::auth::Owner;
use crate::error::ApiError;
use crate::state::AppState;

async fn owned_document(state: &AppState, owner: &Owner, id: &str) -> Result<Document, ApiError> {
    state
        .store
        .get(owner.as_str(), id)
        .await?
        .ok_or(ApiError::NotFound("Document"))
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub message: &'static str,
    pub analysis: Analysis,
}

/// Handler: POST /api/analysis/analyze/:id
pub async fn analyze(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<String>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let mut document = owned_document(&state, &owner, &id).await?;
    info!("Analysis requested for document {}", id);

    let analysis = state.analysis_pipeline().run(&mut document).await?;

    Ok(Json(AnalyzeResponse {
        message: "Analysis completed successfully",
        analysis,
    }))
}

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// Handler: POST /api/analysis/chat/:id
pub async fn chat(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let mut document = owned_document(&state, &owner, &id).await?;
    let answer = state.chat_pipeline().ask(&mut document, &req.question).await?;
    Ok(Json(ChatResponse { answer }))
}

/// Handler: GET /api/analysis/chat/:id
pub async fn chat_history(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<String>,
) -> Result<Json<Vec<ChatTurn>>, ApiError> {
    let document = owned_document(&state, &owner, &id).await?;
    Ok(Json(document.chat_history))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRequest {
    #[serde(default)]
    pub text: String,
    pub context: Option<String>,
    pub document_type: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainResponse {
    pub explanation: String,
    pub selected_text: String,
}

/// Handler: POST /api/analysis/explain
///
/// Works on arbitrary text, so no document or owner is involved.
pub async fn explain(
    State(state): State<AppState>,
    Json(req): Json<ExplainRequest>,
) -> Result<Json<ExplainResponse>, ApiError> {
    if req.text.trim().is_empty() {
        return Err(ApiError::InvalidRequest("Text is required".into()));
    }

    let explanation = state
        .ai
        .explain(&req.text, req.context.as_deref(), req.document_type.as_deref())
        .await?;

    Ok(Json(ExplainResponse {
        explanation,
        selected_text: req.text,
    }))
}

#[derive(Serialize)]
pub struct RulesResponse {
    pub success: bool,
    pub rules: &'static [ViolationRule],
    pub count: usize,
}

/// Handler: GET /api/analysis/rules
pub async fn rules(State(state): State<AppState>) -> Json<RulesResponse> {
    let rules = state.rules.rules();
    Json(RulesResponse {
        success: true,
        rules,
        count: rules.len(),
    })
}
