//! Axum route handlers for the Ask-AI API.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::models::{DormProfile, Room};
use crate::catalog::resolver::resolve_dorm;
use crate::errors::AppError;
use crate::search::pipeline::{search_catalog, Step};
use crate::search::shaper::ShapedDorm;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NarrativeResponse {
    pub message: String,
    pub result: Vec<ShapedDorm>,
    pub recommendations: Vec<ShapedDorm>,
}

impl NarrativeResponse {
    fn reply_only(message: String) -> Self {
        Self {
            message,
            result: vec![],
            recommendations: vec![],
        }
    }
}

/// Catalog endpoint failures. The web client reads `message` on every
/// response from this endpoint, so errors keep the narrative shape with
/// empty result lists and the status of the underlying `AppError`.
#[derive(Debug)]
pub struct CatalogError(pub AppError);

impl From<AppError> for CatalogError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (_, message) = self.0.code_and_message();
        (self.0.status(), Json(NarrativeResponse::reply_only(message))).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct DormAnswerResponse {
    pub answer: String,
    pub dorm: DormProfile,
    pub rooms: Vec<Room>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /ask-ai/dormitories
///
/// Catalog-wide search. A missing or unparsable body is a 400; errors carry
/// the same `message`/`result`/`recommendations` body as successes.
pub async fn handle_ask_dormitories(
    State(state): State<AppState>,
    body: Option<Json<AskRequest>>,
) -> Result<Json<NarrativeResponse>, CatalogError> {
    let question = body
        .and_then(|Json(req)| req.question)
        .ok_or_else(|| AppError::BadRequest("No question provided".to_string()))?;

    let dorms = match search_catalog(state.store.as_ref(), &question).await? {
        Step::EarlyReply(message) => return Ok(Json(NarrativeResponse::reply_only(message))),
        Step::Proceed(dorms) => dorms,
    };

    let message = state.narrator.summarize_catalog(&dorms).await;

    Ok(Json(NarrativeResponse {
        message,
        recommendations: dorms.clone(),
        result: dorms,
    }))
}

/// POST /ask-ai/:dorm_id
///
/// Question about one dorm. The dorm is looked up first so an unknown id is a
/// 404 before any generative call. A missing question defaults to
/// "Tell me about <dorm name>."
pub async fn handle_ask_dorm(
    State(state): State<AppState>,
    Path(dorm_id): Path<String>,
    body: Option<Json<AskRequest>>,
) -> Result<Json<DormAnswerResponse>, AppError> {
    let dorm_id: i32 = dorm_id
        .parse()
        .map_err(|_| AppError::NotFound("Dorm not found".to_string()))?;

    let (profile, rooms) = resolve_dorm(state.store.as_ref(), dorm_id).await?;

    let question = body
        .and_then(|Json(req)| req.question)
        .unwrap_or_else(|| format!("Tell me about {}.", profile.dorm_name));

    info!("Answering question about dorm {dorm_id}");
    let answer = state
        .narrator
        .answer_about_dorm(&profile, &rooms, &question)
        .await;

    Ok(Json(DormAnswerResponse {
        answer,
        dorm: profile,
        rooms,
    }))
}
