//! Axum route handlers for the grants API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::grant::FundingOpportunity;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DeleteGrantResponse {
    pub message: String,
    pub grant: FundingOpportunity,
}

/// GET /api/grants
pub async fn handle_list_grants(
    State(state): State<AppState>,
) -> Json<Vec<FundingOpportunity>> {
    Json(state.grants.list())
}

/// POST /api/grants
pub async fn handle_create_grant(
    State(state): State<AppState>,
    Json(grant): Json<FundingOpportunity>,
) -> Result<Json<FundingOpportunity>, AppError> {
    let stored = state.grants.insert(grant)?;
    Ok(Json(stored))
}

/// DELETE /api/grants/:index
///
/// Grants are addressed by list position, matching the UI's table ordering.
pub async fn handle_delete_grant(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<DeleteGrantResponse>, AppError> {
    let grant = state.grants.remove(index)?;
    Ok(Json(DeleteGrantResponse {
        message: "Grant deleted successfully".to_string(),
        grant,
    }))
}

/// PATCH /api/grants/:index/won
pub async fn handle_toggle_won(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<FundingOpportunity>, AppError> {
    let grant = state.grants.toggle_won(index)?;
    Ok(Json(grant))
}

/// DELETE /api/grants
pub async fn handle_clear_grants(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.grants.clear();
    Json(serde_json::json!({ "message": "All grants deleted" }))
}
