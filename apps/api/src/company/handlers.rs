//! Axum route handlers for the company profile API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;

use crate::company::extraction::extract_company_profile;
use crate::errors::AppError;
use crate::models::company::CompanyProfile;
use crate::pdf_text;
use crate::state::AppState;

/// GET /api/company
pub async fn handle_get_company(State(state): State<AppState>) -> Json<Option<CompanyProfile>> {
    Json(state.company.get())
}

/// POST /api/company
pub async fn handle_update_company(
    State(state): State<AppState>,
    Json(profile): Json<CompanyProfile>,
) -> Result<Json<CompanyProfile>, AppError> {
    let stored = state.company.replace(profile)?;
    Ok(Json(stored))
}

/// POST /api/company/extract
///
/// Accepts a multipart PDF upload, extracts its text, asks the completion
/// API for structured fields, and replaces the stored profile on success.
pub async fn handle_extract_company(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CompanyProfile>, AppError> {
    let data = read_upload(multipart).await?;

    // pdf-extract is CPU-bound; keep it off the async runtime threads.
    let text = tokio::task::spawn_blocking(move || pdf_text::extract_text(&data))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task panicked: {e}")))??;

    let profile = extract_company_profile(&text, state.llm.as_ref()).await?;
    let stored = state.company.replace(profile)?;
    Ok(Json(stored))
}

/// Pulls the first file field out of the multipart body.
async fn read_upload(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if !data.is_empty() {
            return Ok(data);
        }
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}
