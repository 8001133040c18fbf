//! Axum route handlers for the reports API.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::report::{Report, ReportKind};
use crate::reports::document::build_document;
use crate::reports::renderer::render_pdf;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateReportRequest {
    pub kind: ReportKind,
    pub text: Option<String>,
}

/// GET /api/reports
pub async fn handle_list_reports(State(state): State<AppState>) -> Json<Vec<Report>> {
    Json(state.reports.list())
}

/// POST /api/reports
///
/// Builds the document from the current stores (or the supplied text),
/// renders it, persists the artifact, and returns the metadata record.
pub async fn handle_generate_report(
    State(state): State<AppState>,
    Json(request): Json<GenerateReportRequest>,
) -> Result<Json<Report>, AppError> {
    let text = match request.kind {
        ReportKind::FromText => {
            let text = request.text.unwrap_or_default();
            if text.trim().is_empty() {
                return Err(AppError::Validation(
                    "text is required for from_text reports".to_string(),
                ));
            }
            Some(text)
        }
        ReportKind::Generated => None,
    };

    let profile = state.company.get();
    let grants = state.grants.list();
    let document = build_document(profile.as_ref(), &grants, request.kind, text.as_deref());
    let pdf_bytes = render_pdf(&document);

    let description = text.unwrap_or_default();
    let report = state
        .reports
        .create(request.kind, description, &pdf_bytes)?;

    tracing::info!(
        "Generated report {} ({} bytes, {} sections)",
        report.id,
        report.file_size,
        document.sections.len()
    );

    Ok(Json(report))
}

/// GET /api/reports/:id/download
pub async fn handle_download_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (report, bytes) = state.reports.read_artifact(id)?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"report_{}.pdf\"", report.id),
        ),
    ];

    Ok((headers, bytes))
}

/// DELETE /api/reports/:id
///
/// Removes both the metadata record and the underlying artifact.
pub async fn handle_delete_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.reports.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
