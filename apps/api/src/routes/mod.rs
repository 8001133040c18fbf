pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::company::handlers as company;
use crate::grants::handlers as grants;
use crate::reports::handlers as reports;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Grants API
        .route(
            "/api/grants",
            get(grants::handle_list_grants)
                .post(grants::handle_create_grant)
                .delete(grants::handle_clear_grants),
        )
        .route("/api/grants/:index", delete(grants::handle_delete_grant))
        .route("/api/grants/:index/won", patch(grants::handle_toggle_won))
        // Company profile API
        .route(
            "/api/company",
            get(company::handle_get_company).post(company::handle_update_company),
        )
        .route("/api/company/extract", post(company::handle_extract_company))
        // Reports API
        .route(
            "/api/reports",
            get(reports::handle_list_reports).post(reports::handle_generate_report),
        )
        .route(
            "/api/reports/:id/download",
            get(reports::handle_download_report),
        )
        .route("/api/reports/:id", delete(reports::handle_delete_report))
        .with_state(state)
}
