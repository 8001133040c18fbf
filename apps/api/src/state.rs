use std::sync::Arc;

use crate::company::store::ProfileStore;
use crate::config::Config;
use crate::grants::store::GrantStore;
use crate::llm_client::CompletionApi;
use crate::reports::store::ReportStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The stores are owned handles, not globals: cloning the state shares the
/// underlying collections, and each store serializes its own writers.
#[derive(Clone)]
pub struct AppState {
    pub grants: GrantStore,
    pub company: ProfileStore,
    pub reports: ReportStore,
    /// Completion backend for profile extraction. Trait object so tests can
    /// substitute a mock.
    pub llm: Arc<dyn CompletionApi>,
    #[allow(dead_code)]
    pub config: Config,
}
