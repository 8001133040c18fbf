mod company;
mod config;
mod errors;
mod grants;
mod llm_client;
mod models;
mod pdf_text;
mod reports;
mod routes;
mod state;

use anyhow::Result;
use chrono::NaiveDate;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::company::store::ProfileStore;
use crate::config::Config;
use crate::grants::store::GrantStore;
use crate::llm_client::LlmClient;
use crate::models::grant::FundingOpportunity;
use crate::reports::store::ReportStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Look 4 Fundings API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the report store (creates the artifact directory if missing)
    let reports = ReportStore::open(config.reports_dir.clone())?;
    info!("Report artifacts stored under {:?}", config.reports_dir);

    // Initialize the completion client
    let llm = LlmClient::new(config.openai_api_key.clone());
    if config.openai_api_key.is_none() {
        info!("OPENAI_API_KEY not set — profile extraction will be unavailable");
    }
    info!("Completion client initialized (model: {})", llm_client::MODEL);

    // In-memory stores, seeded with demo grants
    let grants = GrantStore::with_seed(seed_grants());
    let company = ProfileStore::new();

    // Build app state
    let state = AppState {
        grants,
        company,
        reports,
        llm: Arc::new(llm),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Demo grants shown on first launch. Storage is volatile, so these come
/// back on every restart.
fn seed_grants() -> Vec<FundingOpportunity> {
    vec![
        FundingOpportunity {
            id: None,
            title: "Innovation in Clean Technology Grant".to_string(),
            url: "https://example.com/clean-tech-grant".to_string(),
            summary: "A comprehensive funding opportunity for companies developing sustainable \
                      and clean technology solutions. This grant supports innovative projects \
                      that address environmental challenges and promote green energy initiatives."
                .to_string(),
            deadline: NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date"),
            status: "Open".to_string(),
            budget: "$50,000 - $200,000".to_string(),
            company_affinity: 85.0,
            won: false,
        },
        FundingOpportunity {
            id: None,
            title: "Small Business Innovation Research (SBIR) Phase I".to_string(),
            url: "https://example.com/sbir-phase1".to_string(),
            summary: "Federal funding program that provides small businesses with opportunities \
                      to propose innovative research and development projects. Focus on \
                      technology commercialization and market potential."
                .to_string(),
            deadline: NaiveDate::from_ymd_opt(2024, 4, 30).expect("valid date"),
            status: "Upcoming".to_string(),
            budget: "$150,000".to_string(),
            company_affinity: 92.0,
            won: false,
        },
        FundingOpportunity {
            id: None,
            title: "Digital Transformation Accelerator".to_string(),
            url: "https://example.com/digital-transformation".to_string(),
            summary: "Supporting companies in their digital transformation journey with funding \
                      for technology adoption, process optimization, and digital infrastructure \
                      development."
                .to_string(),
            deadline: NaiveDate::from_ymd_opt(2024, 2, 28).expect("valid date"),
            status: "Closed".to_string(),
            budget: "$25,000 - $100,000".to_string(),
            company_affinity: 67.0,
            won: false,
        },
    ]
}
