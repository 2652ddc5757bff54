mod config;
mod errors;
mod extraction;
mod parsing;
mod report;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::extraction::DocumentTextExtractor;
use crate::parsing::{HeuristicTagger, ResumeParser, SectionCatalog};
use crate::report::DocxReportWriter;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Parser API v{}", env!("CARGO_PKG_VERSION"));

    // Section catalog: built-in table unless a JSON override is configured
    let catalog = match &config.section_catalog_path {
        Some(path) => SectionCatalog::from_path(path)
            .with_context(|| format!("Failed to load section catalog from {}", path.display()))?,
        None => SectionCatalog::default(),
    };
    info!("Section catalog loaded ({} sections)", catalog.sections().len());

    // Tagger is shared read-only across requests (HeuristicTagger by default)
    let parser = Arc::new(ResumeParser::new(catalog, Arc::new(HeuristicTagger)));

    info!("Reports will be written to {}", config.output_dir.display());

    // Build app state
    let state = AppState {
        config: config.clone(),
        parser,
        extractor: Arc::new(DocumentTextExtractor::default()),
        report_writer: Arc::new(DocxReportWriter::new(config.output_dir.clone())),
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
