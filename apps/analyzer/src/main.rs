mod analysis;
mod annotation;
mod config;
mod errors;
mod models;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::Analyzer;
use crate::annotation::{Annotator, HeuristicAnnotator, RemoteAnnotator};
use crate::config::Config;
use crate::routes::build_router;
use crate::scoring::vocabulary::SkillVocabulary;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Skill vocabulary (built-in list unless SKILLS_FILE points somewhere)
    let vocabulary = Arc::new(SkillVocabulary::load(config.skills_file.as_deref())?);
    info!("Skill vocabulary loaded ({} terms)", vocabulary.len());

    // Annotation engine: remote service when ANNOTATOR_URL is set, built-in otherwise
    let annotator: Arc<dyn Annotator> = match &config.annotator_url {
        Some(url) => {
            let remote = RemoteAnnotator::new(
                url.clone(),
                Duration::from_secs(config.annotator_timeout_secs),
            )?;
            info!("Using remote annotation service at {}", remote.url());
            Arc::new(remote)
        }
        None => Arc::new(HeuristicAnnotator::new()),
    };
    info!("Annotation engine initialized ({})", annotator.backend());

    // Build app state
    let state = AppState {
        config: config.clone(),
        analyzer: Analyzer::new(vocabulary, annotator),
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
