mod analysis;
mod classifier;
mod config;
mod errors;
mod extraction;
mod matching;
mod routes;
mod state;
mod store;
mod views;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::spelling::SpellChecker;
use crate::analysis::TextAnalyzer;
use crate::classifier::load_classifier;
use crate::config::Config;
use crate::extraction::build_ocr_engine;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::CandidateStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume screener v{}", env!("CARGO_PKG_VERSION"));

    // Spelling dictionary: embedded list plus optional extra words
    let mut speller = SpellChecker::default();
    if let Some(path) = &config.spelling_wordlist_path {
        speller.extend_from_file(path)?;
        info!("Merged extra word list from {}", path.display());
    }
    info!("Spelling dictionary loaded ({} words)", speller.len());

    // Role classifier: JSON artifact when MODEL_PATH is set, keyword profiles otherwise
    let classifier = load_classifier(config.model_path.as_deref())?;
    info!(
        "Role classifier ready (backend: {}, {} roles)",
        classifier.backend(),
        classifier.labels().len()
    );

    let ocr = build_ocr_engine(config.tessdata_dir.as_deref());
    info!("OCR engine: {}", ocr.name());

    let state = AppState {
        config: config.clone(),
        store: Arc::new(CandidateStore::new()),
        analyzer: Arc::new(TextAnalyzer::new(speller)),
        classifier,
        ocr,
    };

    let app = build_router(state).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
