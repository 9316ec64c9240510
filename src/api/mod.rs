//! HTTP API for transcript extraction, article generation and download.

mod error;
mod handlers;

use crate::config::{Capabilities, Settings};
use crate::error::Result;
use crate::news::ArticleGenerator;
use crate::session::SessionStore;
use crate::transcript::TranscriptResolver;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared application state.
pub struct AppState {
    pub resolver: TranscriptResolver,
    pub generator: ArticleGenerator,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(resolver: TranscriptResolver, generator: ArticleGenerator, sessions: SessionStore) -> Self {
        Self {
            resolver,
            generator,
            sessions,
        }
    }

    /// Build the production providers from settings and resolved capabilities.
    pub fn from_settings(settings: &Settings, capabilities: &Capabilities) -> Result<Self> {
        Ok(Self::new(
            TranscriptResolver::from_settings(settings)?,
            ArticleGenerator::from_settings(settings, capabilities)?,
            SessionStore::new(),
        ))
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/extract-transcript", post(handlers::extract_transcript))
        .route("/generate-news", post(handlers::generate_news))
        .route(
            "/download-article/{session_id}/{article_index}/{format}",
            get(handlers::download_article),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// CORS for the configured origins, with credentials, GET and POST only.
///
/// A `*` entry echoes the request origin, since a literal wildcard cannot be
/// combined with credentials.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(allowed_origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
}

fn allow_origin(allowed_origins: &[String]) -> AllowOrigin {
    if allowed_origins.iter().any(|origin| origin == "*") {
        warn!("CORS allows any origin with credentials");
        return AllowOrigin::mirror_request();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}
