//! HTTP API server.

use crate::api::{self, AppState};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use std::sync::Arc;

/// Run the HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Serve, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'podnews doctor' for detailed diagnostics.");
        return Err(e.into());
    }
    let capabilities = settings.capabilities()?;

    if !capabilities.has_audio_fallback() {
        Output::warning("DEEPGRAM_API_KEY not set; videos without captions cannot be transcribed.");
    }

    let state = Arc::new(AppState::from_settings(&settings, &capabilities)?);
    let app = api::router(state, &settings.server.allowed_origins);

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Podnews API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Status", "GET  /");
    Output::kv("Transcript", "POST /extract-transcript");
    Output::kv("Generate", "POST /generate-news");
    Output::kv(
        "Download",
        "GET  /download-article/{session_id}/{article_index}/{txt|docx}",
    );
    Output::kv("Allowed origins", &settings.server.allowed_origins.join(", "));
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}
