//! HTTP request handlers.

use super::AppState;
use crate::error::{PodnewsError, Result};
use crate::export::{export_article, ExportFormat, ExportedFile};
use crate::news::NewsArticle;
use crate::youtube::is_valid_youtube_url;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

// === Request/Response Types ===

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    /// YouTube video URL
    pub url: String,
}

#[derive(Serialize)]
pub struct TranscriptResponse {
    success: bool,
    transcript: String,
    url: String,
}

#[derive(Serialize)]
pub struct NewsResponse {
    success: bool,
    session_id: String,
    articles: Vec<NewsArticle>,
    url: String,
}

// === Handlers ===

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Podcast2News API is running" }))
}

pub async fn extract_transcript(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<UrlRequest>, JsonRejection>,
) -> Result<Json<TranscriptResponse>> {
    let req = url_request(payload)?;
    require_youtube_url(&req.url)?;

    let transcript = state.resolver.resolve(&req.url).await?;

    Ok(Json(TranscriptResponse {
        success: true,
        transcript,
        url: req.url,
    }))
}

pub async fn generate_news(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<UrlRequest>, JsonRejection>,
) -> Result<Json<NewsResponse>> {
    let req = url_request(payload)?;
    require_youtube_url(&req.url)?;

    let transcript = state.resolver.resolve(&req.url).await?;
    let articles = state.generator.generate(&transcript).await?;
    let session_id = state.sessions.put(articles.clone())?;

    info!("Stored {} articles in session {}", articles.len(), session_id);

    Ok(Json(NewsResponse {
        success: true,
        session_id,
        articles,
        url: req.url,
    }))
}

pub async fn download_article(
    State(state): State<Arc<AppState>>,
    Path((session_id, article_index, format)): Path<(String, String, String)>,
) -> Result<Response> {
    // The format is checked before the session so a bad format is always a 400.
    let format: ExportFormat = format.parse()?;

    let index: usize = article_index
        .parse()
        .map_err(|_| PodnewsError::InvalidInput(format!("Invalid article index: {}", article_index)))?;

    let article = state.sessions.get(&session_id, index)?;
    let file = export_article(&article, format, chrono::Local::now().naive_local())?;

    Ok(attachment(file))
}

/// Malformed bodies become `InvalidInput` so they share the `{detail}` shape.
fn url_request(payload: std::result::Result<Json<UrlRequest>, JsonRejection>) -> Result<UrlRequest> {
    payload
        .map(|Json(req)| req)
        .map_err(|rejection| PodnewsError::InvalidInput(rejection.body_text()))
}

/// Reject anything that is not a recognized YouTube URL before any provider call.
fn require_youtube_url(url: &str) -> Result<()> {
    if is_valid_youtube_url(url) {
        Ok(())
    } else {
        Err(PodnewsError::InvalidUrl(url.to_string()))
    }
}

/// Build a file download response.
fn attachment(file: ExportedFile) -> Response {
    let ascii_name: String = file.filename.chars().filter(char::is_ascii).collect();
    let disposition = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii_name,
        urlencoding::encode(&file.filename)
    );

    let disposition = HeaderValue::from_str(&disposition)
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        [
            (CONTENT_TYPE, HeaderValue::from_static(file.content_type)),
            (CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_youtube_url() {
        assert!(require_youtube_url("https://youtu.be/abc").is_ok());
        assert!(matches!(
            require_youtube_url("https://example.com/watch?v=abc"),
            Err(PodnewsError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_attachment_headers_for_unicode_title() {
        let response = attachment(ExportedFile {
            filename: "Café-Talk.txt".to_string(),
            content_type: "text/plain; charset=utf-8",
            bytes: b"hi".to_vec(),
        });

        let disposition = response.headers()[CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"Caf-Talk.txt\""));
        assert!(disposition.contains("filename*=UTF-8''Caf%C3%A9-Talk.txt"));
    }
}
