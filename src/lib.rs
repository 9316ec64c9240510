//! Podnews - Podcast to News
//!
//! Turns YouTube podcast episodes into transcripts and short news articles.
//!
//! # Overview
//!
//! Podnews allows you to:
//! - Extract transcripts from YouTube videos, using published captions when
//!   available and audio transcription otherwise
//! - Generate a fixed set of news articles from a transcript with an LLM
//! - Download generated articles as plain text or Word documents
//! - Serve all of the above over a small HTTP API
//!
//! # Architecture
//!
//! - `youtube` - URL validation and video id extraction
//! - `transcript` - Caption fetching, speech-to-text and the two-tier resolver
//! - `audio` - Audio download for the transcription fallback
//! - `news` - Article generation and response parsing
//! - `session` - In-memory storage of generated article sets
//! - `export` - Text and Word rendering
//! - `api` - HTTP routes
//! - `config` - Settings and prompt templates
//!
//! # Example
//!
//! ```rust,no_run
//! use podnews::config::Settings;
//! use podnews::news::ArticleGenerator;
//! use podnews::transcript::TranscriptResolver;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let capabilities = settings.capabilities()?;
//!
//!     let resolver = TranscriptResolver::from_settings(&settings)?;
//!     let generator = ArticleGenerator::from_settings(&settings, &capabilities)?;
//!
//!     let transcript = resolver.resolve("https://youtu.be/dQw4w9WgXcQ").await?;
//!     for article in generator.generate(&transcript).await? {
//!         println!("{}", article.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod news;
pub mod openai;
pub mod session;
pub mod transcript;
pub mod youtube;

pub use error::{PodnewsError, Result};
