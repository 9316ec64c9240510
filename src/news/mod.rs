//! News article generation from transcripts.

mod llm;
mod parse;

pub use llm::OpenAIChat;
pub use parse::parse_articles;

use crate::config::{Capabilities, Prompts, Settings};
use crate::error::{PodnewsError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// A generated news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub content: String,
    pub key_quote: String,
}

/// A chat-style text completion provider.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Run one completion with a system and a user message.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Turns a transcript into a fixed number of news articles.
pub struct ArticleGenerator {
    model: Arc<dyn CompletionModel>,
    prompts: Prompts,
    article_count: usize,
}

impl ArticleGenerator {
    pub fn new(model: Arc<dyn CompletionModel>, prompts: Prompts, article_count: usize) -> Self {
        Self {
            model,
            prompts,
            article_count,
        }
    }

    /// Build the production generator backed by OpenAI.
    pub fn from_settings(settings: &Settings, capabilities: &Capabilities) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;
        let model = OpenAIChat::new(&capabilities.openai_api_key, &settings.generation)?;

        Ok(Self::new(
            Arc::new(model),
            prompts,
            settings.generation.article_count,
        ))
    }

    /// Number of articles produced per transcript.
    pub fn article_count(&self) -> usize {
        self.article_count
    }

    /// Build the user prompt for a transcript.
    fn user_prompt(&self, transcript: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());
        vars.insert("article_count".to_string(), self.article_count.to_string());
        self.prompts.render_with_custom(&self.prompts.news.user, &vars)
    }

    /// Generate articles from a transcript with a single completion call.
    #[instrument(skip_all, fields(transcript_chars = transcript.len()))]
    pub async fn generate(&self, transcript: &str) -> Result<Vec<NewsArticle>> {
        if transcript.trim().is_empty() {
            return Err(PodnewsError::GenerationFailed("Transcript is empty".to_string()));
        }

        let response = self
            .model
            .complete(&self.prompts.news.system, &self.user_prompt(transcript))
            .await
            .map_err(|e| PodnewsError::GenerationFailed(e.to_string()))?;

        let articles = parse_articles(&response, self.article_count)?;
        info!("Generated {} articles", articles.len());
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records prompts and replies with a canned response.
    struct ScriptedModel {
        reply: std::result::Result<String, String>,
        prompts: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedModel {
        fn replying(reply: std::result::Result<&str, &str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionModel for ScriptedModel {
        async fn complete(&self, system: &str, user: &str) -> Result<String> {
            self.prompts.lock().unwrap().push((system.to_string(), user.to_string()));
            self.reply.clone().map_err(PodnewsError::OpenAI)
        }
    }

    const REPLY: &str = r#"```json
[
  {"title": "Robots Join The Newsroom", "content": "Editors met their new colleagues.", "key_quote": "They never sleep"},
  {"title": "Podcasts Become Papers", "content": "Audio turned into print.", "key_quote": "Ink is back"},
  {"title": "Quotes Stay Verbatim", "content": "Accuracy matters.", "key_quote": "Say it exactly"}
]
```"#;

    #[tokio::test]
    async fn test_generate_three_articles() {
        let model = ScriptedModel::replying(Ok(REPLY));
        let generator = ArticleGenerator::new(model.clone(), Prompts::default(), 3);

        let articles = generator.generate("host: welcome. guest: thanks.").await.unwrap();

        assert_eq!(articles.len(), 3);
        assert!(articles.iter().all(|a| !a.title.is_empty() && !a.content.is_empty()));
        assert_eq!(articles[0].key_quote, "They never sleep");

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].0.contains("journalist"));
        assert!(prompts[0].1.contains("host: welcome. guest: thanks."));
        assert!(prompts[0].1.contains("generate 3 distinct news articles"));
    }

    #[tokio::test]
    async fn test_provider_error_is_generation_failure() {
        let generator = ArticleGenerator::new(ScriptedModel::replying(Err("rate limited")), Prompts::default(), 3);

        let err = generator.generate("some transcript").await.unwrap_err();
        assert!(matches!(err, PodnewsError::GenerationFailed(ref msg) if msg.contains("rate limited")));
    }

    #[tokio::test]
    async fn test_empty_transcript_skips_provider() {
        let model = ScriptedModel::replying(Ok(REPLY));
        let generator = ArticleGenerator::new(model.clone(), Prompts::default(), 3);

        assert!(matches!(
            generator.generate("   ").await,
            Err(PodnewsError::GenerationFailed(_))
        ));
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_news_article_json_shape() {
        let article = NewsArticle {
            title: "T".into(),
            content: "C".into(),
            key_quote: "Q".into(),
        };
        assert_eq!(
            serde_json::to_value(&article).unwrap(),
            serde_json::json!({"title": "T", "content": "C", "key_quote": "Q"})
        );
    }
}
