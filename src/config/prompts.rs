//! Prompt templates for Podnews.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub news: NewsPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for news article generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsPrompts {
    pub system: String,
    pub user: String,
}

impl Default for NewsPrompts {
    fn default() -> Self {
        Self {
            system: "You are a professional journalist who writes compelling news articles based on podcast content.".to_string(),

            user: r#"You are a journalist. Analyze the following podcast transcript and generate {{article_count}} distinct news articles based on the most relevant, controversial, or high-stakes points discussed.

Each article should:
- Be approximately 200 words
- Focus on a different key insight or topic from the podcast
- Include at least one direct quote from the podcast
- Have a compelling headline
- Be written in a professional news style

Format your response as a JSON array with this structure:
[
  {
    "title": "Article Title",
    "content": "Article content with quote...",
    "key_quote": "Direct quote from podcast"
  },
  ...
]

Podcast Transcript:
{{transcript}}"#.to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, applying overrides from `custom_dir` when present.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let news_path = custom_path.join("news.toml");
            if news_path.exists() {
                let content = std::fs::read_to_string(&news_path)?;
                prompts.news = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
