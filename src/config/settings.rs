//! Configuration settings for Podnews.

use crate::error::{PodnewsError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default CORS origins when `ALLOWED_ORIGINS` is not set.
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub captions: CaptionSettings,
    pub speech: SpeechSettings,
    pub audio: AudioSettings,
    pub generation: GenerationSettings,
    pub prompts: PromptSettings,
    /// API credentials, only ever read from the environment.
    #[serde(skip)]
    pub credentials: Credentials,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for temporary audio downloads.
    pub temp_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            temp_dir: "/tmp/podnews".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
        }
    }
}

/// Caption fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionSettings {
    /// Preferred caption languages, in order.
    pub languages: Vec<String>,
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
        }
    }
}

/// Speech-to-text settings for the audio fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// Deepgram API base URL.
    pub base_url: String,
    pub model: String,
    pub language: String,
    pub punctuate: bool,
    pub paragraphs: bool,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepgram.com".to_string(),
            model: "nova-2".to_string(),
            language: "en".to_string(),
            punctuate: true,
            paragraphs: true,
        }
    }
}

/// Audio download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Target audio codec for yt-dlp's extraction step.
    pub format: String,
    /// Target audio quality (yt-dlp `--audio-quality`).
    pub quality: String,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            format: "mp3".to_string(),
            quality: "192K".to_string(),
        }
    }
}

/// Article generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// LLM model for article generation.
    pub model: String,
    pub temperature: f32,
    /// Output token ceiling.
    pub max_tokens: u32,
    /// Number of articles per transcript.
    pub article_count: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4.1-mini-2025-04-14".to_string(),
            temperature: 0.7,
            max_tokens: 28000,
            article_count: 3,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

/// API keys read from the environment.
#[derive(Clone, Default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub deepgram_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("deepgram_api_key", &self.deepgram_api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Provider capabilities resolved at startup.
#[derive(Clone)]
pub struct Capabilities {
    /// Required for article generation.
    pub openai_api_key: String,
    /// Enables the speech-to-text transcript fallback.
    pub deepgram_api_key: Option<String>,
}

impl Capabilities {
    /// Whether audio transcription can be used when captions are missing.
    pub fn has_audio_fallback(&self) -> bool {
        self.deepgram_api_key.is_some()
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// Environment overrides are applied after the file is read.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Apply `ALLOWED_ORIGINS`, `OPENAI_API_KEY` and `DEEPGRAM_API_KEY`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(origins) = non_empty("ALLOWED_ORIGINS") {
            self.server.allowed_origins = parse_origins(&origins);
        }
        self.credentials.openai_api_key = non_empty("OPENAI_API_KEY");
        self.credentials.deepgram_api_key = non_empty("DEEPGRAM_API_KEY");
    }

    /// Resolve provider capabilities, failing when a required one is missing.
    pub fn capabilities(&self) -> Result<Capabilities> {
        let openai_api_key = self.credentials.openai_api_key.clone().ok_or_else(|| {
            PodnewsError::Config(
                "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
            )
        })?;

        Ok(Capabilities {
            openai_api_key,
            deepgram_api_key: self.credentials.deepgram_api_key.clone(),
        })
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| PodnewsError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("podnews")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }
}

/// Split a comma-separated origin list.
fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(
            settings.server.allowed_origins,
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
        assert_eq!(settings.generation.article_count, 3);
        assert_eq!(settings.generation.temperature, 0.7);
        assert_eq!(settings.captions.languages, vec!["en"]);
        assert_eq!(settings.speech.model, "nova-2");
    }

    #[test]
    fn test_apply_env_overrides() {
        let mut settings = Settings::default();
        settings.apply_env(env_from(&[
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("OPENAI_API_KEY", "sk-test"),
            ("DEEPGRAM_API_KEY", "  "),
        ]));

        assert_eq!(
            settings.server.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(settings.credentials.openai_api_key.as_deref(), Some("sk-test"));
        assert!(settings.credentials.deepgram_api_key.is_none());
    }

    #[test]
    fn test_capabilities_require_openai_key() {
        let mut settings = Settings::default();
        settings.apply_env(env_from(&[("DEEPGRAM_API_KEY", "dg")]));
        assert!(matches!(settings.capabilities(), Err(PodnewsError::Config(_))));

        settings.apply_env(env_from(&[("OPENAI_API_KEY", "sk-test")]));
        let caps = settings.capabilities().unwrap();
        assert_eq!(caps.openai_api_key, "sk-test");
        assert!(!caps.has_audio_fallback());
    }

    #[test]
    fn test_partial_toml_and_credentials_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "127.0.0.1");

        let mut with_keys = settings.clone();
        with_keys.credentials.openai_api_key = Some("sk-secret".to_string());
        let out = dir.path().join("saved.toml");
        with_keys.save_to(&out).unwrap();
        let saved = std::fs::read_to_string(&out).unwrap();
        assert!(!saved.contains("sk-secret"));
    }

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials {
            openai_api_key: Some("sk-secret".to_string()),
            deepgram_api_key: None,
        };
        assert!(!format!("{:?}", creds).contains("sk-secret"));
    }
}
