//! Deepgram pre-recorded audio transcription.

use super::SpeechToText;
use crate::config::SpeechSettings;
use crate::error::{PodnewsError, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use tracing::{debug, instrument};

/// Deepgram `/v1/listen` client.
pub struct DeepgramTranscriber {
    client: reqwest::Client,
    api_key: String,
    settings: SpeechSettings,
}

#[derive(Debug, Deserialize)]
struct ListenResponse {
    results: ListenResults,
}

#[derive(Debug, Deserialize)]
struct ListenResults {
    #[serde(default)]
    channels: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
}

impl DeepgramTranscriber {
    pub fn new(api_key: &str, settings: &SpeechSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            settings: settings.clone(),
        }
    }

    fn listen_url(&self) -> String {
        format!("{}/v1/listen", self.settings.base_url.trim_end_matches('/'))
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("model", self.settings.model.clone()),
            ("language", self.settings.language.clone()),
            ("punctuate", self.settings.punctuate.to_string()),
            ("paragraphs", self.settings.paragraphs.to_string()),
        ]
    }
}

#[async_trait]
impl SpeechToText for DeepgramTranscriber {
    #[instrument(skip(self, audio), fields(bytes = audio.len()))]
    async fn transcribe(&self, audio: Vec<u8>, mime_type: &str) -> Result<String> {
        let response = self
            .client
            .post(self.listen_url())
            .query(&self.query())
            .header(AUTHORIZATION, format!("Token {}", self.api_key))
            .header(CONTENT_TYPE, mime_type)
            .body(audio)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PodnewsError::SpeechToText(format!(
                "Deepgram returned {}: {}",
                status, body
            )));
        }

        let parsed: ListenResponse = response.json().await?;

        let transcript = parsed
            .results
            .channels
            .into_iter()
            .next()
            .and_then(|c| c.alternatives.into_iter().next())
            .map(|a| a.transcript)
            .ok_or_else(|| PodnewsError::SpeechToText("Response contained no transcript".to_string()))?;

        debug!("Transcribed {} characters", transcript.len());
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_bytes, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transcriber_for(server: &MockServer) -> DeepgramTranscriber {
        let settings = SpeechSettings {
            base_url: server.uri(),
            ..SpeechSettings::default()
        };
        DeepgramTranscriber::new("dg-key", &settings)
    }

    #[tokio::test]
    async fn test_transcribe_sends_options_and_reads_first_alternative() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/listen"))
            .and(query_param("model", "nova-2"))
            .and(query_param("language", "en"))
            .and(query_param("punctuate", "true"))
            .and(query_param("paragraphs", "true"))
            .and(header("authorization", "Token dg-key"))
            .and(header("content-type", "audio/mpeg"))
            .and(body_bytes(b"ID3fake".to_vec()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": {
                    "channels": [
                        { "alternatives": [
                            { "transcript": "Welcome to the show." },
                            { "transcript": "ignored" }
                        ] }
                    ]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = transcriber_for(&server)
            .transcribe(b"ID3fake".to_vec(), "audio/mpeg")
            .await
            .unwrap();

        assert_eq!(text, "Welcome to the show.");
    }

    #[tokio::test]
    async fn test_transcribe_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = transcriber_for(&server)
            .transcribe(vec![1, 2, 3], "audio/mpeg")
            .await
            .unwrap_err();

        assert!(matches!(err, PodnewsError::SpeechToText(ref msg) if msg.contains("bad key")));
    }

    #[tokio::test]
    async fn test_transcribe_without_channels() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": { "channels": [] } })),
            )
            .mount(&server)
            .await;

        let err = transcriber_for(&server)
            .transcribe(vec![1], "audio/mpeg")
            .await
            .unwrap_err();

        assert!(matches!(err, PodnewsError::SpeechToText(_)));
    }
}
