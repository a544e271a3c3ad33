//! Chat-completions client for the text-generation service

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{config::AppConfig, generator::SYSTEM_PROMPT};

/// Sampling temperature for statement generation
const TEMPERATURE: f32 = 0.7;

/// Maximum output length in tokens
const MAX_TOKENS: u32 = 2048;

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// Client for a Groq-compatible chat-completions API
///
/// Uses the default reqwest client: no timeout override, no retry.
/// A slow or failed upstream call delays or fails that one request.
#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    /// Create a client from application configuration
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.groq_api_url.trim_end_matches('/').to_string(),
            api_key: config.groq_api_key.clone(),
            model: config.groq_model.clone(),
        }
    }

    /// Generate a project statement from a prepared prompt
    ///
    /// Returns the HTML fragment produced upstream, or an error for
    /// any failure: network, non-2xx status, malformed body, or an
    /// empty completion.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            anyhow::bail!("text-generation service returned {status}: {detail}");
        }

        let chat: ChatResponse = resp.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        let content = content.trim();
        if content.is_empty() {
            anyhow::bail!("text-generation service returned an empty completion");
        }

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> LlmClient {
        LlmClient::new(&AppConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            groq_api_key: "test-key".to_string(),
            groq_api_url: base_url.to_string(),
            groq_model: "test-model".to_string(),
        })
    }

    #[tokio::test]
    async fn test_generate_returns_completion() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "test-model",
                "temperature": 0.7,
                "max_tokens": 2048,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "<h2>Project Statement</h2>"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let fragment = client.generate("a prompt").await.unwrap();
        assert_eq!(fragment, "<h2>Project Statement</h2>");
    }

    #[tokio::test]
    async fn test_generate_surfaces_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.generate("a prompt").await.unwrap_err();
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_choices() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.generate("a prompt").await.is_err());
    }
}
