//! Gemini Provider - TextGenerator implementation for the Google
//! generative-language HTTP API.
//!
//! Issues one `generateContent` call per request and maps HTTP status
//! codes onto [`ProviderError`] kinds. Deliberately retry-free: backoff
//! and attempt budgets live in the gateway's retry policy so every call
//! path shares identical resilience semantics.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-1.5-flash")
//!     .with_timeout(Duration::from_secs(20));
//!
//! let provider = GeminiProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{GenerationOutput, GenerationRequest, ProviderError, TextGenerator, TokenUsage};

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g. "gemini-1.5-flash", "gemini-1.5-pro").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(20),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    fn to_gemini_request(&self, request: &GenerationRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: Some(request.prompt.clone()),
                }],
            }],
            system_instruction: request.system.as_ref().map(|system| Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: Some(system.clone()),
                }],
            }),
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
                top_p: request.top_p,
                top_k: request.top_k,
            },
        }
    }

    async fn send_request(&self, request: &GenerationRequest) -> Result<Response, ProviderError> {
        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&self.to_gemini_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout {
                        timeout_ms: self.config.timeout.as_millis() as u64,
                    }
                } else if e.is_connect() {
                    ProviderError::network(format!("connection failed: {e}"))
                } else {
                    ProviderError::network(e.to_string())
                }
            })
    }

    async fn parse_response(&self, response: Response) -> Result<GenerationOutput, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status, &body));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::parse(format!("failed to parse response: {e}")))?;

        extract_output(body, &self.config.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutput, ProviderError> {
        let response = self.send_request(request).await?;
        self.parse_response(response).await
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Maps a non-success HTTP status onto a provider error.
fn map_error_status(status: StatusCode, body: &str) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::AuthenticationFailed,
        429 => ProviderError::RateLimited {
            retry_after_secs: parse_retry_after(body),
        },
        400 => ProviderError::InvalidRequest(body.to_string()),
        500..=599 => ProviderError::unavailable(format!("server error {status}: {body}")),
        _ => ProviderError::network(format!("unexpected status {status}: {body}")),
    }
}

/// Pulls the advertised retry delay out of a 429 body, default 60s.
///
/// Gemini reports throttling as a RetryInfo detail with a "retryDelay"
/// string like "37s".
fn parse_retry_after(body: &str) -> u32 {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(details) = parsed
            .get("error")
            .and_then(|e| e.get("details"))
            .and_then(|d| d.as_array())
        {
            for detail in details {
                if let Some(delay) = detail.get("retryDelay").and_then(|d| d.as_str()) {
                    if let Ok(secs) = delay.trim_end_matches('s').parse::<u32>() {
                        return secs;
                    }
                }
            }
        }
    }
    60
}

/// Flattens a successful response body into the port output type.
fn extract_output(body: GeminiResponse, model: &str) -> Result<GenerationOutput, ProviderError> {
    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::parse("response contained no candidates"))?;

    let content = candidate
        .content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect::<Vec<_>>()
        .join("");

    if content.is_empty() {
        return Err(ProviderError::parse("candidate contained no text parts"));
    }

    let usage = body
        .usage_metadata
        .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count))
        .unwrap_or_default();

    Ok(GenerationOutput {
        content,
        usage,
        model: model.to_string(),
    })
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[cfg(test)]
impl Part {
    fn new(text: String) -> Self {
        Self { text: Some(text) }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = GeminiConfig::new("test-key")
            .with_model("gemini-1.5-pro")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn request_conversion_carries_parameters() {
        let provider = GeminiProvider::new(GeminiConfig::new("k")).unwrap();
        let mut request = GenerationRequest::new("tell me", 0.3, 512).with_system("be brief");
        request.top_k = Some(40);

        let gemini = provider.to_gemini_request(&request);
        assert_eq!(gemini.contents.len(), 1);
        assert_eq!(gemini.contents[0].parts[0].text.as_deref(), Some("tell me"));
        assert!(gemini.system_instruction.is_some());
        assert_eq!(gemini.generation_config.max_output_tokens, 512);
        assert_eq!(gemini.generation_config.top_k, Some(40));
    }

    #[test]
    fn status_mapping_matches_error_taxonomy() {
        assert!(matches!(
            map_error_status(StatusCode::UNAUTHORIZED, ""),
            ProviderError::AuthenticationFailed
        ));
        assert!(matches!(
            map_error_status(StatusCode::FORBIDDEN, ""),
            ProviderError::AuthenticationFailed
        ));
        assert!(matches!(
            map_error_status(StatusCode::TOO_MANY_REQUESTS, "{}"),
            ProviderError::RateLimited { retry_after_secs: 60 }
        ));
        assert!(matches!(
            map_error_status(StatusCode::BAD_REQUEST, "bad field"),
            ProviderError::InvalidRequest(_)
        ));
        assert!(matches!(
            map_error_status(StatusCode::SERVICE_UNAVAILABLE, ""),
            ProviderError::Unavailable { .. }
        ));
    }

    #[test]
    fn parse_retry_after_reads_retry_info() {
        let body = r#"{"error":{"code":429,"details":[{"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"37s"}]}}"#;
        assert_eq!(parse_retry_after(body), 37);
    }

    #[test]
    fn parse_retry_after_defaults_to_sixty() {
        assert_eq!(parse_retry_after(r#"{"error":{"message":"quota"}}"#), 60);
        assert_eq!(parse_retry_after("not json"), 60);
    }

    #[test]
    fn extract_output_joins_text_parts() {
        let body = GeminiResponse {
            candidates: vec![Candidate {
                content: Content {
                    role: "model".to_string(),
                    parts: vec![Part::new("Hello ".into()), Part::new("world".into())],
                },
            }],
            usage_metadata: Some(UsageMetadata {
                prompt_token_count: 12,
                candidates_token_count: 3,
            }),
        };

        let output = extract_output(body, "gemini-1.5-flash").unwrap();
        assert_eq!(output.content, "Hello world");
        assert_eq!(output.usage.total_tokens, 15);
        assert_eq!(output.model, "gemini-1.5-flash");
    }

    #[test]
    fn empty_candidates_fail_as_parse_error() {
        let body = GeminiResponse {
            candidates: vec![],
            usage_metadata: None,
        };
        assert!(matches!(
            extract_output(body, "m"),
            Err(ProviderError::Parse(_))
        ));
    }

    #[test]
    fn response_deserializes_from_api_shape() {
        let json = r#"{
            "candidates": [{"content": {"role": "model", "parts": [{"text": "answer"}]}}],
            "usageMetadata": {"promptTokenCount": 5, "candidatesTokenCount": 2, "totalTokenCount": 7}
        }"#;
        let body: GeminiResponse = serde_json::from_str(json).unwrap();
        let output = extract_output(body, "gemini-1.5-flash").unwrap();
        assert_eq!(output.content, "answer");
        assert_eq!(output.usage.prompt_tokens, 5);
    }
}
