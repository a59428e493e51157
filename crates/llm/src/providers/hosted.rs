//! Hosted chat-completion provider.
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint (Groq by
//! default) using a bearer credential.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use navigator_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Chat-completion request body.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat-completion response body.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// Hosted chat-completion client.
pub struct HostedChatClient {
    /// Base URL, e.g. `https://api.groq.com/openai/v1`
    base_url: String,

    /// Bearer credential
    api_key: String,

    /// HTTP client (connection pool shared across requests)
    client: reqwest::Client,
}

impl HostedChatClient {
    /// Create a client for `base_url` authenticated with `api_key`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> AppResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AppError::Config(
                "Hosted generation requires a non-empty API key".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Llm(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            api_key,
            client,
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Convert LlmRequest to the chat-completion wire format.
    fn to_chat_request<'a>(&self, request: &'a LlmRequest) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        ChatRequest {
            model: &request.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        }
    }

    /// Extract the draft from `choices[0].message.content`.
    fn convert_response(&self, response: ChatResponse, requested_model: &str) -> AppResult<LlmResponse> {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(AppError::Llm(
                "Hosted provider returned empty content".to_string(),
            ));
        }

        let usage = response
            .usage
            .map(|u| LlmUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(LlmResponse {
            content,
            model: response
                .model
                .unwrap_or_else(|| requested_model.to_string()),
            usage,
        })
    }
}

#[async_trait::async_trait]
impl LlmClient for HostedChatClient {
    fn provider_name(&self) -> &str {
        "hosted"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tracing::info!("Sending completion request to hosted provider");
        tracing::debug!(
            model = %request.model,
            prompt_chars = request.prompt.len(),
            "Hosted request"
        );

        let body = self.to_chat_request(request);
        let mut builder = self
            .client
            .post(self.chat_url())
            .bearer_auth(&self.api_key)
            .json(&body);

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Llm("Hosted provider timed out".to_string())
            } else {
                AppError::Llm(format!("Failed to send request to hosted provider: {}", e))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let snippet: String = error_text.chars().take(200).collect();
            return Err(AppError::Llm(format!(
                "Hosted API error ({}): {}",
                status, snippet
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            AppError::Llm(format!("Failed to parse hosted provider response: {}", e))
        })?;

        let converted = self.convert_response(chat_response, &request.model)?;

        tracing::info!(
            completion_tokens = converted.usage.completion_tokens,
            "Received completion from hosted provider"
        );

        Ok(converted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one HTTP response on a local port and return its base URL.
    async fn serve_once(status_line: &'static str, body: String, delay: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            tokio::time::sleep(delay).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}", addr)
    }

    /// Drain headers and body so the client never sees a reset.
    async fn read_request(socket: &mut tokio::net::TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let lower = line.to_ascii_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .and_then(|v| v.trim().parse::<usize>().ok())
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    return;
                }
            }
        }
    }

    fn request() -> LlmRequest {
        LlmRequest::new("How can I rest better?", "llama-3.1-8b-instant")
            .with_system("You are a supportive mental health assistant.")
            .with_max_tokens(300)
            .with_temperature(0.4)
            .with_timeout(Duration::from_secs(5))
    }

    #[test]
    fn test_rejects_empty_api_key() {
        assert!(HostedChatClient::new("https://example.invalid", "  ").is_err());
    }

    #[test]
    fn test_chat_request_conversion() {
        let client = HostedChatClient::new("https://api.example.com/v1/", "key").unwrap();
        let req = request();
        let chat = client.to_chat_request(&req);

        assert_eq!(client.chat_url(), "https://api.example.com/v1/chat/completions");
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].role, "system");
        assert_eq!(chat.messages[1].role, "user");
        assert_eq!(chat.messages[1].content, "How can I rest better?");
        assert_eq!(chat.max_tokens, Some(300));
        assert!(!chat.stream);
    }

    #[tokio::test]
    async fn test_complete_success() {
        let body = serde_json::json!({
            "model": "llama-3.1-8b-instant",
            "choices": [{"message": {"role": "assistant", "content": "  Try a wind-down routine.  "}}],
            "usage": {"prompt_tokens": 40, "completion_tokens": 8}
        })
        .to_string();
        let url = serve_once("200 OK", body, Duration::ZERO).await;
        let client = HostedChatClient::new(url, "test-key").unwrap();

        let response = client.complete(&request()).await.unwrap();
        assert_eq!(response.content, "Try a wind-down routine.");
        assert_eq!(response.usage.total_tokens, 48);
    }

    #[tokio::test]
    async fn test_complete_non_success_status() {
        let url = serve_once(
            "429 Too Many Requests",
            "{\"error\":\"rate limited\"}".to_string(),
            Duration::ZERO,
        )
        .await;
        let client = HostedChatClient::new(url, "test-key").unwrap();

        let err = client.complete(&request()).await.unwrap_err();
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_complete_malformed_body() {
        let url = serve_once("200 OK", "{\"unexpected\": true}".to_string(), Duration::ZERO).await;
        let client = HostedChatClient::new(url, "test-key").unwrap();

        assert!(client.complete(&request()).await.is_err());
    }

    #[tokio::test]
    async fn test_complete_empty_content() {
        let body = serde_json::json!({"choices": [{"message": {"content": "   "}}]}).to_string();
        let url = serve_once("200 OK", body, Duration::ZERO).await;
        let client = HostedChatClient::new(url, "test-key").unwrap();

        let err = client.complete(&request()).await.unwrap_err();
        assert!(err.to_string().contains("empty content"));
    }

    #[tokio::test]
    async fn test_complete_timeout() {
        let url = serve_once("200 OK", "{}".to_string(), Duration::from_secs(3)).await;
        let client = HostedChatClient::new(url, "test-key").unwrap();
        let req = request().with_timeout(Duration::from_millis(100));

        let err = client.complete(&req).await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
