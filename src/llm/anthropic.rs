//! Anthropic Messages API client.

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::ContentBlock;
use super::{Message, ModelClient, ModelTurn, ToolSchema};

const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Messages API.
///
/// Holds the model selection and system prompt for one agent; the transcript
/// and tool metadata arrive per call.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    system: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "<[ToolSchema]>::is_empty")]
    tools: &'a [ToolSchema],
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

impl AnthropicClient {
    pub fn new(api_key: String, model: String, max_tokens: u32, system: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: DEFAULT_API_URL.to_string(),
            api_key,
            model,
            max_tokens,
            system,
        }
    }

    /// Point the client at a different endpoint.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

#[async_trait]
impl ModelClient for AnthropicClient {
    async fn infer(
        &self,
        transcript: &[Message],
        tools: &[ToolSchema],
    ) -> anyhow::Result<ModelTurn> {
        debug!(
            model = %self.model,
            messages = transcript.len(),
            tools = tools.len(),
            "calling model"
        );

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: &self.system,
            messages: transcript,
            tools,
        };

        let response = self
            .http
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .context("model request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("model API returned {}: {}", status, body);
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .context("failed to parse model response")?;

        Ok(ModelTurn {
            content: parsed.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_model_and_messages() {
        let messages = vec![Message::user_text("hello")];
        let request = MessagesRequest {
            model: "claude-sonnet-4-20250514",
            max_tokens: 1024,
            system: "be helpful",
            messages: &messages,
            tools: &[],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "claude-sonnet-4-20250514");
        assert_eq!(value["max_tokens"], 1024);
        assert_eq!(value["system"], "be helpful");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"][0]["type"], "text");
        // Empty tool sets are omitted entirely rather than sent as [].
        assert!(value.get("tools").is_none());
    }

    #[test]
    fn request_advertises_tool_schemas() {
        let tools = vec![ToolSchema {
            name: "read_file".to_string(),
            description: "Read a file".to_string(),
            input_schema: json!({"type": "object"}),
        }];
        let request = MessagesRequest {
            model: "m",
            max_tokens: 1,
            system: "",
            messages: &[],
            tools: &tools,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["tools"][0]["name"], "read_file");
        assert_eq!(value["tools"][0]["input_schema"]["type"], "object");
        // An empty system prompt is omitted.
        assert!(value.get("system").is_none());
    }

    #[test]
    fn with_api_url_overrides_default_endpoint() {
        let client = AnthropicClient::new("key".into(), "model".into(), 16, String::new())
            .with_api_url("http://127.0.0.1:9999/v1/messages");
        assert_eq!(client.api_url, "http://127.0.0.1:9999/v1/messages");
    }

    #[test]
    fn response_parses_text_and_tool_use_blocks() {
        let parsed: MessagesResponse = serde_json::from_value(json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [
                {"type": "text", "text": "Checking."},
                {"type": "tool_use", "id": "toolu_01", "name": "list_files", "input": {"path": "."}}
            ],
            "stop_reason": "tool_use"
        }))
        .unwrap();
        assert_eq!(parsed.content.len(), 2);
        let turn = ModelTurn {
            content: parsed.content,
        };
        assert_eq!(turn.first_text(), Some("Checking."));
        let requests = turn.tool_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].name, "list_files");
    }
}
