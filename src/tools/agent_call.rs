//! Inter-agent delegation tool.
//!
//! The coder agent treats the documentation agent as just another tool: a
//! structured query goes out over its network boundary, free text comes back.

use std::path::Path;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;

/// Ask the documentation agent a question over its network boundary.
pub struct AskDocsAgent {
    url: String,
}

impl AskDocsAgent {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl Tool for AskDocsAgent {
    fn name(&self) -> &str {
        "ask_docs_agent"
    }

    fn description(&self) -> &str {
        "Ask the documentation agent to search for information. Use this when you need to find \
         documentation for a specific crate or function."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The query to send to the documentation agent"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value, _workspace: &Path) -> anyhow::Result<String> {
        let query = args["query"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'query' argument"))?;

        tracing::info!("Asking documentation agent: {}", query);

        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; AgentRelay/1.0)")
            .build()?;

        let response = client
            .post(&self.url)
            .json(&json!({ "query": query }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "documentation agent returned status {}",
                status
            ));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ask_docs_agent_unreachable_url_fails() {
        // Port 1 is never listening; the request errors rather than hanging.
        let tool = AskDocsAgent::new("http://127.0.0.1:1/docs");
        let result = tool
            .execute(json!({"query": "serde"}), Path::new("."))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn ask_docs_agent_requires_query_argument() {
        let tool = AskDocsAgent::new("http://127.0.0.1:1/docs");
        let result = tool.execute(json!({}), Path::new(".")).await;
        assert!(result.unwrap_err().to_string().contains("query"));
    }
}
