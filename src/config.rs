//! Configuration management for agent-relay.
//!
//! Configuration can be set via environment variables:
//! - `ANTHROPIC_API_KEY` - Required. Your Anthropic API key.
//! - `MODEL` - Optional. The model to use. Defaults to `claude-sonnet-4-20250514`.
//! - `MAX_TOKENS` - Optional. Maximum output tokens per inference call. Defaults to `1024`.
//! - `HOST` - Optional. Listener host for both agents. Defaults to `127.0.0.1`.
//! - `CODER_PORT` - Optional. Coder agent port. Defaults to `8080`.
//! - `DOCS_PORT` - Optional. Documentation agent port. Defaults to `8081`.
//! - `WORKSPACE_PATH` - Optional. Directory tools operate in. Defaults to the
//!   current directory.
//! - `DOCS_AGENT_URL` - Optional. Where the coder agent reaches the docs
//!   agent. Defaults to `http://127.0.0.1:8081/docs`.
//! - `CODER_TRANSPORT` - Optional. `console` or `http`. Defaults to `console`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Which transport the coder agent reads input from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Interactive console: one line in, one line out.
    Console,
    /// One-shot network request/response cycles via the bridge.
    Http,
}

/// Process configuration, fixed for the lifetime of both agents.
#[derive(Debug, Clone)]
pub struct Config {
    /// Anthropic API key
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// Maximum output tokens per inference call
    pub max_tokens: u32,

    /// Listener host for both agents
    pub host: String,

    /// Coder agent port
    pub coder_port: u16,

    /// Documentation agent port
    pub docs_port: u16,

    /// Workspace directory for file and command tools
    pub workspace_path: PathBuf,

    /// URL the coder agent's delegation tool posts queries to
    pub docs_agent_url: String,

    /// Transport the coder agent is driven by
    pub coder_transport: TransportKind,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `ANTHROPIC_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("ANTHROPIC_API_KEY".to_string()))?;

        let model =
            std::env::var("MODEL").unwrap_or_else(|_| "claude-sonnet-4-20250514".to_string());

        let max_tokens = std::env::var("MAX_TOKENS")
            .unwrap_or_else(|_| "1024".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_TOKENS".to_string(), format!("{}", e)))?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let coder_port = std::env::var("CODER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("CODER_PORT".to_string(), format!("{}", e)))?;

        let docs_port = std::env::var("DOCS_PORT")
            .unwrap_or_else(|_| "8081".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("DOCS_PORT".to_string(), format!("{}", e)))?;

        let workspace_path = std::env::var("WORKSPACE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        let docs_agent_url = std::env::var("DOCS_AGENT_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8081/docs".to_string());

        let coder_transport = std::env::var("CODER_TRANSPORT")
            .ok()
            .map(|v| {
                parse_transport(&v)
                    .map_err(|e| ConfigError::InvalidValue("CODER_TRANSPORT".to_string(), e))
            })
            .transpose()?
            .unwrap_or(TransportKind::Console);

        Ok(Self {
            api_key,
            model,
            max_tokens,
            host,
            coder_port,
            docs_port,
            workspace_path,
            docs_agent_url,
            coder_transport,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, model: String, workspace_path: PathBuf) -> Self {
        Self {
            api_key,
            model,
            max_tokens: 1024,
            host: "127.0.0.1".to_string(),
            coder_port: 8080,
            docs_port: 8081,
            workspace_path,
            docs_agent_url: "http://127.0.0.1:8081/docs".to_string(),
            coder_transport: TransportKind::Console,
        }
    }
}

fn parse_transport(value: &str) -> Result<TransportKind, String> {
    match value.trim().to_lowercase().as_str() {
        "console" | "cli" => Ok(TransportKind::Console),
        "http" | "network" => Ok(TransportKind::Http),
        other => Err(format!("expected 'console' or 'http', got: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_transport_accepts_known_values() {
        assert_eq!(parse_transport("console"), Ok(TransportKind::Console));
        assert_eq!(parse_transport("cli"), Ok(TransportKind::Console));
        assert_eq!(parse_transport("HTTP"), Ok(TransportKind::Http));
        assert_eq!(parse_transport(" network "), Ok(TransportKind::Http));
    }

    #[test]
    fn parse_transport_rejects_unknown_values() {
        assert!(parse_transport("grpc").is_err());
        assert!(parse_transport("").is_err());
    }

    #[test]
    fn config_new_uses_defaults() {
        let config = Config::new(
            "key".to_string(),
            "model-x".to_string(),
            PathBuf::from("/tmp"),
        );
        assert_eq!(config.coder_port, 8080);
        assert_eq!(config.docs_port, 8081);
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.coder_transport, TransportKind::Console);
    }
}
