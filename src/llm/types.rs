//! Conversation data model shared by the agent loop and the model client.
//!
//! A transcript is an ordered sequence of role-tagged messages whose content
//! is a list of blocks (free text, tool-use requests, tool results), mirroring
//! the Messages API wire format so the same types serialize straight into
//! requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who produced a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One content block within a transcript message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "tool_use")]
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    #[serde(rename = "tool_result")]
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(default)]
        is_error: bool,
    },
}

/// A single transcript message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    /// A user message holding plain input text.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// The user-role message that feeds one turn's tool results back.
    ///
    /// Must immediately follow the assistant turn that issued the matching
    /// tool-use blocks and carry exactly one result per issued call id.
    pub fn tool_results(results: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            content: results,
        }
    }

    /// The assistant message recording a completed model turn.
    pub fn assistant(content: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::Assistant,
            content,
        }
    }
}

/// A tool invocation the model requested, correlated by call id.
///
/// Produced by the model client, consumed exactly once by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
    pub id: String,
    pub name: String,
    pub input: Value,
}

/// One model turn: the ordered content blocks of the assistant response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelTurn {
    pub content: Vec<ContentBlock>,
}

impl ModelTurn {
    /// Tool invocation requests in this turn, in issuance order.
    pub fn tool_requests(&self) -> Vec<ToolRequest> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse { id, name, input } => Some(ToolRequest {
                    id: id.clone(),
                    name: name.clone(),
                    input: input.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    /// The first text block, if any.
    ///
    /// Turns with several text blocks and no tool calls are emitted as just
    /// this first block (see `Agent::run`).
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Static tool metadata advertised to the model.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}
