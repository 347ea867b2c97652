//! Model client boundary.
//!
//! The agent loop talks to the model through the [`ModelClient`] trait: full
//! transcript plus advertised tool metadata in, one model turn out. The
//! production implementation is [`AnthropicClient`]; tests substitute scripted
//! doubles.

mod anthropic;
mod types;

pub use anthropic::AnthropicClient;
pub use types::{ContentBlock, Message, ModelTurn, Role, ToolRequest, ToolSchema};

use async_trait::async_trait;

/// Produces the model's next turn for a transcript.
///
/// Any transport or protocol error is propagated unchanged; the agent loop
/// treats it as fatal and does not retry.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn infer(
        &self,
        transcript: &[Message],
        tools: &[ToolSchema],
    ) -> anyhow::Result<ModelTurn>;
}
