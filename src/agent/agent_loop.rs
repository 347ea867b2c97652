//! Core agent loop implementation.
//!
//! The loop cycles through four phases, with the transport's blocking read
//! as its only entry point for new input:
//!
//! ```text
//! AwaitingInput ──read input──▶ Inferring ──tool calls──▶ DispatchingTools
//!       ▲                        │    ▲                          │
//!       │                        │    └─────results fed back─────┘
//!       │                  no tool calls
//!       │                        ▼
//!       └───────write──────── Emitting
//! ```
//!
//! A transport read failure or a model failure aborts the loop and surfaces
//! to the caller; tool failures are fed back to the model as failed results
//! and the loop continues.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::llm::{Message, ModelClient};
use crate::tools::ToolRegistry;
use crate::transport::Transport;

use super::dispatch::dispatch_all;

/// One autonomous agent: loop, transport and tool set, fixed at construction
/// for the lifetime of the process.
pub struct Agent {
    name: String,
    llm: Arc<dyn ModelClient>,
    tools: Arc<ToolRegistry>,
    workspace: PathBuf,
    transport: Box<dyn Transport>,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        llm: Arc<dyn ModelClient>,
        tools: Arc<ToolRegistry>,
        workspace: PathBuf,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            name: name.into(),
            llm,
            tools,
            workspace,
            transport,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Drive the conversation until the transport closes or a fatal error
    /// occurs. There is no terminal state under normal operation.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let schemas = self.tools.schemas();
        let mut transcript: Vec<Message> = Vec::new();
        // False exactly for cycles generated by tool feedback.
        let mut take_input = true;

        loop {
            if take_input {
                let input = self.transport.read_input().await?;
                debug!(agent = %self.name, "received input");
                transcript.push(Message::user_text(input));
            }

            info!(agent = %self.name, "running inference");
            let turn = self.llm.infer(&transcript, &schemas).await?;

            // The model turn enters the transcript before dispatch; the
            // tool-result turn must sit immediately after it.
            transcript.push(Message::assistant(turn.content.clone()));

            let requests = turn.tool_requests();
            if requests.is_empty() {
                // Only the first text block is emitted; a turn carrying
                // several text blocks and no tool calls loses the rest.
                // Documented behavior, revisit only with a changed output
                // contract.
                let text = turn.first_text().unwrap_or_default().to_string();
                if let Err(e) = self.transport.write_output(&text).await {
                    // Write failures are advisory; the transport has already
                    // raised its completion signal.
                    warn!(agent = %self.name, "failed to write output: {}", e);
                }
                take_input = true;
            } else {
                info!(agent = %self.name, count = requests.len(), "dispatching tool calls");
                let outcomes = dispatch_all(&self.tools, &self.workspace, requests).await;
                transcript.push(Message::tool_results(
                    outcomes.into_iter().map(|o| o.into_block()).collect(),
                ));
                take_input = false;
            }
        }
    }
}
