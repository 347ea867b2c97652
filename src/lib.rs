//! # agent-relay
//!
//! A pair of autonomous, tool-using agents behind interchangeable transports.
//!
//! This library provides:
//! - A turn-taking agent loop that feeds tool results back to the model
//! - Concurrent fan-out/fan-in execution of each model turn's tool calls
//! - A channel bridge that lets one-shot HTTP handlers drive the persistent
//!   loop
//!
//! ## Architecture
//!
//! Each agent follows the "tools in a loop" pattern:
//! 1. Read the next user input from the transport
//! 2. Call the model with the transcript and available tools
//! 3. Execute any requested tool calls concurrently, feed results back
//! 4. Repeat until the model answers in plain text, then emit it
//!
//! Agents are fully isolated from each other: each owns its transcript and
//! its transport channels. One agent can still consult another by carrying a
//! tool that posts to the other agent's network boundary.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use agent_relay::{agent, config::Config, llm::AnthropicClient, tools, transport};
//!
//! let config = Config::from_env()?;
//! let registry = Arc::new(tools::docs_tools());
//! let llm = Arc::new(AnthropicClient::new(
//!     config.api_key.clone(),
//!     config.model.clone(),
//!     config.max_tokens,
//!     agent::docs_system_prompt(&registry),
//! ));
//! let (transport, bridge) = transport::bridge();
//! let mut agent = agent::Agent::new(
//!     "docs",
//!     llm,
//!     registry,
//!     config.workspace_path.clone(),
//!     Box::new(transport),
//! );
//! agent.run().await?;
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod server;
pub mod tools;
pub mod transport;

pub use config::Config;
