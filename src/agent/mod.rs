//! Agent module - the conversational loop and its tool dispatch.
//!
//! An agent repeatedly reads input from its transport, calls the model,
//! executes any requested tool calls concurrently, feeds the results back,
//! and emits the model's eventual plain-text answer.

mod agent_loop;
mod dispatch;
mod prompt;

pub use agent_loop::Agent;
pub use dispatch::{dispatch_all, ToolOutcome};
pub use prompt::{coder_system_prompt, docs_system_prompt};
