//! System prompt templates for the agents.

use crate::tools::ToolRegistry;

/// System prompt for the coder agent.
pub fn coder_system_prompt(tools: &ToolRegistry) -> String {
    build_system_prompt(
        "You are a coding assistant working in the user's workspace. Use your tools to inspect \
         and modify files, run commands, and consult the documentation agent when you need \
         library information.",
        tools,
    )
}

/// System prompt for the documentation agent.
pub fn docs_system_prompt(tools: &ToolRegistry) -> String {
    build_system_prompt(
        "You are a documentation assistant. Answer queries about libraries and their APIs by \
         looking up the relevant crate documentation and summarizing what you find.",
        tools,
    )
}

/// Build a system prompt from a role description and the agent's tool set.
fn build_system_prompt(role: &str, tools: &ToolRegistry) -> String {
    let tool_descriptions = tools
        .schemas()
        .iter()
        .map(|t| format!("- **{}**: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"{role}

## Your Tools

{tool_descriptions}

## Guidelines

1. **Use tools rather than guessing** - Read files and check state before answering.

2. **Call independent tools in parallel** - Whenever you perform multiple independent operations, issue all the relevant tool calls in one turn rather than sequentially. For example, when reading three files, request all three reads at once.

3. **React to tool failures** - A failed tool result describes what went wrong; adjust and retry or explain the problem instead of giving up silently.

4. **Answer in plain text when done** - Once you have what you need, reply with the final answer and no further tool calls."#,
        role = role,
        tool_descriptions = tool_descriptions
    )
}
