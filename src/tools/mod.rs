//! Tool registry and the tool sets available to each agent.
//!
//! A tool is a pure function of name + input: it returns output text or an
//! error, and carries static metadata (name, description, input shape) that
//! is advertised to the model. The registry is fixed at agent construction.

mod agent_call;
mod docs;
mod fs;
mod terminal;

pub use agent_call::AskDocsAgent;
pub use docs::SearchCrateDocs;
pub use fs::{ListFiles, ReadFile, WriteFile};
pub use terminal::ExecuteCommand;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm::ToolSchema;

/// A single tool the model can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema of the tool's input object.
    fn input_schema(&self) -> Value;

    async fn execute(&self, args: Value, workspace: &Path) -> anyhow::Result<String>;
}

/// Fixed name-to-tool mapping owned by one agent.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self {
            tools: tools
                .into_iter()
                .map(|tool| (tool.name().to_string(), tool))
                .collect(),
        }
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// The metadata advertised to the model, in stable (name) order.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self
            .tools
            .values()
            .map(|tool| ToolSchema {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.input_schema(),
            })
            .collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Tool set for the coder agent.
pub fn coder_tools(docs_agent_url: &str) -> ToolRegistry {
    ToolRegistry::new(vec![
        Arc::new(ReadFile),
        Arc::new(WriteFile),
        Arc::new(ListFiles),
        Arc::new(ExecuteCommand),
        Arc::new(AskDocsAgent::new(docs_agent_url)),
    ])
}

/// Tool set for the documentation agent.
pub fn docs_tools() -> ToolRegistry {
    ToolRegistry::new(vec![Arc::new(SearchCrateDocs)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lookup_by_name() {
        let registry = docs_tools();
        assert!(registry.get("search_crate_docs").is_some());
        assert!(registry.get("delete_everything").is_none());
    }

    #[test]
    fn coder_registry_contains_expected_tools() {
        let registry = coder_tools("http://127.0.0.1:8081/docs");
        for name in [
            "read_file",
            "write_file",
            "list_files",
            "execute_command",
            "ask_docs_agent",
        ] {
            assert!(registry.get(name).is_some(), "missing tool: {}", name);
        }
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn schemas_are_sorted_by_name() {
        let registry = coder_tools("http://127.0.0.1:8081/docs");
        let names: Vec<_> = registry.schemas().into_iter().map(|s| s.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
