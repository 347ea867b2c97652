//! Fan-out/fan-in execution of the tool calls in one model turn.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use crate::llm::{ContentBlock, ToolRequest};
use crate::tools::ToolRegistry;

/// Fixed message returned for a call whose tool name is not registered.
const TOOL_NOT_FOUND: &str = "Tool not found";

/// Outcome of one tool invocation, correlated by call id.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    pub id: String,
    pub content: String,
    pub is_error: bool,
}

impl ToolOutcome {
    /// The tool-result block fed back into the transcript.
    pub fn into_block(self) -> ContentBlock {
        ContentBlock::ToolResult {
            tool_use_id: self.id,
            content: self.content,
            is_error: self.is_error,
        }
    }
}

/// Run every request in the batch concurrently and return exactly one
/// outcome per request, no identifier missing or duplicated.
///
/// Each request runs as its own spawned task; the join point collects all of
/// them before returning, with no partial results. Requests are independent:
/// there is no ordering between calls in the same batch, and two tools
/// touching the same external state race with no defined winner. There is no
/// per-call timeout; a hung tool hangs the whole batch.
pub async fn dispatch_all(
    registry: &Arc<ToolRegistry>,
    workspace: &Path,
    requests: Vec<ToolRequest>,
) -> Vec<ToolOutcome> {
    let ids: Vec<String> = requests.iter().map(|r| r.id.clone()).collect();

    let handles: Vec<_> = requests
        .into_iter()
        .map(|request| {
            let registry = Arc::clone(registry);
            let workspace: PathBuf = workspace.to_path_buf();
            tokio::spawn(async move { execute_one(&registry, &workspace, request).await })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(ids.len());
    for (id, joined) in ids.into_iter().zip(join_all(handles).await) {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            // A panicking tool still yields a failed result for its call id.
            Err(e) => {
                warn!(call_id = %id, "tool task did not complete: {}", e);
                outcomes.push(ToolOutcome {
                    id,
                    content: format!("tool task did not complete: {}", e),
                    is_error: true,
                });
            }
        }
    }
    outcomes
}

/// Execute a single call: registry lookup, invocation, error capture.
async fn execute_one(
    registry: &ToolRegistry,
    workspace: &Path,
    request: ToolRequest,
) -> ToolOutcome {
    let Some(tool) = registry.get(&request.name) else {
        warn!(tool = %request.name, call_id = %request.id, "requested tool is not registered");
        return ToolOutcome {
            id: request.id,
            content: TOOL_NOT_FOUND.to_string(),
            is_error: true,
        };
    };

    info!(tool = %request.name, call_id = %request.id, "executing tool");
    match tool.execute(request.input, workspace).await {
        Ok(output) => ToolOutcome {
            id: request.id,
            content: output,
            is_error: false,
        },
        Err(e) => {
            warn!(tool = %request.name, call_id = %request.id, "tool failed: {}", e);
            ToolOutcome {
                id: request.id,
                content: e.to_string(),
                is_error: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::Tool;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::{Duration, Instant};

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echo the message back"
        }
        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
        async fn execute(&self, args: Value, _workspace: &Path) -> anyhow::Result<String> {
            Ok(args["message"].as_str().unwrap_or("").to_string())
        }
    }

    struct SleepTool {
        millis: u64,
    }

    #[async_trait]
    impl Tool for SleepTool {
        fn name(&self) -> &str {
            "sleep"
        }
        fn description(&self) -> &str {
            "Sleep for a fixed duration"
        }
        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
        async fn execute(&self, _args: Value, _workspace: &Path) -> anyhow::Result<String> {
            tokio::time::sleep(Duration::from_millis(self.millis)).await;
            Ok("done".to_string())
        }
    }

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn name(&self) -> &str {
            "failing"
        }
        fn description(&self) -> &str {
            "Always fails"
        }
        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
        async fn execute(&self, _args: Value, _workspace: &Path) -> anyhow::Result<String> {
            Err(anyhow::anyhow!("intentional failure"))
        }
    }

    /// Records whether it was ever invoked; used to prove the not-found path
    /// never reaches a registered tool.
    struct RecordingTool {
        invoked: Arc<AtomicBool>,
    }

    #[async_trait]
    impl Tool for RecordingTool {
        fn name(&self) -> &str {
            "recording"
        }
        fn description(&self) -> &str {
            "Records invocations"
        }
        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
        async fn execute(&self, _args: Value, _workspace: &Path) -> anyhow::Result<String> {
            self.invoked.store(true, Ordering::SeqCst);
            Ok("recorded".to_string())
        }
    }

    struct PanickingTool;

    #[async_trait]
    impl Tool for PanickingTool {
        fn name(&self) -> &str {
            "panicking"
        }
        fn description(&self) -> &str {
            "Panics on invocation"
        }
        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
        async fn execute(&self, _args: Value, _workspace: &Path) -> anyhow::Result<String> {
            panic!("tool blew up");
        }
    }

    fn request(id: &str, name: &str) -> ToolRequest {
        ToolRequest {
            id: id.to_string(),
            name: name.to_string(),
            input: json!({}),
        }
    }

    #[tokio::test]
    async fn one_outcome_per_request_matched_by_id() {
        let registry = Arc::new(ToolRegistry::new(vec![Arc::new(EchoTool)]));
        let requests = vec![
            ToolRequest {
                id: "call_1".to_string(),
                name: "echo".to_string(),
                input: json!({"message": "one"}),
            },
            ToolRequest {
                id: "call_2".to_string(),
                name: "echo".to_string(),
                input: json!({"message": "two"}),
            },
        ];

        let outcomes = dispatch_all(&registry, Path::new("."), requests).await;

        assert_eq!(outcomes.len(), 2);
        let ids: HashSet<_> = outcomes.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, HashSet::from(["call_1", "call_2"]));
        assert!(outcomes.iter().all(|o| !o.is_error));
    }

    #[tokio::test]
    async fn unknown_tool_yields_fixed_not_found_without_invoking_others() {
        let invoked = Arc::new(AtomicBool::new(false));
        let registry = Arc::new(ToolRegistry::new(vec![Arc::new(RecordingTool {
            invoked: Arc::clone(&invoked),
        })]));

        let outcomes = dispatch_all(
            &registry,
            Path::new("."),
            vec![request("call_1", "delete_everything")],
        )
        .await;

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].content, "Tool not found");
        assert!(outcomes[0].is_error);
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn tool_error_becomes_failed_outcome() {
        let registry = Arc::new(ToolRegistry::new(vec![Arc::new(FailingTool)]));

        let outcomes =
            dispatch_all(&registry, Path::new("."), vec![request("call_1", "failing")]).await;

        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_error);
        assert_eq!(outcomes[0].content, "intentional failure");
    }

    #[tokio::test]
    async fn panicking_tool_still_yields_an_outcome_for_its_id() {
        let registry = Arc::new(ToolRegistry::new(vec![
            Arc::new(PanickingTool) as Arc<dyn Tool>,
            Arc::new(EchoTool),
        ]));

        let outcomes = dispatch_all(
            &registry,
            Path::new("."),
            vec![request("boom", "panicking"), request("ok", "echo")],
        )
        .await;

        assert_eq!(outcomes.len(), 2);
        let boom = outcomes.iter().find(|o| o.id == "boom").unwrap();
        assert!(boom.is_error);
        let ok = outcomes.iter().find(|o| o.id == "ok").unwrap();
        assert!(!ok.is_error);
    }

    #[tokio::test]
    async fn batch_runs_concurrently_not_sequentially() {
        let registry = Arc::new(ToolRegistry::new(vec![
            Arc::new(SleepTool { millis: 100 }) as Arc<dyn Tool>,
        ]));
        let requests = vec![request("a", "sleep"), request("b", "sleep")];

        let started = Instant::now();
        let outcomes = dispatch_all(&registry, Path::new("."), requests).await;
        let elapsed = started.elapsed();

        assert_eq!(outcomes.len(), 2);
        // Two 100ms sleeps in parallel finish near the slower one, never near
        // the 200ms sum.
        assert!(
            elapsed < Duration::from_millis(190),
            "batch took {:?}, tools ran sequentially",
            elapsed
        );
    }

    #[tokio::test]
    async fn empty_batch_returns_no_outcomes() {
        let registry = Arc::new(ToolRegistry::new(vec![Arc::new(EchoTool)]));
        let outcomes = dispatch_all(&registry, Path::new("."), vec![]).await;
        assert!(outcomes.is_empty());
    }

    #[test]
    fn outcome_converts_into_tool_result_block() {
        let outcome = ToolOutcome {
            id: "call_9".to_string(),
            content: "output".to_string(),
            is_error: false,
        };
        assert_eq!(
            outcome.into_block(),
            ContentBlock::ToolResult {
                tool_use_id: "call_9".to_string(),
                content: "output".to_string(),
                is_error: false,
            }
        );
    }
}
