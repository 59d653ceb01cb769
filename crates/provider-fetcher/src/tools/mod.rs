use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::errors::{ToolError, ToolResult};
use crate::models::tool::{Tool, ToolCall};

pub mod scrape;

/// A capability the assistant can drive through tool calls.
#[async_trait]
pub trait System: Send + Sync {
    /// Get the name of the system
    fn name(&self) -> &str;

    /// Get available tools
    fn tools(&self) -> &[Tool];

    /// Execute one of this system's tools. `Ok(None)` means the tool ran but
    /// produced nothing worth returning.
    async fn call(&self, tool_call: &ToolCall) -> ToolResult<Option<String>>;
}

/// Routes tool calls from the assistant run to the registered systems and
/// makes execution total: everything except an unknown tool name comes back
/// as a string the remote loop can digest.
#[derive(Default)]
pub struct Dispatcher {
    systems: Vec<Box<dyn System>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    pub fn add_system(&mut self, system: Box<dyn System>) {
        self.systems.push(system);
    }

    /// All tools across all systems.
    pub fn tools(&self) -> Vec<Tool> {
        self.systems
            .iter()
            .flat_map(|system| system.tools().iter().cloned())
            .collect()
    }

    /// The tool declarations sent when creating the assistant: one function
    /// spec per tool, plus the opaque code execution capability.
    pub fn assistant_tool_specs(&self) -> Vec<Value> {
        let mut specs: Vec<Value> = self
            .tools()
            .into_iter()
            .map(|tool| {
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name,
                        "description": tool.description,
                        "parameters": tool.input_schema,
                    }
                })
            })
            .collect();
        specs.push(json!({ "type": "code_interpreter" }));
        specs
    }

    /// Execute a named tool. Unknown tool names are the one failure allowed
    /// to propagate; execution errors and empty results become fixed strings.
    pub async fn dispatch(&self, call: &ToolCall) -> ToolResult<String> {
        let system = self
            .systems
            .iter()
            .find(|system| system.tools().iter().any(|tool| tool.name == call.name))
            .ok_or_else(|| ToolError::NotFound(call.name.clone()))?;

        info!(tool = %call.name, system = system.name(), "dispatching tool call");
        match system.call(call).await {
            Ok(Some(output)) if !output.is_empty() => Ok(output),
            Ok(_) => Ok(format!("No content returned from {}", call.name)),
            Err(ToolError::NotFound(name)) => Err(ToolError::NotFound(name)),
            Err(e) => {
                error!(tool = %call.name, error = %e, "tool execution failed");
                Ok(format!("Error occurred in {}: {}", call.name, e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct MockSystem {
        tools: Vec<Tool>,
    }

    impl MockSystem {
        fn new() -> Self {
            let schema = json!({
                "type": "object",
                "properties": {"message": {"type": "string"}},
                "required": ["message"]
            });
            Self {
                tools: vec![
                    Tool::new("echo", "Echoes back the input", schema.clone()),
                    Tool::new("empty", "Returns nothing", schema.clone()),
                    Tool::new("boom", "Always fails", schema),
                ],
            }
        }
    }

    #[async_trait]
    impl System for MockSystem {
        fn name(&self) -> &str {
            "mock"
        }

        fn tools(&self) -> &[Tool] {
            &self.tools
        }

        async fn call(&self, tool_call: &ToolCall) -> ToolResult<Option<String>> {
            match tool_call.name.as_str() {
                "echo" => Ok(Some(
                    tool_call.arguments["message"]
                        .as_str()
                        .unwrap_or("")
                        .to_string(),
                )),
                "empty" => Ok(None),
                "boom" => Err(ToolError::ExecutionError("kaboom".to_string())),
                other => Err(ToolError::NotFound(other.to_string())),
            }
        }
    }

    fn dispatcher() -> Dispatcher {
        let mut dispatcher = Dispatcher::new();
        dispatcher.add_system(Box::new(MockSystem::new()));
        dispatcher
    }

    #[tokio::test]
    async fn unknown_tool_propagates_lookup_failure() {
        let call = ToolCall::new("call_1", "unknownTool", json!({}));
        let err = dispatcher().dispatch(&call).await.unwrap_err();
        assert_eq!(err, ToolError::NotFound("unknownTool".to_string()));
    }

    #[tokio::test]
    async fn successful_tool_returns_its_output() {
        let call = ToolCall::new("call_1", "echo", json!({"message": "hi"}));
        let output = dispatcher().dispatch(&call).await.unwrap();
        assert_eq!(output, "hi");
    }

    #[tokio::test]
    async fn empty_result_becomes_placeholder_string() {
        let call = ToolCall::new("call_1", "empty", json!({"message": "hi"}));
        let output = dispatcher().dispatch(&call).await.unwrap();
        assert_eq!(output, "No content returned from empty");
    }

    #[tokio::test]
    async fn execution_failure_becomes_error_string() {
        let call = ToolCall::new("call_1", "boom", json!({"message": "hi"}));
        let output = dispatcher().dispatch(&call).await.unwrap();
        assert_eq!(output, "Error occurred in boom: Tool execution failed: kaboom");
    }

    #[test]
    fn assistant_tool_specs_include_code_interpreter() {
        let specs = dispatcher().assistant_tool_specs();
        assert_eq!(specs.len(), 4);
        assert_eq!(specs[0]["type"], "function");
        assert_eq!(specs[0]["function"]["name"], "echo");
        assert_eq!(specs[3], json!({ "type": "code_interpreter" }));
    }
}
