use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::models::tool::ToolOutput;
use crate::providers::types::{Run, ThreadMessage};

/// The hosted assistant-run API surface the conversation loop depends on.
/// One real implementation (OpenAI Assistants v2) plus a scripted mock for
/// tests.
#[async_trait]
pub trait AssistantProvider: Send + Sync {
    /// Create a remote assistant and return its identifier.
    async fn create_assistant(
        &self,
        name: &str,
        instructions: &str,
        model: &str,
        tools: &[Value],
    ) -> Result<String>;

    /// Create a new conversation thread and return its identifier.
    async fn create_thread(&self) -> Result<String>;

    /// Append a user message to the thread.
    async fn add_user_message(&self, thread_id: &str, text: &str) -> Result<()>;

    /// Start a run of the assistant against the thread.
    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run>;

    /// Poll the current state of a run.
    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;

    /// Submit one batch of tool outputs for a run that requires action.
    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutput],
    ) -> Result<Run>;

    /// The single most recent message in the thread, if any.
    async fn latest_message(&self, thread_id: &str) -> Result<Option<ThreadMessage>>;

    /// Download the raw bytes of a generated file.
    async fn file_content(&self, file_id: &str) -> Result<Vec<u8>>;
}
