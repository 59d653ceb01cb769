use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use super::base::AssistantProvider;
use super::types::{Run, ThreadMessage};
use crate::models::tool::ToolOutput;

/// Scripted provider for agent tests. Each call that advances a run pops
/// the next `Run` off the front of the script.
pub struct MockProvider {
    runs: Mutex<VecDeque<Run>>,
    final_message: Mutex<Option<ThreadMessage>>,
    files: Mutex<HashMap<String, Vec<u8>>>,
    pub events: Mutex<Vec<String>>,
    pub submitted_batches: Mutex<Vec<Vec<ToolOutput>>>,
    pub created_assistants: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(runs: Vec<Run>) -> Self {
        Self {
            runs: Mutex::new(runs.into()),
            final_message: Mutex::new(None),
            files: Mutex::new(HashMap::new()),
            events: Mutex::new(Vec::new()),
            submitted_batches: Mutex::new(Vec::new()),
            created_assistants: Mutex::new(Vec::new()),
        }
    }

    pub fn with_final_message(self, message: ThreadMessage) -> Self {
        *self.final_message.lock().unwrap() = Some(message);
        self
    }

    pub fn with_file(self, file_id: &str, bytes: Vec<u8>) -> Self {
        self.files.lock().unwrap().insert(file_id.to_string(), bytes);
        self
    }

    fn record(&self, event: &str) {
        self.events.lock().unwrap().push(event.to_string());
    }

    fn next_run(&self) -> Result<Run> {
        self.runs
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted runs remaining"))
    }
}

#[async_trait]
impl AssistantProvider for MockProvider {
    async fn create_assistant(
        &self,
        name: &str,
        _instructions: &str,
        _model: &str,
        _tools: &[Value],
    ) -> Result<String> {
        self.record("create_assistant");
        self.created_assistants.lock().unwrap().push(name.to_string());
        Ok("asst_mock".to_string())
    }

    async fn create_thread(&self) -> Result<String> {
        self.record("create_thread");
        Ok("thread_mock".to_string())
    }

    async fn add_user_message(&self, _thread_id: &str, _text: &str) -> Result<()> {
        self.record("add_message");
        Ok(())
    }

    async fn create_run(&self, _thread_id: &str, _assistant_id: &str) -> Result<Run> {
        self.record("create_run");
        self.next_run()
    }

    async fn retrieve_run(&self, _thread_id: &str, _run_id: &str) -> Result<Run> {
        self.record("retrieve_run");
        self.next_run()
    }

    async fn submit_tool_outputs(
        &self,
        _thread_id: &str,
        _run_id: &str,
        outputs: &[ToolOutput],
    ) -> Result<Run> {
        self.record("submit_tool_outputs");
        self.submitted_batches.lock().unwrap().push(outputs.to_vec());
        self.next_run()
    }

    async fn latest_message(&self, _thread_id: &str) -> Result<Option<ThreadMessage>> {
        self.record("latest_message");
        Ok(self.final_message.lock().unwrap().clone())
    }

    async fn file_content(&self, file_id: &str) -> Result<Vec<u8>> {
        self.record("file_content");
        self.files
            .lock()
            .unwrap()
            .get(file_id)
            .cloned()
            .ok_or_else(|| anyhow!("unknown file: {file_id}"))
    }
}
