use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

use super::base::AssistantProvider;
use super::types::{Run, ThreadMessage};
use crate::models::tool::ToolOutput;

#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    pub host: String,
    pub api_key: String,
}

impl OpenAiProviderConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            host: "https://api.openai.com".to_string(),
            api_key: api_key.into(),
        }
    }
}

/// Assistants v2 client over plain reqwest.
pub struct OpenAiAssistantProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

impl OpenAiAssistantProvider {
    pub fn new(config: OpenAiProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600))
            .build()?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.host.trim_end_matches('/'), path)
    }

    fn with_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("OpenAI-Beta", "assistants=v2")
    }

    async fn post(&self, path: &str, payload: Value) -> Result<Value> {
        debug!(path, "assistant api post");
        let response = self
            .with_headers(self.client.post(self.url(path)))
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => Err(anyhow!("request to {path} failed: {status}")),
        }
    }

    async fn get(&self, path: &str) -> Result<Value> {
        debug!(path, "assistant api get");
        let response = self
            .with_headers(self.client.get(self.url(path)))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => Err(anyhow!("request to {path} failed: {status}")),
        }
    }
}

#[async_trait]
impl AssistantProvider for OpenAiAssistantProvider {
    async fn create_assistant(
        &self,
        name: &str,
        instructions: &str,
        model: &str,
        tools: &[Value],
    ) -> Result<String> {
        let response = self
            .post(
                "/v1/assistants",
                json!({
                    "name": name,
                    "instructions": instructions,
                    "model": model,
                    "tools": tools,
                }),
            )
            .await?;

        response["id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("assistant creation response carried no id"))
    }

    async fn create_thread(&self) -> Result<String> {
        let response = self.post("/v1/threads", json!({})).await?;
        response["id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("thread creation response carried no id"))
    }

    async fn add_user_message(&self, thread_id: &str, text: &str) -> Result<()> {
        self.post(
            &format!("/v1/threads/{thread_id}/messages"),
            json!({ "role": "user", "content": text }),
        )
        .await?;
        Ok(())
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run> {
        let response = self
            .post(
                &format!("/v1/threads/{thread_id}/runs"),
                json!({ "assistant_id": assistant_id }),
            )
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        let response = self
            .get(&format!("/v1/threads/{thread_id}/runs/{run_id}"))
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutput],
    ) -> Result<Run> {
        let response = self
            .post(
                &format!("/v1/threads/{thread_id}/runs/{run_id}/submit_tool_outputs"),
                json!({ "tool_outputs": outputs }),
            )
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    async fn latest_message(&self, thread_id: &str) -> Result<Option<ThreadMessage>> {
        let response = self
            .get(&format!("/v1/threads/{thread_id}/messages?limit=1"))
            .await?;
        let Some(first) = response["data"].as_array().and_then(|data| data.first()) else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(first.clone())?))
    }

    async fn file_content(&self, file_id: &str) -> Result<Vec<u8>> {
        let response = self
            .with_headers(self.client.get(self.url(&format!("/v1/files/{file_id}/content"))))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.bytes().await?.to_vec()),
            status => Err(anyhow!("file download for {file_id} failed: {status}")),
        }
    }
}
