//! The conversation loop: send a user message, drive the run to completion,
//! and collect the assistant's reply along with any generated files.
use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::{debug, warn};

use crate::models::message::Role;
use crate::models::tool::ToolOutput;
use crate::providers::base::AssistantProvider;
use crate::providers::types::{Annotation, MessagePart, Run, RunStatus, RunToolCall};
use crate::tools::Dispatcher;

const NO_RESPONSE: &str = "Error: No assistant response";

/// A file the assistant produced during a turn, already downloaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// The assistant's answer to one user message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    pub text: String,
    pub files: Vec<Attachment>,
    pub images: Vec<Attachment>,
}

pub struct Agent {
    provider: Box<dyn AssistantProvider>,
    dispatcher: Dispatcher,
    assistant_id: String,
    thread_id: String,
    poll_interval: Duration,
}

impl Agent {
    /// Open a fresh thread against an existing assistant.
    pub async fn connect(
        provider: Box<dyn AssistantProvider>,
        dispatcher: Dispatcher,
        assistant_id: String,
    ) -> Result<Self> {
        let thread_id = provider.create_thread().await?;
        Ok(Self {
            provider,
            dispatcher,
            assistant_id,
            thread_id,
            poll_interval: Duration::from_secs(1),
        })
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Send one user message and drive the resulting run until it completes,
    /// executing tool calls as the run requires them.
    pub async fn reply(&self, text: &str) -> Result<Reply> {
        self.provider
            .add_user_message(&self.thread_id, text)
            .await?;
        let mut run = self
            .provider
            .create_run(&self.thread_id, &self.assistant_id)
            .await?;

        loop {
            match run.status {
                RunStatus::Queued | RunStatus::InProgress => {
                    tokio::time::sleep(self.poll_interval).await;
                    run = self.provider.retrieve_run(&self.thread_id, &run.id).await?;
                }
                RunStatus::RequiresAction => {
                    run = self.handle_required_action(&run).await?;
                }
                RunStatus::Completed => break,
                status => {
                    return Err(anyhow!("run {} ended with status {status:?}", run.id));
                }
            }
        }

        self.collect_reply().await
    }

    async fn handle_required_action(&self, run: &Run) -> Result<Run> {
        let calls: &[RunToolCall] = run
            .required_action
            .as_ref()
            .map(|action| action.submit_tool_outputs.tool_calls.as_slice())
            .unwrap_or_default();

        let mut outputs = Vec::with_capacity(calls.len());
        for call in calls {
            let text = match call.parse() {
                Ok(parsed) => {
                    debug!(tool = %parsed.name, id = %parsed.id, "dispatching tool call");
                    self.dispatcher.dispatch(&parsed).await?
                }
                Err(e) => format!("Error occurred in {}: {e}", call.function.name),
            };
            // The run API expects each output as a JSON string value.
            outputs.push(ToolOutput::new(&call.id, serde_json::to_string(&text)?));
        }

        Ok(self
            .provider
            .submit_tool_outputs(&self.thread_id, &run.id, &outputs)
            .await?)
    }

    async fn collect_reply(&self) -> Result<Reply> {
        let Some(message) = self.provider.latest_message(&self.thread_id).await? else {
            return Ok(Reply {
                text: NO_RESPONSE.to_string(),
                ..Default::default()
            });
        };
        if message.role != Role::Assistant {
            warn!("run completed but the newest thread message is not from the assistant");
            return Ok(Reply {
                text: NO_RESPONSE.to_string(),
                ..Default::default()
            });
        }

        let mut reply = Reply::default();
        for part in &message.content {
            match part {
                MessagePart::Text { text } => {
                    reply.text.push_str(&text.value);
                    for annotation in &text.annotations {
                        if let Annotation::FilePath { text, file_path } = annotation {
                            let file_name = text
                                .rsplit('/')
                                .next()
                                .unwrap_or(text.as_str())
                                .to_string();
                            let bytes = self.provider.file_content(&file_path.file_id).await?;
                            reply.files.push(Attachment { file_name, bytes });
                        }
                    }
                }
                MessagePart::ImageFile { image_file } => {
                    let file_name = format!("{}.png", image_file.file_id);
                    let bytes = self.provider.file_content(&image_file.file_id).await?;
                    reply
                        .text
                        .push_str(&format!("[Image generated: {file_name}]\n"));
                    reply.images.push(Attachment { file_name, bytes });
                }
            }
        }
        Ok(reply)
    }
}
