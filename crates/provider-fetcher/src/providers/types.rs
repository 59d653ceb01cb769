//! Serde views of the hosted assistant-run API objects, reduced to the
//! fields the conversation loop actually reads.
use serde::{Deserialize, Serialize};

use crate::errors::{ToolError, ToolResult};
use crate::models::message::Role;
use crate::models::tool::ToolCall;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_action: Option<RequiredAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredAction {
    pub submit_tool_outputs: SubmitToolOutputs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitToolOutputs {
    pub tool_calls: Vec<RunToolCall>,
}

/// A tool call as the run reports it: arguments still a JSON-encoded string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunToolCall {
    pub id: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

impl RunToolCall {
    /// Decode the argument string into a dispatchable call. Arguments that
    /// are not valid JSON become an invalid-parameters error the dispatcher
    /// renders rather than propagates.
    pub fn parse(&self) -> ToolResult<ToolCall> {
        let arguments = serde_json::from_str(&self.function.arguments).map_err(|e| {
            ToolError::InvalidParameters(format!(
                "could not interpret arguments for call {}: {e}",
                self.id
            ))
        })?;
        Ok(ToolCall::new(&self.id, &self.function.name, arguments))
    }
}

/// One message from the thread, newest-first when listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub id: String,
    pub role: Role,
    pub content: Vec<MessagePart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessagePart {
    Text { text: TextPart },
    ImageFile { image_file: FileRef },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPart {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    /// A sandbox path pointing at a generated file.
    FilePath { text: String, file_path: FileRef },
    /// A citation back into an uploaded file; carries no download.
    FileCitation { text: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRef {
    pub file_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn run_with_required_action_deserializes() {
        let run: Run = serde_json::from_value(json!({
            "id": "run_1",
            "status": "requires_action",
            "required_action": {
                "type": "submit_tool_outputs",
                "submit_tool_outputs": {
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "scrape_content",
                            "arguments": "{\"url\": \"https://example.com\"}"
                        }
                    }]
                }
            }
        }))
        .unwrap();

        assert_eq!(run.status, RunStatus::RequiresAction);
        let action = run.required_action.unwrap();
        let call = action.submit_tool_outputs.tool_calls[0].parse().unwrap();
        assert_eq!(call.name, "scrape_content");
        assert_eq!(call.arguments["url"], "https://example.com");
    }

    #[test]
    fn malformed_arguments_become_invalid_parameters() {
        let call = RunToolCall {
            id: "call_1".to_string(),
            function: FunctionCall {
                name: "scrape_content".to_string(),
                arguments: "not json".to_string(),
            },
        };
        let err = call.parse().unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
    }

    #[test]
    fn thread_message_with_annotations_deserializes() {
        let message: ThreadMessage = serde_json::from_value(json!({
            "id": "msg_1",
            "role": "assistant",
            "content": [
                {
                    "type": "text",
                    "text": {
                        "value": "Here is your file",
                        "annotations": [{
                            "type": "file_path",
                            "text": "sandbox:/mnt/data/providers.csv",
                            "start_index": 0,
                            "end_index": 10,
                            "file_path": {"file_id": "file-abc"}
                        }]
                    }
                },
                {
                    "type": "image_file",
                    "image_file": {"file_id": "file-img"}
                }
            ]
        }))
        .unwrap();

        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.content.len(), 2);
        match &message.content[0] {
            MessagePart::Text { text } => {
                assert_eq!(text.value, "Here is your file");
                assert!(matches!(
                    text.annotations[0],
                    Annotation::FilePath { .. }
                ));
            }
            other => panic!("expected text part, got {other:?}"),
        }
    }

    #[test]
    fn status_parses_snake_case() {
        let status: RunStatus = serde_json::from_value(json!("in_progress")).unwrap();
        assert_eq!(status, RunStatus::InProgress);
    }
}
