use hosted_agent_service::{
    AgentSpec, ImageFile, MessageRole, Run, RunError, RunStatus, ThreadMessage,
    ToolCallRequest, ToolDefinition, ToolOutput,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AgentObject {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ThreadObject {
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RunObject {
    pub id: String,
    pub status: String,
    pub required_action: Option<RequiredAction>,
    pub last_error: Option<LastError>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RequiredAction {
    pub submit_tool_outputs: Option<SubmitToolOutputs>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SubmitToolOutputs {
    pub tool_calls: Vec<ToolCallObject>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ToolCallObject {
    pub id: String,
    pub r#type: Option<String>,
    pub function: Option<FunctionCall>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FunctionCall {
    pub name: Option<String>,
    pub arguments: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LastError {
    pub code: Option<String>,
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MessageList {
    pub data: Vec<MessageObject>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MessageObject {
    pub role: String,
    pub content: Vec<ContentPart>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text {
        text: TextContent,
    },
    ImageFile {
        image_file: ImageFileContent,
    },
    /// A content kind this client doesn't render.
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TextContent {
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ImageFileContent {
    pub file_id: String,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateAgentRequest {
    model: String,
    name: String,
    instructions: String,
    tools: Vec<ToolPayload>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ToolPayload {
    Function { function: FunctionToolPayload },
    CodeInterpreter,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct FunctionToolPayload {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateMessageRequest {
    role: String,
    content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateRunRequest {
    assistant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    additional_instructions: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmitToolOutputsRequest {
    tool_outputs: Vec<ToolOutputPayload>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct ToolOutputPayload {
    tool_call_id: String,
    output: String,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_agent_request(spec: &AgentSpec) -> CreateAgentRequest {
    CreateAgentRequest {
        model: spec.model.clone(),
        name: spec.name.clone(),
        instructions: spec.instructions.clone(),
        tools: spec.tools.iter().map(create_tool).collect(),
    }
}

#[inline]
fn create_tool(tool: &ToolDefinition) -> ToolPayload {
    match tool {
        ToolDefinition::Function {
            name,
            description,
            parameters,
        } => ToolPayload::Function {
            function: FunctionToolPayload {
                name: name.clone(),
                description: description.clone(),
                parameters: parameters.clone(),
            },
        },
        ToolDefinition::CodeInterpreter => ToolPayload::CodeInterpreter,
    }
}

#[inline]
pub fn create_message_request(
    role: &MessageRole,
    content: &str,
) -> CreateMessageRequest {
    CreateMessageRequest {
        role: role.as_str().to_owned(),
        content: content.to_owned(),
    }
}

#[inline]
pub fn create_run_request(
    agent_id: &str,
    additional_instructions: Option<&str>,
) -> CreateRunRequest {
    CreateRunRequest {
        assistant_id: agent_id.to_owned(),
        additional_instructions: additional_instructions.map(str::to_owned),
    }
}

#[inline]
pub fn submit_tool_outputs_request(
    outputs: Vec<ToolOutput>,
) -> SubmitToolOutputsRequest {
    SubmitToolOutputsRequest {
        tool_outputs: outputs
            .into_iter()
            .map(|output| ToolOutputPayload {
                tool_call_id: output.call_id,
                output: output.output,
            })
            .collect(),
    }
}

pub fn parse_status(status: &str) -> RunStatus {
    match status {
        "queued" => RunStatus::Queued,
        "in_progress" => RunStatus::InProgress,
        "requires_action" => RunStatus::RequiresAction,
        "completed" => RunStatus::Completed,
        "failed" => RunStatus::Failed,
        "cancelled" => RunStatus::Cancelled,
        "expired" => RunStatus::Expired,
        other => RunStatus::Other(other.to_owned()),
    }
}

pub fn convert_run(run: RunObject) -> Run {
    let required_action = run
        .required_action
        .and_then(|action| action.submit_tool_outputs)
        .map(|outputs| {
            outputs
                .tool_calls
                .into_iter()
                .filter_map(convert_tool_call)
                .collect()
        })
        .unwrap_or_default();

    Run {
        id: run.id,
        status: parse_status(&run.status),
        required_action,
        last_error: run.last_error.map(|err| RunError {
            code: err.code.unwrap_or_else(|| "unknown".to_owned()),
            message: err.message.unwrap_or_default(),
        }),
    }
}

fn convert_tool_call(call: ToolCallObject) -> Option<ToolCallRequest> {
    if call.r#type.as_deref() != Some("function") {
        debug!("skipping unsupported tool call type: {:?}", call.r#type);
        return None;
    }
    let function = call.function?;
    let name = function.name?;
    let raw_arguments = function.arguments.unwrap_or_default();
    let arguments = if raw_arguments.is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(&raw_arguments).unwrap_or_else(|err| {
            warn!("failed to parse tool arguments: {err}");
            Value::Object(Default::default())
        })
    };
    Some(ToolCallRequest {
        id: call.id,
        name,
        arguments,
    })
}

pub fn parse_role(role: &str) -> MessageRole {
    match role {
        "user" => MessageRole::User,
        "assistant" => MessageRole::Assistant,
        other => MessageRole::Other(other.to_owned()),
    }
}

pub fn convert_messages(list: MessageList) -> Vec<ThreadMessage> {
    list.data
        .into_iter()
        .map(|message| {
            let mut text = String::new();
            let mut attachments = Vec::new();
            for part in message.content {
                match part {
                    ContentPart::Text { text: content } => {
                        if !text.is_empty() {
                            text.push('\n');
                        }
                        text.push_str(&content.value);
                    }
                    ContentPart::ImageFile { image_file } => {
                        attachments.push(ImageFile {
                            file_id: image_file.file_id,
                        });
                    }
                    ContentPart::Unknown => {}
                }
            }
            ThreadMessage {
                role: parse_role(&message.role),
                text,
                attachments,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_agent_request() {
        let spec = AgentSpec {
            name: "weather-assistant".to_owned(),
            instructions: "You are a helpful weather assistant.".to_owned(),
            model: "gpt-4o".to_owned(),
            tools: vec![
                ToolDefinition::Function {
                    name: "get_weather".to_owned(),
                    description: "Returns live weather.".to_owned(),
                    parameters: json!({
                        "type": "object",
                        "properties": {
                            "location": { "type": "string" }
                        }
                    }),
                },
                ToolDefinition::CodeInterpreter,
            ],
        };

        let payload = serde_json::to_value(create_agent_request(&spec)).unwrap();
        assert_eq!(
            payload,
            json!({
                "model": "gpt-4o",
                "name": "weather-assistant",
                "instructions": "You are a helpful weather assistant.",
                "tools": [
                    {
                        "type": "function",
                        "function": {
                            "name": "get_weather",
                            "description": "Returns live weather.",
                            "parameters": {
                                "type": "object",
                                "properties": {
                                    "location": { "type": "string" }
                                }
                            }
                        }
                    },
                    { "type": "code_interpreter" }
                ]
            })
        );
    }

    #[test]
    fn test_create_run_request_skips_absent_instructions() {
        let payload =
            serde_json::to_value(create_run_request("agent-123", None)).unwrap();
        assert_eq!(payload, json!({ "assistant_id": "agent-123" }));

        let payload = serde_json::to_value(create_run_request(
            "agent-123",
            Some("Mention the data source."),
        ))
        .unwrap();
        assert_eq!(
            payload,
            json!({
                "assistant_id": "agent-123",
                "additional_instructions": "Mention the data source."
            })
        );
    }

    #[test]
    fn test_convert_run_with_required_action() {
        let run: RunObject = serde_json::from_value(json!({
            "id": "run-789",
            "status": "requires_action",
            "required_action": {
                "type": "submit_tool_outputs",
                "submit_tool_outputs": {
                    "tool_calls": [
                        {
                            "id": "call-1",
                            "type": "function",
                            "function": {
                                "name": "get_weather",
                                "arguments": "{\"location\": \"Seattle\"}"
                            }
                        },
                        {
                            "id": "call-2",
                            "type": "code_interpreter"
                        }
                    ]
                }
            }
        }))
        .unwrap();

        let run = convert_run(run);
        assert_eq!(run.status, RunStatus::RequiresAction);
        // Non-function calls are skipped.
        assert_eq!(run.required_action.len(), 1);
        assert_eq!(run.required_action[0].name, "get_weather");
        assert_eq!(
            run.required_action[0].arguments,
            json!({ "location": "Seattle" })
        );
    }

    #[test]
    fn test_convert_run_with_unparseable_arguments() {
        let run: RunObject = serde_json::from_value(json!({
            "id": "run-789",
            "status": "requires_action",
            "required_action": {
                "submit_tool_outputs": {
                    "tool_calls": [{
                        "id": "call-1",
                        "type": "function",
                        "function": {
                            "name": "get_weather",
                            "arguments": "{not json"
                        }
                    }]
                }
            }
        }))
        .unwrap();

        let run = convert_run(run);
        assert_eq!(run.required_action[0].arguments, json!({}));
    }

    #[test]
    fn test_convert_failed_run() {
        let run: RunObject = serde_json::from_value(json!({
            "id": "run-789",
            "status": "failed",
            "last_error": {
                "code": "server_error",
                "message": "The server had an error."
            }
        }))
        .unwrap();

        let run = convert_run(run);
        assert_eq!(run.status, RunStatus::Failed);
        let last_error = run.last_error.unwrap();
        assert_eq!(last_error.code, "server_error");
        assert_eq!(last_error.message, "The server had an error.");
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        assert_eq!(
            parse_status("finalizing"),
            RunStatus::Other("finalizing".to_owned())
        );
    }

    #[test]
    fn test_convert_messages() {
        let list: MessageList = serde_json::from_value(json!({
            "data": [
                {
                    "id": "msg-1",
                    "role": "user",
                    "content": [
                        { "type": "text", "text": { "value": "Hi" } }
                    ]
                },
                {
                    "id": "msg-2",
                    "role": "assistant",
                    "content": [
                        { "type": "text", "text": { "value": "Here you go." } },
                        {
                            "type": "image_file",
                            "image_file": { "file_id": "file-1" }
                        },
                        { "type": "refusal" }
                    ]
                }
            ]
        }))
        .unwrap();

        let messages = convert_messages(list);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].text, "Hi");
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].text, "Here you go.");
        assert_eq!(messages[1].attachments.len(), 1);
        assert_eq!(messages[1].attachments[0].file_id, "file-1");
    }
}
