//! Claude API types

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Message in conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: Vec<MessageContent>,
}

impl Message {
    /// Create a user message with text
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: vec![MessageContent::Text { text: text.into() }],
        }
    }

    /// Create an assistant message with text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: vec![MessageContent::Text { text: text.into() }],
        }
    }

    /// Create a user message carrying tool results
    pub fn tool_results(results: Vec<MessageContent>) -> Self {
        Self {
            role: "user".to_string(),
            content: results,
        }
    }

    /// Get text content from message
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| {
                if let MessageContent::Text { text } = c {
                    Some(text.clone())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Content block in a message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: String },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(default)]
        is_error: bool,
    },
}

/// Tool definition for Claude API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Messages API request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
}

/// Messages API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub response_type: String,
    pub role: String,
    pub content: Vec<MessageContent>,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequence: Option<String>,
    pub stop_reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// A model-issued instruction to invoke a named tool with arguments
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
    pub id: String,
    pub name: String,
    pub input: serde_json::Value,
}

/// What the model decided to do with a turn
///
/// Either the turn is finished with a text answer, or the model wants
/// one or more tools executed before it can answer.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnDecision {
    FinalAnswer(String),
    ToolRequests(Vec<ToolRequest>),
}

impl MessagesResponse {
    /// Extract all text blocks joined with newlines
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| {
                if let MessageContent::Text { text } = c {
                    Some(text.clone())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Interpret the response as a turn decision
    ///
    /// A `tool_use` stop reason with no tool_use blocks degrades to a
    /// final answer rather than looping forever.
    pub fn decision(&self) -> Result<TurnDecision> {
        match self.stop_reason.as_str() {
            "end_turn" | "stop_sequence" | "stop" => {
                Ok(TurnDecision::FinalAnswer(self.text_content()))
            }
            "tool_use" | "tool_calls" => {
                let requests: Vec<ToolRequest> = self
                    .content
                    .iter()
                    .filter_map(|c| {
                        if let MessageContent::ToolUse { id, name, input } = c {
                            Some(ToolRequest {
                                id: id.clone(),
                                name: name.clone(),
                                input: input.clone(),
                            })
                        } else {
                            None
                        }
                    })
                    .collect();

                if requests.is_empty() {
                    Ok(TurnDecision::FinalAnswer(self.text_content()))
                } else {
                    Ok(TurnDecision::ToolRequests(requests))
                }
            }
            other => Err(Error::ModelApi(format!("Unknown stop_reason: {}", other))),
        }
    }
}

/// Builder for creating messages requests
pub struct MessagesRequestBuilder {
    model: String,
    max_tokens: u64,
    system: Option<String>,
    messages: Vec<Message>,
    tools: Vec<ToolDefinition>,
}

impl MessagesRequestBuilder {
    pub fn new(model: String) -> Self {
        Self {
            model,
            max_tokens: 4096,
            system: None,
            messages: vec![],
            tools: vec![],
        }
    }

    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn max_tokens(mut self, max_tokens: u64) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn user(mut self, text: impl Into<String>) -> Self {
        self.messages.push(Message::user(text));
        self
    }

    pub fn assistant(mut self, text: impl Into<String>) -> Self {
        self.messages.push(Message::assistant(text));
        self
    }

    pub fn tool(mut self, tool: ToolDefinition) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn build(self) -> MessagesRequest {
        MessagesRequest {
            model: self.model,
            max_tokens: self.max_tokens,
            system: self.system,
            messages: self.messages,
            tools: if self.tools.is_empty() {
                None
            } else {
                Some(self.tools)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(stop_reason: &str, content: Vec<MessageContent>) -> MessagesResponse {
        MessagesResponse {
            id: "msg_01".to_string(),
            response_type: "message".to_string(),
            role: "assistant".to_string(),
            content,
            model: "claude-sonnet-4-20250514".to_string(),
            stop_sequence: None,
            stop_reason: stop_reason.to_string(),
            usage: None,
        }
    }

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, "user");
        assert_eq!(msg.text_content(), "Hello");
    }

    #[test]
    fn test_message_content_serialization() {
        let content = MessageContent::ToolUse {
            id: "toolu_01".to_string(),
            name: "get_weather".to_string(),
            input: json!({"city": "Aruba"}),
        };
        let serialized = serde_json::to_string(&content).unwrap();
        assert!(serialized.contains(r#""type":"tool_use""#));
        assert!(serialized.contains(r#""name":"get_weather""#));
    }

    #[test]
    fn test_tool_result_is_error_defaults_false() {
        let json_str = r#"{"type":"tool_result","tool_use_id":"toolu_01","content":"ok"}"#;
        let content: MessageContent = serde_json::from_str(json_str).unwrap();
        match content {
            MessageContent::ToolResult { is_error, .. } => assert!(!is_error),
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[test]
    fn test_decision_end_turn() {
        let resp = response(
            "end_turn",
            vec![MessageContent::Text {
                text: "It is sunny in Aruba.".to_string(),
            }],
        );
        assert_eq!(
            resp.decision().unwrap(),
            TurnDecision::FinalAnswer("It is sunny in Aruba.".to_string())
        );
    }

    #[test]
    fn test_decision_tool_use() {
        let resp = response(
            "tool_use",
            vec![
                MessageContent::Text {
                    text: "Let me check.".to_string(),
                },
                MessageContent::ToolUse {
                    id: "toolu_01".to_string(),
                    name: "get_weather".to_string(),
                    input: json!({"city": "Aruba"}),
                },
            ],
        );
        match resp.decision().unwrap() {
            TurnDecision::ToolRequests(requests) => {
                assert_eq!(requests.len(), 1);
                assert_eq!(requests[0].name, "get_weather");
                assert_eq!(requests[0].input, json!({"city": "Aruba"}));
            }
            other => panic!("unexpected decision: {:?}", other),
        }
    }

    #[test]
    fn test_decision_tool_use_without_blocks_is_final() {
        let resp = response(
            "tool_use",
            vec![MessageContent::Text {
                text: "nothing to run".to_string(),
            }],
        );
        assert_eq!(
            resp.decision().unwrap(),
            TurnDecision::FinalAnswer("nothing to run".to_string())
        );
    }

    #[test]
    fn test_decision_unknown_stop_reason() {
        let resp = response("max_tokens", vec![]);
        assert!(matches!(resp.decision(), Err(Error::ModelApi(_))));
    }

    #[test]
    fn test_request_builder() {
        let request = MessagesRequestBuilder::new("claude-sonnet-4-20250514".to_string())
            .system("You are helpful.")
            .max_tokens(1024)
            .user("What is the weather in Aruba?")
            .tool(ToolDefinition::new(
                "get_weather",
                "Get current weather for a city",
                json!({"type": "object"}),
            ))
            .build();

        assert_eq!(request.max_tokens, 1024);
        assert_eq!(request.system.as_deref(), Some("You are helpful."));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.tools.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_request_builder_no_tools() {
        let request = MessagesRequestBuilder::new("claude-sonnet-4-20250514".to_string())
            .user("Hello")
            .build();
        assert!(request.tools.is_none());
    }
}
