//! Claude API HTTP client and the per-turn tool loop

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::tool::{ToolManager, ToolResult};

use super::types::*;

/// Claude Messages API client
#[derive(Clone)]
pub struct ClaudeClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ClaudeClient {
    /// Create a new client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(Error::Http)?;

        let base_url = config
            .llm
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.anthropic.com/v1".to_string());

        Ok(Self {
            client,
            api_key: config.llm.api_key.clone(),
            model: config.llm.model.clone(),
            base_url,
        })
    }

    /// Create with custom base URL (for testing or custom endpoints)
    pub fn with_base_url(config: &Config, base_url: String) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.base_url = base_url;
        Ok(client)
    }

    /// Send a message to the Claude API
    pub async fn messages(&self, request: MessagesRequest) -> Result<MessagesResponse> {
        let url = format!("{}/messages", self.base_url);

        debug!("Sending request to Claude API: {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            warn!("Claude API error: {} - {}", status, body);
            return Err(Error::ModelApi(format!("{}: {}", status, body)));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body)
            .map_err(|e| Error::ModelApi(format!("Failed to parse response: {} - {}", e, body)))?;

        info!(
            "Claude API response: stop_reason={:?}, tokens={}",
            parsed.stop_reason,
            parsed.usage.as_ref().map(|u| u.output_tokens).unwrap_or(0)
        );

        Ok(parsed)
    }

    /// Create a messages request builder
    pub fn request_builder(&self) -> MessagesRequestBuilder {
        MessagesRequestBuilder::new(self.model.clone())
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one user turn against the model, executing tools until the
    /// model produces a final answer.
    ///
    /// The assistant tool_use message and the tool results are appended to
    /// `messages` as the loop runs, so the caller's history reflects the
    /// full exchange. A tool name not registered in `tool_manager` aborts
    /// the turn with [`Error::UnknownTool`] before any tool executes.
    pub async fn run_turn(
        &self,
        messages: &mut Vec<Message>,
        system: &str,
        tool_manager: &ToolManager,
        max_iterations: usize,
    ) -> Result<String> {
        let mut iterations = 0;

        loop {
            iterations += 1;
            if iterations > max_iterations {
                return Ok(
                    "Maximum tool iterations reached. Please retry with a simpler request."
                        .to_string(),
                );
            }

            let request = MessagesRequest {
                model: self.model.clone(),
                max_tokens: 4096,
                system: Some(system.to_string()),
                messages: messages.clone(),
                tools: Some(tool_manager.definitions()),
            };

            let response = self.messages(request).await?;

            match response.decision()? {
                TurnDecision::FinalAnswer(text) => return Ok(text),
                TurnDecision::ToolRequests(requests) => {
                    // Reject the whole batch before executing anything, so an
                    // undeclared tool name never reaches an endpoint.
                    for request in &requests {
                        if !tool_manager.contains(&request.name) {
                            return Err(Error::UnknownTool(request.name.clone()));
                        }
                    }

                    // Add assistant message with tool_use
                    messages.push(Message {
                        role: "assistant".to_string(),
                        content: response.content.clone(),
                    });

                    // Execute tools and collect results
                    let mut tool_results = Vec::new();
                    for request in &requests {
                        info!("Executing tool: {} with input: {:?}", request.name, request.input);

                        let result = match tool_manager
                            .execute(&request.name, request.input.clone())
                            .await
                        {
                            Ok(result) => result,
                            Err(e) => ToolResult::error(format!("Tool execution error: {}", e)),
                        };

                        tool_results.push(MessageContent::ToolResult {
                            tool_use_id: request.id.clone(),
                            content: result.output,
                            is_error: result.is_error,
                        });
                    }

                    // Add user message with tool_results
                    messages.push(Message::tool_results(tool_results));
                }
            }
        }
    }
}
