//! get_weather tool backed by the wx-api Tool Endpoint

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use wx_core::tool::SchemaBuilder;
use wx_core::{Error, Result, Tool, ToolResult};

/// Tool that fetches the current weather for a city from the Tool Endpoint
pub struct GetWeatherTool {
    client: Client,
    endpoint_url: String,
}

impl GetWeatherTool {
    /// Create a new tool targeting the given endpoint base URL
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            endpoint_url: endpoint_url.into(),
        }
    }

    /// Create with custom client (for testing)
    pub fn with_client(client: Client, endpoint_url: impl Into<String>) -> Self {
        Self {
            client,
            endpoint_url: endpoint_url.into(),
        }
    }

    /// Call the endpoint and return the response body verbatim
    ///
    /// The body is relayed to the model exactly as received, so it is
    /// never reparsed or reformatted here.
    async fn call_endpoint(&self, city: &str) -> Result<String> {
        let url = format!(
            "{}/tools/get_weather",
            self.endpoint_url.trim_end_matches('/')
        );

        tracing::info!(city = %city, "Calling weather endpoint");

        let response = self
            .client
            .post(&url)
            .json(&json!({ "city": city }))
            .send()
            .await
            .map_err(|e| Error::ToolExecution(format!("Weather endpoint request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::ToolExecution(format!("Failed to read endpoint response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::ToolExecution(format!(
                "Weather endpoint error: {}: {}",
                status, body
            )));
        }

        Ok(body)
    }
}

/// Weather input parameters
#[derive(Debug, Deserialize)]
struct WeatherInput {
    /// The name of the city to query
    city: String,
}

#[async_trait]
impl Tool for GetWeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Get the current weather information for a specified city."
    }

    fn input_schema(&self) -> JsonValue {
        SchemaBuilder::object_schema_with_descriptions(vec![(
            "city",
            "string",
            "The name of the city to get weather information for",
            true,
        )])
    }

    async fn execute(&self, input: JsonValue) -> Result<ToolResult> {
        let weather_input: WeatherInput = serde_json::from_value(input)
            .map_err(|e| Error::InvalidArgument(format!("Invalid input parameters: {}", e)))?;

        if weather_input.city.is_empty() {
            return Ok(ToolResult::error("City name must not be empty"));
        }

        match self.call_endpoint(&weather_input.city).await {
            Ok(body) => Ok(ToolResult::success(body)),
            Err(e) => Ok(ToolResult::error(format!("Failed to fetch weather: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_schema() {
        let tool = GetWeatherTool::new("http://localhost:8000");
        let schema = tool.input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["city"]["type"], "string");
        assert_eq!(schema["required"][0], "city");
    }

    #[test]
    fn test_input_parsing() {
        let input = json!({"city": "Aruba"});
        let parsed: WeatherInput = serde_json::from_value(input).unwrap();
        assert_eq!(parsed.city, "Aruba");
    }

    #[tokio::test]
    async fn test_execute_malformed_input() {
        let tool = GetWeatherTool::new("http://localhost:8000");
        let result = tool.execute(json!({"town": "Aruba"})).await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_execute_empty_city() {
        let tool = GetWeatherTool::new("http://localhost:8000");
        let result = tool.execute(json!({"city": ""})).await.unwrap();
        assert!(result.is_error);
        assert!(result.output.contains("empty"));
    }

    #[tokio::test]
    async fn test_execute_unreachable_endpoint() {
        // Nothing listens on this port; the failure must come back as an
        // error tool result, not an Err.
        let tool = GetWeatherTool::new("http://127.0.0.1:1");
        let result = tool.execute(json!({"city": "Aruba"})).await.unwrap();
        assert!(result.is_error);
        assert!(result.output.contains("Failed to fetch weather"));
    }
}
