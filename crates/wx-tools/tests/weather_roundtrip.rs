//! Round-trip tests for the get_weather tool against a real endpoint
//!
//! Spawns the wx-api router on an ephemeral port and exercises the tool
//! end to end.

use serde_json::{json, Value as JsonValue};
use wx_core::Tool;
use wx_tools::GetWeatherTool;

/// Spawn the real endpoint router, returning its base URL
async fn spawn_endpoint() -> String {
    let app = wx_api::routes();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_weather_is_sunny_for_any_city() {
    let base_url = spawn_endpoint().await;
    let tool = GetWeatherTool::new(base_url);

    for city in ["Aruba", "Tokyo", "New York", "São Paulo"] {
        let result = tool.execute(json!({"city": city})).await.unwrap();
        assert!(!result.is_error);

        let body: JsonValue = serde_json::from_str(&result.output).unwrap();
        assert_eq!(body["city"], city);
        assert_eq!(body["condition"], "sunny");
    }
}

#[tokio::test]
async fn test_tool_output_matches_endpoint_body_exactly() {
    let base_url = spawn_endpoint().await;
    let tool = GetWeatherTool::new(base_url.clone());

    let result = tool.execute(json!({"city": "Aruba"})).await.unwrap();

    // Fetch the same operation directly and compare byte for byte.
    let direct = reqwest::Client::new()
        .post(format!("{}/tools/get_weather", base_url))
        .json(&json!({"city": "Aruba"}))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(result.output, direct);
}

#[tokio::test]
async fn test_endpoint_rejection_becomes_error_result() {
    let base_url = spawn_endpoint().await;
    let tool = GetWeatherTool::new(base_url);

    // Whitespace city passes the local guard but the endpoint rejects it.
    let result = tool.execute(json!({"city": " \t"})).await.unwrap();
    assert!(result.is_error);
    assert!(result.output.contains("400"));
}
