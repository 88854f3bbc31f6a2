//! HTTP handlers for the weather Tool Endpoint
//!
//! One operation: get current weather for a named city. The condition is
//! fixed; the handler's only failure mode is malformed input.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crate::error::ApiError;

/// The one weather condition this endpoint ever reports
pub const CONDITION: &str = "sunny";

/// Weather request payload
#[derive(Debug, Deserialize)]
pub struct WeatherRequest {
    /// City name to query
    pub city: String,
}

/// Weather response payload
#[derive(Debug, Serialize, Deserialize)]
pub struct WeatherResponse {
    /// The city name, echoed unchanged
    pub city: String,
    /// Weather condition (always "sunny")
    pub condition: String,
}

/// Generic API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Weather endpoint - report the (fixed) current weather for a city
pub async fn get_weather(
    Json(payload): Json<JsonValue>,
) -> Result<Json<WeatherResponse>, (StatusCode, Json<ErrorResponse>)> {
    debug!("Weather request: {:?}", payload);

    let city = match parse_city(payload) {
        Ok(city) => city,
        Err(e) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ));
        }
    };

    info!("Weather lookup for city: {}", city);

    Ok(Json(WeatherResponse {
        city,
        condition: CONDITION.to_string(),
    }))
}

/// Extract and validate the city name from the request body
fn parse_city(payload: JsonValue) -> crate::Result<String> {
    let request: WeatherRequest = serde_json::from_value(payload)
        .map_err(|e| ApiError::InvalidRequest(format!("Malformed weather request: {}", e)))?;

    if request.city.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "City name must not be empty".to_string(),
        ));
    }

    Ok(request.city)
}
