//! wx-tools: Built-in tools for wx-chat
//!
//! This crate provides the tools the Mediator can offer to the model.

use std::sync::Arc;

use wx_core::{Config, ToolManager};

pub mod weather;

pub use weather::GetWeatherTool;

/// Register all default built-in tools with the tool manager
pub fn register_default_tools(manager: &mut ToolManager, config: &Config) {
    manager.register(Arc::new(GetWeatherTool::new(
        config.weather.endpoint_url.clone(),
    )));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_default_tools() {
        let config = Config::default();
        let mut manager = ToolManager::new();
        register_default_tools(&mut manager, &config);

        assert_eq!(manager.len(), 1);
        assert!(manager.contains("get_weather"));
    }
}
