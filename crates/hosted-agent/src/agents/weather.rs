//! The weather assistant preset.

use hosted_agent_core::InteractionRequest;
use hosted_agent_core::tool::{RegistryError, ToolRegistry};

use crate::config::WeatherConfig;
use crate::tools::WeatherTool;

/// The display name of the temporary weather agent.
pub const AGENT_NAME: &str = "weather-assistant";

const INSTRUCTIONS: &str = "You are a helpful weather assistant. Call the \
    get_weatherstack_weather tool to provide real-time conditions from the \
    Weatherstack API. Mention when historical dates are unavailable and \
    clarify any assumptions you make.";

const DEFAULT_ADDITIONAL_INSTRUCTIONS: &str = "If no date is given, assume \
    the request is for today and echo that assumption.";

/// Builds the tool registry backing the weather agent.
pub fn registry(config: WeatherConfig) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    registry.register(WeatherTool::new(config))?;
    Ok(registry)
}

/// Builds the interaction request for one weather prompt.
pub fn interaction(
    model: &str,
    prompt: &str,
    additional_instructions: Option<String>,
    auto_delete_agent: bool,
) -> InteractionRequest {
    InteractionRequest {
        agent_name: AGENT_NAME.to_owned(),
        instructions: INSTRUCTIONS.to_owned(),
        model: model.to_owned(),
        builtin_tools: vec![],
        prompt: prompt.to_owned(),
        additional_instructions: additional_instructions
            .or_else(|| Some(DEFAULT_ADDITIONAL_INSTRUCTIONS.to_owned())),
        auto_delete_agent,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_interaction_uses_expected_defaults() {
        let request =
            interaction("test-model", "Weather in Seattle?", None, false);
        assert_eq!(request.agent_name, AGENT_NAME);
        assert_eq!(request.prompt, "Weather in Seattle?");
        assert_eq!(
            request.additional_instructions.as_deref(),
            Some(DEFAULT_ADDITIONAL_INSTRUCTIONS)
        );
        assert!(request.builtin_tools.is_empty());
        assert!(!request.auto_delete_agent);
    }

    #[test]
    fn test_interaction_allows_custom_additional_instructions() {
        let custom = "Always mention UV index.";
        let request = interaction(
            "test-model",
            "Any storms tomorrow?",
            Some(custom.to_owned()),
            true,
        );
        assert_eq!(request.additional_instructions.as_deref(), Some(custom));
        assert!(request.auto_delete_agent);
    }

    #[test]
    fn test_registry_declares_the_weather_tool() {
        let registry = registry(WeatherConfig {
            api_key: "test-key".to_owned(),
            api_url: "http://127.0.0.1:1".to_owned(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();

        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(
            definitions[0].function_name(),
            Some("get_weatherstack_weather")
        );
    }
}
