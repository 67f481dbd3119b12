use hosted_agent_core::tool::{Error as ToolError, Tool, ToolResult};
use reqwest::Client;
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

use crate::config::WeatherConfig;

#[derive(Deserialize, JsonSchema)]
pub struct WeatherToolParameters {
    #[schemars(description = "Name of the city to look up weather for.")]
    location: String,
    #[schemars(
        description = "Optional ISO date string for the requested forecast day."
    )]
    date: Option<String>,
}

/// A snapshot of current conditions, normalized from the provider
/// response.
#[derive(Clone, Debug, PartialEq)]
struct WeatherReport {
    location: String,
    temperature_c: f64,
    condition: String,
    humidity_pct: i64,
}

impl WeatherReport {
    /// Renders the human-readable summary used as tool output.
    fn serialize(&self, date: Option<&str>) -> String {
        let date_clause =
            date.map(|date| format!(" on {date}")).unwrap_or_default();
        format!(
            "Weather for {}{}: {:.1}°C, {}, humidity {}%",
            self.location,
            date_clause,
            self.temperature_c,
            self.condition,
            self.humidity_pct
        )
    }
}

/// A tool for fetching live weather data from the Weatherstack
/// current-conditions endpoint.
pub struct WeatherTool {
    client: Client,
    config: WeatherConfig,
    parameter_schema: Value,
}

impl WeatherTool {
    /// Creates a new weather tool with the given API settings.
    #[inline]
    pub fn new(config: WeatherConfig) -> Self {
        WeatherTool {
            client: Client::new(),
            config,
            parameter_schema: schema_for!(WeatherToolParameters).to_value(),
        }
    }
}

impl Tool for WeatherTool {
    type Input = WeatherToolParameters;

    fn name(&self) -> &str {
        "get_weatherstack_weather"
    }

    fn description(&self) -> &str {
        "Return live weather information (temperature, conditions, humidity) \
         for a city using the Weatherstack API."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        input: WeatherToolParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let client = self.client.clone();
        let config = self.config.clone();
        async move {
            // Dated requests never reach the network; the plan only
            // serves live conditions.
            if let Some(date) =
                input.date.as_deref().filter(|date| !date.trim().is_empty())
            {
                return Err(ToolError::unsupported().with_reason(format!(
                    "Historical or forecast dates like {date} are not \
                     supported; ask again without a date to get the latest \
                     conditions."
                )));
            }
            if input.location.trim().is_empty() {
                return Err(ToolError::invalid_input()
                    .with_reason("Missing location."));
            }
            fetch_current_weather(&client, &config, &input.location).await
        }
    }
}

async fn fetch_current_weather(
    client: &Client,
    config: &WeatherConfig,
    location: &str,
) -> ToolResult {
    let response = client
        .get(&config.api_url)
        .query(&[
            ("access_key", config.api_key.as_str()),
            ("query", location),
            ("units", "m"),
        ])
        .timeout(config.timeout)
        .send()
        .await
        .map_err(|err| {
            ToolError::execution_error()
                .with_reason(format!("Weather service request failed: {err}"))
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ToolError::execution_error().with_reason(format!(
            "Weather service request failed: HTTP {status}"
        )));
    }

    let payload: Value = response.json().await.map_err(|_| {
        ToolError::execution_error()
            .with_reason("Weather service returned an unreadable response.")
    })?;

    interpret_payload(&payload, location)
}

/// Interprets a Weatherstack response body.
///
/// Weatherstack reports its own failures (including invalid access
/// keys) as HTTP 200 with an `error` object, so that shape is handled
/// here rather than at the transport layer.
fn interpret_payload(payload: &Value, requested_location: &str) -> ToolResult {
    if let Some(error) = payload.get("error") {
        let code = match error.get("code") {
            Some(Value::Number(code)) => code.to_string(),
            Some(Value::String(code)) => code.clone(),
            _ => "unknown".to_owned(),
        };
        let info = error
            .get("info")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error from the weather service.");
        return Err(ToolError::execution_error()
            .with_reason(format!("Weather service error ({code}): {info}")));
    }

    let location_data = payload.get("location");
    let current = payload
        .get("current")
        .and_then(Value::as_object)
        .filter(|current| !current.is_empty());
    let Some(current) = current else {
        return Err(ToolError::execution_error().with_reason(
            "Weather service returned no current conditions for that query.",
        ));
    };

    let condition = extract_condition(
        current.get("weather_descriptions").and_then(Value::as_array),
    );
    let temperature = current.get("temperature").and_then(Value::as_f64);
    let humidity = current.get("humidity").and_then(Value::as_i64);
    let (Some(temperature), Some(humidity)) = (temperature, humidity) else {
        return Err(ToolError::execution_error().with_reason(
            "Weather service response was missing temperature or humidity \
             data.",
        ));
    };

    let report = WeatherReport {
        location: location_data
            .and_then(|location| location.get("name"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| title_case(requested_location)),
        temperature_c: temperature,
        condition,
        humidity_pct: humidity,
    };

    let localtime = location_data
        .and_then(|location| location.get("localtime"))
        .and_then(Value::as_str);
    let mut summary = report.serialize(localtime);
    summary.push_str(". Data source: Weatherstack live API.");
    if let Some(country) = location_data
        .and_then(|location| location.get("country"))
        .and_then(Value::as_str)
    {
        summary.push_str(&format!(" Country: {country}"));
    }
    Ok(summary)
}

fn extract_condition(descriptions: Option<&Vec<Value>>) -> String {
    let joined = descriptions
        .map(|descriptions| {
            descriptions
                .iter()
                .filter_map(Value::as_str)
                .filter(|description| !description.is_empty())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    if joined.is_empty() {
        "Unknown conditions".to_owned()
    } else {
        joined
    }
}

fn title_case(location: &str) -> String {
    location
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>()
                        + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
