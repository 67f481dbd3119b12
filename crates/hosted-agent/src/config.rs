//! Environment-backed configuration.
//!
//! Loaders take an injected lookup function so tests never touch the
//! process environment; [`ProjectConfig::from_env`] and
//! [`WeatherConfig::from_env`] adapt [`std::env`] for production use.

use std::env;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display};
use std::time::Duration;

/// Error raised when required configuration is missing or malformed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    Missing(&'static str),
    /// An environment variable is set to a non-numeric value.
    Invalid(&'static str, String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => {
                write!(f, "Expected the {name} environment variable to be set.")
            }
            ConfigError::Invalid(name, value) => {
                write!(
                    f,
                    "Expected the {name} environment variable to be numeric, \
                     got {value:?}."
                )
            }
        }
    }
}

impl StdError for ConfigError {}

fn require<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

/// Connection settings for the hosted agents project.
#[derive(Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// The project endpoint URL.
    pub endpoint: String,
    /// The model deployment agents are bound to.
    pub model_deployment: String,
    /// The bearer token used to authenticate against the project.
    pub api_key: String,
}

impl ProjectConfig {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads the configuration from an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            endpoint: require(&lookup, "PROJECT_ENDPOINT")?,
            model_deployment: require(&lookup, "MODEL_DEPLOYMENT_NAME")?,
            api_key: require(&lookup, "PROJECT_API_KEY")?,
        })
    }
}

impl Debug for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectConfig")
            .field("endpoint", &self.endpoint)
            .field("model_deployment", &self.model_deployment)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

const DEFAULT_WEATHER_API_URL: &str = "https://api.weatherstack.com/current";
const DEFAULT_WEATHER_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for the Weatherstack current-conditions API.
#[derive(Clone, PartialEq, Eq)]
pub struct WeatherConfig {
    /// The Weatherstack access key.
    pub api_key: String,
    /// The current-conditions endpoint URL.
    pub api_url: String,
    /// Timeout applied to every weather request.
    pub timeout: Duration,
}

impl WeatherConfig {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads the configuration from an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = require(&lookup, "WEATHERSTACK_API_KEY")?;
        let api_url = lookup("WEATHERSTACK_API_URL")
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_WEATHER_API_URL.to_owned());
        let timeout = match lookup("WEATHERSTACK_TIMEOUT_SECONDS") {
            None => DEFAULT_WEATHER_TIMEOUT,
            Some(value) => {
                let seconds = value.parse::<f64>().ok().filter(|seconds| {
                    seconds.is_finite() && *seconds > 0.0
                });
                match seconds {
                    Some(seconds) => Duration::from_secs_f64(seconds),
                    None => {
                        return Err(ConfigError::Invalid(
                            "WEATHERSTACK_TIMEOUT_SECONDS",
                            value,
                        ));
                    }
                }
            }
        };
        Ok(Self {
            api_key,
            api_url,
            timeout,
        })
    }
}

impl Debug for WeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
