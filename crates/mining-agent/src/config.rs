//! Configuration for the mining agents

use crate::error::{AgentError, Result};
use mining_llm::providers::OpenAIConfig;
use mining_llm::providers::openai::DEFAULT_OPENAI_API_BASE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration shared by the analyst, the strategist agent and the gateways
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Chat model name
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens per completion
    pub max_tokens: usize,

    /// Base URL of the OpenAI-compatible API
    pub api_base: String,

    /// Request timeout; `None` leaves requests unbounded
    pub request_timeout: Option<Duration>,

    /// Completion calls the tool-using agent may make per user message
    pub max_agent_steps: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            temperature: 0.7,
            max_tokens: 1500,
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            request_timeout: None,
            max_agent_steps: 5,
        }
    }
}

impl AgentConfig {
    /// Create a new configuration builder
    pub fn builder() -> AgentConfigBuilder {
        AgentConfigBuilder::default()
    }

    /// Default configuration with environment overrides applied
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env()?.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(AgentError::Config("model must not be empty".to_string()));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AgentError::Config(format!(
                "temperature must be between 0 and 2, got {}",
                self.temperature
            )));
        }

        if self.max_tokens == 0 {
            return Err(AgentError::Config(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.max_agent_steps == 0 {
            return Err(AgentError::Config(
                "max_agent_steps must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(AgentError::Config(
                "request timeout must be greater than 0".to_string(),
            ));
        }

        url::Url::parse(&self.api_base)?;

        Ok(())
    }

    /// Provider configuration for the given API key
    pub fn openai_config(&self, api_key: &str) -> OpenAIConfig {
        let config = OpenAIConfig::new(api_key).with_api_base(self.api_base.clone());
        match self.request_timeout {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }
}

/// Builder for AgentConfig
#[derive(Debug, Default)]
pub struct AgentConfigBuilder {
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
    api_base: Option<String>,
    request_timeout: Option<Duration>,
    max_agent_steps: Option<usize>,
}

impl AgentConfigBuilder {
    /// Set the chat model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the completion token limit
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the OpenAI-compatible API base URL
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set a request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the step limit of the tool-using agent
    pub fn max_agent_steps(mut self, steps: usize) -> Self {
        self.max_agent_steps = Some(steps);
        self
    }

    /// Apply overrides from environment variables
    ///
    /// Reads `MINING_AGENT_MODEL`, `MINING_AGENT_TEMPERATURE`,
    /// `OPENAI_API_BASE`, `MINING_AGENT_TIMEOUT_SECS` and
    /// `MINING_AGENT_MAX_STEPS`.
    pub fn with_env(mut self) -> Result<Self> {
        if let Ok(model) = std::env::var("MINING_AGENT_MODEL") {
            self.model = Some(model);
        }
        if let Ok(value) = std::env::var("MINING_AGENT_TEMPERATURE") {
            self.temperature = Some(parse_env("MINING_AGENT_TEMPERATURE", &value)?);
        }
        if let Ok(base) = std::env::var("OPENAI_API_BASE") {
            self.api_base = Some(base);
        }
        if let Ok(value) = std::env::var("MINING_AGENT_TIMEOUT_SECS") {
            let secs: u64 = parse_env("MINING_AGENT_TIMEOUT_SECS", &value)?;
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Ok(value) = std::env::var("MINING_AGENT_MAX_STEPS") {
            self.max_agent_steps = Some(parse_env("MINING_AGENT_MAX_STEPS", &value)?);
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<AgentConfig> {
        let defaults = AgentConfig::default();

        let config = AgentConfig {
            model: self.model.unwrap_or(defaults.model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            api_base: self.api_base.unwrap_or(defaults.api_base),
            request_timeout: self.request_timeout.or(defaults.request_timeout),
            max_agent_steps: self.max_agent_steps.unwrap_or(defaults.max_agent_steps),
        };

        config.validate()?;
        Ok(config)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| AgentError::Config(format!("{name}={value:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert_eq!(config.model, "gpt-4");
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.max_agent_steps, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = AgentConfig::builder()
            .model("gpt-4o")
            .temperature(0.2)
            .api_base("http://localhost:1234/v1")
            .request_timeout(Duration::from_secs(90))
            .max_agent_steps(3)
            .build()
            .unwrap();

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.api_base, "http://localhost:1234/v1");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(90)));
        assert_eq!(config.max_agent_steps, 3);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(AgentConfig::builder().temperature(3.5).build().is_err());
        assert!(AgentConfig::builder().max_agent_steps(0).build().is_err());
        assert!(AgentConfig::builder().model(" ").build().is_err());
        assert!(AgentConfig::builder().api_base("not a url").build().is_err());
    }

    #[test]
    fn test_openai_config() {
        let config = AgentConfig::builder()
            .api_base("http://localhost:1234/v1/")
            .request_timeout(Duration::from_millis(1500))
            .build()
            .unwrap();

        let openai = config.openai_config("sk-test");
        assert_eq!(openai.api_key, "sk-test");
        assert_eq!(openai.api_base, "http://localhost:1234/v1");
        assert_eq!(openai.timeout, Some(Duration::from_millis(1500)));

        let unbounded = AgentConfig::default().openai_config("sk-test");
        assert_eq!(unbounded.timeout, None);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = AgentConfig::builder()
            .request_timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("request timeout must be greater than 0"));

        let sub_second = AgentConfig::builder()
            .request_timeout(Duration::from_millis(250))
            .build()
            .unwrap();
        assert_eq!(sub_second.request_timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_parse_env_error_names_variable() {
        let err = parse_env::<f32>("MINING_AGENT_TEMPERATURE", "warm").unwrap_err();
        assert!(err.to_string().contains("MINING_AGENT_TEMPERATURE"));
    }
}
