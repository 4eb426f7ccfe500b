//! Error types for the mining agents

use mining_llm::LLMError;
use thiserror::Error;

/// Errors raised inside the agents and gateways
///
/// These never reach the user directly: the gateways turn them into display
/// strings or an `{error: ...}` map.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Query text was empty
    #[error("Query must not be empty")]
    EmptyQuery,

    /// Model replied with no text
    #[error("Model returned an empty response")]
    EmptyResponse,

    /// Completion call failed
    #[error("{0}")]
    Llm(#[from] LLMError),

    /// Invalid stock symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Provider has no data for the symbol
    #[error("No market data found for symbol {0}")]
    SymbolNotFound(String),

    /// Market data provider returned an error
    #[error("Market data provider error: {0}")]
    MarketData(String),

    /// Prompt template failed to render
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Analysis form selection is invalid
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Tool input was rejected
    #[error("Invalid tool input: {0}")]
    InvalidToolInput(String),

    /// Tool-using agent did not reach a final answer
    #[error("Agent stopped after {0} steps without a final answer")]
    StepLimit(usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

impl From<AgentError> for mining_core::Error {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::EmptyQuery => mining_core::Error::InvalidInput(err.to_string()),
            other => mining_core::Error::ProcessingFailed(other.to_string()),
        }
    }
}

impl From<url::ParseError> for AgentError {
    fn from(err: url::ParseError) -> Self {
        AgentError::Config(format!("Invalid URL: {err}"))
    }
}
