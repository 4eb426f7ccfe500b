//! Mining industry agent
//!
//! This crate answers mining industry questions with a chat-completion model
//! and looks up market data for mining companies. It includes:
//!
//! - [`MiningAnalyst`]: the Completion Gateway (one completion per query,
//!   with an optional context string) plus market lookups
//! - [`MiningIndustryAgent`]: a strategist that can call the `stock_data`,
//!   `market_analysis` and `competitor_analysis` tools before answering
//! - [`MarketDataGateway`]: seven-field market snapshots from Yahoo Finance
//! - [`AnalysisRequest`]: the five structured analysis forms
//! - [`Shell`]: a session holding the API key, the agents and the history
//!
//! None of the gateways return structured errors: completion failures come
//! back as text starting with `Error` and lookup failures as a map with the
//! single key `error`.
//!
//! # Example
//!
//! ```rust,ignore
//! use mining_agent::{AgentConfig, Shell, ShellAction};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut shell = Shell::new(std::env::var("OPENAI_API_KEY")?, AgentConfig::from_env()?)?;
//!
//!     let reply = shell
//!         .handle(ShellAction::Ask {
//!             query: "What is the outlook for copper?".to_string(),
//!             context: None,
//!         })
//!         .await?;
//!     println!("{}", reply.text());
//!
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod market;
pub mod prompts;
pub mod shell;
pub mod tools;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use agents::{AgentAction, MiningAnalyst, MiningIndustryAgent};
pub use analysis::{AnalysisRequest, AnalysisType};
pub use config::AgentConfig;
pub use error::{AgentError, Result};
pub use market::{MarketData, MarketDataGateway, MarketDataSource, MarketSnapshot};
pub use shell::{Command, Shell, ShellAction, ShellError, ShellReply, ShellState};
pub use tools::{MiningTool, ToolRegistry, default_registry};
