//! Core Agent trait definition

use crate::{Context, Result};
use async_trait::async_trait;

/// Core trait implemented by the mining agents
///
/// `process` returns structured errors. The shell goes through
/// `MiningAnalyst::respond` and `MiningIndustryAgent::respond`, which turn
/// them into displayed messages.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process input and return the response text
    async fn process(&self, input: String, context: &Context) -> Result<String>;

    /// Get the agent's name
    fn name(&self) -> &str;
}
