//! Market and competitor analysis tools
//!
//! Both hand the subject back to the model as a framed observation; the
//! analysis itself is written by the model in its final answer.

use super::MiningTool;
use crate::error::{AgentError, Result};
use async_trait::async_trait;
use mining_llm::ToolDefinition;

fn required(input: &str, field: &str) -> Result<String> {
    let value = input.trim().trim_matches('"').trim();
    if value.is_empty() {
        return Err(AgentError::InvalidToolInput(format!("{field} must not be empty")));
    }
    Ok(value.to_string())
}

/// `market_analysis(sector)`
pub struct MarketAnalysisTool;

#[async_trait]
impl MiningTool for MarketAnalysisTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::with_string_input(
            "market_analysis",
            "Analyze mining market trends and opportunities",
            "sector",
            "Mining sector to analyze",
        )
    }

    async fn run(&self, input: &str) -> Result<String> {
        let sector = required(input, "sector")?;
        Ok(format!("Market analysis for {sector} mining sector"))
    }
}

/// `competitor_analysis(company)`
pub struct CompetitorAnalysisTool;

#[async_trait]
impl MiningTool for CompetitorAnalysisTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::with_string_input(
            "competitor_analysis",
            "Analyze mining company competitors",
            "company",
            "Company to analyze",
        )
    }

    async fn run(&self, input: &str) -> Result<String> {
        let company = required(input, "company")?;
        Ok(format!("Competitor analysis for {company}"))
    }
}
