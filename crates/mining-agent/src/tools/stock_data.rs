//! Tool for fetching mining company market data

use super::MiningTool;
use crate::error::Result;
use crate::market::{MarketDataGateway, normalize_symbol};
use async_trait::async_trait;
use mining_llm::ToolDefinition;

/// `stock_data(symbol)`: market snapshot through the Market Data Gateway
pub struct StockDataTool {
    market: MarketDataGateway,
}

impl StockDataTool {
    pub fn new(market: MarketDataGateway) -> Self {
        Self { market }
    }
}

#[async_trait]
impl MiningTool for StockDataTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::with_string_input(
            "stock_data",
            "Get financial data for mining companies",
            "symbol",
            "Stock symbol of the mining company",
        )
    }

    async fn run(&self, input: &str) -> Result<String> {
        // Models often quote the symbol
        let symbol = normalize_symbol(input.trim().trim_matches(|c| c == '"' || c == '\''))?;
        let data = self.market.get_market_data(&symbol).await;
        Ok(format!("Financial data for {symbol}: {data}"))
    }
}
