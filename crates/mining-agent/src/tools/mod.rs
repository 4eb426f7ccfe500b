//! Tools the mining strategist can call
//!
//! The model picks a tool by writing `Action: <name>` and the
//! [`ToolRegistry`] routes the call to the matching handler.

mod analysis;
mod registry;
mod stock_data;

pub use analysis::{CompetitorAnalysisTool, MarketAnalysisTool};
pub use registry::{MiningTool, ToolRegistry};
pub use stock_data::StockDataTool;

use crate::market::MarketDataGateway;
use std::sync::Arc;

/// Registry holding the three built-in tools
pub fn default_registry(market: MarketDataGateway) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(StockDataTool::new(market)));
    registry.register(Arc::new(MarketAnalysisTool));
    registry.register(Arc::new(CompetitorAnalysisTool));
    registry
}
