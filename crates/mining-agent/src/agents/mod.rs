//! Mining agents
//!
//! - [`MiningAnalyst`]: one completion per query, with an optional context
//!   string, plus market data lookups
//! - [`MiningIndustryAgent`]: tool-using strategist driven by the
//!   [`AgentAction`] grammar

pub mod action;
pub mod analyst;
pub mod industry;

pub use action::AgentAction;
pub use analyst::MiningAnalyst;
pub use industry::MiningIndustryAgent;
