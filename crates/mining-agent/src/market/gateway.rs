//! Market Data Gateway
//!
//! One provider call per lookup. Every failure collapses into
//! [`MarketData::Error`]; callers never see a structured error.

use crate::api::YahooFinanceClient;
use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::market::{MarketData, MarketSnapshot, ProviderQuote};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// A remote source of quote metadata
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch the quote for an already normalized symbol
    async fn fetch_quote(&self, symbol: &str) -> Result<ProviderQuote>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}

/// Trim and upper-case a ticker, rejecting blanks and stray characters
pub fn normalize_symbol(symbol: &str) -> Result<String> {
    let symbol = symbol.trim().to_uppercase();

    if symbol.is_empty() {
        return Err(AgentError::InvalidSymbol(
            "symbol must not be empty".to_string(),
        ));
    }

    let valid = symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));
    if !valid {
        return Err(AgentError::InvalidSymbol(symbol));
    }

    Ok(symbol)
}

/// Looks up market snapshots through a [`MarketDataSource`]
#[derive(Clone)]
pub struct MarketDataGateway {
    source: Arc<dyn MarketDataSource>,
}

impl MarketDataGateway {
    /// Create a gateway over any source
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self { source }
    }

    /// Create a gateway backed by Yahoo Finance
    pub fn yahoo(config: &AgentConfig) -> Result<Self> {
        let client = YahooFinanceClient::new(config.request_timeout)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Fetch a fresh snapshot for `symbol`
    ///
    /// Returns the seven-field snapshot, or a map with the single key
    /// `error` when anything at all goes wrong.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn get_market_data(&self, symbol: &str) -> MarketData {
        match self.lookup(symbol).await {
            Ok(snapshot) => {
                debug!(
                    symbol = %snapshot.symbol,
                    available = snapshot.available_count(),
                    "Market data lookup succeeded"
                );
                MarketData::Snapshot(snapshot)
            }
            Err(e) => {
                warn!("Market data lookup failed: {e}");
                MarketData::error(e.to_string())
            }
        }
    }

    async fn lookup(&self, symbol: &str) -> Result<MarketSnapshot> {
        let symbol = normalize_symbol(symbol)?;
        let quote = self.source.fetch_quote(&symbol).await?;
        Ok(MarketSnapshot::from_quote(symbol, quote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{FieldValue, SNAPSHOT_FIELD_COUNT};
    use mockall::mock;

    mock! {
        pub Source {}

        #[async_trait]
        impl MarketDataSource for Source {
            async fn fetch_quote(&self, symbol: &str) -> Result<ProviderQuote>;
            fn name(&self) -> &'static str;
        }
    }

    fn source() -> MockSource {
        let mut source = MockSource::new();
        source.expect_name().return_const("mock");
        source
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol(" nem ").unwrap(), "NEM");
        assert_eq!(normalize_symbol("bhp.ax").unwrap(), "BHP.AX");
        assert_eq!(normalize_symbol("GC=F").unwrap(), "GC=F");
        assert!(normalize_symbol("   ").is_err());
        assert!(normalize_symbol("NEM; DROP").is_err());
    }

    #[tokio::test]
    async fn test_resolved_symbol_has_all_fields() {
        let mut source = source();
        source.expect_fetch_quote().times(1).returning(|symbol| {
            assert_eq!(symbol, "FCX");
            Ok(ProviderQuote {
                current_price: Some(44.0),
                volume: Some(1_000.0),
                ..ProviderQuote::default()
            })
        });

        let gateway = MarketDataGateway::new(Arc::new(source));
        let data = gateway.get_market_data("fcx").await;

        let snapshot = data.snapshot().unwrap();
        assert_eq!(snapshot.symbol, "FCX");
        assert_eq!(snapshot.fields().len(), SNAPSHOT_FIELD_COUNT);
        assert_eq!(snapshot.current_price, FieldValue::Value(44.0));
        assert_eq!(snapshot.dividend_yield, FieldValue::NotAvailable);
    }

    #[tokio::test]
    async fn test_unresolved_symbol_degrades_to_error_map() {
        let mut source = source();
        source
            .expect_fetch_quote()
            .times(1)
            .returning(|symbol| Err(AgentError::SymbolNotFound(symbol.to_string())));

        let gateway = MarketDataGateway::new(Arc::new(source));
        let data = gateway.get_market_data("NOPE").await;

        assert_eq!(data.key_count(), 1);
        assert_eq!(
            data.error_message(),
            Some("No market data found for symbol NOPE")
        );
    }

    #[tokio::test]
    async fn test_empty_symbol_skips_remote_call() {
        let mut source = source();
        source.expect_fetch_quote().never();

        let gateway = MarketDataGateway::new(Arc::new(source));
        let data = gateway.get_market_data("  ").await;

        assert!(data.is_error());
        assert!(!data.error_message().unwrap().is_empty());
    }
}
