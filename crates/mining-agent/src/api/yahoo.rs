//! Yahoo Finance quote summary client

use crate::error::{AgentError, Result};
use crate::market::{MarketDataSource, ProviderQuote};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use yahoo_finance_api as yahoo;

/// Yahoo Finance API client
///
/// The connector keeps the session cookie and crumb between calls, which
/// needs `&mut`, so it sits behind an async mutex.
pub struct YahooFinanceClient {
    connector: Mutex<yahoo::YahooConnector>,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = yahoo::YahooConnector::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let connector = builder
            .build()
            .map_err(|e| AgentError::MarketData(e.to_string()))?;

        Ok(Self {
            connector: Mutex::new(connector),
        })
    }
}

#[async_trait]
impl MarketDataSource for YahooFinanceClient {
    #[instrument(skip(self))]
    async fn fetch_quote(&self, symbol: &str) -> Result<ProviderQuote> {
        let summary = {
            let mut connector = self.connector.lock().await;
            connector.get_ticker_info(symbol).await.map_err(|e| match e {
                yahoo::YahooError::NoResult | yahoo::YahooError::NoQuotes => {
                    AgentError::SymbolNotFound(symbol.to_string())
                }
                other => AgentError::MarketData(other.to_string()),
            })?
        };
        debug!("Received quote summary");

        quote_from_summary(symbol, &summary)
    }

    fn name(&self) -> &'static str {
        "yahoo"
    }
}

/// Pick the seven snapshot fields out of a quote summary
fn quote_from_summary(symbol: &str, summary: &yahoo::YQuoteSummary) -> Result<ProviderQuote> {
    if let Some(error) = summary.finance.as_ref().and_then(|f| f.error.as_ref()) {
        let reason = error
            .description
            .as_deref()
            .or(error.code.as_deref())
            .unwrap_or("unknown error");
        return Err(AgentError::MarketData(reason.to_string()));
    }

    let Some(quote_summary) = &summary.quote_summary else {
        return Err(AgentError::SymbolNotFound(symbol.to_string()));
    };
    if let Some(error) = &quote_summary.error {
        debug!(code = ?error.code, "Quote summary error");
        return Err(AgentError::SymbolNotFound(symbol.to_string()));
    }
    let data = quote_summary
        .result
        .as_ref()
        .and_then(|results| results.first())
        .ok_or_else(|| AgentError::SymbolNotFound(symbol.to_string()))?;

    let detail = data.summary_detail.as_ref();
    let financial = data.financial_data.as_ref();

    let quote = ProviderQuote {
        current_price: financial.and_then(|f| f.current_price),
        volume: detail
            .and_then(|d| d.regular_market_volume.or(d.volume))
            .map(|v| v as f64),
        market_cap: detail.and_then(|d| d.market_cap).map(|v| v as f64),
        pe_ratio: detail.and_then(|d| d.trailing_pe).filter(|pe| pe.is_finite()),
        dividend_yield: detail.and_then(|d| d.dividend_yield.or(d.trailing_annual_dividend_yield)),
        fifty_two_week_high: detail.and_then(|d| d.fifty_two_week_high),
        fifty_two_week_low: detail.and_then(|d| d.fifty_two_week_low),
    };

    if quote == ProviderQuote::default() {
        return Err(AgentError::SymbolNotFound(symbol.to_string()));
    }
    Ok(quote)
}
