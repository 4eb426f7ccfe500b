//! Mining Analyst: the Completion Gateway plus market data lookups

use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::market::{MarketData, MarketDataGateway};
use crate::prompts::{ANALYST_SYSTEM_PROMPT, analyst_user_message};
use async_trait::async_trait;
use mining_core::{Agent, Context};
use mining_llm::providers::OpenAIProvider;
use mining_llm::{CompletionRequest, LLMProvider, Message};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Answers mining industry questions with a single completion per query
///
/// Public methods never fail: completion errors come back as text starting
/// with `Error:` and lookup errors as [`MarketData::Error`].
pub struct MiningAnalyst {
    provider: Arc<dyn LLMProvider>,
    market: MarketDataGateway,
    config: Arc<AgentConfig>,
}

impl MiningAnalyst {
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        market: MarketDataGateway,
        config: Arc<AgentConfig>,
    ) -> Self {
        Self {
            provider,
            market,
            config,
        }
    }

    /// Analyst backed by OpenAI and Yahoo Finance
    pub fn from_api_key(api_key: &str, config: Arc<AgentConfig>) -> Result<Self> {
        let provider = OpenAIProvider::with_config(config.openai_config(api_key))?;
        let market = MarketDataGateway::yahoo(&config)?;
        Ok(Self::new(Arc::new(provider), market, config))
    }

    /// Analyze a query, optionally grounded by a context string
    ///
    /// Returns the model's answer, or `Error: <reason>` when anything fails.
    /// A blank query is refused without calling the model.
    pub async fn analyze(&self, query: &str, context: Option<&str>) -> String {
        let context = Context::new().with_analysis_context(context.unwrap_or_default());
        self.respond(query, &context).await
    }

    /// Run [`Agent::process`] and render a failure as `Error: <reason>`
    #[instrument(
        skip_all,
        fields(model = %self.config.model, has_context = context.analysis_context().is_some())
    )]
    pub async fn respond(&self, query: &str, context: &Context) -> String {
        match self.process(query.to_string(), context).await {
            Ok(text) => {
                info!(chars = text.len(), "Analysis completed");
                text
            }
            Err(e) => {
                warn!("Analysis failed: {e}");
                format!("Error: {e}")
            }
        }
    }

    /// Fetch a fresh market snapshot for `symbol`
    pub async fn get_market_data(&self, symbol: &str) -> MarketData {
        self.market.get_market_data(symbol).await
    }

    async fn complete(&self, query: &str, context: Option<&str>) -> Result<String> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AgentError::EmptyQuery);
        }

        let request = CompletionRequest::builder(&self.config.model)
            .system(ANALYST_SYSTEM_PROMPT)
            .add_message(Message::user(analyst_user_message(query, context)))
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .build();

        debug!(messages = request.messages.len() + 1, "Sending analysis request");
        let response = self.provider.complete(request).await?;

        let text = response.text().trim();
        if text.is_empty() {
            return Err(AgentError::EmptyResponse);
        }
        debug!(tokens = response.usage.total(), "Received analysis");
        Ok(text.to_string())
    }
}

#[async_trait]
impl Agent for MiningAnalyst {
    async fn process(&self, input: String, context: &Context) -> mining_core::Result<String> {
        Ok(self.complete(&input, context.analysis_context()).await?)
    }

    fn name(&self) -> &str {
        "mining-analyst"
    }
}
