//! Interaction shell
//!
//! One [`Shell`] is one session: the API key, the conversation history and
//! the two agents, built from the key on first use. Front ends translate
//! user input into [`ShellAction`]s and render the [`ShellReply`].

pub mod commands;

pub use commands::{Command, HELP_TEXT};

use crate::agents::{MiningAnalyst, MiningIndustryAgent};
use crate::analysis::AnalysisRequest;
use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::market::{MarketData, MarketDataGateway, normalize_symbol};
use crate::tools::default_registry;
use mining_core::{Context, ConversationHistory};
use mining_llm::LLMProvider;
use mining_llm::providers::OpenAIProvider;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Builds the completion provider from the session's API key
pub type ProviderFactory =
    Box<dyn Fn(&str, &AgentConfig) -> mining_llm::Result<Arc<dyn LLMProvider>> + Send + Sync>;

/// Reasons an action is refused
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Please enter your OpenAI API key to continue")]
    MissingApiKey,

    #[error("Please enter a query")]
    EmptyQuery,

    #[error("{0}")]
    InvalidCommand(String),

    /// Invalid selection, or the agents could not be built
    #[error("{0}")]
    Agent(#[from] AgentError),
}

pub type Result<T> = std::result::Result<T, ShellError>;

/// Whether the shell is waiting for the user or for a remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    AwaitingInput,
    Processing,
}

/// Something the user asked the shell to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    /// Free-text message to the tool-using strategist
    Chat(String),

    /// Free-text query to the analyst, with an optional context string
    Ask {
        query: String,
        context: Option<String>,
    },

    /// Submitted analysis form
    Analyze(AnalysisRequest),

    /// Market data lookup
    Lookup(String),
}

/// What the shell produced for an action
#[derive(Debug, Clone)]
pub enum ShellReply {
    Text(String),

    /// Lookup result, for metric-tile rendering
    Market { symbol: String, data: MarketData },
}

impl ShellReply {
    /// Text recorded in the history for this reply
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Market { data, .. } => data.to_string(),
        }
    }
}

struct Agents {
    analyst: MiningAnalyst,
    strategist: MiningIndustryAgent,
}

/// A single user session
pub struct Shell {
    session_id: String,
    api_key: String,
    config: Arc<AgentConfig>,
    history: ConversationHistory,
    state: ShellState,
    market: MarketDataGateway,
    factory: ProviderFactory,
    agents: Option<Arc<Agents>>,
}

impl Shell {
    /// Session talking to OpenAI and Yahoo Finance
    pub fn new(api_key: impl Into<String>, config: AgentConfig) -> Result<Self> {
        let market = MarketDataGateway::yahoo(&config)?;
        Ok(Self::with_parts(api_key, config, market, Box::new(openai_factory)))
    }

    /// Session over an arbitrary market source and provider factory
    pub fn with_parts(
        api_key: impl Into<String>,
        config: AgentConfig,
        market: MarketDataGateway,
        factory: ProviderFactory,
    ) -> Self {
        let session_id = Uuid::new_v4().to_string();
        debug!(session_id = %session_id, "Session created");
        Self {
            session_id,
            api_key: api_key.into(),
            config: Arc::new(config),
            history: ConversationHistory::new(),
            state: ShellState::AwaitingInput,
            market,
            factory,
            agents: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Context handed to the agents for the next action
    pub fn context(&self) -> Context {
        Context::new()
            .with_session_id(self.session_id.clone())
            .with_history(self.history.clone())
    }

    /// Run one action and record the exchange
    ///
    /// Refused actions leave the history untouched. Accepted actions always
    /// record exactly one exchange, even when the reply is an error text.
    #[instrument(skip_all, fields(session_id = %self.session_id))]
    pub async fn handle(&mut self, action: ShellAction) -> Result<ShellReply> {
        if !self.has_api_key() {
            return Err(ShellError::MissingApiKey);
        }
        if action_text(&action).is_some_and(|text| text.trim().is_empty()) {
            return Err(ShellError::EmptyQuery);
        }

        self.state = ShellState::Processing;
        let outcome = self.dispatch(action).await;
        self.state = ShellState::AwaitingInput;

        let (user_text, reply) = outcome?;
        self.history.record_exchange(user_text, reply.text());
        info!(entries = self.history.len(), "Exchange recorded");
        Ok(reply)
    }

    async fn dispatch(&mut self, action: ShellAction) -> Result<(String, ShellReply)> {
        let agents = self.agents()?;
        let session = self.context();

        match action {
            ShellAction::Chat(text) => {
                let reply = agents.strategist.respond(&text, &session).await;
                Ok((text, ShellReply::Text(reply)))
            }
            ShellAction::Ask { query, context } => {
                let session = session.with_analysis_context(context.unwrap_or_default());
                let reply = agents.analyst.respond(&query, &session).await;
                Ok((query, ShellReply::Text(reply)))
            }
            ShellAction::Analyze(request) => {
                let query = request.to_query();
                debug!(analysis = %request.analysis_type(), "Running form analysis");
                let reply = agents.analyst.respond(&query, &session).await;
                Ok((query, ShellReply::Text(reply)))
            }
            ShellAction::Lookup(symbol) => {
                let symbol =
                    normalize_symbol(&symbol).unwrap_or_else(|_| symbol.trim().to_string());
                let data = agents.analyst.get_market_data(&symbol).await;
                Ok((
                    format!("Market data for {symbol}"),
                    ShellReply::Market { symbol, data },
                ))
            }
        }
    }

    fn agents(&mut self) -> Result<Arc<Agents>> {
        if let Some(agents) = &self.agents {
            return Ok(Arc::clone(agents));
        }

        let provider = (self.factory)(&self.api_key, &self.config).map_err(AgentError::from)?;
        let agents = Arc::new(Agents {
            analyst: MiningAnalyst::new(
                Arc::clone(&provider),
                self.market.clone(),
                Arc::clone(&self.config),
            ),
            strategist: MiningIndustryAgent::new(
                provider,
                default_registry(self.market.clone()),
                Arc::clone(&self.config),
            ),
        });
        info!(model = %self.config.model, "Agents initialized");
        self.agents = Some(Arc::clone(&agents));
        Ok(agents)
    }
}

fn openai_factory(api_key: &str, config: &AgentConfig) -> mining_llm::Result<Arc<dyn LLMProvider>> {
    Ok(Arc::new(OpenAIProvider::with_config(config.openai_config(api_key))?))
}

fn action_text(action: &ShellAction) -> Option<&str> {
    match action {
        ShellAction::Chat(text) | ShellAction::Lookup(text) => Some(text),
        ShellAction::Ask { query, .. } => Some(query),
        ShellAction::Analyze(_) => None,
    }
}
