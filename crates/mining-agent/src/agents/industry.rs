//! Tool-using mining strategist
//!
//! Each user message runs a short loop: render the strategist prompt, ask
//! the model for the next [`AgentAction`], run the chosen tool and feed the
//! observation back through the scratchpad until the model gives a final
//! answer or the step limit is reached.

use super::AgentAction;
use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::market::MarketDataGateway;
use crate::prompts::{OBSERVATION_STOP, StrategistPrompt};
use crate::tools::{ToolRegistry, default_registry};
use async_trait::async_trait;
use mining_core::{Agent, Context, ConversationHistory};
use mining_llm::providers::OpenAIProvider;
use mining_llm::{CompletionRequest, LLMProvider, Message, ToolDefinition};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Chat agent that can call the mining tools before answering
pub struct MiningIndustryAgent {
    provider: Arc<dyn LLMProvider>,
    tools: ToolRegistry,
    config: Arc<AgentConfig>,
}

impl MiningIndustryAgent {
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tools: ToolRegistry,
        config: Arc<AgentConfig>,
    ) -> Self {
        Self {
            provider,
            tools,
            config,
        }
    }

    /// Strategist backed by OpenAI, with the built-in tools over `market`
    pub fn from_api_key(
        api_key: &str,
        market: MarketDataGateway,
        config: Arc<AgentConfig>,
    ) -> Result<Self> {
        let provider = OpenAIProvider::with_config(config.openai_config(api_key))?;
        Ok(Self::new(Arc::new(provider), default_registry(market), config))
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Answer `input` in the light of the conversation so far
    ///
    /// Returns the final answer, or `Error processing request: <reason>`.
    pub async fn process_input(&self, input: &str, history: &ConversationHistory) -> String {
        let context = Context::new().with_history(history.clone());
        self.respond(input, &context).await
    }

    /// Run [`Agent::process`] and render a failure as
    /// `Error processing request: <reason>`
    #[instrument(skip_all, fields(model = %self.config.model, history = context.history().len()))]
    pub async fn respond(&self, input: &str, context: &Context) -> String {
        match self.process(input.to_string(), context).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Strategist failed: {e}");
                format!("Error processing request: {e}")
            }
        }
    }

    async fn run(&self, input: &str, history: &ConversationHistory) -> Result<String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AgentError::EmptyQuery);
        }

        let definitions = self.tools.definitions();
        let mut scratchpad = String::new();

        for step in 1..=self.config.max_agent_steps {
            let reply = self.next_reply(&definitions, history, input, &scratchpad).await?;

            match AgentAction::parse(&reply) {
                AgentAction::Finish(answer) => {
                    if answer.is_empty() {
                        return Err(AgentError::EmptyResponse);
                    }
                    info!(steps = step, "Strategist finished");
                    return Ok(answer);
                }
                AgentAction::UseTool { tool, input: tool_input } => {
                    debug!(step, tool = %tool, "Strategist chose a tool");
                    let observation = self.tools.dispatch(&tool, &tool_input).await;
                    scratchpad.push_str(reply.trim_end());
                    scratchpad.push_str("\nObservation: ");
                    scratchpad.push_str(&observation);
                    scratchpad.push('\n');
                }
            }
        }

        Err(AgentError::StepLimit(self.config.max_agent_steps))
    }

    async fn next_reply(
        &self,
        definitions: &[ToolDefinition],
        history: &ConversationHistory,
        input: &str,
        scratchpad: &str,
    ) -> Result<String> {
        let prompt = StrategistPrompt::new(definitions, history, input, scratchpad).render()?;

        let request = CompletionRequest::builder(&self.config.model)
            .add_message(Message::user(prompt))
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .stop_sequences(vec![OBSERVATION_STOP.to_string()])
            .build();

        let response = self.provider.complete(request).await?;
        Ok(response.text().to_string())
    }
}

#[async_trait]
impl Agent for MiningIndustryAgent {
    async fn process(&self, input: String, context: &Context) -> mining_core::Result<String> {
        Ok(self.run(&input, context.history()).await?)
    }

    fn name(&self) -> &str {
        "mining-industry-agent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::ProviderQuote;
    use crate::testing::{ScriptedProvider, StaticSource};

    fn agent(provider: Arc<ScriptedProvider>, steps: usize) -> MiningIndustryAgent {
        let source = StaticSource::new().with_quote(
            "NEM",
            ProviderQuote {
                current_price: Some(52.3),
                fifty_two_week_high: Some(60.0),
                ..ProviderQuote::default()
            },
        );
        let config = AgentConfig::builder().max_agent_steps(steps).build().unwrap();
        MiningIndustryAgent::new(
            provider,
            default_registry(MarketDataGateway::new(Arc::new(source))),
            Arc::new(config),
        )
    }

    #[tokio::test]
    async fn test_direct_final_answer() {
        let provider = ScriptedProvider::replying(&["Final Answer: Hedge your gold exposure."]);
        let agent = agent(provider.clone(), 5);

        let answer = agent
            .process_input("How do we manage gold price risk?", &ConversationHistory::new())
            .await;

        assert_eq!(answer, "Hedge your gold exposure.");
        assert_eq!(provider.call_count(), 1);

        let request = &provider.requests()[0];
        assert_eq!(request.messages.len(), 1);
        assert_eq!(
            request.stop_sequences.as_deref(),
            Some(&["\nObservation:".to_string()][..])
        );
        assert!(request.messages[0].text().contains("Human: How do we manage gold price risk?"));
    }

    #[tokio::test]
    async fn test_tool_call_feeds_observation_back() {
        let provider = ScriptedProvider::replying(&[
            "I need the numbers.\nAction: stock_data\nAction Input: NEM",
            "Final Answer: Newmont trades below its 52 week high.",
        ]);
        let agent = agent(provider.clone(), 5);

        let answer = agent
            .process_input("Is Newmont cheap?", &ConversationHistory::new())
            .await;
        assert_eq!(answer, "Newmont trades below its 52 week high.");

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        let second = requests[1].messages[0].text();
        assert!(second.contains(
            "Action: stock_data\nAction Input: NEM\nObservation: Financial data for NEM: \
             Current Price: $52.30"
        ));
    }

    #[tokio::test]
    async fn test_unknown_tool_lists_valid_names() {
        let provider = ScriptedProvider::replying(&[
            "Action: geology_survey\nAction Input: Pilbara",
            "Final Answer: Iron ore is concentrated in the Pilbara.",
        ]);
        let agent = agent(provider.clone(), 5);

        let answer = agent
            .process_input("Where is iron ore mined?", &ConversationHistory::new())
            .await;
        assert_eq!(answer, "Iron ore is concentrated in the Pilbara.");

        let second = provider.requests()[1].messages[0].text().to_string();
        assert!(second.contains(
            "Observation: Unknown tool 'geology_survey'. Valid tools are: competitor_analysis, market_analysis, stock_data"
        ));
    }

    #[tokio::test]
    async fn test_step_limit_yields_error_text() {
        let provider =
            ScriptedProvider::replying(&["Action: market_analysis\nAction Input: copper"]);
        let agent = agent(provider.clone(), 3);

        let answer = agent
            .process_input("Plan our copper strategy", &ConversationHistory::new())
            .await;

        assert_eq!(
            answer,
            "Error processing request: Agent stopped after 3 steps without a final answer"
        );
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_provider_failure_yields_error_text() {
        let provider = ScriptedProvider::failing("connection refused");
        let agent = agent(provider, 5);

        let answer = agent
            .process_input("Hello", &ConversationHistory::new())
            .await;
        assert!(answer.starts_with("Error processing request: "));
        assert!(answer.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_call() {
        let provider = ScriptedProvider::replying(&["Final Answer: unused"]);
        let agent = agent(provider.clone(), 5);

        let answer = agent.process_input("  ", &ConversationHistory::new()).await;
        assert!(answer.starts_with("Error processing request"));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_history_reaches_prompt_through_context() {
        let provider = ScriptedProvider::replying(&["Final Answer: Yes, in Nevada."]);
        let agent = agent(provider.clone(), 5);

        let mut history = ConversationHistory::new();
        history.record_exchange("Do we own gold assets?", "Two mines in Nevada.");
        let context = Context::new().with_history(history);

        let answer = agent
            .process("Any in the US?".to_string(), &context)
            .await
            .unwrap();
        assert_eq!(answer, "Yes, in Nevada.");

        let prompt = provider.requests()[0].messages[0].text().to_string();
        assert!(prompt.contains("Human: Do we own gold assets?\nAI: Two mines in Nevada."));
    }

    #[tokio::test]
    async fn test_respond_reads_history_from_context() {
        let provider = ScriptedProvider::failing("upstream timeout");
        let agent = agent(provider.clone(), 5);

        let mut history = ConversationHistory::new();
        history.record_exchange("Which metals?", "Copper and lithium.");
        let context = Context::new().with_session_id("sess-9").with_history(history);

        let answer = agent.respond("Rank them", &context).await;
        assert!(answer.starts_with("Error processing request: "));
        assert!(answer.contains("upstream timeout"));

        let prompt = provider.requests()[0].messages[0].text().to_string();
        assert!(prompt.contains("Human: Which metals?\nAI: Copper and lithium."));
    }
}
