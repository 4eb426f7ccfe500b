//! Command-line interface for the mining industry agent
//!
//! # Usage
//!
//! ```bash
//! export OPENAI_API_KEY="sk-..."
//!
//! mining-agent ask "What is driving lithium prices?" --context "Focus on Australia"
//! mining-agent analyze market-research --commodity Copper --region "South America"
//! mining-agent lookup NEM
//! mining-agent chat
//! mining-agent repl
//! ```

mod render;
mod repl;

use clap::{Parser, Subcommand};
use mining_agent::{AgentConfig, AnalysisRequest, Shell, ShellAction, ShellReply};
use mining_core::ChatRole;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mining-agent")]
#[command(version, about = "Mining industry analyst and strategist", long_about = None)]
struct Args {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, default_value = "")]
    api_key: String,

    /// Print replies as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Chat with the tool-using mining strategist
    Chat,

    /// Analyst session with slash commands
    Repl,

    /// Run a structured analysis
    Analyze {
        #[command(subcommand)]
        kind: AnalyzeCommand,
    },

    /// Show market data for a ticker
    Lookup { symbol: String },

    /// Ask the analyst a question
    Ask {
        query: String,

        /// Background the analyst should take into account
        #[arg(long)]
        context: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum AnalyzeCommand {
    /// Market research for a commodity and region
    MarketResearch {
        #[arg(long)]
        commodity: String,
        #[arg(long, default_value = "Global")]
        region: String,
    },

    /// Compare mining companies
    CompetitorAnalysis {
        #[arg(long = "company", required = true, value_delimiter = ',')]
        companies: Vec<String>,
        #[arg(long = "focus", required = true, value_delimiter = ',')]
        focus_areas: Vec<String>,
    },

    /// Assess the risks of a mining project
    RiskAssessment {
        #[arg(long)]
        project_type: String,
        #[arg(long = "risk", required = true, value_delimiter = ',')]
        risk_categories: Vec<String>,
    },

    /// Find investment opportunities
    InvestmentOpportunities {
        #[arg(long)]
        commodity: String,
        #[arg(long, default_value = "Medium-term (1-3 years)")]
        horizon: String,
        #[arg(long, default_value = "Moderate")]
        risk_tolerance: String,
    },

    /// Build a strategic plan
    StrategicPlanning {
        #[arg(long)]
        objective: String,
        #[arg(long, default_value = "3 years")]
        time_frame: String,
    },
}

impl AnalyzeCommand {
    fn into_request(self) -> mining_agent::Result<AnalysisRequest> {
        match self {
            Self::MarketResearch { commodity, region } => {
                AnalysisRequest::market_research(&commodity, &region)
            }
            Self::CompetitorAnalysis {
                companies,
                focus_areas,
            } => AnalysisRequest::competitor_analysis(&companies, &focus_areas),
            Self::RiskAssessment {
                project_type,
                risk_categories,
            } => AnalysisRequest::risk_assessment(&project_type, &risk_categories),
            Self::InvestmentOpportunities {
                commodity,
                horizon,
                risk_tolerance,
            } => AnalysisRequest::investment_opportunities(&commodity, &horizon, &risk_tolerance),
            Self::StrategicPlanning {
                objective,
                time_frame,
            } => AnalysisRequest::strategic_planning(&objective, &time_frame),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mining_utils::init_tracing();

    let args = Args::parse();

    if args.api_key.trim().is_empty() {
        eprintln!(
            "Warning: Please enter your OpenAI API key to continue \
             (pass --api-key or set OPENAI_API_KEY)"
        );
        return Ok(());
    }

    let config = AgentConfig::from_env()?;
    info!(model = %config.model, "Starting mining-agent");
    let mut shell = Shell::new(args.api_key, config)?;

    match args.command {
        Commands::Chat => repl::run_chat(&mut shell).await?,
        Commands::Repl => repl::run_analyst(&mut shell).await?,
        Commands::Analyze { kind } => {
            let request = kind.into_request()?;
            run_once(&mut shell, ShellAction::Analyze(request), args.json).await?;
        }
        Commands::Lookup { symbol } => {
            run_once(&mut shell, ShellAction::Lookup(symbol), args.json).await?;
        }
        Commands::Ask { query, context } => {
            run_once(&mut shell, ShellAction::Ask { query, context }, args.json).await?;
        }
    }

    Ok(())
}

async fn run_once(shell: &mut Shell, action: ShellAction, json: bool) -> anyhow::Result<()> {
    let reply = shell.handle(action).await?;
    print_reply(&reply, json)?;
    Ok(())
}

pub(crate) fn print_reply(reply: &ShellReply, json: bool) -> anyhow::Result<()> {
    match (reply, json) {
        (ShellReply::Market { data, .. }, true) => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        (ShellReply::Market { symbol, data }, false) => {
            println!("{}", render::market_tiles(symbol, data));
        }
        (ShellReply::Text(text), true) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "response": text }))?
            );
        }
        (ShellReply::Text(text), false) => {
            println!("{}", render::bubble(ChatRole::Assistant, text));
        }
    }
    Ok(())
}
