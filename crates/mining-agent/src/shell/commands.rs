//! Slash commands of the analyst REPL

use super::{Result, ShellError};
use crate::analysis::{AnalysisRequest, AnalysisType};

/// Help shown by `/help`
pub const HELP_TEXT: &str = "\
Commands:
  /analyze <type> <field> | <field> ...   Run a structured analysis
      market-research            <commodity> | <region>
      competitor-analysis        <company, ...> | <focus area, ...>
      risk-assessment            <project type> | <risk category, ...>
      investment-opportunities   <commodity> | <horizon> | <risk tolerance>
      strategic-planning         <objective> | <time frame>
  /lookup <SYMBOL>                         Show market data for a ticker
  /history                                 Show the conversation so far
  /help                                    Show this help
  /exit                                    Leave the session
Anything else is sent to the analyst as a query.";

/// Parsed REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Analyze(AnalysisRequest),
    Lookup(String),
    History,
    Help,
    Exit,
    /// Free-text query (not a command)
    Query(String),
}

impl Command {
    /// Parse a line of REPL input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ShellError::EmptyQuery);
        }

        let Some(rest) = input.strip_prefix('/') else {
            return Ok(Command::Query(input.to_string()));
        };

        let (name, args) = rest
            .split_once(char::is_whitespace)
            .map_or((rest, ""), |(name, args)| (name, args.trim()));

        match name.to_lowercase().as_str() {
            "analyze" | "a" => parse_analysis(args).map(Command::Analyze),
            "lookup" | "l" => {
                let symbol = args.split_whitespace().next().ok_or_else(|| {
                    ShellError::InvalidCommand("Missing symbol for lookup command".to_string())
                })?;
                Ok(Command::Lookup(symbol.to_uppercase()))
            }
            "history" => Ok(Command::History),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            other => Err(ShellError::InvalidCommand(format!(
                "Unknown command '/{other}'. Type /help for available commands"
            ))),
        }
    }
}

fn parse_analysis(args: &str) -> Result<AnalysisRequest> {
    let (kind, fields) = args
        .split_once(char::is_whitespace)
        .map_or((args, ""), |(kind, fields)| (kind, fields.trim()));

    if kind.is_empty() {
        return Err(ShellError::InvalidCommand(
            "Missing analysis type for analyze command".to_string(),
        ));
    }
    let kind: AnalysisType = kind.parse()?;
    let fields: Vec<&str> = fields.split('|').map(str::trim).collect();
    let field = |i: usize| fields.get(i).copied().unwrap_or("");
    let list = |i: usize| -> Vec<&str> { field(i).split(',').map(str::trim).collect() };

    let request = match kind {
        AnalysisType::MarketResearch => AnalysisRequest::market_research(field(0), field(1)),
        AnalysisType::CompetitorAnalysis => {
            AnalysisRequest::competitor_analysis(&list(0), &list(1))
        }
        AnalysisType::RiskAssessment => AnalysisRequest::risk_assessment(field(0), &list(1)),
        AnalysisType::InvestmentOpportunities => {
            AnalysisRequest::investment_opportunities(field(0), field(1), field(2))
        }
        AnalysisType::StrategicPlanning => AnalysisRequest::strategic_planning(field(0), field(1)),
    }?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        assert_eq!(
            Command::parse("  Is gold a hedge?  ").unwrap(),
            Command::Query("Is gold a hedge?".to_string())
        );
        assert!(matches!(Command::parse("   "), Err(ShellError::EmptyQuery)));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("/lookup fcx").unwrap(), Command::Lookup("FCX".to_string()));
        assert_eq!(Command::parse("/history").unwrap(), Command::History);
        assert_eq!(Command::parse("/HELP").unwrap(), Command::Help);
        assert_eq!(Command::parse("/quit").unwrap(), Command::Exit);
        assert!(Command::parse("/lookup").is_err());
        assert!(Command::parse("/drill").is_err());
    }

    #[test]
    fn test_parse_market_research() {
        let command = Command::parse("/analyze market-research copper | South America").unwrap();
        assert_eq!(
            command,
            Command::Analyze(AnalysisRequest::market_research("Copper", "South America").unwrap())
        );
    }

    #[test]
    fn test_parse_list_fields() {
        let command =
            Command::parse("/analyze competitor-analysis BHP, Vale | Market Share, ESG Practices")
                .unwrap();
        let Command::Analyze(AnalysisRequest::CompetitorAnalysis {
            companies,
            focus_areas,
        }) = command
        else {
            panic!("expected a competitor analysis");
        };
        assert_eq!(companies, vec!["BHP", "Vale"]);
        assert_eq!(focus_areas, vec!["Market Share", "ESG Practices"]);
    }

    #[test]
    fn test_parse_investment_opportunities() {
        let command = Command::parse(
            "/a investment-opportunities Uranium | Medium-term (1-3 years) | Moderate",
        )
        .unwrap();
        let Command::Analyze(request) = command else {
            panic!("expected an analysis");
        };
        assert!(request.to_query().contains("Medium-term (1-3 years)"));
    }

    #[test]
    fn test_parse_analysis_errors() {
        assert!(Command::parse("/analyze").is_err());
        assert!(Command::parse("/analyze forecasting Gold").is_err());
        assert!(Command::parse("/analyze market-research Gold").is_err());
    }
}
