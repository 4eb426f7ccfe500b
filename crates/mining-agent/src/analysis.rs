//! Structured analysis requests
//!
//! Five analysis types, each with its own option lists. A validated
//! [`AnalysisRequest`] renders to the natural-language query that is sent to
//! the [`crate::MiningAnalyst`]; every selected option appears verbatim in it.

use crate::error::{AgentError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Option lists offered by the analysis form
pub mod options {
    pub const COMMODITIES: &[&str] = &[
        "Gold",
        "Silver",
        "Copper",
        "Iron Ore",
        "Lithium",
        "Nickel",
        "Coal",
        "Uranium",
        "Zinc",
        "Rare Earth Elements",
    ];

    pub const REGIONS: &[&str] = &[
        "Global",
        "North America",
        "South America",
        "Europe",
        "Africa",
        "Asia Pacific",
        "Australia",
    ];

    /// Suggested companies; free names are accepted too
    pub const COMPANIES: &[&str] = &[
        "BHP",
        "Rio Tinto",
        "Vale",
        "Glencore",
        "Anglo American",
        "Freeport-McMoRan",
        "Newmont",
        "Barrick Gold",
    ];

    pub const FOCUS_AREAS: &[&str] = &[
        "Production Costs",
        "Market Share",
        "Financial Performance",
        "ESG Practices",
        "Technology Adoption",
        "Expansion Plans",
    ];

    pub const PROJECT_TYPES: &[&str] = &[
        "Open Pit",
        "Underground",
        "Placer",
        "In-Situ Leaching",
        "Exploration",
    ];

    pub const RISK_CATEGORIES: &[&str] = &[
        "Geological",
        "Environmental",
        "Regulatory",
        "Political",
        "Market",
        "Operational",
        "Social License",
    ];

    pub const HORIZONS: &[&str] = &[
        "Short-term (< 1 year)",
        "Medium-term (1-3 years)",
        "Long-term (> 3 years)",
    ];

    pub const RISK_TOLERANCES: &[&str] = &["Conservative", "Moderate", "Aggressive"];

    pub const TIME_FRAMES: &[&str] = &["1 year", "3 years", "5 years", "10 years"];
}

/// Kind of analysis offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisType {
    MarketResearch,
    CompetitorAnalysis,
    RiskAssessment,
    InvestmentOpportunities,
    StrategicPlanning,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 5] = [
        Self::MarketResearch,
        Self::CompetitorAnalysis,
        Self::RiskAssessment,
        Self::InvestmentOpportunities,
        Self::StrategicPlanning,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::MarketResearch => "Market Research",
            Self::CompetitorAnalysis => "Competitor Analysis",
            Self::RiskAssessment => "Risk Assessment",
            Self::InvestmentOpportunities => "Investment Opportunities",
            Self::StrategicPlanning => "Strategic Planning",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AnalysisType {
    type Err = AgentError;

    /// Accepts labels as well as kebab and snake case, ignoring case
    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|kind| kind.label().replace(' ', "").to_ascii_lowercase() == wanted)
            .ok_or_else(|| AgentError::InvalidSelection(format!("unknown analysis type '{s}'")))
    }
}

/// A validated analysis form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AnalysisRequest {
    MarketResearch {
        commodity: String,
        region: String,
    },
    CompetitorAnalysis {
        companies: Vec<String>,
        focus_areas: Vec<String>,
    },
    RiskAssessment {
        project_type: String,
        risk_categories: Vec<String>,
    },
    InvestmentOpportunities {
        commodity: String,
        horizon: String,
        risk_tolerance: String,
    },
    StrategicPlanning {
        objective: String,
        time_frame: String,
    },
}

impl AnalysisRequest {
    pub fn market_research(commodity: &str, region: &str) -> Result<Self> {
        Ok(Self::MarketResearch {
            commodity: choose("commodity", options::COMMODITIES, commodity)?,
            region: choose("region", options::REGIONS, region)?,
        })
    }

    /// Companies from [`options::COMPANIES`] are canonicalized; other names
    /// are kept as typed.
    pub fn competitor_analysis<S: AsRef<str>>(companies: &[S], focus_areas: &[S]) -> Result<Self> {
        let companies: Vec<String> = companies
            .iter()
            .map(|c| c.as_ref().trim())
            .filter(|c| !c.is_empty())
            .map(|c| {
                canonical(options::COMPANIES, c).map_or_else(|| c.to_string(), str::to_string)
            })
            .collect();
        if companies.is_empty() {
            return Err(AgentError::InvalidSelection(
                "select at least one company".to_string(),
            ));
        }

        Ok(Self::CompetitorAnalysis {
            companies,
            focus_areas: choose_many("focus area", options::FOCUS_AREAS, focus_areas)?,
        })
    }

    pub fn risk_assessment<S: AsRef<str>>(
        project_type: &str,
        risk_categories: &[S],
    ) -> Result<Self> {
        Ok(Self::RiskAssessment {
            project_type: choose("project type", options::PROJECT_TYPES, project_type)?,
            risk_categories: choose_many(
                "risk category",
                options::RISK_CATEGORIES,
                risk_categories,
            )?,
        })
    }

    pub fn investment_opportunities(
        commodity: &str,
        horizon: &str,
        risk_tolerance: &str,
    ) -> Result<Self> {
        Ok(Self::InvestmentOpportunities {
            commodity: choose("commodity", options::COMMODITIES, commodity)?,
            horizon: choose("investment horizon", options::HORIZONS, horizon)?,
            risk_tolerance: choose("risk tolerance", options::RISK_TOLERANCES, risk_tolerance)?,
        })
    }

    pub fn strategic_planning(objective: &str, time_frame: &str) -> Result<Self> {
        let objective = objective.trim();
        if objective.is_empty() {
            return Err(AgentError::InvalidSelection(
                "strategic objective must not be empty".to_string(),
            ));
        }

        Ok(Self::StrategicPlanning {
            objective: objective.to_string(),
            time_frame: choose("time frame", options::TIME_FRAMES, time_frame)?,
        })
    }

    pub fn analysis_type(&self) -> AnalysisType {
        match self {
            Self::MarketResearch { .. } => AnalysisType::MarketResearch,
            Self::CompetitorAnalysis { .. } => AnalysisType::CompetitorAnalysis,
            Self::RiskAssessment { .. } => AnalysisType::RiskAssessment,
            Self::InvestmentOpportunities { .. } => AnalysisType::InvestmentOpportunities,
            Self::StrategicPlanning { .. } => AnalysisType::StrategicPlanning,
        }
    }

    /// Natural-language query sent to the analyst
    pub fn to_query(&self) -> String {
        match self {
            Self::MarketResearch { commodity, region } => format!(
                "Provide a market research analysis of the {commodity} market in {region}, \
                 covering supply and demand, price trends, key producers and the outlook."
            ),
            Self::CompetitorAnalysis {
                companies,
                focus_areas,
            } => format!(
                "Compare the following mining companies: {}. Focus on: {}.",
                companies.join(", "),
                focus_areas.join(", ")
            ),
            Self::RiskAssessment {
                project_type,
                risk_categories,
            } => format!(
                "Assess the risks of a {project_type} mining project across these categories: {}. \
                 Rate each risk and suggest mitigations.",
                risk_categories.join(", ")
            ),
            Self::InvestmentOpportunities {
                commodity,
                horizon,
                risk_tolerance,
            } => format!(
                "Identify {commodity} mining investment opportunities for a {horizon} horizon \
                 with a {risk_tolerance} risk tolerance."
            ),
            Self::StrategicPlanning {
                objective,
                time_frame,
            } => format!(
                "Develop a strategic plan over {time_frame} for the following objective: {objective}"
            ),
        }
    }
}

impl fmt::Display for AnalysisRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

fn canonical(options: &'static [&'static str], value: &str) -> Option<&'static str> {
    let value = value.trim();
    options
        .iter()
        .copied()
        .find(|option| option.eq_ignore_ascii_case(value))
}

fn choose(field: &str, options: &'static [&'static str], value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(AgentError::InvalidSelection(format!("{field} is required")));
    }

    canonical(options, value).map(str::to_string).ok_or_else(|| {
        AgentError::InvalidSelection(format!(
            "'{}' is not a valid {field}; choose one of: {}",
            value.trim(),
            options.join(", ")
        ))
    })
}

fn choose_many<S: AsRef<str>>(
    field: &str,
    options: &'static [&'static str],
    values: &[S],
) -> Result<Vec<String>> {
    let chosen = values
        .iter()
        .map(|v| v.as_ref().trim())
        .filter(|v| !v.is_empty())
        .map(|v| choose(field, options, v))
        .collect::<Result<Vec<_>>>()?;

    if chosen.is_empty() {
        return Err(AgentError::InvalidSelection(format!(
            "select at least one {field}"
        )));
    }
    Ok(chosen)
}
