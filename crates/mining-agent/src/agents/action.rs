//! Parser for the strategist's reply grammar
//!
//! ```text
//! Action: <tool name>
//! Action Input: <single string>
//! ```
//!
//! or `Final Answer: <text>`. Anything else is taken as the final answer.

use regex::Regex;
use std::sync::LazyLock;

static FINAL_ANSWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)final\s+answer\s*:\s*(.*)").expect("valid regex"));

static ACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*action\s*:\s*(.+?)\s*$\s*^\s*action\s+input\s*:\s*(.*)")
        .expect("valid regex")
});

/// Next step chosen by the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentAction {
    /// Call a tool with a single string input
    UseTool { tool: String, input: String },

    /// Reply to the user
    Finish(String),
}

impl AgentAction {
    /// Parse model output into an action
    ///
    /// `Final Answer:` wins over a tool call appearing in the same reply.
    pub fn parse(text: &str) -> Self {
        if let Some(caps) = FINAL_ANSWER.captures(text) {
            return AgentAction::Finish(caps[1].trim().to_string());
        }

        if let Some(caps) = ACTION.captures(text) {
            let tool = strip_quotes(&caps[1]);
            let input = caps[2].lines().next().map(strip_quotes).unwrap_or_default();
            if !tool.is_empty() {
                return AgentAction::UseTool { tool, input };
            }
        }

        AgentAction::Finish(text.trim().to_string())
    }

    pub fn is_finish(&self) -> bool {
        matches!(self, AgentAction::Finish(_))
    }
}

fn strip_quotes(s: &str) -> String {
    s.trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '`'))
        .trim()
        .to_string()
}
