//! Session conversation history
//!
//! History is append-only and can only grow by whole exchanges, so entries
//! always alternate user, assistant, user, assistant...

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single entry in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Ordered, append-only record of a session's conversation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationHistory {
    entries: Vec<ChatEntry>,
}

impl ConversationHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message and the assistant's reply to it
    pub fn record_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        let now = Utc::now();
        self.entries.push(ChatEntry {
            role: ChatRole::User,
            text: user.into(),
            timestamp: now,
        });
        self.entries.push(ChatEntry {
            role: ChatRole::Assistant,
            text: assistant.into(),
            timestamp: Utc::now(),
        });
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    /// Iterate over entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &ChatEntry> {
        self.entries.iter()
    }

    /// Number of entries (twice the number of exchanges)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the history as a transcript with the given speaker labels
    ///
    /// ```
    /// use mining_core::ConversationHistory;
    ///
    /// let mut history = ConversationHistory::new();
    /// history.record_exchange("Gold outlook?", "Bullish");
    /// assert_eq!(history.transcript("Human", "AI"), "Human: Gold outlook?\nAI: Bullish");
    /// ```
    pub fn transcript(&self, user_label: &str, assistant_label: &str) -> String {
        self.entries
            .iter()
            .map(|entry| {
                let label = match entry.role {
                    ChatRole::User => user_label,
                    ChatRole::Assistant => assistant_label,
                };
                format!("{label}: {}", entry.text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchanges_alternate() {
        let mut history = ConversationHistory::new();
        for i in 0..4 {
            history.record_exchange(format!("q{i}"), format!("a{i}"));
        }

        assert_eq!(history.len(), 8);
        for (i, entry) in history.iter().enumerate() {
            let expected = if i % 2 == 0 {
                ChatRole::User
            } else {
                ChatRole::Assistant
            };
            assert_eq!(entry.role, expected);
        }
        assert_eq!(history.entries()[6].text, "q3");
        assert_eq!(history.entries()[7].text, "a3");
    }

    #[test]
    fn test_empty_transcript() {
        let history = ConversationHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.transcript("Human", "AI"), "");
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&ChatRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
