//! Execution context for agents
//!
//! The `Context` struct carries per-call state into [`crate::Agent::process`]:
//! a small key-value store plus the session's conversation history.

use crate::ConversationHistory;
use std::collections::HashMap;

/// Well-known context keys
pub mod keys {
    /// Free-form background text supplied alongside a query
    pub const ANALYSIS_CONTEXT: &str = "analysis_context";
    /// Session ID for tracking
    pub const SESSION_ID: &str = "session_id";
}

/// Context passed to agents during execution
///
/// # Example
///
/// ```
/// use mining_core::Context;
///
/// let ctx = Context::new()
///     .with_session_id("session-123")
///     .with_analysis_context("Focus on Chilean copper output");
///
/// assert_eq!(ctx.session_id(), Some("session-123"));
/// assert_eq!(ctx.analysis_context(), Some("Focus on Chilean copper output"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    data: HashMap<String, serde_json::Value>,
    history: ConversationHistory,
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session ID
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.insert(keys::SESSION_ID, serde_json::json!(session_id.into()));
        self
    }

    /// Attach a context string to the query
    ///
    /// Blank strings are ignored so that an empty text area behaves like no
    /// context at all.
    pub fn with_analysis_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        if !context.trim().is_empty() {
            self.insert(keys::ANALYSIS_CONTEXT, serde_json::json!(context));
        }
        self
    }

    /// Attach a snapshot of the conversation so far
    pub fn with_history(mut self, history: ConversationHistory) -> Self {
        self.history = history;
        self
    }

    /// Get the session ID
    pub fn session_id(&self) -> Option<&str> {
        self.get(keys::SESSION_ID).and_then(|v| v.as_str())
    }

    /// Get the context string, if any
    pub fn analysis_context(&self) -> Option<&str> {
        self.get(keys::ANALYSIS_CONTEXT).and_then(|v| v.as_str())
    }

    /// Conversation history visible to the agent
    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Insert a value into the context
    fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Get a value from the context
    fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }
}
