//! LLM provider abstraction layer for the mining industry agent
//!
//! This crate provides provider-agnostic abstractions for talking to a
//! chat-completion model:
//!
//! - Message types for LLM communication
//! - Completion request/response types
//! - Tool definitions used to describe capabilities inside prompts
//! - Provider trait for LLM implementations
//! - An OpenAI-compatible provider (behind the `openai` feature)

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod tools;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;
pub use tools::ToolDefinition;

// Provider implementations (feature-gated)
#[cfg(feature = "openai")]
pub mod providers;
