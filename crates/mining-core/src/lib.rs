//! Core abstractions for the mining industry agent
//!
//! This crate defines the fundamental traits and types shared by the agent
//! crates: the [`Agent`] trait, the per-call [`Context`] and the session
//! [`ConversationHistory`].

pub mod agent;
pub mod context;
pub mod error;
pub mod history;

pub use agent::Agent;
pub use context::Context;
pub use error::{Error, Result};
pub use history::{ChatEntry, ChatRole, ConversationHistory};
