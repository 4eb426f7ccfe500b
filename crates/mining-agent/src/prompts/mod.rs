//! Prompt templates used by the mining agents
//!
//! - `system`: persona prompts
//! - `strategist`: the tool-catalog prompt of [`crate::MiningIndustryAgent`]
//! - `template`: the MiniJinja wrapper both are rendered with

mod strategist;
mod system;
mod template;

pub use strategist::{AI_PREFIX, HUMAN_PREFIX, OBSERVATION_STOP, StrategistPrompt};
pub use system::{ANALYST_SYSTEM_PROMPT, analyst_user_message};
pub use template::PromptTemplate;
