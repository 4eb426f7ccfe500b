//! Tool trait and name-to-handler registry

use crate::error::Result;
use async_trait::async_trait;
use mining_llm::ToolDefinition;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// A capability the strategist can invoke with a single string input
#[async_trait]
pub trait MiningTool: Send + Sync {
    /// Name, description and input schema
    fn definition(&self) -> ToolDefinition;

    /// Run the tool; the returned text becomes the observation
    async fn run(&self, input: &str) -> Result<String>;
}

/// Registry for managing tools, keyed by tool name
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn MiningTool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool of the same name
    pub fn register(&mut self, tool: Arc<dyn MiningTool>) {
        self.tools.insert(tool.definition().name, tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn MiningTool>> {
        self.tools.get(name).cloned()
    }

    /// Definitions of all tools, ordered by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|tool| tool.definition()).collect()
    }

    /// Registered tool names, ordered
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run the named tool and return its observation text
    ///
    /// Unknown names and tool failures are reported back to the model as
    /// observations so it can correct itself.
    pub async fn dispatch(&self, name: &str, input: &str) -> String {
        let Some(tool) = self.get(name) else {
            warn!(tool = name, "Model requested an unknown tool");
            return format!(
                "Unknown tool '{name}'. Valid tools are: {}",
                self.names().join(", ")
            );
        };

        debug!(tool = name, input, "Running tool");
        match tool.run(input).await {
            Ok(observation) => observation,
            Err(e) => {
                warn!(tool = name, "Tool failed: {e}");
                format!("Tool '{name}' failed: {e}")
            }
        }
    }
}
