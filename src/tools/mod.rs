//! Tool abstraction and registry for the agent loop.
//!
//! Tools are named callables exposed to the model. The registry hands their
//! schemas to the LLM client and dispatches the tool calls the model makes.

mod patents;

pub use patents::{format_results, PatentResult, PatentSearch, SearchResponse};

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm::ToolSchema;

/// A callable capability exposed to the model.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name, referenced by the model in tool calls.
    fn name(&self) -> &str;

    /// Natural-language description the model uses to decide when to call.
    fn description(&self) -> &str;

    /// JSON Schema describing the tool's parameters.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Registry of available tools.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Wire-format schemas for every registered tool.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools
            .values()
            .map(|t| ToolSchema::function(t.name(), t.description(), t.parameters_schema()))
            .collect()
    }

    /// Names of all registered tools.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Execute a tool call by name.
    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;
        tool.execute(args).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
