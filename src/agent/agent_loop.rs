//! Core agent loop implementation.

use std::sync::Arc;

use crate::config::Config;
use crate::llm::{ChatMessage, GeminiClient, LlmClient};
use crate::tools::{PatentSearch, ToolRegistry};

use super::prompt::{analysis_request, system_prompt};

/// The patent analysis agent: one reasoning/tool-use episode per request.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    model: String,
    max_iterations: usize,
}

impl Agent {
    /// Create an agent from explicit parts. Tests pass a scripted client
    /// and a registry of stub tools.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: ToolRegistry,
        model: impl Into<String>,
        max_iterations: usize,
    ) -> Self {
        Self {
            llm,
            tools,
            model: model.into(),
            max_iterations,
        }
    }

    /// Wire up the production agent: Gemini client plus the patent search tool.
    pub fn from_config(config: &Config) -> Self {
        let llm = Arc::new(GeminiClient::new(config.gemini_api_key.clone()));
        let mut tools = ToolRegistry::new();
        tools.register(Box::new(PatentSearch::new(config.serpapi_api_key.clone())));

        Self::new(llm, tools, config.model.clone(), config.max_iterations)
    }

    /// Analyze an invention description and return the final report.
    ///
    /// Never fails: model-call errors, malformed tool calls, and iteration
    /// cap exhaustion all surface as a readable error string.
    pub async fn analyze(&self, description: &str) -> String {
        match self.run_episode(description).await {
            Ok(report) => report,
            Err(e) => format!("Error during patent analysis: {}", e),
        }
    }

    /// Run one tools-in-a-loop episode.
    async fn run_episode(&self, description: &str) -> anyhow::Result<String> {
        let mut messages = vec![
            ChatMessage::system(system_prompt()),
            ChatMessage::user(analysis_request(description)),
        ];

        let tool_schemas = self.tools.schemas();

        for iteration in 0..self.max_iterations {
            tracing::debug!("Agent iteration {}", iteration + 1);

            let response = self
                .llm
                .chat_completion(&self.model, &messages, Some(&tool_schemas))
                .await?;

            if let Some(tool_calls) = &response.tool_calls {
                if !tool_calls.is_empty() {
                    messages.push(ChatMessage::assistant(
                        response.content.clone(),
                        Some(tool_calls.clone()),
                    ));

                    for tool_call in tool_calls {
                        tracing::debug!(
                            tool = %tool_call.function.name,
                            args = %tool_call.function.arguments,
                            "Executing tool call"
                        );

                        let result = self.execute_tool_call(tool_call).await;
                        let result_str = match result {
                            Ok(output) => output,
                            // Tool failures go back to the model as text,
                            // not up the stack.
                            Err(e) => format!("Error: {}", e),
                        };

                        messages.push(ChatMessage::tool(tool_call.id.clone(), result_str));
                    }

                    continue;
                }
            }

            // No tool calls: this is the final report.
            if let Some(content) = response.content {
                return Ok(content);
            }

            anyhow::bail!("Model returned an empty response");
        }

        anyhow::bail!(
            "Max iterations ({}) reached without completion",
            self.max_iterations
        )
    }

    /// Execute a single tool call requested by the model.
    async fn execute_tool_call(&self, tool_call: &crate::llm::ToolCall) -> anyhow::Result<String> {
        let args: serde_json::Value = serde_json::from_str(&tool_call.function.arguments)
            .unwrap_or(serde_json::Value::Null);

        self.tools.execute(&tool_call.function.name, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{AssistantMessage, FunctionCall, ToolCall, ToolSchema};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted LLM: pops one canned reply per call.
    struct ScriptedLlm {
        replies: Mutex<Vec<anyhow::Result<AssistantMessage>>>,
    }

    impl ScriptedLlm {
        fn new(mut replies: Vec<anyhow::Result<AssistantMessage>>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
            }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn chat_completion(
            &self,
            _model: &str,
            _messages: &[ChatMessage],
            _tools: Option<&[ToolSchema]>,
        ) -> anyhow::Result<AssistantMessage> {
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(final_answer("out of script")))
        }
    }

    fn final_answer(text: &str) -> AssistantMessage {
        AssistantMessage {
            content: Some(text.to_string()),
            tool_calls: None,
        }
    }

    fn tool_request(name: &str, arguments: &str) -> AssistantMessage {
        AssistantMessage {
            content: None,
            tool_calls: Some(vec![ToolCall {
                id: "call_1".to_string(),
                call_type: "function".to_string(),
                function: FunctionCall {
                    name: name.to_string(),
                    arguments: arguments.to_string(),
                },
            }]),
        }
    }

    fn agent_with(replies: Vec<anyhow::Result<AssistantMessage>>, max_iterations: usize) -> Agent {
        Agent::new(
            Arc::new(ScriptedLlm::new(replies)),
            ToolRegistry::new(),
            "test-model",
            max_iterations,
        )
    }

    #[tokio::test]
    async fn direct_answer_is_returned() {
        let agent = agent_with(vec![Ok(final_answer("the report"))], 10);
        assert_eq!(agent.analyze("an invention").await, "the report");
    }

    #[tokio::test]
    async fn model_failure_becomes_analysis_error() {
        let agent = agent_with(vec![Err(anyhow::anyhow!("model unavailable"))], 10);
        let output = agent.analyze("an invention").await;
        assert!(output.starts_with("Error during patent analysis:"));
        assert!(output.contains("model unavailable"));
    }

    #[tokio::test]
    async fn cap_exhaustion_becomes_analysis_error() {
        // Every round asks for an unknown tool, so the loop never finishes.
        let replies: Vec<_> = (0..3)
            .map(|_| Ok(tool_request("missing_tool", "{}")))
            .collect();
        let agent = agent_with(replies, 3);
        let output = agent.analyze("an invention").await;
        assert!(output.starts_with("Error during patent analysis:"));
        assert!(output.contains("Max iterations (3)"));
    }

    #[tokio::test]
    async fn unknown_tool_is_fed_back_not_fatal() {
        let agent = agent_with(
            vec![
                Ok(tool_request("missing_tool", "{}")),
                Ok(final_answer("recovered")),
            ],
            10,
        );
        assert_eq!(agent.analyze("an invention").await, "recovered");
    }

    #[tokio::test]
    async fn malformed_arguments_are_fed_back_not_fatal() {
        let agent = agent_with(
            vec![
                Ok(tool_request("missing_tool", "not json at all")),
                Ok(final_answer("recovered")),
            ],
            10,
        );
        assert_eq!(agent.analyze("an invention").await, "recovered");
    }

    #[tokio::test]
    async fn empty_response_becomes_analysis_error() {
        let agent = agent_with(
            vec![Ok(AssistantMessage {
                content: None,
                tool_calls: None,
            })],
            10,
        );
        let output = agent.analyze("an invention").await;
        assert!(output.starts_with("Error during patent analysis:"));
        assert!(output.contains("empty response"));
    }
}
