//! Agent module - the patent analysis orchestrator.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build context with the research system prompt and the user's invention
//! 2. Call the model with the patent search tool available
//! 3. If the model requests a search, execute it and feed the results back
//! 4. Repeat until the model produces the final report or the iteration cap

mod agent_loop;
mod prompt;

pub use agent_loop::Agent;
pub use prompt::{analysis_request, system_prompt};
