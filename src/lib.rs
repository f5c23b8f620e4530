//! # Patent Copilot
//!
//! A command-line patent search assistant.
//!
//! Given a free-text invention description, an LLM-driven agent derives
//! several patent-search queries, runs them against the SerpAPI Google
//! Patents backend, and synthesizes a prior-art report with a novelty
//! assessment and patent-strategy recommendations.
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Collect the invention description from the console
//! 2. Build context with the research system prompt and the search tool
//! 3. Call the model; execute any patent searches it requests
//! 4. Feed results back until the model emits the final report
//!
//! ## Example
//!
//! ```rust,ignore
//! use patent_copilot::{agent::Agent, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::from_config(&config);
//! let report = agent.analyze("A smart water bottle with hydration sensors").await;
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod shell;
pub mod tools;

pub use config::Config;
