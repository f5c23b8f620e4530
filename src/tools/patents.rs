//! Patent search tool backed by the SerpAPI Google Patents engine.
//!
//! Failures here are reported, not raised: backend errors, empty result
//! sets, and transport problems all come back as readable strings, so the
//! model sees them as ordinary tool output and can adjust its queries.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::Tool;

const SERPAPI_BASE_URL: &str = "https://serpapi.com";

/// Upper bound on results requested from and rendered for one query.
const MAX_RESULTS: usize = 10;

/// The portion of the SerpAPI response this tool consumes.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub organic_results: Vec<PatentResult>,
}

/// One organic search result. Every field is optional upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatentResult {
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub patent_id: Option<String>,
    pub inventor: Option<String>,
    pub assignee: Option<String>,
    pub publication_date: Option<String>,
}

/// Render up to ten patent records into the report block shown to the
/// model. Missing fields degrade to placeholders; this never fails.
pub fn format_results(query: &str, patents: &[PatentResult]) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Patent Search Results for: '{}'", query));
    lines.push("=".repeat(50));

    for (i, patent) in patents.iter().take(MAX_RESULTS).enumerate() {
        let title = patent.title.as_deref().unwrap_or("No title available");
        let snippet = patent.snippet.as_deref().unwrap_or("No description available");
        let patent_id = patent.patent_id.as_deref().unwrap_or("No patent ID");
        let inventor = patent.inventor.as_deref().unwrap_or("Unknown inventor");
        let assignee = patent.assignee.as_deref().unwrap_or("Unknown assignee");
        let publication_date = patent.publication_date.as_deref().unwrap_or("Unknown date");

        lines.push(format!("\n{}. {}", i + 1, title));
        lines.push(format!("   Patent ID: {}", patent_id));
        lines.push(format!("   Inventor: {}", inventor));
        lines.push(format!("   Assignee: {}", assignee));
        lines.push(format!("   Publication Date: {}", publication_date));
        lines.push(format!("   Description: {}", snippet));
        lines.push("-".repeat(40));
    }

    lines.join("\n")
}

/// Search patents via the SerpAPI Google Patents engine.
pub struct PatentSearch {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl PatentSearch {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key: api_key.into(),
            base_url: SERPAPI_BASE_URL.to_string(),
            client,
        }
    }

    /// Override the backend base URL (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// One page of results for `query`, already rendered.
    async fn search(&self, query: &str) -> anyhow::Result<String> {
        let url = format!("{}/search.json", self.base_url);

        debug!(query, "Searching patents");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("engine", "google_patents"),
                ("q", query),
                ("num", "10"),
                ("api_key", &self.api_key),
            ])
            .send()
            .await?;

        let body: SearchResponse = response.json().await?;
        Ok(render_response(query, body))
    }
}

/// Turn a parsed backend response into tool output. Backend-reported errors
/// and empty result sets are part of the normal output, not failures.
fn render_response(query: &str, body: SearchResponse) -> String {
    if let Some(error) = body.error {
        warn!(query, %error, "Search backend reported an error");
        return format!("Error in patent search: {}", error);
    }

    if body.organic_results.is_empty() {
        return format!("No patents found for query: '{}'", query);
    }

    format_results(query, &body.organic_results)
}

#[async_trait]
impl Tool for PatentSearch {
    fn name(&self) -> &str {
        "patent_search"
    }

    fn description(&self) -> &str {
        "Search for patents using a query. Input should be a clear, specific search query about an invention or technology."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query describing the invention or technology"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let query = args["query"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'query' argument"))?;

        // Transport and parse failures become tool output, never an Err:
        // the model should see the failure text and react to it.
        match self.search(query).await {
            Ok(output) => Ok(output),
            Err(e) => Ok(format!("Error occurred during patent search: {}", e)),
        }
    }
}
