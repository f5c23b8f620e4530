//! Configuration management for Patent Copilot.
//!
//! Configuration can be set via environment variables:
//! - `GEMINI_API_KEY` - Required. API key for the Gemini language model service.
//! - `SERPAPI_API_KEY` - Required. API key for the SerpAPI patent search backend.
//! - `GEMINI_MODEL` - Optional. The model to use. Defaults to `gemini-1.5-flash`.
//! - `MAX_ITERATIONS` - Optional. Maximum agent loop iterations. Defaults to `10`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl ConfigError {
    /// Remediation text printed by the shell when startup validation fails.
    pub fn remediation(&self) -> String {
        match self {
            ConfigError::MissingEnvVar(var) => format!(
                "Error: {var} not found in environment variables\n\
                 Please set your API keys before running:\n\
                 GEMINI_API_KEY=your_gemini_api_key\n\
                 SERPAPI_API_KEY=your_serpapi_key"
            ),
            ConfigError::InvalidValue(var, detail) => {
                format!("Error: invalid value for {var}: {detail}")
            }
        }
    }
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the Gemini model service
    pub gemini_api_key: String,

    /// API key for the SerpAPI search backend
    pub serpapi_api_key: String,

    /// Model identifier
    pub model: String,

    /// Maximum iterations for the agent loop
    pub max_iterations: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if either required API key is
    /// not set. `GEMINI_API_KEY` is checked first, matching the order in
    /// which the shell reports them.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests supply their own lookup so they do
    /// not depend on process-global environment state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let serpapi_api_key = lookup("SERPAPI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("SERPAPI_API_KEY".to_string()))?;

        let model = lookup("GEMINI_MODEL").unwrap_or_else(|| "gemini-1.5-flash".to_string());

        let max_iterations = match lookup("MAX_ITERATIONS") {
            Some(raw) => raw.parse().map_err(|e| {
                ConfigError::InvalidValue("MAX_ITERATIONS".to_string(), format!("{}", e))
            })?,
            None => 10,
        };

        Ok(Self {
            gemini_api_key,
            serpapi_api_key,
            model,
            max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |var| {
            pairs
                .iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_applied() {
        let config = Config::from_lookup(env(&[
            ("GEMINI_API_KEY", "g-key"),
            ("SERPAPI_API_KEY", "s-key"),
        ]))
        .unwrap();

        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.max_iterations, 10);
    }

    #[test]
    fn missing_gemini_key() {
        let err = Config::from_lookup(env(&[("SERPAPI_API_KEY", "s-key")])).unwrap_err();
        match err {
            ConfigError::MissingEnvVar(var) => assert_eq!(var, "GEMINI_API_KEY"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_serpapi_key() {
        let err = Config::from_lookup(env(&[("GEMINI_API_KEY", "g-key")])).unwrap_err();
        match err {
            ConfigError::MissingEnvVar(var) => assert_eq!(var, "SERPAPI_API_KEY"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_key_treated_as_missing() {
        let err = Config::from_lookup(env(&[
            ("GEMINI_API_KEY", "  "),
            ("SERPAPI_API_KEY", "s-key"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(v) if v == "GEMINI_API_KEY"));
    }

    #[test]
    fn overrides_respected() {
        let config = Config::from_lookup(env(&[
            ("GEMINI_API_KEY", "g-key"),
            ("SERPAPI_API_KEY", "s-key"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("MAX_ITERATIONS", "4"),
        ]))
        .unwrap();

        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.max_iterations, 4);
    }

    #[test]
    fn invalid_max_iterations() {
        let err = Config::from_lookup(env(&[
            ("GEMINI_API_KEY", "g-key"),
            ("SERPAPI_API_KEY", "s-key"),
            ("MAX_ITERATIONS", "many"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(v, _) if v == "MAX_ITERATIONS"));
    }

    #[test]
    fn remediation_names_missing_variable() {
        let err = ConfigError::MissingEnvVar("SERPAPI_API_KEY".to_string());
        let text = err.remediation();
        assert!(text.contains("SERPAPI_API_KEY not found"));
        assert!(text.contains("GEMINI_API_KEY=your_gemini_api_key"));
    }
}
