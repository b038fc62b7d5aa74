use std::time::Duration;

/// Base URL of a locally running storyboard server.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Client configuration loaded from environment variables.
///
/// Defaults target a local development server. In a real deployment,
/// override via environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the storyboard API (default: `http://localhost:8000`).
    pub api_url: String,
    /// Optional per-request timeout. Unset means requests never time out.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                          | Default                 |
    /// |----------------------------------|-------------------------|
    /// | `SHOTBOARD_API_URL`              | `http://localhost:8000` |
    /// | `SHOTBOARD_REQUEST_TIMEOUT_SECS` | unset (no timeout)      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("SHOTBOARD_API_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "SHOTBOARD_API_URL",
                value: api_url,
                reason: "must start with http:// or https://".into(),
            });
        }

        let request_timeout = match lookup("SHOTBOARD_REQUEST_TIMEOUT_SECS") {
            None => None,
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                    var: "SHOTBOARD_REQUEST_TIMEOUT_SECS",
                    value: raw.clone(),
                    reason: format!("{e}"),
                })?;
                Some(Duration::from_secs(secs))
            }
        };

        Ok(Self {
            api_url,
            request_timeout,
        })
    }
}

/// A configuration variable held a value that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}
