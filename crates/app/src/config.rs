use shotboard_client::{ClientConfig, ConfigError};
use shotboard_core::types::DbId;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub client: ClientConfig,
    /// Project to select at startup instead of the first one listed.
    pub initial_project_id: Option<DbId>,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                       |
    /// |------------------------|-------------------------------|
    /// | `SHOTBOARD_PROJECT_ID` | unset (first project listed)  |
    ///
    /// See [`ClientConfig::from_env`] for the client variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let client = ClientConfig::from_vars(&lookup)?;

        let initial_project_id = match lookup("SHOTBOARD_PROJECT_ID") {
            None => None,
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(raw.trim().parse::<DbId>().map_err(|e| {
                ConfigError::Invalid {
                    var: "SHOTBOARD_PROJECT_ID",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?),
        };

        Ok(Self {
            client,
            initial_project_id,
        })
    }
}
