//! Account API configuration.

use crate::error::ConfigError;

/// Where the account API lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Read the API base from `API_BASE_URL`, falling back to
    /// `VITE_API_BASE_URL` for deployments that still use the old name.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("API_BASE_URL")
            .or_else(|_| std::env::var("VITE_API_BASE_URL"))
            .map_err(|_| ConfigError::Missing("API_BASE_URL"))?;
        Ok(Self::new(base_url))
    }

    /// Read the API base baked in at compile time, for browser builds.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        option_env!("API_BASE_URL")
            .or(option_env!("VITE_API_BASE_URL"))
            .map(Self::new)
            .ok_or(ConfigError::Missing("API_BASE_URL"))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an endpoint below the API base.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ApiConfig::new("https://api.example.com/v1/");
        assert_eq!(config.base_url(), "https://api.example.com/v1");
        assert_eq!(
            config.endpoint("get-my-profile"),
            "https://api.example.com/v1/get-my-profile"
        );
        assert_eq!(config.endpoint("/log-out"), "https://api.example.com/v1/log-out");
    }

    // The only test touching the process environment in this crate.
    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_from_env_prefers_api_base_url() {
        std::env::remove_var("API_BASE_URL");
        std::env::remove_var("VITE_API_BASE_URL");
        assert!(matches!(
            ApiConfig::from_env(),
            Err(ConfigError::Missing("API_BASE_URL"))
        ));

        std::env::set_var("VITE_API_BASE_URL", "https://old.example.com/");
        assert_eq!(
            ApiConfig::from_env().unwrap().base_url(),
            "https://old.example.com"
        );

        std::env::set_var("API_BASE_URL", "https://api.example.com");
        assert_eq!(
            ApiConfig::from_env().unwrap().base_url(),
            "https://api.example.com"
        );

        std::env::remove_var("API_BASE_URL");
        std::env::remove_var("VITE_API_BASE_URL");
    }
}
