//! Runtime configuration read from the environment.

use std::env;

/// Public mock backend the mobile app was built against.
pub const DEFAULT_BASE_URL: &str = "https://681cb239f74de1d219ad795d.mockapi.io/api/v1";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_VAR: &str = "BANK_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the REST service, without the `/accounts` suffix.
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_url() {
        assert_eq!(Config::from_lookup(|_| None), Config::default());
        assert_eq!(Config::from_lookup(|_| Some("  ".to_string())).base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn reads_override() {
        let config = Config::from_lookup(|key| (key == BASE_URL_VAR).then(|| "http://127.0.0.1:3000".to_string()));
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
    }
}
