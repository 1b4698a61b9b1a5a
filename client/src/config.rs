//! Client configuration.
//!
//! Loaded from environment variables with defaults:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TODO_API_URL` | `http://localhost:8080` |
//! | `TODO_RESPONSE_WAIT` | `30` (seconds) |

use std::env;
use std::time::Duration;

/// Default base URL of the todo service.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default bound on how long a caller waits for a mutation result.
pub const DEFAULT_RESPONSE_WAIT: Duration = Duration::from_secs(30);

/// Configuration for [`HttpTodoApi`](crate::HttpTodoApi) and
/// [`TodosService`](crate::TodosService).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the service, without a trailing slash
    pub api_url: String,
    /// How long a mutation waits for its result before giving up locally
    pub response_wait: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            response_wait: DEFAULT_RESPONSE_WAIT,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    ///
    /// Unparseable values fall back to their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_url: lookup("TODO_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_url),
            response_wait: lookup("TODO_RESPONSE_WAIT")
                .and_then(|s| s.parse().ok())
                .map_or(defaults.response_wait, Duration::from_secs),
        }
    }

    /// Set the base URL
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the response wait
    #[must_use]
    pub const fn with_response_wait(mut self, response_wait: Duration) -> Self {
        self.response_wait = response_wait;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.response_wait, Duration::from_secs(30));
    }

    #[test]
    fn values_are_read_and_trailing_slash_dropped() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TODO_API_URL", "http://todos.internal:9000/"),
            ("TODO_RESPONSE_WAIT", "5"),
        ]));
        assert_eq!(config.api_url, "http://todos.internal:9000");
        assert_eq!(config.response_wait, Duration::from_secs(5));
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TODO_API_URL", ""),
            ("TODO_RESPONSE_WAIT", "soon"),
        ]));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn builders_override() {
        let config = ClientConfig::default()
            .with_api_url("http://example.test/")
            .with_response_wait(Duration::from_millis(250));
        assert_eq!(config.api_url, "http://example.test");
        assert_eq!(config.response_wait, Duration::from_millis(250));
    }
}
