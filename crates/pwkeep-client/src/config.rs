//! Client configuration.
//!
//! Explicit values win; empty fields fall back to `PWKEEP_*` environment
//! variables and then to built-in defaults.

use std::time::Duration;

/// Default collection host, matching a local development backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
/// Path of the collection under the base URL.
pub const COLLECTION_PATH: &str = "/passwords";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`HttpRepository`](crate::HttpRepository).
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Backend base URL. Default: `PWKEEP_URL`, then `http://localhost:3000`.
    pub base_url: String,
    /// Request timeout. Zero means `PWKEEP_TIMEOUT_SECS`, then 10 seconds.
    pub timeout: Duration,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration pointing at `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::ZERO,
        }
    }

    pub(crate) fn resolve(&self) -> ResolvedConfig {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn resolve_with(&self, env: impl Fn(&str) -> Option<String>) -> ResolvedConfig {
        let base_url = first_non_empty(&[
            &self.base_url,
            &env("PWKEEP_URL").unwrap_or_default(),
            DEFAULT_BASE_URL,
        ])
        .trim_end_matches('/')
        .to_owned();

        let timeout = if self.timeout.is_zero() {
            env("PWKEEP_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs)
        } else {
            self.timeout
        };

        ResolvedConfig { base_url, timeout }
    }
}

fn first_non_empty(vals: &[&str]) -> String {
    for v in vals {
        if !v.is_empty() {
            return (*v).to_owned();
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_when_unset() {
        let resolved = ClientConfig::default().resolve_with(no_env);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn explicit_values_win_over_env() {
        let cfg = ClientConfig {
            base_url: "http://vault.local:8080/".to_owned(),
            timeout: Duration::from_secs(2),
        };
        let resolved = cfg.resolve_with(|name| match name {
            "PWKEEP_URL" => Some("http://other".to_owned()),
            "PWKEEP_TIMEOUT_SECS" => Some("30".to_owned()),
            _ => None,
        });
        assert_eq!(resolved.base_url, "http://vault.local:8080");
        assert_eq!(resolved.timeout, Duration::from_secs(2));
    }

    #[test]
    fn env_fills_empty_fields() {
        let resolved = ClientConfig::default().resolve_with(|name| match name {
            "PWKEEP_URL" => Some("http://10.0.0.5:3000".to_owned()),
            "PWKEEP_TIMEOUT_SECS" => Some("3".to_owned()),
            _ => None,
        });
        assert_eq!(resolved.base_url, "http://10.0.0.5:3000");
        assert_eq!(resolved.timeout, Duration::from_secs(3));
    }

    #[test]
    fn unparsable_timeout_falls_back() {
        let resolved = ClientConfig::default().resolve_with(|name| {
            (name == "PWKEEP_TIMEOUT_SECS").then(|| "soon".to_owned())
        });
        assert_eq!(resolved.timeout, DEFAULT_TIMEOUT);
    }
}
