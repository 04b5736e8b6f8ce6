use mw_core::{Error, Result};

pub const API_KEY_ENV: &str = "NEWS_API_KEY";

/// Fixed lookback window for every collection run, ending at invocation
/// time. Not configurable.
pub const LOOKBACK_DAYS: i64 = 3;

/// Collector configuration, validated up front. The credential is checked
/// here so a missing key fails before any network I/O.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub api_key: String,
    pub query: String,
}

impl CollectorConfig {
    pub fn new(api_key: impl Into<String>, query: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let query = query.into();
        if api_key.trim().is_empty() {
            return Err(Error::Config(format!(
                "missing API credential (set {})",
                API_KEY_ENV
            )));
        }
        if query.trim().is_empty() {
            return Err(Error::Config("query must be a non-empty string".into()));
        }
        Ok(Self { api_key, query })
    }

    /// Reads the credential from the environment.
    pub fn from_env(query: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        Self::new(api_key, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_fails_fast() {
        let err = CollectorConfig::new("", "FC Barcelona").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_empty_query_is_rejected() {
        assert!(CollectorConfig::new("key", "  ").is_err());
        assert!(CollectorConfig::new("key", "FC Barcelona").is_ok());
    }
}
