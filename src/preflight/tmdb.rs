//! TMDB API preflight check.

use super::CheckResult;
use crate::models::config::Config;
use crate::services::tmdb::{TmdbClient, TmdbConfig};

/// Check if TMDB API is accessible with the configured key.
pub async fn check(config: &Config) -> CheckResult {
    match TmdbConfig::from_config(config) {
        Ok(tmdb) => match TmdbClient::new(tmdb).verify_api_key().await {
            Ok(true) => CheckResult::ok("TMDB API", "connected"),
            Ok(false) => CheckResult::fail(
                "TMDB API",
                "invalid API key",
                "Check your TMDB_API_KEY",
            ),
            Err(e) => {
                tracing::debug!("TMDB connectivity check failed: {}", e);
                CheckResult::fail(
                    "TMDB API",
                    "connection failed",
                    "Check your network connection",
                )
            }
        },
        Err(_) => CheckResult::fail(
            "TMDB API",
            "API key not configured",
            "Set TMDB_API_KEY or tmdb.api_key in config.toml",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_fails() {
        let result = check(&Config::default()).await;
        assert!(!result.success);
        assert_eq!(result.message, "API key not configured");
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_connection_failure() {
        let mut config = Config::default();
        config.tmdb.api_key = Some("k".into());
        config.tmdb.api_base = "http://127.0.0.1:1".into();

        let result = check(&config).await;
        assert!(!result.success);
        assert_eq!(result.message, "connection failed");
    }
}
