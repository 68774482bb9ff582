//! TMDB API client.

use crate::core::records;
use crate::error::{FetchError, Outcome};
use crate::models::config::Config;
use crate::models::{MovieRecord, VideoRecord};
use crate::{Error, Result};
use async_trait::async_trait;

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Longest slice of an error body kept in error messages.
const ERROR_BODY_LIMIT: usize = 200;

/// TMDB client configuration.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API key or Bearer token (JWT)
    pub api_key: String,
    /// API base URL, without trailing slash.
    pub api_base: String,
    /// Whether to use Bearer token authentication (API v4 style)
    pub use_bearer: bool,
}

impl TmdbConfig {
    /// Create config from an API key with the default base URL.
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        // Bearer tokens start with "eyJ" (base64 encoded JWT header)
        let use_bearer = api_key.starts_with("eyJ");

        Self {
            api_key,
            api_base: TMDB_BASE_URL.to_string(),
            use_bearer,
        }
    }

    /// Create config from the loaded application config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .tmdb
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(Error::ApiKeyMissing)?;

        Ok(Self {
            api_base: config.tmdb.api_base.trim_end_matches('/').to_string(),
            ..Self::new(api_key)
        })
    }
}

/// Remote data source for the screens.
///
/// Each call makes a single attempt and yields exactly one outcome.
#[async_trait]
pub trait TmdbApi: Send + Sync {
    /// Movies now playing, in server order.
    async fn fetch_now_playing(&self) -> Outcome<MovieRecord>;

    /// Videos for a movie, in server order.
    async fn fetch_videos(&self, movie_id: i64) -> Outcome<VideoRecord>;

    /// Whether an image URL can be loaded. Errors count as `false`.
    async fn image_available(&self, url: &str) -> bool;
}

/// TMDB API client.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Build a request with proper authentication.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        if self.config.use_bearer {
            request.header("Authorization", format!("Bearer {}", self.config.api_key))
        } else {
            request
        }
    }

    /// Build URL with api_key parameter (only for v3 style).
    fn build_url(&self, path: &str) -> String {
        if self.config.use_bearer {
            format!("{}/{}", self.config.api_base, path)
        } else {
            format!(
                "{}/{}?api_key={}",
                self.config.api_base, path, self.config.api_key
            )
        }
    }

    /// GET a path and return the body of a successful response.
    async fn get_body(&self, path: &str) -> Result<String> {
        tracing::debug!("GET {}", path);
        let url = self.build_url(path);

        let resp = self
            .build_request(&url)
            .send()
            .await
            .map_err(|e| Error::Network(e.without_url().to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Network(e.without_url().to_string()))?;

        if !status.is_success() {
            let mut body = body;
            if body.len() > ERROR_BODY_LIMIT {
                let mut cut = ERROR_BODY_LIMIT;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    /// Get movies now playing.
    pub async fn now_playing(&self) -> Result<Vec<MovieRecord>> {
        let body = self.get_body("movie/now_playing").await?;
        records::parse_movies(&body)
    }

    /// Get videos for a movie.
    pub async fn videos(&self, movie_id: i64) -> Result<Vec<VideoRecord>> {
        let body = self.get_body(&format!("movie/{}/videos", movie_id)).await?;
        records::parse_videos(&body)
    }

    /// Verify API key is valid.
    ///
    /// `Ok(false)` means the server answered but rejected the key;
    /// transport failures are returned as [`Error::Network`].
    pub async fn verify_api_key(&self) -> Result<bool> {
        let url = self.build_url("authentication");

        let resp = self
            .build_request(&url)
            .send()
            .await
            .map_err(|e| Error::Network(e.without_url().to_string()))?;

        Ok(resp.status().is_success())
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn fetch_now_playing(&self) -> Outcome<MovieRecord> {
        self.now_playing().await.map_err(|e| {
            tracing::warn!("Now playing request failed: {}", e);
            FetchError::from(e)
        })
    }

    async fn fetch_videos(&self, movie_id: i64) -> Outcome<VideoRecord> {
        self.videos(movie_id).await.map_err(|e| {
            tracing::warn!("Videos request for movie {} failed: {}", movie_id, e);
            FetchError::from(e)
        })
    }

    async fn image_available(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::debug!("Image load failed for {}: {}", url, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_detection() {
        assert!(TmdbConfig::new("eyJhbGciOi.x.y").use_bearer);
        assert!(!TmdbConfig::new("a07e22bc18f5").use_bearer);
    }

    #[test]
    fn test_build_url_with_api_key() {
        let client = TmdbClient::new(TmdbConfig::new("k"));
        assert_eq!(
            client.build_url("movie/now_playing"),
            "https://api.themoviedb.org/3/movie/now_playing?api_key=k"
        );
        assert_eq!(
            client.build_url("movie/42/videos"),
            "https://api.themoviedb.org/3/movie/42/videos?api_key=k"
        );
    }

    #[test]
    fn test_build_url_with_bearer() {
        let client = TmdbClient::new(TmdbConfig::new("eyJtoken"));
        assert_eq!(
            client.build_url("movie/now_playing"),
            "https://api.themoviedb.org/3/movie/now_playing"
        );
    }

    #[test]
    fn test_from_config_requires_key() {
        let mut config = Config::default();
        assert!(matches!(
            TmdbConfig::from_config(&config),
            Err(Error::ApiKeyMissing)
        ));

        config.tmdb.api_key = Some("k".into());
        config.tmdb.api_base = "http://localhost:9000/3/".into();
        let tmdb = TmdbConfig::from_config(&config).unwrap();
        assert_eq!(tmdb.api_base, "http://localhost:9000/3");
        assert!(!tmdb.use_bearer);
    }

    #[tokio::test]
    async fn test_verify_api_key_unreachable_is_network_error() {
        let config = TmdbConfig {
            api_base: "http://127.0.0.1:1".to_string(),
            ..TmdbConfig::new("secret-key")
        };
        let client = TmdbClient::new(config);

        match client.verify_api_key().await {
            Err(Error::Network(msg)) => assert!(!msg.contains("secret-key")),
            other => panic!("expected network error, got {:?}", other),
        }
    }
}
