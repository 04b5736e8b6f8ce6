use crate::config::{CollectorConfig, LOOKBACK_DAYS};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use mw_core::Result;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

const BASE_URL: &str = "https://newsapi.org/v2";

/// Raw search-API record, before normalization. Everything the API is
/// allowed to omit is an Option here; `pipeline::process` decides what
/// survives.
#[derive(Debug, Clone, Deserialize)]
pub struct RawArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: RawSource,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSource {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    articles: Vec<RawArticle>,
}

/// Thin client over the article-search API. One call per collector run,
/// always the fixed 3-day window ending now.
pub struct NewsApiClient {
    client: Arc<Client>,
    config: CollectorConfig,
    base_url: String,
}

impl NewsApiClient {
    pub fn new(config: CollectorConfig) -> Self {
        Self::with_base_url(config, BASE_URL.to_string())
    }

    /// Points the client at a different API root. Production code uses
    /// `new`; tests stand up a local server and inject its address here.
    pub fn with_base_url(config: CollectorConfig, base_url: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            config,
            base_url,
        }
    }

    /// Lookback window bounds, computed at call time.
    pub fn window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now - Duration::days(LOOKBACK_DAYS), now)
    }

    /// Fetches matching articles in English, newest first. A non-success
    /// response is recovered: it logs the status and yields an empty list
    /// so the rest of the pipeline degrades to a no-op.
    pub async fn fetch(&self) -> Result<Vec<RawArticle>> {
        let (from, to) = Self::window(Utc::now());
        let from = from.to_rfc3339_opts(SecondsFormat::Secs, true);
        let to = to.to_rfc3339_opts(SecondsFormat::Secs, true);

        let response = self
            .client
            .get(format!("{}/everything", self.base_url))
            .query(&[
                ("q", self.config.query.as_str()),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("apiKey", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "news API request failed, continuing with empty result");
            return Ok(Vec::new());
        }

        let body = response.json::<SearchResponse>().await?;
        Ok(body.articles)
    }
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("client", &"<reqwest::Client>")
            .field("query", &self.config.query)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn config() -> CollectorConfig {
        CollectorConfig::new("test-key", "FC Barcelona").unwrap()
    }

    #[tokio::test]
    async fn test_non_success_response_recovers_to_empty_list() {
        let app = Router::new().route(
            "/everything",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream broke") }),
        );
        let base_url = spawn_server(app).await;

        let client = NewsApiClient::with_base_url(config(), base_url);
        let articles = client.fetch().await.unwrap();
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_parses_a_success_response() {
        let app = Router::new().route(
            "/everything",
            get(|| async {
                Json(json!({
                    "status": "ok",
                    "articles": [
                        {
                            "title": "Barca wins",
                            "description": "great match",
                            "url": "http://example.com/a",
                            "publishedAt": "2026-08-24T10:00:00Z",
                            "source": {"id": null, "name": "Reuters"}
                        },
                        {
                            "title": null,
                            "description": null,
                            "url": "http://example.com/b",
                            "publishedAt": "2026-08-24T09:00:00Z",
                            "source": {"name": "AP"}
                        }
                    ]
                }))
            }),
        );
        let base_url = spawn_server(app).await;

        let client = NewsApiClient::with_base_url(config(), base_url);
        let articles = client.fetch().await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title.as_deref(), Some("Barca wins"));
        assert!(articles[1].title.is_none());
        assert_eq!(articles[1].source.name.as_deref(), Some("AP"));
    }

    #[test]
    fn test_window_is_three_days_ending_now() {
        let now = Utc::now();
        let (from, to) = NewsApiClient::window(now);
        assert_eq!(to, now);
        assert_eq!(to - from, Duration::days(3));
    }

    #[test]
    fn test_raw_article_tolerates_missing_fields() {
        let raw: RawArticle = serde_json::from_str(
            r#"{"title": null, "description": "d", "url": "http://a", "publishedAt": "2026-08-24T10:00:00Z", "source": {"id": null, "name": "Reuters"}}"#,
        )
        .unwrap();
        assert!(raw.title.is_none());
        assert_eq!(raw.source.name.as_deref(), Some("Reuters"));
    }
}
