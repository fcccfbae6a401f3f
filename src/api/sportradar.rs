use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::models::resource::is_path_segment;

/// Source of raw NFL payloads, keyed by provider endpoint.
#[async_trait]
pub trait NflUpstream: Send + Sync {
    async fn get_data(&self, endpoint: &str) -> Result<Value>;
}

pub struct SportradarApi {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl SportradarApi {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(ApiError::Configuration("API key must not be empty".into()));
        }

        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::Configuration(format!("invalid base URL {:?}: {}", base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::Configuration(format!(
                "base URL must be http(s), got {}",
                base_url.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Appends `endpoint` below the base path one segment at a time, so
    /// reserved characters in a segment are percent-encoded and dot segments
    /// never reach the URL parser.
    fn url_for(&self, endpoint: &str) -> Result<Url> {
        let parts: Vec<&str> = endpoint.trim_start_matches('/').split('/').collect();
        if let Some(part) = parts.iter().find(|part| !is_path_segment(part)) {
            return Err(ApiError::InvalidParameter {
                name: "endpoint",
                value: part.to_string(),
            });
        }

        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::Configuration("base URL cannot carry a path".into()))?;
            segments.pop_if_empty();
            let last = parts.len() - 1;
            for (i, part) in parts.iter().enumerate() {
                if i == last {
                    segments.push(&format!("{}.json", part));
                } else {
                    segments.push(part);
                }
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl NflUpstream for SportradarApi {
    async fn get_data(&self, endpoint: &str) -> Result<Value> {
        let url = self.url_for(endpoint)?;

        debug!("Calling SportsRadar API: {}", endpoint);
        let response = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout {
                        endpoint: endpoint.to_string(),
                    }
                } else {
                    ApiError::Transport(e.without_url())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!("SportsRadar API returned {} for {}", status, endpoint);
            return Err(ApiError::from_status(status.as_u16(), endpoint));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    endpoint: endpoint.to_string(),
                }
            } else {
                ApiError::Transport(e.without_url())
            }
        })?;

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn api_for(server: &Server) -> SportradarApi {
        SportradarApi::new(&server.url(), "test-key", Duration::from_secs(5))
            .expect("Failed to create API client")
    }

    #[test]
    fn rejects_empty_api_key() {
        let result = SportradarApi::new("https://api.example.com/nfl", " ", Duration::from_secs(5));
        assert!(matches!(result, Err(ApiError::Configuration(_))));
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = SportradarApi::new("not a url", "key", Duration::from_secs(5));
        assert!(matches!(result, Err(ApiError::Configuration(_))));

        let result = SportradarApi::new("ftp://api.example.com", "key", Duration::from_secs(5));
        assert!(matches!(result, Err(ApiError::Configuration(_))));
    }

    #[test]
    fn builds_json_urls_under_base() {
        let api = SportradarApi::new(
            "https://api.example.com/nfl/official/trial/v7/",
            "key",
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            api.url_for("/en/league/hierarchy").unwrap().as_str(),
            "https://api.example.com/nfl/official/trial/v7/en/league/hierarchy.json"
        );
    }

    #[test]
    fn reserved_characters_stay_inside_their_segment() {
        let api = SportradarApi::new("https://api.example.com/nfl/v7", "key", Duration::from_secs(5)).unwrap();

        let url = api.url_for("en/teams/sf 49ers%2F/profile").unwrap();
        assert_eq!(url.path(), "/nfl/v7/en/teams/sf%2049ers%252F/profile.json");

        for endpoint in ["en/teams/a?api_key=x/profile", "en/teams/a#b/profile"] {
            assert!(matches!(api.url_for(endpoint), Err(ApiError::InvalidParameter { .. })));
        }
    }

    #[test]
    fn dot_segments_never_leave_the_base_path() {
        let api = SportradarApi::new("https://api.example.com/nfl/v7", "key", Duration::from_secs(5)).unwrap();

        for endpoint in ["en/teams/../players/p1/profile", "../../../etc/passwd", "en//profile"] {
            assert!(
                matches!(api.url_for(endpoint), Err(ApiError::InvalidParameter { .. })),
                "{} should be rejected",
                endpoint
            );
        }
    }

    #[tokio::test]
    async fn fetches_json_with_api_key() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/en/league/hierarchy.json")
            .match_query(Matcher::UrlEncoded("api_key".into(), "test-key".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"league": {"alias": "NFL"}}"#)
            .create_async()
            .await;

        let data = api_for(&server).get_data("en/league/hierarchy").await.unwrap();

        assert_eq!(data, json!({"league": {"alias": "NFL"}}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn maps_404_to_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/en/teams/missing/profile.json")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let err = api_for(&server)
            .get_data("en/teams/missing/profile")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound { ref endpoint } if endpoint == "en/teams/missing/profile"));
    }

    #[tokio::test]
    async fn maps_rate_limit_to_upstream_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/en/league/hierarchy.json")
            .match_query(Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let err = api_for(&server).get_data("en/league/hierarchy").await.unwrap_err();

        assert!(matches!(err, ApiError::Upstream { status: 429, .. }));
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }

    #[tokio::test]
    async fn times_out_when_upstream_never_replies() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let api = SportradarApi::new(&format!("http://{}", addr), "key", Duration::from_millis(100)).unwrap();
        let err = api.get_data("en/league/hierarchy").await.unwrap_err();

        assert!(matches!(err, ApiError::Timeout { ref endpoint } if endpoint == "en/league/hierarchy"));
        assert_eq!(err.status_code(), axum::http::StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/en/league/hierarchy.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = api_for(&server).get_data("en/league/hierarchy").await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }
}
