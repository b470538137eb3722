use crate::error::{Error, Result};
use crate::flatten::RawPost;
use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use std::time::Duration;

const API_BASE: &str = "https://api.twitter.com";

/// The standard search API caps every page at 100 tweets.
pub const PAGE_SIZE: usize = 100;

/// One page of search results. The paginator drives this instead of
/// `TwitterClient` directly so it can be tested against an in-memory source.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch up to `count` posts matching `query`, restricted to ids at or
    /// below `max_id` when a cursor is given.
    async fn search_page(
        &self,
        query: &str,
        count: usize,
        max_id: Option<u64>,
    ) -> Result<Vec<RawPost>>;
}

pub struct TwitterClient {
    client: reqwest::Client,
    token: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    statuses: Vec<RawPost>,
}

impl TwitterClient {
    /// Exchange an API key/secret pair for a bearer token via the
    /// application-only OAuth2 flow.
    pub async fn authenticate(api_key: &str, api_secret: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .user_agent("tweetcorpus/0.1")
            .build()
            .map_err(|e| Error::Auth(e.to_string()))?;

        let key_secret = format!("{}:{}", api_key, api_secret);
        let encoded = base64::engine::general_purpose::STANDARD.encode(key_secret);

        let response = client
            .post(format!("{}/oauth2/token", API_BASE))
            .header("Authorization", format!("Basic {}", encoded))
            .header(
                "Content-Type",
                "application/x-www-form-urlencoded;charset=UTF-8",
            )
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(|e| Error::Auth(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Auth(format!(
                "token endpoint returned HTTP {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Auth(e.to_string()))?;

        Ok(Self {
            client,
            token: token.access_token,
        })
    }
}

#[async_trait]
impl PostSource for TwitterClient {
    async fn search_page(
        &self,
        query: &str,
        count: usize,
        max_id: Option<u64>,
    ) -> Result<Vec<RawPost>> {
        let mut params = vec![
            ("q", query.to_string()),
            ("result_type", "recent".to_string()),
            ("count", count.to_string()),
        ];
        if let Some(id) = max_id {
            params.push(("max_id", id.to_string()));
        }

        let response = self
            .client
            .get(format!("{}/1.1/search/tweets.json", API_BASE))
            .bearer_auth(&self.token)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "search returned HTTP {}",
                response.status()
            )));
        }

        let page: SearchResponse = response.json().await?;
        Ok(page.statuses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_deserializes_arbitrary_posts() {
        let body = r#"{
            "statuses": [
                {"id": 7, "text": "hello", "user": {"id": 42, "name": "a"}},
                {"id": 8, "text": "world", "extra": [1, 2]}
            ],
            "search_metadata": {"count": 2}
        }"#;
        let page: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(page.statuses.len(), 2);
        assert_eq!(page.statuses[0]["id"], 7);
        assert_eq!(page.statuses[1]["text"], "world");
    }

    #[test]
    fn test_token_response_ignores_extra_fields() {
        let body = r#"{"token_type": "bearer", "access_token": "abc123"}"#;
        let token: TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(token.access_token, "abc123");
    }
}
