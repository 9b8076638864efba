//! Client for a deployed recipe proxy (`POST { items } -> { reply }`).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RecipeError;
use crate::suggester::RecipeSuggester;

/// Returned when the proxy answers valid JSON without a `reply`.
pub const NO_RESPONSE: &str = "No response";

#[derive(Debug, Serialize)]
struct ProxyRequest {
    items: String,
}

#[derive(Debug, Deserialize)]
struct ProxyResponse {
    reply: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecipeProxyClient {
    http: reqwest::Client,
    url: String,
}

impl RecipeProxyClient {
    pub fn new(url: impl Into<String>) -> Result<Self, RecipeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RecipeSuggester for RecipeProxyClient {
    async fn suggest(&self, items: &[String]) -> Result<String, RecipeError> {
        if items.is_empty() {
            return Err(RecipeError::EmptyItems);
        }

        let resp = self
            .http
            .post(&self.url)
            .json(&ProxyRequest {
                items: items.join(", "),
            })
            .send()
            .await?;

        // The proxy reports its own failures as JSON without a `reply`, so the
        // status code is not inspected here.
        let text = resp.text().await?;
        let parsed: ProxyResponse =
            serde_json::from_str(&text).map_err(|e| RecipeError::Malformed(e.to_string()))?;

        Ok(parsed
            .reply
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| NO_RESPONSE.to_string()))
    }
}
