//! HTTP implementation of [`CatApi`] over reqwest.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use super::types::{Breed, BreedImage, CatImage, FavoriteRecord, VoteRequest};
use super::CatApi;
use crate::config::UpstreamConfig;
use crate::error::ApiError;
use crate::metrics;

/// Thin request executor against the upstream cat API.
///
/// Every typed operation funnels through [`CatApiClient::call`], which
/// attaches the `x-api-key` header, applies the configured timeout and
/// classifies failures. One invocation means exactly one outbound call.
#[derive(Debug)]
pub struct CatApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl CatApiClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, ApiError> {
        if config.api_key.is_empty() {
            return Err(ApiError::InvalidInput(
                "upstream API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Execute one request and return the raw JSON body.
    ///
    /// Failure classification: transport errors map to `Unreachable`,
    /// non-2xx statuses to `Upstream`, malformed bodies to `Decode`.
    async fn call(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(operation, %url, "upstream call");

        let started = Instant::now();
        let mut request = self
            .client
            .request(method, &url)
            .header("x-api-key", &self.api_key);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let outcome = self.execute(request).await;

        metrics::UPSTREAM_REQUEST_DURATION
            .with_label_values(&[operation])
            .observe(started.elapsed().as_secs_f64());
        metrics::UPSTREAM_REQUESTS
            .with_label_values(&[
                operation,
                if outcome.is_ok() { "success" } else { "error" },
            ])
            .inc();

        outcome
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl CatApi for CatApiClient {
    async fn random_images(&self, limit: u32) -> Result<Vec<CatImage>, ApiError> {
        let value = self
            .call(
                "random_images",
                Method::GET,
                "/images/search",
                &[("limit", limit.to_string())],
                None,
            )
            .await?;
        decode(value)
    }

    async fn breed_images(&self, breed_id: &str, limit: u32) -> Result<Vec<BreedImage>, ApiError> {
        let value = self
            .call(
                "breed_images",
                Method::GET,
                "/images/search",
                &[
                    ("breed_ids", breed_id.to_string()),
                    ("limit", limit.to_string()),
                ],
                None,
            )
            .await?;
        decode(value)
    }

    async fn list_breeds(&self) -> Result<Vec<Breed>, ApiError> {
        let value = self
            .call("list_breeds", Method::GET, "/breeds", &[], None)
            .await?;
        decode(value)
    }

    async fn create_favourite(&self, image_id: &str, sub_id: &str) -> Result<(), ApiError> {
        self.call(
            "create_favourite",
            Method::POST,
            "/favourites",
            &[],
            Some(json!({ "image_id": image_id, "sub_id": sub_id })),
        )
        .await?;
        Ok(())
    }

    async fn submit_vote(&self, vote: &VoteRequest) -> Result<(), ApiError> {
        self.call(
            "submit_vote",
            Method::POST,
            "/votes",
            &[],
            Some(json!({
                "image_id": vote.image_id,
                "sub_id": vote.sub_id,
                "value": vote.value,
            })),
        )
        .await?;
        Ok(())
    }

    async fn list_favourites(&self, sub_id: &str) -> Result<Vec<FavoriteRecord>, ApiError> {
        let value = self
            .call(
                "list_favourites",
                Method::GET,
                "/favourites",
                &[("sub_id", sub_id.to_string())],
                None,
            )
            .await?;
        decode(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> UpstreamConfig {
        UpstreamConfig {
            api_key: "test-key".to_string(),
            base_url: "https://api.thecatapi.com/v1/".to_string(),
            timeout_secs: 5,
            sub_id: "user-123".to_string(),
            breed_image_limit: 8,
        }
    }

    #[test]
    fn test_new_rejects_empty_api_key() {
        let config = UpstreamConfig {
            api_key: String::new(),
            ..test_config()
        };
        let err = CatApiClient::new(config).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn test_new_normalizes_trailing_slash() {
        let client = CatApiClient::new(test_config()).unwrap();
        assert_eq!(client.base_url, "https://api.thecatapi.com/v1");
    }

    #[test]
    fn test_decode_reports_shape_mismatch() {
        let err = decode::<Vec<Breed>>(json!({"not": "an array"})).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_decode_accepts_breed_list() {
        let breeds: Vec<Breed> = decode(json!([
            {"id": "abys", "name": "Abyssinian", "origin": "Egypt"}
        ]))
        .unwrap();
        assert_eq!(breeds.len(), 1);
        assert_eq!(breeds[0].id, "abys");
    }
}
