//! Common test utilities for E2E testing with mocks.
//!
//! Provides a test fixture that builds the full in-process router with a
//! mock upstream injected, so every endpoint can be exercised without
//! network access.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use catwalk_core::{
    config::{Config, ServerConfig, UpstreamConfig, VotingConfig},
    testing::MockCatApi,
    CatApi,
};
use catwalk_server::{create_router, AppState};

/// Test fixture for E2E testing with a mock upstream.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_voting_page() {
///     let fixture = TestFixture::new().await;
///     fixture.api.set_random_images(vec![...]).await;
///
///     let response = fixture.get("/api/v1/voting").await;
///     assert_eq!(response.status, StatusCode::OK);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock upstream - configure images, breeds and failures
    pub api: Arc<MockCatApi>,
    /// Shared state, for asserting on the local favourites store
    pub state: Arc<AppState>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default config.
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(config: Config) -> Self {
        let api = Arc::new(MockCatApi::new());
        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&api) as Arc<dyn CatApi>,
        ));
        let router = create_router(Arc::clone(&state));

        Self { router, api, state }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a POST request with a urlencoded form body.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        let body = form
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&");

        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Default config for tests: mock key, permissive actions, small limit.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig::default(),
        upstream: UpstreamConfig {
            api_key: "test-key".to_string(),
            base_url: "https://api.thecatapi.com/v1".to_string(),
            timeout_secs: 5,
            sub_id: "user-123".to_string(),
            breed_image_limit: 8,
        },
        voting: VotingConfig {
            strict_actions: false,
        },
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
