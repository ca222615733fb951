use crate::config::Settings;
use crate::create_app;
use crate::state::AppState;
use axum::body::{Body, Bytes};
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use log::LevelFilter;
use serde_json::Value;
use tower::ServiceExt;

/// Builds the value of a Basic `Authorization` header
pub fn basic_auth(identifier: &str, secret: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{identifier}:{secret}")))
}

/// Test fixture driving the full application router in process.
///
/// Requests never touch a socket, they are fed to the router with
/// `tower::ServiceExt::oneshot`.
///
/// # Examples
///
/// ```rust
/// #[tokio::test]
/// async fn test_endpoint() {
///     let fixture = TestFixture::new();
///     let response = fixture
///         .get("/apikey", &[("X-API-Key", "secret-api-key-123")])
///         .await;
///     response.assert_ok();
/// }
/// ```
pub struct TestFixture {
    /// The application router
    pub app: Router,
    /// Configuration settings
    pub settings: Settings,
}

impl TestFixture {
    /// Creates a fixture with test settings and the static credential set
    pub fn new() -> Self {
        Self::with_settings(Settings::for_test())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self::setup_logger(LevelFilter::Debug);

        let state = AppState::new(settings.clone());
        let app = create_app(state);

        Self { app, settings }
    }

    /// Initializes the test logger, ignoring repeated initialization
    pub fn setup_logger(level: LevelFilter) {
        let _ = env_logger::builder()
            .filter_level(level)
            .is_test(true)
            .try_init();
    }

    /// Sends a GET request with the given headers
    pub async fn get(&self, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
        self.request(Method::GET, uri, "", headers).await
    }

    /// Sends a POST request with a raw body and the given headers
    pub async fn post(&self, uri: &str, body: &str, headers: &[(&str, &str)]) -> TestResponse {
        self.request(Method::POST, uri, body, headers).await
    }

    /// Builds and sends a request with any method
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: &str,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let request = builder
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a request and returns a TestResponse
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        // Every response of this server is JSON, so a parse failure is a bug worth seeing
        let json = serde_json::from_slice(&body).unwrap_or_else(|e| {
            panic!(
                "Response body is not JSON ({e}): {}",
                String::from_utf8_lossy(&body)
            )
        });

        TestResponse {
            status,
            headers,
            body,
            json,
        }
    }
}

/// Response from a test request that provides convenient access to status, headers and body.
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Bytes,
    /// Response body parsed as JSON
    pub json: Value,
}

impl TestResponse {
    /// Checks if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns a header value, if present and valid visible ASCII
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Asserts that the response has the expected status code.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match the expected value.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {} with body: {}",
            expected,
            self.status,
            serde_json::to_string_pretty(&self.json).unwrap_or_default()
        );
        self
    }

    /// Asserts that the response status is OK (200).
    ///
    /// # Panics
    ///
    /// Panics if the status code is not 200 OK.
    pub fn assert_ok(&self) -> &Self {
        self.assert_status(StatusCode::OK)
    }
}
