use axum::response::IntoResponse;
use axum::Json;
use http::header::WWW_AUTHENTICATE;
use http::{HeaderValue, StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Challenge sent when Basic credentials are missing or wrong
pub(crate) const BASIC_CHALLENGE: &str = r#"Basic realm="Login Required""#;
/// Challenge sent when a Bearer token is missing or wrong
pub(crate) const BEARER_CHALLENGE: &str = r#"Bearer realm="API Access""#;

/// JSON body of every non-OAuth error
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub detail: String,
    pub status_code: StatusCode,
    pub challenge: Option<HeaderValue>,
}

impl ApiError {
    /// Create a new ApiError with a detail message and status code
    pub fn new<S: ToString>(detail: S, status_code: StatusCode) -> Self {
        Self {
            detail: detail.to_string(),
            status_code,
            challenge: None,
        }
    }

    /// Create new Not Found Error (404)
    pub fn not_found() -> Self {
        Self::new("Not Found", StatusCode::NOT_FOUND)
    }

    /// Create new Unauthorized Error (401) without a challenge
    pub fn unauthorized<S: ToString>(detail: S) -> Self {
        Self::new(detail, StatusCode::UNAUTHORIZED)
    }

    /// Attach a `WWW-Authenticate` challenge
    pub fn with_challenge(mut self, challenge: &'static str) -> Self {
        self.challenge = Some(HeaderValue::from_static(challenge));
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorBody { error: self.detail };
        let mut response = (self.status_code, Json(body)).into_response();
        if let Some(challenge) = self.challenge {
            response.headers_mut().insert(WWW_AUTHENTICATE, challenge);
        }
        response
    }
}
