//! OAuth 2.0 request/response structures shared by the provider endpoints

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use utoipa::ToSchema;

/// OAuth 2.0 Token Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// `oauth_token_<provider>_<unix timestamp>`
    pub access_token: String,
    /// Token type - always "Bearer"
    pub token_type: String,
    /// Token expiration in seconds
    pub expires_in: u64,
    /// Fixed scopes of the issuing provider (space-separated)
    pub scope: String,
}

/// OAuth 2.0 Error Response, always sent with status 400
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OAuthError {
    /// Error code
    pub error: String,
    /// Human-readable error description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

impl OAuthError {
    fn new(error: &str, description: Option<&str>) -> Self {
        Self {
            error: error.to_string(),
            error_description: description.map(str::to_string),
        }
    }

    pub fn invalid_client() -> Self {
        Self::new("invalid_client", None)
    }

    pub fn unsupported_grant_type() -> Self {
        Self::new(
            "unsupported_grant_type",
            Some("Only the client_credentials grant type is supported"),
        )
    }

    pub fn invalid_request(description: &str) -> Self {
        Self::new("invalid_request", Some(description))
    }
}

impl IntoResponse for OAuthError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

/// Client-credentials grant carried in the request body (JSON or form)
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct ClientCredentialsRequest {
    pub grant_type: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl ClientCredentialsRequest {
    /// Decodes an `application/x-www-form-urlencoded` body.
    ///
    /// Percent-escapes and `+` are decoded. The first occurrence of a key wins
    /// and unknown keys are ignored.
    pub fn from_form(body: &[u8]) -> Self {
        let mut request = Self::default();
        for (key, value) in form_urlencoded::parse(body) {
            let slot = match key.as_ref() {
                "grant_type" => &mut request.grant_type,
                "client_id" => &mut request.client_id,
                "client_secret" => &mut request.client_secret,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        request
    }
}
