use crate::api::exact;
use crate::api::oauth::token::{summarize, TokenSummary};
use crate::errors::{ApiError, ErrorBody, BEARER_CHALLENGE};
use crate::headers::bearer_token;
use crate::openapi::BEARER_TAG;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use http::HeaderMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BearerResponse {
    bearer: String,
    token: String,
}

/// Result of the format-only check performed by `/oauth-test`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OAuthTestResponse {
    oauth_test: String,
    /// Provider label parsed out of the token
    provider: String,
    /// First 20 characters of the token followed by `...`
    token_prefix: String,
}

fn bearer_rejection(detail: &str) -> ApiError {
    ApiError::unauthorized(detail).with_challenge(BEARER_CHALLENGE)
}

/// Bearer authentication against the single static token
#[utoipa::path(
    get,
    path = "/bearer",
    tag = BEARER_TAG,
    params(
        ("Authorization" = String, Header, description = "Bearer <token>"),
    ),
    responses(
        (status = 200, description = "Token accepted", body = BearerResponse),
        (status = 401, description = "Missing, malformed or wrong token", body = ErrorBody)
    )
)]
pub(crate) async fn bearer(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<BearerResponse>, ApiError> {
    let token = bearer_token(&headers).map_err(|e| {
        warn!("Rejected /bearer request: {}", e);
        bearer_rejection("Bearer token required")
    })?;

    if token != state.credentials.bearer_token {
        warn!("Rejected /bearer request: unknown token");
        return Err(bearer_rejection("Bearer token required"));
    }

    Ok(Json(BearerResponse {
        bearer: "success".to_string(),
        token: "valid".to_string(),
    }))
}

/// Accepts any token shaped like one issued by the OAuth endpoints.
///
/// Only the `oauth_token_` prefix is checked. The token is not looked up,
/// so a hand-crafted token is accepted just like an issued one.
#[utoipa::path(
    get,
    path = "/oauth-test",
    tag = BEARER_TAG,
    params(
        ("Authorization" = String, Header, description = "Bearer oauth_token_<provider>_<timestamp>"),
    ),
    responses(
        (status = 200, description = "Token has the issued-token shape", body = OAuthTestResponse),
        (status = 401, description = "Missing header or token without the expected prefix", body = ErrorBody)
    )
)]
pub(crate) async fn oauth_test(headers: HeaderMap) -> Result<Json<OAuthTestResponse>, ApiError> {
    let token = bearer_token(&headers).map_err(|e| {
        warn!("Rejected /oauth-test request: {}", e);
        bearer_rejection("Bearer token required")
    })?;

    let TokenSummary {
        provider,
        token_prefix,
    } = summarize(token).ok_or_else(|| {
        warn!("Rejected /oauth-test request: token lacks the issued-token prefix");
        bearer_rejection("Invalid OAuth token")
    })?;

    debug!("Accepted OAuth token shape for provider '{}'", provider);
    Ok(Json(OAuthTestResponse {
        oauth_test: "success".to_string(),
        provider,
        token_prefix,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bearer", exact(get(bearer)))
        .route("/oauth-test", exact(get(oauth_test)))
}
