use crate::api::exact;
use crate::errors::{ApiError, ErrorBody, BASIC_CHALLENGE};
use crate::headers::basic_credentials;
use crate::openapi::BASIC_TAG;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use http::HeaderMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Confirms the logged-in user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SecureResponse {
    secure: String,
    user: String,
}

fn unauthorized() -> ApiError {
    ApiError::unauthorized("Unauthorized").with_challenge(BASIC_CHALLENGE)
}

/// End-user login with HTTP Basic authentication
#[utoipa::path(
    post,
    path = "/secure",
    tag = BASIC_TAG,
    params(
        ("Authorization" = String, Header, description = "Basic base64(username:password)"),
    ),
    responses(
        (status = 200, description = "Credentials accepted", body = SecureResponse),
        (status = 401, description = "Missing, malformed or wrong credentials", body = ErrorBody)
    )
)]
pub(crate) async fn secure(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SecureResponse>, ApiError> {
    let credentials = basic_credentials(&headers).map_err(|e| {
        warn!("Rejected /secure request: {}", e);
        unauthorized()
    })?;

    if !state
        .credentials
        .user
        .matches(&credentials.identifier, &credentials.secret)
    {
        warn!(
            "Rejected /secure request: wrong password for user '{}'",
            credentials.identifier
        );
        return Err(unauthorized());
    }

    info!("User '{}' authenticated", credentials.identifier);
    Ok(Json(SecureResponse {
        secure: "success".to_string(),
        user: credentials.identifier,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/secure", exact(post(secure)))
}
