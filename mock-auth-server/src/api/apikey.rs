use crate::api::exact;
use crate::errors::{ApiError, ErrorBody};
use crate::headers::api_key;
use crate::openapi::API_KEY_TAG;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use http::HeaderMap;
use log::warn;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiKeyResponse {
    apikey: String,
    key: String,
}

/// API key check. Unlike Basic and Bearer, failures carry no challenge header.
#[utoipa::path(
    get,
    path = "/apikey",
    tag = API_KEY_TAG,
    params(
        ("Authorization" = Option<String>, Header, description = "ApiKey <key>, checked first"),
        ("X-API-Key" = Option<String>, Header, description = "The key itself"),
    ),
    responses(
        (status = 200, description = "Key accepted", body = ApiKeyResponse),
        (status = 401, description = "Missing or wrong key", body = ErrorBody)
    )
)]
pub(crate) async fn apikey(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiKeyResponse>, ApiError> {
    match api_key(&headers) {
        Some(key) if key == state.credentials.api_key => Ok(Json(ApiKeyResponse {
            apikey: "success".to_string(),
            key: "valid".to_string(),
        })),
        Some(_) => {
            warn!("Rejected /apikey request: unknown key");
            Err(ApiError::unauthorized("Invalid or missing API key"))
        }
        None => {
            warn!("Rejected /apikey request: no key supplied");
            Err(ApiError::unauthorized("Invalid or missing API key"))
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/apikey", exact(get(apikey)))
}
