use crate::api::{apikey, basic, bearer, exact, misc, oauth};
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

pub(crate) const MISC_TAG: &str = "Unauthenticated";
pub(crate) const BASIC_TAG: &str = "Basic Auth";
pub(crate) const BEARER_TAG: &str = "Bearer Auth";
pub(crate) const API_KEY_TAG: &str = "API Key";
pub(crate) const OAUTH_TAG: &str = "OAuth 2.0";

#[derive(OpenApi)]
#[openapi(
    paths(
        misc::hello,
        misc::slow,
        misc::echo,
        basic::secure,
        bearer::bearer,
        bearer::oauth_test,
        apikey::apikey,
        oauth::handlers::generic_token,
        oauth::handlers::cognito_token,
        oauth::handlers::auth0_token,
        oauth::handlers::apigee_token,
    ),
    tags(
        (name = MISC_TAG, description = "Liveness, latency and no-auth write endpoints"),
        (name = BASIC_TAG, description = "HTTP Basic end-user login"),
        (name = BEARER_TAG, description = "Static and OAuth-shaped bearer tokens"),
        (name = API_KEY_TAG, description = "API key in Authorization or X-API-Key"),
        (name = OAUTH_TAG, description = "Client-credentials grant in four provider styles"),
    ),
    info(
        title = "Mock Auth Server API",
        description = "Test double simulating Basic, Bearer, API-key and OAuth 2.0 authentication",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;

/// Handler for the OpenAPI JSON specification endpoint
async fn openapi_json_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Creates a router for OpenAPI documentation routes
pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", exact(get(openapi_json_handler)))
}
