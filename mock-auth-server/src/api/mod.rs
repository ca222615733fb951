pub(crate) mod apikey;
pub(crate) mod basic;
pub(crate) mod bearer;
pub(crate) mod misc;
pub(crate) mod oauth;

use crate::errors::ApiError;
use crate::state::AppState;
use axum::extract::Request;
use axum::http::{Method, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::MethodRouter;
use axum::Router;
use log::debug;

/// Every (method, path) pair the mock answers. Anything else is a 404.
pub(crate) const ROUTES: [(Method, &str); 11] = [
    (Method::GET, "/hello"),
    (Method::GET, "/slow"),
    (Method::GET, "/bearer"),
    (Method::GET, "/apikey"),
    (Method::GET, "/oauth-test"),
    (Method::POST, "/echo"),
    (Method::POST, "/secure"),
    (Method::POST, "/oauth/token"),
    (Method::POST, "/oauth2/token"),
    (Method::POST, "/oauth/token/auth0"),
    (Method::POST, "/oauth/v2/accesstoken"),
];

/// Combines all API routes into a single router
pub(super) fn router() -> Router<AppState> {
    Router::new()
        .merge(misc::router())
        .merge(basic::router())
        .merge(bearer::router())
        .merge(apikey::router())
        .merge(oauth::router())
        .fallback(not_found)
}

/// Answers with 404 instead of 405 when the path is known but the method is not
pub(crate) fn exact(method_router: MethodRouter<AppState>) -> MethodRouter<AppState> {
    method_router.fallback(not_found)
}

/// Routes match the whole request target, so a query string is always a miss
pub(crate) async fn reject_query_strings(request: Request, next: Next) -> Response {
    if let Some(query) = request.uri().query() {
        debug!(
            "No route for {} {}?{}",
            request.method(),
            request.uri().path(),
            query
        );
        return ApiError::not_found().into_response();
    }
    next.run(request).await
}

pub(crate) async fn not_found(method: Method, uri: Uri) -> ApiError {
    debug!("No route for {} {}", method, uri.path());
    ApiError::not_found()
}
