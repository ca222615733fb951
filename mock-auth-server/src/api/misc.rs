//! Endpoints without any authentication: liveness, latency and a no-auth write.

use crate::api::exact;
use crate::openapi::MISC_TAG;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use log::debug;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct Hello {
    hello: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SlowResponse {
    status: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EchoResponse {
    message: &'static str,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/hello",
    tag = MISC_TAG,
    responses(
        (status = 200, description = "Always succeeds", body = Hello)
    )
)]
pub(crate) async fn hello() -> Json<Hello> {
    Json(Hello { hello: "world" })
}

/// Suspends for the configured delay before answering.
///
/// The delay is a timer, so other connections keep being served meanwhile.
#[utoipa::path(
    get,
    path = "/slow",
    tag = MISC_TAG,
    responses(
        (status = 200, description = "Succeeds after the configured delay", body = SlowResponse)
    )
)]
pub(crate) async fn slow(State(state): State<AppState>) -> Json<SlowResponse> {
    let delay = state.slow_delay();
    debug!("Delaying /slow response by {:?}", delay);
    tokio::time::sleep(delay).await;
    Json(SlowResponse {
        status: "slow response",
    })
}

/// Accepts any body and ignores it
#[utoipa::path(
    post,
    path = "/echo",
    tag = MISC_TAG,
    responses(
        (status = 200, description = "Always succeeds", body = EchoResponse)
    )
)]
pub(crate) async fn echo() -> Json<EchoResponse> {
    Json(EchoResponse {
        message: "This is a POST response",
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hello", exact(get(hello)))
        .route("/slow", exact(get(slow)))
        .route("/echo", exact(post(echo)))
}
