//! OAuth 2.0 client-credentials grant, simulated for four provider styles.
//!
//! | Endpoint | Client authentication | Grant type |
//! |---|---|---|
//! | `POST /oauth/token` (generic) | Basic header | substring of the raw body |
//! | `POST /oauth2/token` (Cognito) | Basic header | substring of the raw body |
//! | `POST /oauth/token/auth0` | JSON body fields | exact JSON field |
//! | `POST /oauth/v2/accesstoken` (Apigee) | form body fields | exact form field |
//!
//! Every endpoint only accepts its own client registration.

pub mod handlers;
pub mod models;
pub mod token;

use crate::api::exact;
use crate::state::AppState;
use axum::routing::{post, Router};

/// Creates OAuth 2.0 routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/oauth/token", exact(post(handlers::generic_token)))
        .route("/oauth2/token", exact(post(handlers::cognito_token)))
        .route("/oauth/token/auth0", exact(post(handlers::auth0_token)))
        .route("/oauth/v2/accesstoken", exact(post(handlers::apigee_token)))
}
