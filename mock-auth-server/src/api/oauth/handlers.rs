//! OAuth 2.0 token endpoint handlers

use crate::api::oauth::{
    models::{ClientCredentialsRequest, OAuthError, TokenResponse},
    token,
};
use crate::headers::basic_credentials;
use crate::models::Provider;
use crate::openapi::OAUTH_TAG;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, Json};
use http::HeaderMap;
use log::{debug, info, warn};

const CLIENT_CREDENTIALS: &str = "client_credentials";
const CLIENT_CREDENTIALS_FORM_PAIR: &str = "grant_type=client_credentials";

/// Generic token endpoint, client authenticated with HTTP Basic
#[utoipa::path(
    post,
    path = "/oauth/token",
    tag = OAUTH_TAG,
    params(
        ("Authorization" = String, Header, description = "Basic base64(client_id:client_secret)"),
    ),
    request_body(content = String, content_type = "application/x-www-form-urlencoded", description = "Must contain grant_type=client_credentials"),
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 400, description = "invalid_client or unsupported_grant_type", body = OAuthError)
    )
)]
pub(crate) async fn generic_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<TokenResponse>, OAuthError> {
    basic_client_flow(&state, Provider::Generic, &headers, &body)
}

/// Cognito-style token endpoint, client authenticated with HTTP Basic
#[utoipa::path(
    post,
    path = "/oauth2/token",
    tag = OAUTH_TAG,
    params(
        ("Authorization" = String, Header, description = "Basic base64(client_id:client_secret)"),
    ),
    request_body(content = String, content_type = "application/x-www-form-urlencoded", description = "Must contain grant_type=client_credentials"),
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 400, description = "invalid_client or unsupported_grant_type", body = OAuthError)
    )
)]
pub(crate) async fn cognito_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<TokenResponse>, OAuthError> {
    basic_client_flow(&state, Provider::Cognito, &headers, &body)
}

/// Auth0-style token endpoint, everything in a JSON body
#[utoipa::path(
    post,
    path = "/oauth/token/auth0",
    tag = OAUTH_TAG,
    request_body(content = ClientCredentialsRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 400, description = "invalid_request, invalid_client or unsupported_grant_type", body = OAuthError)
    )
)]
pub(crate) async fn auth0_token(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TokenResponse>, OAuthError> {
    let request: ClientCredentialsRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Rejected {} token request: unparsable JSON body", Provider::Auth0);
        debug!("JSON parse error: {}", e);
        OAuthError::invalid_request("Request body must be a valid JSON object")
    })?;

    body_client_flow(&state, Provider::Auth0, &request)
}

/// Apigee-style token endpoint, everything in a form body
#[utoipa::path(
    post,
    path = "/oauth/v2/accesstoken",
    tag = OAUTH_TAG,
    request_body(content = ClientCredentialsRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 400, description = "invalid_client or unsupported_grant_type", body = OAuthError)
    )
)]
pub(crate) async fn apigee_token(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TokenResponse>, OAuthError> {
    let request = ClientCredentialsRequest::from_form(&body);
    body_client_flow(&state, Provider::Apigee, &request)
}

/// Client in the Basic header, grant type looked up as a raw substring of the body
fn basic_client_flow(
    state: &AppState,
    provider: Provider,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Json<TokenResponse>, OAuthError> {
    let client = basic_credentials(headers).map_err(|e| {
        warn!("Rejected {} token request: {}", provider, e);
        OAuthError::invalid_client()
    })?;
    authenticate_client(state, provider, &client.identifier, &client.secret)?;

    if !String::from_utf8_lossy(body).contains(CLIENT_CREDENTIALS_FORM_PAIR) {
        warn!(
            "Rejected {} token request: grant_type=client_credentials not found in body",
            provider
        );
        return Err(OAuthError::unsupported_grant_type());
    }

    Ok(grant(provider, &client.identifier))
}

/// Client and grant type both carried as body fields
fn body_client_flow(
    state: &AppState,
    provider: Provider,
    request: &ClientCredentialsRequest,
) -> Result<Json<TokenResponse>, OAuthError> {
    let client_id = request.client_id.as_deref().unwrap_or("");
    let client_secret = request.client_secret.as_deref().unwrap_or("");
    authenticate_client(state, provider, client_id, client_secret)?;

    if request.grant_type.as_deref() != Some(CLIENT_CREDENTIALS) {
        warn!(
            "Rejected {} token request: unsupported grant_type {:?}",
            provider, request.grant_type
        );
        return Err(OAuthError::unsupported_grant_type());
    }

    Ok(grant(provider, client_id))
}

fn authenticate_client(
    state: &AppState,
    provider: Provider,
    client_id: &str,
    client_secret: &str,
) -> Result<(), OAuthError> {
    if state
        .credentials
        .oauth
        .client(provider)
        .matches(client_id, client_secret)
    {
        Ok(())
    } else {
        warn!(
            "Rejected {} token request: invalid credentials for client_id '{}'",
            provider, client_id
        );
        Err(OAuthError::invalid_client())
    }
}

fn grant(provider: Provider, client_id: &str) -> Json<TokenResponse> {
    let response = token::issue(provider);
    info!(
        "Issued {} access token to client '{}'",
        provider, client_id
    );
    Json(response)
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{basic_auth, TestFixture, TestResponse};
    use http::StatusCode;
    use serde_json::{json, Value};

    const FORM: (&str, &str) = ("Content-Type", "application/x-www-form-urlencoded");
    const JSON: (&str, &str) = ("Content-Type", "application/json");

    fn assert_token(response: &TestResponse, label: &str) {
        response.assert_ok();
        let token = response.json["access_token"].as_str().unwrap();
        let timestamp = token
            .strip_prefix(&format!("oauth_token_{label}_"))
            .unwrap_or_else(|| panic!("unexpected token {token}"));
        assert!(timestamp.parse::<i64>().is_ok());
        assert_eq!(response.json["token_type"], "Bearer");
        assert_eq!(response.json["expires_in"], 3600);
        assert!(response.json["scope"].is_string());
    }

    fn assert_oauth_error(response: &TestResponse, error: &str) {
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json["error"], error);
        assert_eq!(response.header("content-type"), Some("application/json"));
    }

    async fn post_basic(
        fixture: &TestFixture,
        uri: &str,
        client_id: &str,
        client_secret: &str,
        body: &str,
    ) -> TestResponse {
        let authorization = basic_auth(client_id, client_secret);
        fixture
            .post(uri, body, &[("Authorization", authorization.as_str()), FORM])
            .await
    }

    fn auth0_body(grant_type: &str, client_id: &str, client_secret: &str) -> String {
        json!({
            "grant_type": grant_type,
            "client_id": client_id,
            "client_secret": client_secret,
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_generic_token_success() {
        let fixture = TestFixture::new();
        let response = post_basic(
            &fixture,
            "/oauth/token",
            "test_client_id",
            "test_client_secret",
            "grant_type=client_credentials",
        )
        .await;
        assert_token(&response, "generic");
        assert_eq!(response.json["scope"], "read write");
    }

    #[tokio::test]
    async fn test_generic_token_rejections() {
        let fixture = TestFixture::new();

        let response = post_basic(
            &fixture,
            "/oauth/token",
            "test_client_id",
            "wrong",
            "grant_type=client_credentials",
        )
        .await;
        assert_oauth_error(&response, "invalid_client");
        assert_eq!(response.json, json!({"error": "invalid_client"}));

        let response = post_basic(
            &fixture,
            "/oauth/token",
            "test_client_id",
            "test_client_secret",
            "grant_type=password",
        )
        .await;
        assert_oauth_error(&response, "unsupported_grant_type");

        let response = fixture
            .post("/oauth/token", "grant_type=client_credentials", &[FORM])
            .await;
        assert_oauth_error(&response, "invalid_client");
        assert_eq!(response.header("www-authenticate"), None);
    }

    #[tokio::test]
    async fn test_client_is_checked_before_grant_type() {
        let fixture = TestFixture::new();
        let response = post_basic(&fixture, "/oauth/token", "nobody", "nothing", "").await;
        assert_oauth_error(&response, "invalid_client");
    }

    #[tokio::test]
    async fn test_cognito_token() {
        let fixture = TestFixture::new();
        let response = post_basic(
            &fixture,
            "/oauth2/token",
            "cognito_client_456",
            "cognito_secret_def",
            "grant_type=client_credentials&scope=mock-api%2Fread",
        )
        .await;
        assert_token(&response, "cognito");

        let response = post_basic(
            &fixture,
            "/oauth2/token",
            "test_client_id",
            "test_client_secret",
            "grant_type=client_credentials",
        )
        .await;
        assert_oauth_error(&response, "invalid_client");
    }

    #[tokio::test]
    async fn test_auth0_token() {
        let fixture = TestFixture::new();
        let body = auth0_body("client_credentials", "auth0_client_789", "auth0_secret_abc");
        let response = fixture.post("/oauth/token/auth0", &body, &[JSON]).await;
        assert_token(&response, "auth0");
    }

    #[tokio::test]
    async fn test_auth0_rejections() {
        let fixture = TestFixture::new();

        for body in ["{not json", "", "\"text\"", r#"{"client_id": 5}"#] {
            let response = fixture.post("/oauth/token/auth0", body, &[JSON]).await;
            assert_oauth_error(&response, "invalid_request");
        }

        let body = auth0_body("client_credentials", "auth0_client_789", "wrong");
        let response = fixture.post("/oauth/token/auth0", &body, &[JSON]).await;
        assert_oauth_error(&response, "invalid_client");

        let body = auth0_body("authorization_code", "auth0_client_789", "auth0_secret_abc");
        let response = fixture.post("/oauth/token/auth0", &body, &[JSON]).await;
        assert_oauth_error(&response, "unsupported_grant_type");

        // Missing fields are a mismatch, not a parse failure
        let body = json!({"client_id": "auth0_client_789", "client_secret": "auth0_secret_abc"});
        let response = fixture
            .post("/oauth/token/auth0", &body.to_string(), &[JSON])
            .await;
        assert_oauth_error(&response, "unsupported_grant_type");

        let response = fixture.post("/oauth/token/auth0", "{}", &[JSON]).await;
        assert_oauth_error(&response, "invalid_client");
    }

    #[tokio::test]
    async fn test_apigee_token() {
        let fixture = TestFixture::new();
        let response = fixture
            .post(
                "/oauth/v2/accesstoken",
                "grant_type=client_credentials&client_id=apigee_client_xyz&client_secret=apigee_secret_ghi",
                &[FORM],
            )
            .await;
        assert_token(&response, "apigee");
    }

    #[tokio::test]
    async fn test_apigee_decodes_percent_encoding() {
        let fixture = TestFixture::new();
        let response = fixture
            .post(
                "/oauth/v2/accesstoken",
                "grant_type=client%5Fcredentials&client_id=apigee%5Fclient%5Fxyz&client_secret=apigee_secret_ghi",
                &[FORM],
            )
            .await;
        assert_token(&response, "apigee");
    }

    #[tokio::test]
    async fn test_apigee_rejections() {
        let fixture = TestFixture::new();

        let response = fixture
            .post(
                "/oauth/v2/accesstoken",
                "grant_type=client_credentials&client_id=apigee_client_xyz&client_secret=nope",
                &[FORM],
            )
            .await;
        assert_oauth_error(&response, "invalid_client");

        // Substring matching would accept this, field equality does not
        let response = fixture
            .post(
                "/oauth/v2/accesstoken",
                "grant_type=client_credentials_v2&client_id=apigee_client_xyz&client_secret=apigee_secret_ghi",
                &[FORM],
            )
            .await;
        assert_oauth_error(&response, "unsupported_grant_type");

        // Credentials in a Basic header are not looked at
        let authorization = basic_auth("apigee_client_xyz", "apigee_secret_ghi");
        let response = fixture
            .post(
                "/oauth/v2/accesstoken",
                "grant_type=client_credentials",
                &[("Authorization", authorization.as_str()), FORM],
            )
            .await;
        assert_oauth_error(&response, "invalid_client");
    }

    #[tokio::test]
    async fn test_no_endpoint_accepts_foreign_credentials() {
        let fixture = TestFixture::new();
        let clients = [
            ("test_client_id", "test_client_secret"),
            ("cognito_client_456", "cognito_secret_def"),
            ("auth0_client_789", "auth0_secret_abc"),
            ("apigee_client_xyz", "apigee_secret_ghi"),
        ];

        let mut accepted: Vec<Value> = Vec::new();
        for (id, secret) in clients {
            for uri in ["/oauth/token", "/oauth2/token"] {
                let response =
                    post_basic(&fixture, uri, id, secret, "grant_type=client_credentials").await;
                if response.is_success() {
                    accepted.push(json!([uri, id]));
                }
            }
            let body = auth0_body("client_credentials", id, secret);
            if fixture
                .post("/oauth/token/auth0", &body, &[JSON])
                .await
                .is_success()
            {
                accepted.push(json!(["/oauth/token/auth0", id]));
            }
            let body = format!(
                "grant_type=client_credentials&client_id={id}&client_secret={secret}"
            );
            if fixture
                .post("/oauth/v2/accesstoken", &body, &[FORM])
                .await
                .is_success()
            {
                accepted.push(json!(["/oauth/v2/accesstoken", id]));
            }
        }

        assert_eq!(
            accepted,
            vec![
                json!(["/oauth/token", "test_client_id"]),
                json!(["/oauth2/token", "cognito_client_456"]),
                json!(["/oauth/token/auth0", "auth0_client_789"]),
                json!(["/oauth/v2/accesstoken", "apigee_client_xyz"]),
            ]
        );
    }
}
