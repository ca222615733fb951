//! Extraction of credentials from request headers.
//!
//! Every failure mode is a distinct [`CredentialsError`] so it can be logged,
//! but callers collapse all of them into the same rejection.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use http::header::{HeaderMap, AUTHORIZATION};
use thiserror::Error;

/// Header carrying an API key when the `ApiKey` scheme is not used
pub(crate) const X_API_KEY: &str = "x-api-key";

const BASIC_PREFIX: &str = "Basic ";
const BEARER_PREFIX: &str = "Bearer ";
const API_KEY_PREFIX: &str = "ApiKey ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("missing Authorization header")]
    Missing,
    #[error("Authorization header contains non-visible characters")]
    InvalidHeader,
    #[error("expected '{0}' authorization scheme")]
    WrongScheme(&'static str),
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("decoded payload is not UTF-8")]
    NotUtf8(#[from] std::string::FromUtf8Error),
    #[error("decoded payload has no ':' separator")]
    MissingSeparator,
}

/// Identifier and secret decoded from a Basic authorization header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub identifier: String,
    pub secret: String,
}

fn authorization(headers: &HeaderMap) -> Result<&str, CredentialsError> {
    headers
        .get(AUTHORIZATION)
        .ok_or(CredentialsError::Missing)?
        .to_str()
        .map_err(|_| CredentialsError::InvalidHeader)
}

/// Decodes `Authorization: Basic <base64(identifier:secret)>`.
///
/// The payload is split at the first colon, so secrets may contain colons.
pub fn basic_credentials(headers: &HeaderMap) -> Result<BasicCredentials, CredentialsError> {
    let encoded = authorization(headers)?
        .strip_prefix(BASIC_PREFIX)
        .ok_or(CredentialsError::WrongScheme("Basic"))?;
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim())?)?;
    let (identifier, secret) = decoded
        .split_once(':')
        .ok_or(CredentialsError::MissingSeparator)?;

    Ok(BasicCredentials {
        identifier: identifier.to_string(),
        secret: secret.to_string(),
    })
}

/// Returns the token of `Authorization: Bearer <token>`, trimmed
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, CredentialsError> {
    authorization(headers)?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .ok_or(CredentialsError::WrongScheme("Bearer"))
}

/// Looks for an API key in `Authorization: ApiKey <key>` first, then in `X-API-Key`
pub fn api_key(headers: &HeaderMap) -> Option<&str> {
    let from_authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(API_KEY_PREFIX));

    from_authorization
        .or_else(|| {
            headers
                .get(X_API_KEY)
                .and_then(|value| value.to_str().ok())
        })
        .map(str::trim)
}
