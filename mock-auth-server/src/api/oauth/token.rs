//! Synthesis and shape inspection of mock access tokens.
//!
//! Tokens are never stored. Issuing one only formats a string, and
//! inspecting one only looks at its shape.

use crate::api::oauth::models::TokenResponse;
use crate::models::Provider;
use chrono::{DateTime, Utc};

pub(crate) const TOKEN_PREFIX: &str = "oauth_token_";
pub(crate) const TOKEN_TYPE: &str = "Bearer";
pub(crate) const EXPIRES_IN_SECS: u64 = 3600;

/// Characters of the token echoed back by `/oauth-test`
const DISPLAYED_PREFIX_CHARS: usize = 20;

pub fn issue(provider: Provider) -> TokenResponse {
    issue_at(provider, Utc::now())
}

pub fn issue_at(provider: Provider, issued_at: DateTime<Utc>) -> TokenResponse {
    TokenResponse {
        access_token: format!(
            "{}{}_{}",
            TOKEN_PREFIX,
            provider.label(),
            issued_at.timestamp()
        ),
        token_type: TOKEN_TYPE.to_string(),
        expires_in: EXPIRES_IN_SECS,
        scope: provider.scope().to_string(),
    }
}

/// What `/oauth-test` reports about a token it accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSummary {
    pub provider: String,
    pub token_prefix: String,
}

/// Returns `None` when the token does not start with `oauth_token_`.
///
/// The provider is whatever follows the prefix up to the next `_`, possibly empty.
pub fn summarize(token: &str) -> Option<TokenSummary> {
    let rest = token.strip_prefix(TOKEN_PREFIX)?;
    let provider = rest.split_once('_').map_or(rest, |(provider, _)| provider);
    let shown: String = token.chars().take(DISPLAYED_PREFIX_CHARS).collect();

    Some(TokenSummary {
        provider: provider.to_string(),
        token_prefix: format!("{shown}..."),
    })
}
