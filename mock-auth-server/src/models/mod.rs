use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// OAuth provider flavours the mock can impersonate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Generic,
    Cognito,
    Auth0,
    Apigee,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::Generic,
        Provider::Cognito,
        Provider::Auth0,
        Provider::Apigee,
    ];

    /// Label embedded in issued access tokens
    pub fn label(self) -> &'static str {
        match self {
            Provider::Generic => "generic",
            Provider::Cognito => "cognito",
            Provider::Auth0 => "auth0",
            Provider::Apigee => "apigee",
        }
    }

    /// Fixed scope string returned with every token for this provider
    pub fn scope(self) -> &'static str {
        match self {
            Provider::Generic => "read write",
            Provider::Cognito => "mock-api/read mock-api/write",
            Provider::Auth0 => "read:data write:data",
            Provider::Apigee => "read write",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
