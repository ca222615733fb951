//! Static credential set the mock validates against.
//!
//! These values are compile-time constants and are never read from the
//! environment: client code under test hard-codes the same values.

use crate::models::Provider;

/// An identifier and the secret expected alongside it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretPair {
    pub identifier: &'static str,
    pub secret: &'static str,
}

impl SecretPair {
    pub const fn new(identifier: &'static str, secret: &'static str) -> Self {
        Self { identifier, secret }
    }

    /// Both halves must match exactly
    pub fn matches(&self, identifier: &str, secret: &str) -> bool {
        self.identifier == identifier && self.secret == secret
    }
}

/// OAuth client registrations, one per provider flavour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthClients {
    pub generic: SecretPair,
    pub cognito: SecretPair,
    pub auth0: SecretPair,
    pub apigee: SecretPair,
}

impl OAuthClients {
    pub fn client(&self, provider: Provider) -> &SecretPair {
        match provider {
            Provider::Generic => &self.generic,
            Provider::Cognito => &self.cognito,
            Provider::Auth0 => &self.auth0,
            Provider::Apigee => &self.apigee,
        }
    }
}

/// Every expected secret, keyed by scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// End-user login for `/secure`
    pub user: SecretPair,
    pub bearer_token: &'static str,
    pub api_key: &'static str,
    pub oauth: OAuthClients,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            user: SecretPair::new("admin", "secret"),
            bearer_token: "abc123-def456-ghi789",
            api_key: "secret-api-key-123",
            oauth: OAuthClients {
                generic: SecretPair::new("test_client_id", "test_client_secret"),
                cognito: SecretPair::new("cognito_client_456", "cognito_secret_def"),
                auth0: SecretPair::new("auth0_client_789", "auth0_secret_abc"),
                apigee: SecretPair::new("apigee_client_xyz", "apigee_secret_ghi"),
            },
        }
    }
}
