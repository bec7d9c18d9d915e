//! Authentication module for the LuvToSearch client.
//!
//! The search API authenticates through an `api_key` query parameter rather
//! than a header, so providers apply credentials to the request's query pairs.

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{SearchError, SearchResult};

/// Authentication provider trait.
///
/// Implementations supply the credential for outbound search requests.
pub trait AuthProvider: Send + Sync {
    /// Apply authentication to the request's query parameters.
    fn apply_auth(&self, params: &mut Vec<(String, String)>);

    /// Get the authentication scheme name.
    fn scheme(&self) -> &str;

    /// Validate the credentials.
    fn validate(&self) -> SearchResult<()>;
}

/// API key authentication provider.
///
/// Appends the API key as the `api_key` query parameter.
pub struct ApiKeyAuth {
    api_key: SecretString,
}

impl ApiKeyAuth {
    /// Creates a new API key authentication provider.
    pub fn new(api_key: SecretString) -> Self {
        Self { api_key }
    }

    /// Creates from a string API key.
    pub fn from_string(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
        }
    }

    /// Gets a hint of the API key for debugging (last 4 characters).
    pub fn key_hint(&self) -> String {
        let key = self.api_key.expose_secret();
        if key.len() > 4 {
            format!("...{}", &key[key.len() - 4..])
        } else {
            "****".to_string()
        }
    }
}

impl AuthProvider for ApiKeyAuth {
    fn apply_auth(&self, params: &mut Vec<(String, String)>) {
        params.push((
            "api_key".to_string(),
            self.api_key.expose_secret().to_string(),
        ));
    }

    fn scheme(&self) -> &str {
        "api_key"
    }

    fn validate(&self) -> SearchResult<()> {
        if self.api_key.expose_secret().is_empty() {
            return Err(SearchError::configuration("API key cannot be empty"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
