use std::fmt::Debug;

/// An explicit bearer credential for the agents service.
///
/// The credential is always injected by the caller; this crate never
/// resolves one from the ambient environment.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential {
    token: String,
}

impl Credential {
    /// Creates a credential from a bearer token.
    #[inline]
    pub fn bearer<S: Into<String>>(token: S) -> Self {
        Self {
            token: token.into(),
        }
    }

    #[inline]
    pub(crate) fn token(&self) -> &str {
        &self.token
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Builder for [`FoundryConfig`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FoundryConfigBuilder {
    endpoint: String,
    credential: Credential,
    api_version: Option<String>,
}

impl FoundryConfigBuilder {
    /// Creates a builder with the given project endpoint and credential.
    #[inline]
    pub fn with_endpoint<S: Into<String>>(
        endpoint: S,
        credential: Credential,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            credential,
            api_version: None,
        }
    }

    /// Sets the API version sent with every request.
    #[inline]
    pub fn with_api_version<S: Into<String>>(mut self, api_version: S) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> FoundryConfig {
        FoundryConfig {
            endpoint: self.endpoint.trim_end_matches('/').to_owned(),
            credential: self.credential,
            api_version: self.api_version.unwrap_or_else(|| "v1".to_string()),
        }
    }
}

impl Debug for FoundryConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoundryConfigBuilder")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

/// Configuration for the Foundry agents client.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FoundryConfig {
    pub(crate) endpoint: String,
    pub(crate) credential: Credential,
    pub(crate) api_version: String,
}

impl Debug for FoundryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoundryConfig")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}
