// src/options.rs
// =============================================================================
// Per-operation request options.
//
// - Credentials: used by every operation (token and/or basic auth)
// - CreateOptions: credentials + description + public flag
// - UpdateOptions: credentials + description
//
// Token and basic auth can both be set; nothing here checks the combination.
// =============================================================================

use std::fmt;

/// Authentication for a single request.
///
/// `access_token` is sent as `Authorization: token <value>`. `username` and
/// `password` are handed to the transport's basic-auth support. Both may be
/// present at once.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// No authentication (anonymous, public gists only).
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..Self::default()
        }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    pub fn with_basic(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

// Secrets stay out of Debug output (and so out of logs)
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Options for creating a gist.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub credentials: Credentials,
    pub description: Option<String>,
    /// Leave unset to let the server pick its default (secret).
    pub public: Option<bool>,
}

impl CreateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }
}

/// Options for updating a gist.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    pub credentials: Credentials,
    pub description: Option<String>,
}

impl UpdateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::token("ghp_secret").with_basic("octocat", "hunter2");
        let shown = format!("{:?}", creds);
        assert!(shown.contains("octocat"));
        assert!(!shown.contains("ghp_secret"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn test_token_and_basic_can_coexist() {
        let creds = Credentials::basic("octocat", "hunter2").with_token("t");
        assert_eq!(creds.access_token.as_deref(), Some("t"));
        assert_eq!(creds.username.as_deref(), Some("octocat"));
        assert_eq!(creds.password.as_deref(), Some("hunter2"));
    }
}
