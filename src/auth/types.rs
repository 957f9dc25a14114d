//! Credential type
//!
//! An immutable access token plus the query parameter name it travels under.

use url::Url;

/// Query parameter the LMS expects the token under
pub const DEFAULT_TOKEN_PARAM: &str = "access_token";

/// Access token attached to every outbound request
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    param: String,
}

impl Credential {
    /// Create a credential using the default `access_token` parameter
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            param: DEFAULT_TOKEN_PARAM.to_string(),
        }
    }

    /// Use a different query parameter name
    #[must_use]
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = param.into();
        self
    }

    /// The raw token value
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The query parameter name
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Check whether `url` already carries this exact token
    pub fn is_attached(&self, url: &Url) -> bool {
        url.query_pairs()
            .any(|(k, v)| k == self.param.as_str() && v == self.token.as_str())
    }

    /// Append the token to `url`'s query string.
    ///
    /// Existing query parameters are kept. A URL that already carries this
    /// exact token is left alone.
    pub fn attach(&self, url: &mut Url) {
        if self.is_attached(url) {
            return;
        }
        url.query_pairs_mut().append_pair(&self.param, &self.token);
    }

    /// Owned variant of [`Credential::attach`]
    #[must_use]
    pub fn attached(&self, mut url: Url) -> Url {
        self.attach(&mut url);
        url
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("param", &self.param)
            .field("token", &"<redacted>")
            .finish()
    }
}
