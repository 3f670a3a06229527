//! # Backend Configuration
//!
//! Where the pricing backend lives. Deliberately small: one base URL with
//! an environment override, matching how the quoting shop deploys (a single
//! Flask service per site).
//!
//! No client-side timeout is configured - the transport's default applies,
//! and retries are always user-initiated.

/// Environment variable overriding the backend base URL.
pub const BACKEND_URL_ENV: &str = "CUTQUOTE_BACKEND_URL";

/// Default backend address (the Flask development server).
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Connection settings for the pricing backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, without a trailing slash.
    pub base_url: String,
}

impl BackendConfig {
    /// Creates a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        BackendConfig { base_url }
    }

    /// Reads the backend URL from [`BACKEND_URL_ENV`], falling back to
    /// [`DEFAULT_BACKEND_URL`].
    pub fn from_env() -> Self {
        let url = std::env::var(BACKEND_URL_ENV).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        BackendConfig::new(url)
    }

    /// Joins an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::new(DEFAULT_BACKEND_URL)
    }
}
