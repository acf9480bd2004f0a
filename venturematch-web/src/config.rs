//! Frontend configuration module
//!
//! The web client is configured at build time; there is no file or
//! environment to read once it runs in the browser.

use shared::api::DEFAULT_API_URL;

/// Frontend configuration for the backend location and external links
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// Base URL of the REST backend
    pub api_url: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_url: option_env!("VENTUREMATCH_API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
        }
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the backend base URL
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}
