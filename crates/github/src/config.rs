use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};

use planner::PlannerError;

/// Default GitHub REST API base URL.
pub const GITHUB_DEFAULT_API_URL: &str = "https://api.github.com";

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION_HEADER: &str = "x-github-api-version";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Connection settings for the GitHub REST API.
///
/// Debug output redacts the token via [`SecretString`].
#[derive(Clone, Debug)]
pub struct GithubConfig {
    api_url: String,
    token: SecretString,
}

impl GithubConfig {
    /// Creates a configuration for `api.github.com` authenticated with `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            api_url: GITHUB_DEFAULT_API_URL.into(),
            token: SecretString::from(token.into()),
        }
    }

    /// Sets the API base URL (GitHub Enterprise Server or a test server).
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Returns the configured API base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        let base = self.api_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    pub(crate) fn headers(&self) -> Result<HeaderMap, PlannerError> {
        let token = self.token.expose_secret().trim();
        if token.is_empty() {
            return Err(PlannerError::configuration("GITHUB_TOKEN is required"));
        }

        let mut h = HeaderMap::new();
        h.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| PlannerError::configuration("GITHUB_TOKEN contains invalid characters"))?,
        );
        h.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        h.insert(
            GITHUB_API_VERSION_HEADER,
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        Ok(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slashes() {
        let cfg = GithubConfig::new("t").with_api_url("http://localhost:1234/");
        assert_eq!(
            cfg.url("/repos/o/r/issues/1/comments"),
            "http://localhost:1234/repos/o/r/issues/1/comments"
        );
    }

    #[test]
    fn headers_carry_bearer_token() {
        let h = GithubConfig::new("ghs_abc").headers().unwrap();
        assert_eq!(h.get(AUTHORIZATION).unwrap(), "Bearer ghs_abc");
        assert_eq!(h.get(ACCEPT).unwrap(), GITHUB_ACCEPT);
    }

    #[test]
    fn blank_token_is_a_configuration_error() {
        let err = GithubConfig::new("  ").headers().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn debug_output_redacts_token() {
        let cfg = GithubConfig::new("ghs_super_secret");
        let debug_str = format!("{cfg:?}");
        assert!(!debug_str.contains("ghs_super_secret"));
    }
}
