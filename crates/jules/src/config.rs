use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use planner::{BranchName, PlannerError};

/// Default Jules API base URL.
pub const JULES_DEFAULT_BASE: &str = "https://jules.googleapis.com/v1alpha";
/// Header name for API key authentication.
pub const HDR_GOOG_API_KEY: &str = "x-goog-api-key";

const DEFAULT_STARTING_BRANCH: &str = "main";
const DEFAULT_PLAN_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest accepted plan wait window (the GitHub Actions job limit).
pub const MAX_PLAN_TIMEOUT: Duration = Duration::from_secs(6 * 60 * 60);

/// Configuration for the Jules client.
///
/// Debug output redacts `api_key` via [`SecretString`].
#[derive(Clone, Debug)]
pub struct JulesConfig {
    api_base: String,
    api_key: SecretString,
    starting_branch: BranchName,
    plan_timeout: Duration,
    poll_interval: Duration,
    request_timeout: Duration,
}

impl JulesConfig {
    /// Creates a configuration with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::ConfigurationError`] if `api_key` is empty or
    /// whitespace-only.
    pub fn new(api_key: impl Into<String>) -> Result<Self, PlannerError> {
        let api_key = api_key.into();
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(PlannerError::configuration("JULES_API_KEY is required"));
        }

        Ok(Self {
            api_base: JULES_DEFAULT_BASE.into(),
            api_key: SecretString::from(api_key.to_string()),
            starting_branch: BranchName::new(DEFAULT_STARTING_BRANCH)
                .ok_or_else(|| PlannerError::configuration("invalid default branch"))?,
            plan_timeout: DEFAULT_PLAN_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the branch Jules starts the session from.
    #[must_use]
    pub fn with_starting_branch(mut self, branch: BranchName) -> Self {
        self.starting_branch = branch;
        self
    }

    /// Sets how long to wait for a plan before falling back.
    #[must_use]
    pub fn with_plan_timeout(mut self, timeout: Duration) -> Self {
        self.plan_timeout = timeout;
        self
    }

    /// Sets the delay between activity polls.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Returns the configured API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the starting branch for new sessions.
    pub fn starting_branch(&self) -> &BranchName {
        &self.starting_branch
    }

    /// Returns the plan wait window.
    pub fn plan_timeout(&self) -> Duration {
        self.plan_timeout
    }

    /// Returns the delay between activity polls.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Checks the polling settings.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::ConfigurationError`] if the plan wait window
    /// exceeds [`MAX_PLAN_TIMEOUT`] or the poll interval is zero.
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.plan_timeout > MAX_PLAN_TIMEOUT {
            return Err(PlannerError::configuration(format!(
                "plan timeout must be at most {} seconds",
                MAX_PLAN_TIMEOUT.as_secs()
            )));
        }
        if self.poll_interval.is_zero() {
            return Err(PlannerError::configuration("poll interval must be greater than zero"));
        }
        Ok(())
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub(crate) fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    pub(crate) fn headers(&self) -> Result<HeaderMap, PlannerError> {
        let mut h = HeaderMap::new();
        h.insert(
            HDR_GOOG_API_KEY,
            HeaderValue::from_str(self.api_key.expose_secret())
                .map_err(|_| PlannerError::configuration("JULES_API_KEY contains invalid characters"))?,
        );
        Ok(h)
    }
}
