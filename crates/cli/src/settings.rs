//! Run settings read from the GitHub Actions environment.

use std::path::PathBuf;
use std::time::Duration;

use github::GithubConfig;
use jules::JulesConfig;
use planner::{BranchName, PlannerError, Repository};

pub const ENV_JULES_API_KEY: &str = "JULES_API_KEY";
pub const ENV_GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const ENV_GITHUB_EVENT_PATH: &str = "GITHUB_EVENT_PATH";
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_GITHUB_API_URL: &str = "GITHUB_API_URL";
pub const ENV_JULES_API_BASE: &str = "JULES_API_BASE";
pub const ENV_JULES_STARTING_BRANCH: &str = "JULES_STARTING_BRANCH";
pub const ENV_JULES_PLAN_TIMEOUT_SECS: &str = "JULES_PLAN_TIMEOUT_SECS";
pub const ENV_JULES_POLL_INTERVAL_SECS: &str = "JULES_POLL_INTERVAL_SECS";

/// Everything a run needs, validated before any network call.
#[derive(Debug, Clone)]
pub struct Settings {
    pub repository: Repository,
    pub event_path: PathBuf,
    pub jules: JulesConfig,
    pub github: GithubConfig,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, PlannerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PlannerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &str| {
            get(key).ok_or_else(|| PlannerError::configuration(format!("{key} is required")))
        };

        let api_key = require(ENV_JULES_API_KEY)?;
        let repository = Repository::parse(&require(ENV_GITHUB_REPOSITORY)?)?;
        let event_path = PathBuf::from(require(ENV_GITHUB_EVENT_PATH)?);
        let token = require(ENV_GITHUB_TOKEN)?;

        let mut jules = JulesConfig::new(api_key)?;
        if let Some(base) = get(ENV_JULES_API_BASE) {
            jules = jules.with_api_base(base);
        }
        if let Some(branch) = get(ENV_JULES_STARTING_BRANCH).and_then(BranchName::new) {
            jules = jules.with_starting_branch(branch);
        }
        if let Some(secs) = get(ENV_JULES_PLAN_TIMEOUT_SECS) {
            let timeout = parse_secs(ENV_JULES_PLAN_TIMEOUT_SECS, &secs)?;
            if timeout > jules::MAX_PLAN_TIMEOUT {
                return Err(PlannerError::configuration(format!(
                    "{ENV_JULES_PLAN_TIMEOUT_SECS} must be at most {}, got '{secs}'",
                    jules::MAX_PLAN_TIMEOUT.as_secs()
                )));
            }
            jules = jules.with_plan_timeout(timeout);
        }
        if let Some(secs) = get(ENV_JULES_POLL_INTERVAL_SECS) {
            let interval = parse_secs(ENV_JULES_POLL_INTERVAL_SECS, &secs)?;
            if interval.is_zero() {
                return Err(PlannerError::configuration(format!(
                    "{ENV_JULES_POLL_INTERVAL_SECS} must be at least 1"
                )));
            }
            jules = jules.with_poll_interval(interval);
        }

        let mut github = GithubConfig::new(token);
        if let Some(url) = get(ENV_GITHUB_API_URL) {
            github = github.with_api_url(url);
        }

        Ok(Self {
            repository,
            event_path,
            jules,
            github,
        })
    }
}

fn parse_secs(key: &str, value: &str) -> Result<Duration, PlannerError> {
    value
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| PlannerError::configuration(format!("{key} must be a whole number of seconds, got '{value}'")))
}
