use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use planner::{
    CommentId, CommentPublisher, IssueNumber, PlannerError, PostedComment, Repository, Timestamp,
    UpstreamService,
};

use crate::GithubConfig;

const USER_AGENT: &str = concat!("jules-planner/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct CreateCommentRequest<'a> {
    body: &'a str,
}

#[derive(Deserialize)]
struct CreateCommentResponse {
    id: u64,
    #[serde(default)]
    html_url: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

/// GitHub REST API client for issue and pull-request comments.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    config: GithubConfig,
}

impl GithubClient {
    /// Creates a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::ConfigurationError`] if the HTTP client cannot
    /// be built (e.g. the TLS backend fails to initialise).
    pub fn with_config(config: GithubConfig) -> Result<Self, PlannerError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PlannerError::configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Returns the client's configuration.
    pub fn config(&self) -> &GithubConfig {
        &self.config
    }
}

#[async_trait]
impl CommentPublisher for GithubClient {
    #[instrument(skip_all, fields(repository = %repository, number = %number))]
    async fn post_comment(
        &self,
        repository: &Repository,
        number: IssueNumber,
        body: &str,
    ) -> Result<PostedComment, PlannerError> {
        let headers = self.config.headers()?;
        let url = self.config.url(&format!(
            "repos/{}/{}/issues/{}/comments",
            repository.owner, repository.name, number
        ));

        let response = self
            .http
            .post(&url)
            .headers(headers)
            .json(&CreateCommentRequest { body })
            .send()
            .await
            .map_err(|e| PlannerError::upstream_transport(UpstreamService::GitHub, e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| PlannerError::upstream_transport(UpstreamService::GitHub, e))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "failed to post comment");
            return Err(PlannerError::upstream_status(
                UpstreamService::GitHub,
                status.as_u16(),
                &bytes,
            ));
        }

        let created: CreateCommentResponse = serde_json::from_slice(&bytes).map_err(|e| {
            PlannerError::upstream_transport(
                UpstreamService::GitHub,
                format!("unexpected comment response: {e}"),
            )
        })?;

        info!(comment_id = created.id, "comment created");
        Ok(PostedComment {
            id: CommentId::new(created.id),
            html_url: created.html_url,
            created_at: created.created_at.map(Timestamp::from_utc),
        })
    }
}
