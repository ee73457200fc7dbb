use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument};

use planner::{
    truncate_body, PlannerError, Repository, SessionId, SourceName, UpstreamService,
};

use crate::types::{
    Activity, CreateSessionRequest, GithubRepoContext, ListActivitiesResponse,
    ListSourcesResponse, Session, Source, SourceContext,
};
use crate::JulesConfig;

const ACTIVITY_PAGE_SIZE: u32 = 50;

/// Low-level Jules API client.
///
/// Each method issues exactly one HTTP request (or one per page for
/// [`JulesClient::list_sources`]). Non-success statuses become
/// [`PlannerError::UpstreamError`].
#[derive(Debug, Clone)]
pub struct JulesClient {
    http: reqwest::Client,
    config: JulesConfig,
}

impl JulesClient {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::ConfigurationError`] if the polling settings
    /// are out of range or the HTTP client cannot be built.
    pub fn with_config(config: JulesConfig) -> Result<Self, PlannerError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| PlannerError::configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Returns the client's configuration.
    pub fn config(&self) -> &JulesConfig {
        &self.config
    }

    /// Lists every source connected to the API key, following pagination.
    #[instrument(skip(self))]
    pub async fn list_sources(&self) -> Result<Vec<Source>, PlannerError> {
        let mut sources = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let query: Vec<(&str, String)> = page_token
                .iter()
                .map(|token| ("pageToken", token.clone()))
                .collect();
            let page: ListSourcesResponse = self.get("sources", &query).await?;
            sources.extend(page.sources);

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        debug!(count = sources.len(), "sources listed");
        Ok(sources)
    }

    /// Finds the source connected to `repository`, if any.
    #[instrument(skip_all, fields(repository = %repository))]
    pub async fn find_source(
        &self,
        repository: &Repository,
    ) -> Result<Option<SourceName>, PlannerError> {
        let sources = self.list_sources().await?;
        Ok(sources
            .into_iter()
            .find(|source| {
                source.github_repo.as_ref().is_some_and(|gh| {
                    gh.owner == repository.owner.as_str() && gh.repo == repository.name.as_str()
                })
            })
            .and_then(|source| SourceName::new(source.name)))
    }

    /// Creates a planning session on `source`.
    #[instrument(skip_all, fields(source = %source))]
    pub async fn create_session(
        &self,
        prompt: String,
        source: &SourceName,
        title: String,
    ) -> Result<Session, PlannerError> {
        let request = CreateSessionRequest {
            prompt,
            source_context: SourceContext {
                source: source.as_str().to_string(),
                github_repo_context: GithubRepoContext {
                    starting_branch: self.config.starting_branch().as_str().to_string(),
                },
            },
            title,
            require_plan_approval: false,
        };
        self.post("sessions", &request).await
    }

    /// Lists the first page of a session's activities.
    #[instrument(skip_all, fields(session = %session))]
    pub async fn list_activities(&self, session: &SessionId) -> Result<Vec<Activity>, PlannerError> {
        let page: ListActivitiesResponse = self
            .get(
                &format!("sessions/{session}/activities"),
                &[("pageSize", ACTIVITY_PAGE_SIZE.to_string())],
            )
            .await?;
        Ok(page.activities)
    }

    async fn get<O>(&self, path: &str, query: &[(&str, String)]) -> Result<O, PlannerError>
    where
        O: DeserializeOwned,
    {
        let request = self
            .http
            .get(self.config.url(path))
            .headers(self.config.headers()?)
            .query(query);
        self.execute(request).await
    }

    async fn post<I, O>(&self, path: &str, body: &I) -> Result<O, PlannerError>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let request = self
            .http
            .post(self.config.url(path))
            .headers(self.config.headers()?)
            .json(body);
        self.execute(request).await
    }

    async fn execute<O>(&self, request: reqwest::RequestBuilder) -> Result<O, PlannerError>
    where
        O: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(|e| PlannerError::upstream_transport(UpstreamService::Jules, e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| PlannerError::upstream_transport(UpstreamService::Jules, e))?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(PlannerError::UpstreamError {
                service: UpstreamService::Jules,
                status: Some(status.as_u16()),
                body: format!(
                    "JULES_API_KEY is invalid or has expired; create a new key at \
                     https://jules.google.com/settings#api ({})",
                    truncate_body(&bytes)
                ),
            });
        }
        if !status.is_success() {
            return Err(PlannerError::upstream_status(
                UpstreamService::Jules,
                status.as_u16(),
                &bytes,
            ));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            PlannerError::upstream_transport(
                UpstreamService::Jules,
                format!("{e}: {}", truncate_body(&bytes)),
            )
        })
    }
}
