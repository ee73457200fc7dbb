use async_trait::async_trait;
use tokio::time::{sleep, Instant};
use tracing::{info, instrument, warn};

use planner::render::{self, ProgressNote};
use planner::{
    prompt, CommentPublisher, PlanResult, PlanStep, PlannerError, PlanningService, PostedComment,
    Repository, RepositoryName, RepositoryOwner, SessionId, TriggerContext, UpstreamService,
};

use crate::types::Activity;
use crate::{JulesClient, JulesConfig};

/// Plans issues and pull requests with Jules.
///
/// This is the library entry point: construct it with an API key and the
/// repository, then call [`JulesPlanner::plan_and_post`] with a comment
/// publisher (normally `github::GithubClient`).
#[derive(Debug, Clone)]
pub struct JulesPlanner {
    client: JulesClient,
    repository: Repository,
}

impl JulesPlanner {
    /// Creates a planner with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::ConfigurationError`] if the API key, owner or
    /// repository name is empty.
    pub fn new(
        api_key: impl Into<String>,
        repo_owner: impl Into<String>,
        repo_name: impl Into<String>,
    ) -> Result<Self, PlannerError> {
        let config = JulesConfig::new(api_key)?;
        let owner = RepositoryOwner::new(repo_owner)
            .ok_or_else(|| PlannerError::configuration("repository owner is required"))?;
        let name = RepositoryName::new(repo_name)
            .ok_or_else(|| PlannerError::configuration("repository name is required"))?;
        Self::with_config(config, Repository::new(owner, name))
    }

    /// Creates a planner from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::ConfigurationError`] if the polling settings
    /// are out of range or the HTTP client cannot be built.
    pub fn with_config(config: JulesConfig, repository: Repository) -> Result<Self, PlannerError> {
        Ok(Self {
            client: JulesClient::with_config(config)?,
            repository,
        })
    }

    /// Returns the repository this planner plans for.
    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Returns the underlying API client.
    pub fn client(&self) -> &JulesClient {
        &self.client
    }

    /// Generates a plan for `ctx` and posts it through `publisher`.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlannerError`] from either step. When planning
    /// fails, nothing is posted.
    pub async fn plan_and_post(
        &self,
        ctx: &TriggerContext,
        publisher: &dyn CommentPublisher,
    ) -> Result<PostedComment, PlannerError> {
        planner::plan_and_post(self, publisher, ctx).await
    }

    /// Polls a session's activities until a plan appears, the session
    /// completes, or the configured wait window elapses.
    ///
    /// Returns `None` when no plan was produced.
    #[instrument(skip_all, fields(session = %session))]
    pub async fn wait_for_plan(&self, session: &SessionId) -> Result<Option<PlanResult>, PlannerError> {
        let config = self.client.config();
        let deadline = Instant::now()
            .checked_add(config.plan_timeout())
            .ok_or_else(|| PlannerError::configuration("plan timeout is too large"))?;

        loop {
            let activities = self.client.list_activities(session).await?;
            if let Some(plan) = find_plan(&activities) {
                return Ok(Some(plan));
            }
            if activities.iter().any(|a| a.session_completed.is_some()) {
                info!("session completed without a plan");
                return Ok(None);
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            sleep(config.poll_interval().min(deadline - now)).await;
        }
    }

    async fn summarise_session(
        &self,
        session: &SessionId,
        session_url: Option<&str>,
    ) -> Result<PlanResult, PlannerError> {
        let activities = self.client.list_activities(session).await?;
        let notes: Vec<ProgressNote> = activities
            .into_iter()
            .filter_map(|a| a.progress_updated)
            .map(|p| ProgressNote {
                title: p.title,
                description: p.description,
            })
            .collect();

        Ok(render::render_session_summary(&notes)
            .unwrap_or_else(|| render::render_pending(session, session_url)))
    }
}

#[async_trait]
impl PlanningService for JulesPlanner {
    #[instrument(skip_all, fields(repository = %self.repository, number = %ctx.number))]
    async fn generate_plan(&self, ctx: &TriggerContext) -> Result<PlanResult, PlannerError> {
        let Some(source) = self.client.find_source(&self.repository).await? else {
            warn!("repository is not connected to Jules");
            return Ok(render::render_repository_not_connected(&self.repository));
        };
        info!(source = %source, "found Jules source");

        let session = self
            .client
            .create_session(
                prompt::build_planning_prompt(ctx),
                &source,
                prompt::session_title(ctx),
            )
            .await?;
        let session_url = session.url.clone();
        let session = session
            .session_id()
            .and_then(SessionId::new)
            .ok_or_else(|| {
                PlannerError::upstream_transport(
                    UpstreamService::Jules,
                    "session response carried no id",
                )
            })?;
        info!(session = %session, "planning session created");

        if let Some(plan) = self.wait_for_plan(&session).await? {
            return Ok(plan);
        }

        warn!(session = %session, "no plan generated, summarising session activities");
        self.summarise_session(&session, session_url.as_deref()).await
    }
}

/// Returns the first non-empty plan among `activities`, rendered.
fn find_plan(activities: &[Activity]) -> Option<PlanResult> {
    activities
        .iter()
        .filter_map(|a| a.plan_generated.as_ref())
        .find_map(|generated| {
            let steps: Vec<PlanStep> = generated
                .plan
                .steps
                .iter()
                .map(|s| PlanStep {
                    index: s.index,
                    title: s.title.clone(),
                })
                .collect();
            render::render_plan(&steps)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Plan, PlanGenerated, Step};

    #[test]
    fn new_rejects_missing_key() {
        let err = JulesPlanner::new("", "octo", "widgets").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn new_rejects_missing_repository_parts() {
        assert!(JulesPlanner::new("k", "", "widgets").unwrap_err().is_configuration());
        assert!(JulesPlanner::new("k", "octo", " ").unwrap_err().is_configuration());
    }

    #[test]
    fn new_keeps_repository() {
        let planner = JulesPlanner::new("k", "octo", "widgets").unwrap();
        assert_eq!(planner.repository().to_string(), "octo/widgets");
        assert_eq!(planner.client().config().api_base(), crate::JULES_DEFAULT_BASE);
    }

    #[test]
    fn with_config_rejects_unbounded_plan_timeout() {
        let config = JulesConfig::new("k")
            .unwrap()
            .with_plan_timeout(std::time::Duration::from_secs(u64::MAX));
        let repository = Repository::parse("octo/widgets").unwrap();

        let err = JulesPlanner::with_config(config, repository).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn find_plan_skips_empty_plans() {
        let activities = vec![
            Activity {
                plan_generated: Some(PlanGenerated::default()),
                ..Activity::default()
            },
            Activity {
                plan_generated: Some(PlanGenerated {
                    plan: Plan {
                        steps: vec![Step {
                            index: 0,
                            title: "Only step".into(),
                        }],
                    },
                }),
                ..Activity::default()
            },
        ];

        let plan = find_plan(&activities).unwrap();
        assert!(plan.text.ends_with("1. **Only step**"));
    }

    #[test]
    fn find_plan_none_without_plan_activity() {
        assert!(find_plan(&[Activity::default()]).is_none());
    }
}
