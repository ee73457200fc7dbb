//! Port traits implemented by the infrastructure crates.
//!
//! `jules` implements [`PlanningService`]; `github` implements
//! [`CommentPublisher`]. Both are object-safe via `async-trait` so the
//! composition root can hold them as trait objects.

use async_trait::async_trait;

use crate::{IssueNumber, PlanResult, PlannerError, PostedComment, Repository, TriggerContext};

/// Produces a plan for the issue or pull request named by a [`TriggerContext`].
#[async_trait]
pub trait PlanningService: Send + Sync {
    /// Generates the reply text for `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::UpstreamError`] if the planning API fails.
    async fn generate_plan(&self, ctx: &TriggerContext) -> Result<PlanResult, PlannerError>;
}

/// Publishes a comment on an issue or pull request.
#[async_trait]
pub trait CommentPublisher: Send + Sync {
    /// Creates one new comment with `body` on issue or pull request `number`.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::UpstreamError`] if GitHub rejects the request.
    async fn post_comment(
        &self,
        repository: &Repository,
        number: IssueNumber,
        body: &str,
    ) -> Result<PostedComment, PlannerError>;
}
