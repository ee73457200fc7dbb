//! Value types for the planner domain.
//!
//! Both [`TriggerContext`] and [`PlanResult`] live for a single run: the
//! context is built once from the event payload, the result is built once by
//! the planning service and consumed once when the reply comment is posted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CommentId, IssueNumber, PlannerError, RepositoryName, RepositoryOwner, SessionId};

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// A GitHub repository, identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    /// Owning user or organisation.
    pub owner: RepositoryOwner,
    /// Repository name.
    pub name: RepositoryName,
}

impl Repository {
    /// Creates a [`Repository`] from its parts.
    pub fn new(owner: RepositoryOwner, name: RepositoryName) -> Self {
        Self { owner, name }
    }

    /// Parses the `"owner/repo"` form used by `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::ConfigurationError`] unless the value is
    /// exactly two non-empty segments separated by `/`.
    pub fn parse(full_name: &str) -> Result<Self, PlannerError> {
        let invalid = || {
            PlannerError::configuration(format!(
                "repository must be in 'owner/repo' form, got '{full_name}'"
            ))
        };

        let (owner, name) = full_name.trim().split_once('/').ok_or_else(invalid)?;
        if name.contains('/') {
            return Err(invalid());
        }

        let owner = RepositoryOwner::new(owner).ok_or_else(invalid)?;
        let name = RepositoryName::new(name).ok_or_else(invalid)?;
        Ok(Self { owner, name })
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

// ---------------------------------------------------------------------------
// Trigger context
// ---------------------------------------------------------------------------

/// Everything the planner needs to know about the comment that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerContext {
    /// Repository the issue or pull request belongs to.
    pub repository: Repository,
    /// Issue or pull request number. The reply is posted here.
    pub number: IssueNumber,
    /// Issue or pull request title.
    pub title: String,
    /// Issue or pull request description. Empty when GitHub reports `null`.
    pub body: String,
    /// Text of the triggering comment.
    pub comment: String,
    /// `true` when the target is a pull request rather than an issue.
    pub is_pull_request: bool,
    /// Login of the comment author, `"unknown"` when absent from the payload.
    pub author: String,
}

impl TriggerContext {
    /// Human-readable kind of the target: `"Issue"` or `"Pull Request"`.
    pub fn entity_kind(&self) -> &'static str {
        if self.is_pull_request {
            "Pull Request"
        } else {
            "Issue"
        }
    }
}

// ---------------------------------------------------------------------------
// Plan result
// ---------------------------------------------------------------------------

/// One step of a plan generated by Jules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    /// Zero-based position of the step within the plan.
    pub index: u32,
    /// Short description of the step.
    pub title: String,
}

/// How a [`PlanResult`] was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PlanKind {
    /// Jules produced a plan within the wait window.
    Plan,
    /// No plan was produced; the text summarises session progress instead.
    SessionSummary,
    /// A session was created but neither a plan nor progress arrived in time.
    Pending {
        /// Session the user can follow up on.
        session: SessionId,
    },
    /// The repository is not connected to Jules, so no session was created.
    RepositoryNotConnected,
}

/// The text to post back on the issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResult {
    /// How the text was obtained.
    pub kind: PlanKind,
    /// Markdown body of the reply comment, posted verbatim.
    pub text: String,
}

impl PlanResult {
    /// Creates a [`PlanResult`].
    pub fn new(kind: PlanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Returns `true` when the result carries an actual plan.
    pub fn is_plan(&self) -> bool {
        matches!(self.kind, PlanKind::Plan)
    }
}

// ---------------------------------------------------------------------------
// Posted comment
// ---------------------------------------------------------------------------

/// A comment created on GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedComment {
    /// GitHub-assigned comment id.
    pub id: CommentId,
    /// Browser URL of the comment.
    pub html_url: String,
    /// Creation time reported by GitHub.
    pub created_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
