//! GitHub Actions event payload loading.
//!
//! Only the fields the planner consumes are modelled. Everything else in the
//! payload is ignored during deserialisation.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};

use planner::{IssueNumber, PlannerError, Repository, TriggerContext};

/// The subset of an `issue_comment` event payload read by the planner.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub issue: Option<IssuePayload>,
    #[serde(default)]
    pub comment: Option<CommentPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssuePayload {
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    /// Present (with any value) only when the issue is a pull request.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentPayload {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub user: Option<UserPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub login: Option<String>,
}

/// Reads and parses the event payload at `path`.
///
/// # Errors
///
/// Returns [`PlannerError::ConfigurationError`] if the file cannot be read,
/// is not valid JSON, or carries no issue number.
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn load_trigger_context(
    path: &Path,
    repository: Repository,
) -> Result<TriggerContext, PlannerError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        PlannerError::configuration(format!(
            "GitHub event data not found at '{}': {e}",
            path.display()
        ))
    })?;
    parse_trigger_context(&bytes, repository)
}

/// Parses event payload bytes into a [`TriggerContext`].
///
/// # Errors
///
/// Returns [`PlannerError::ConfigurationError`] if the bytes are not a JSON
/// object or the issue number is missing.
pub fn parse_trigger_context(
    bytes: &[u8],
    repository: Repository,
) -> Result<TriggerContext, PlannerError> {
    let payload: EventPayload = serde_json::from_slice(bytes)
        .map_err(|e| PlannerError::configuration(format!("invalid GitHub event payload: {e}")))?;

    let issue = payload.issue.unwrap_or_default();
    let comment = payload.comment.unwrap_or_default();

    let number = issue
        .number
        .map(IssueNumber::new)
        .ok_or_else(|| PlannerError::configuration("could not determine issue number"))?;

    let ctx = TriggerContext {
        repository,
        number,
        title: issue.title.unwrap_or_default(),
        body: issue.body.unwrap_or_default(),
        comment: comment.body.unwrap_or_default(),
        is_pull_request: issue.pull_request.is_some(),
        author: comment
            .user
            .and_then(|u| u.login)
            .unwrap_or_else(|| "unknown".to_string()),
    };
    debug!(number = %ctx.number, is_pull_request = ctx.is_pull_request, "trigger context loaded");
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn repo() -> Repository {
        Repository::parse("octo/widgets").unwrap()
    }

    #[test]
    fn parses_issue_comment_event() {
        let payload = serde_json::json!({
            "action": "created",
            "issue": {
                "number": 42,
                "title": "Add caching",
                "body": "We need a cache.",
                "user": {"login": "reporter"}
            },
            "comment": {
                "body": "@jules plan",
                "user": {"login": "mona"}
            }
        });
        let ctx = parse_trigger_context(payload.to_string().as_bytes(), repo()).unwrap();

        assert_eq!(ctx.number, IssueNumber::new(42));
        assert_eq!(ctx.title, "Add caching");
        assert_eq!(ctx.body, "We need a cache.");
        assert_eq!(ctx.comment, "@jules plan");
        assert_eq!(ctx.author, "mona");
        assert!(!ctx.is_pull_request);
    }

    #[test]
    fn pull_request_key_marks_pull_requests() {
        let payload = serde_json::json!({
            "issue": {"number": 7, "title": "PR", "body": null, "pull_request": {"url": "x"}},
            "comment": {"body": "@jules plan"}
        });
        let ctx = parse_trigger_context(payload.to_string().as_bytes(), repo()).unwrap();

        assert!(ctx.is_pull_request);
        assert_eq!(ctx.body, "");
        assert_eq!(ctx.author, "unknown");
    }

    #[test]
    fn missing_issue_number_is_a_configuration_error() {
        let payload = serde_json::json!({"comment": {"body": "@jules plan"}});
        let err = parse_trigger_context(payload.to_string().as_bytes(), repo()).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn malformed_json_is_a_configuration_error() {
        let err = parse_trigger_context(b"not json", repo()).unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn loads_payload_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"issue": {{"number": 3, "title": "T"}}, "comment": {{"body": "@jules plan"}}}}"#
        )
        .unwrap();

        let ctx = load_trigger_context(file.path(), repo()).await.unwrap();
        assert_eq!(ctx.number.as_u64(), 3);
    }

    #[tokio::test]
    async fn missing_file_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_trigger_context(&dir.path().join("event.json"), repo())
            .await
            .unwrap_err();
        assert!(err.is_configuration());
    }
}
