//! Wire types for the Jules v1alpha API.
//!
//! Fields the planner does not read are omitted; unknown fields are ignored.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// A repository connected to Jules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Resource name, e.g. `sources/github/octo/widgets`.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub github_repo: Option<GithubRepo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubRepo {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub repo: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSourcesResponse {
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub prompt: String,
    pub source_context: SourceContext,
    pub title: String,
    /// Always `false`: API sessions auto-approve their plans.
    pub require_plan_approval: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceContext {
    pub source: String,
    pub github_repo_context: GithubRepoContext,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubRepoContext {
    pub starting_branch: String,
}

/// A Jules session as returned by `POST sessions` and `GET sessions/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Session {
    /// Resource name, e.g. `sessions/1234`.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Session {
    /// Session id, taken from `id` or else the last segment of `name`.
    pub fn session_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.name.rsplit('/').next().filter(|s| !s.is_empty()))
    }
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

/// One event in a session. Exactly one of the optional payloads is set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default)]
    pub plan_generated: Option<PlanGenerated>,
    #[serde(default)]
    pub progress_updated: Option<ProgressUpdated>,
    #[serde(default)]
    pub session_completed: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanGenerated {
    #[serde(default)]
    pub plan: Plan,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Step {
    /// Zero-based; omitted by the API for the first step.
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressUpdated {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListActivitiesResponse {
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_falls_back_to_name() {
        let s: Session = serde_json::from_value(serde_json::json!({"name": "sessions/987"})).unwrap();
        assert_eq!(s.session_id(), Some("987"));

        let s: Session =
            serde_json::from_value(serde_json::json!({"name": "sessions/987", "id": "abc"})).unwrap();
        assert_eq!(s.session_id(), Some("abc"));

        assert_eq!(Session::default().session_id(), None);
    }

    #[test]
    fn activity_variants_deserialise() {
        let list: ListActivitiesResponse = serde_json::from_value(serde_json::json!({
            "activities": [
                {"progressUpdated": {"title": "Reading"}},
                {"planGenerated": {"plan": {"steps": [{"title": "First"}, {"index": 1, "title": "Second"}]}}},
                {"sessionCompleted": {}}
            ]
        }))
        .unwrap();

        assert_eq!(list.activities.len(), 3);
        assert_eq!(list.activities[0].progress_updated.as_ref().unwrap().title, "Reading");
        let steps = &list.activities[1].plan_generated.as_ref().unwrap().plan.steps;
        assert_eq!(steps[0].index, 0);
        assert_eq!(steps[1].index, 1);
        assert!(list.activities[2].session_completed.is_some());
    }

    #[test]
    fn create_session_request_uses_camel_case() {
        let req = CreateSessionRequest {
            prompt: "p".into(),
            source_context: SourceContext {
                source: "sources/github/o/r".into(),
                github_repo_context: GithubRepoContext {
                    starting_branch: "main".into(),
                },
            },
            title: "t".into(),
            require_plan_approval: false,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "prompt": "p",
                "sourceContext": {
                    "source": "sources/github/o/r",
                    "githubRepoContext": {"startingBranch": "main"}
                },
                "title": "t",
                "requirePlanApproval": false
            })
        );
    }
}
