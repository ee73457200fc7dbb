//! Markdown rendering for reply comments.

use crate::{PlanKind, PlanResult, PlanStep, Repository, SessionId};

/// Maximum number of progress updates included in a session summary.
pub const SUMMARY_ACTIVITY_LIMIT: usize = 10;

/// Base URL of the Jules web application.
pub const JULES_WEB_URL: &str = "https://jules.google.com";

/// A progress update reported by a Jules session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressNote {
    /// Short title of the update.
    pub title: String,
    /// Optional longer description.
    pub description: String,
}

/// Renders plan steps as a numbered Markdown list.
///
/// Returns `None` for an empty step list so callers can fall back.
pub fn render_plan(steps: &[PlanStep]) -> Option<PlanResult> {
    if steps.is_empty() {
        return None;
    }

    let mut lines = vec!["## 📋 Implementation Plan\n".to_string()];
    lines.extend(
        steps
            .iter()
            .map(|step| format!("{}. **{}**", u64::from(step.index) + 1, step.title)),
    );
    Some(PlanResult::new(PlanKind::Plan, lines.join("\n")))
}

/// Renders up to [`SUMMARY_ACTIVITY_LIMIT`] progress notes as a bullet list.
///
/// Notes without a title are skipped. Returns `None` when nothing remains.
pub fn render_session_summary(notes: &[ProgressNote]) -> Option<PlanResult> {
    let mut lines = vec!["## 📊 Jules Session Summary\n".to_string()];
    for note in notes.iter().take(SUMMARY_ACTIVITY_LIMIT) {
        if note.title.is_empty() {
            continue;
        }
        lines.push(format!("- **{}**", note.title));
        if !note.description.is_empty() {
            lines.push(format!("  {}\n", note.description));
        }
    }

    if lines.len() == 1 {
        return None;
    }
    Some(PlanResult::new(PlanKind::SessionSummary, lines.join("\n")))
}

/// Message posted when a session exists but produced nothing in time.
///
/// Links `session_url` when Jules reported one, else the Jules web app.
pub fn render_pending(session: &SessionId, session_url: Option<&str>) -> PlanResult {
    let url = session_url.unwrap_or(JULES_WEB_URL);
    let text = format!(
        "⚠️ **Planning Session Created**\n\
         \n\
         Jules session has been initiated but no plan was generated yet.\n\
         \n\
         View the session progress at: {url}\n\
         \n\
         Session ID: `{session}`"
    );
    PlanResult::new(
        PlanKind::Pending {
            session: session.clone(),
        },
        text,
    )
}

/// Message posted when the repository is not a Jules source.
pub fn render_repository_not_connected(repository: &Repository) -> PlanResult {
    let text = format!(
        "❌ **Repository Not Found**\n\
         \n\
         The repository `{repository}` is not connected to Jules.\n\
         \n\
         **To fix this:**\n\
         1. Go to [Jules web app]({JULES_WEB_URL})\n\
         2. Install the Jules GitHub app for this repository\n\
         3. Once installed, try `@jules plan` again\n\
         \n\
         For more information, see the [Jules documentation](https://jules.google/docs)."
    );
    PlanResult::new(PlanKind::RepositoryNotConnected, text)
}
