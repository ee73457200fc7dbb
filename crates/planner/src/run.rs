//! The end-to-end plan-and-post flow.

use tracing::{info, instrument};

use crate::{CommentPublisher, PlannerError, PlanningService, PostedComment, TriggerContext};

/// Generates a plan for `ctx` and posts it as a comment on the same issue or
/// pull request.
///
/// The two calls are strictly sequential. If plan generation fails the
/// publisher is never called. The comment body is the plan text, unchanged.
///
/// # Errors
///
/// Propagates the first error from either port.
#[instrument(
    skip_all,
    fields(repository = %ctx.repository, number = %ctx.number, author = %ctx.author)
)]
pub async fn plan_and_post(
    planning: &dyn PlanningService,
    publisher: &dyn CommentPublisher,
    ctx: &TriggerContext,
) -> Result<PostedComment, PlannerError> {
    let plan = planning.generate_plan(ctx).await?;
    info!(kind = ?plan.kind, chars = plan.text.len(), "plan generated");

    let comment = publisher
        .post_comment(&ctx.repository, ctx.number, &plan.text)
        .await?;
    info!(comment_id = %comment.id, url = %comment.html_url, "plan posted");

    Ok(comment)
}
