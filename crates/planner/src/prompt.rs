//! Planning prompt construction.
//!
//! The prompt embeds the issue or pull request and the triggering comment,
//! followed by a fixed list of the sections the plan should cover.

use crate::TriggerContext;

const REQUESTED_SECTIONS: &str = "\
Please provide a comprehensive architecture and design plan that includes:

1. **Architecture Overview**
   - High-level system design
   - Key components and their interactions
   - Data flow diagrams (in text/markdown format)

2. **Technology Stack Recommendations**
   - Recommended technologies and frameworks
   - Justification for each choice
   - Alternatives considered

3. **Implementation Strategy**
   - Phased implementation approach
   - Key milestones and deliverables
   - Dependencies and prerequisites

4. **Design Decisions**
   - Critical architectural decisions
   - Trade-offs and rationale
   - Scalability considerations

5. **Security & Performance**
   - Security considerations
   - Performance optimization strategies
   - Monitoring and observability approach

6. **Risk Analysis**
   - Potential risks and challenges
   - Mitigation strategies
   - Fallback options

7. **Next Steps**
   - Immediate action items
   - Long-term roadmap
   - Success criteria

Format your response in clear, well-structured Markdown. Use diagrams (ASCII/text-based), \
tables, and code examples where appropriate.

Focus on practical, actionable recommendations that can guide the development team.
";

/// Builds the prompt sent to Jules when creating a planning session.
pub fn build_planning_prompt(ctx: &TriggerContext) -> String {
    format!(
        "Create a detailed architecture and implementation plan for the following request.\n\
         \n\
         **{kind} #{number}: {title}**\n\
         \n\
         **Description:**\n\
         {body}\n\
         \n\
         **Planning Request:**\n\
         {comment}\n\
         \n\
         {sections}",
        kind = ctx.entity_kind(),
        number = ctx.number,
        title = ctx.title,
        body = ctx.body,
        comment = ctx.comment,
        sections = REQUESTED_SECTIONS,
    )
}

/// Title given to the Jules session, shown in the Jules web UI.
pub fn session_title(ctx: &TriggerContext) -> String {
    let title = ctx.title.trim();
    let title = if title.is_empty() { "Issue" } else { title };
    format!("Architecture Plan: {title}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IssueNumber, Repository};

    fn context() -> TriggerContext {
        TriggerContext {
            repository: Repository::parse("octo/widgets").unwrap(),
            number: IssueNumber::new(1),
            title: "Test Issue".into(),
            body: "This is a test issue.".into(),
            comment: "@jules plan".into(),
            is_pull_request: false,
            author: "mona".into(),
        }
    }

    #[test]
    fn prompt_contains_issue_details() {
        let prompt = build_planning_prompt(&context());
        assert!(prompt.contains("**Issue #1: Test Issue**"));
        assert!(prompt.contains("This is a test issue."));
        assert!(prompt.contains("**Planning Request:**\n@jules plan"));
        assert!(prompt.contains("7. **Next Steps**"));
    }

    #[test]
    fn prompt_names_pull_requests() {
        let mut ctx = context();
        ctx.is_pull_request = true;
        assert!(build_planning_prompt(&ctx).contains("**Pull Request #1: Test Issue**"));
    }

    #[test]
    fn session_title_falls_back_when_title_is_blank() {
        let mut ctx = context();
        assert_eq!(session_title(&ctx), "Architecture Plan: Test Issue");
        ctx.title = "  ".into();
        assert_eq!(session_title(&ctx), "Architecture Plan: Issue");
    }
}
