//! Domain layer for the Jules planner.
//!
//! This crate contains every domain concept, newtype identifier, shared value
//! type, and error type used by the planner. The infrastructure crates
//! (`jules`, `github`) implement the traits defined here; they never add
//! domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`IssueNumber`, `SessionId`, etc.) |
//! | [`types`] | Value types (`TriggerContext`, `PlanResult`, `PostedComment`) |
//! | [`errors`] | The [`PlannerError`] taxonomy |
//! | [`prompt`] | Planning prompt and session title construction |
//! | [`render`] | Markdown rendering of plans and fallback messages |
//! | [`ports`] | [`PlanningService`] and [`CommentPublisher`] traits |
//! | [`run`] | The linear [`plan_and_post`] flow |

pub mod errors;
pub mod identifiers;
pub mod ports;
pub mod prompt;
pub mod render;
pub mod run;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{truncate_body, PlannerError, UpstreamService};
pub use identifiers::{
    BranchName, CommentId, IssueNumber, RepositoryName, RepositoryOwner, RunId, SessionId,
    SourceName,
};
pub use ports::{CommentPublisher, PlanningService};
pub use run::plan_and_post;
pub use types::{
    PlanKind, PlanResult, PlanStep, PostedComment, Repository, Timestamp, TriggerContext,
};
