//! Jules planning-service adapter.
//!
//! Implements the [`planner::PlanningService`] trait over the Jules REST API
//! (`https://jules.googleapis.com/v1alpha`):
//!
//! 1. find the Jules source connected to the repository,
//! 2. create a planning session with the issue or pull request as prompt,
//! 3. poll the session's activities until a plan appears or the wait window
//!    elapses,
//! 4. render the plan (or a fallback message) as Markdown.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, authentication, request formatting and
//! response parsing live here. The [`planner`] crate sees only
//! [`planner::PlanningService`].
//!
//! ## Retries
//!
//! Every request is a single attempt. The only repeated request is the
//! bounded activity poll, which is how Jules reports session progress.

mod client;
mod config;
mod session;
pub mod types;

pub use client::JulesClient;
pub use config::{JulesConfig, HDR_GOOG_API_KEY, JULES_DEFAULT_BASE, MAX_PLAN_TIMEOUT};
pub use session::JulesPlanner;
