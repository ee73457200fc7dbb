//! Jules planner GitHub infrastructure adapter.
//!
//! Provides the two GitHub-facing pieces of a planner run:
//!
//! - [`load_trigger_context`] reads the GitHub Actions event payload (the
//!   file at `GITHUB_EVENT_PATH`) into a [`planner::TriggerContext`].
//! - [`GithubClient`] implements [`planner::CommentPublisher`] over the
//!   GitHub REST API.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. All GitHub
//! API details (headers, authentication, response decoding) are handled here;
//! the [`planner`] crate never sees them.

mod client;
mod config;
mod event;

pub use client::GithubClient;
pub use config::{GithubConfig, GITHUB_DEFAULT_API_URL};
pub use event::{load_trigger_context, parse_trigger_context, EventPayload};
