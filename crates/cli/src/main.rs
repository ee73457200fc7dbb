//! `jules-planner` entry point.
//!
//! This binary is the composition root. It takes no arguments; everything
//! comes from the GitHub Actions environment:
//!
//! 1. **Wire observability** — `tracing-subscriber` to stderr, plus an OTLP
//!    exporter when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
//! 2. **Load settings** — validate every required variable before any
//!    network call (see [`settings`]).
//! 3. **Load the trigger** — read the event payload at `GITHUB_EVENT_PATH`.
//! 4. **Plan and post** — construct `JulesPlanner` and `GithubClient` and run
//!    [`planner::plan_and_post`].
//!
//! Exit status is 0 on success and 1 on any error.

mod settings;
mod telemetry;

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info, info_span, warn, Instrument};

use github::GithubClient;
use jules::JulesPlanner;
use planner::{PlannerError, PostedComment, RunId};

use settings::Settings;
use telemetry::LogFormat;

#[tokio::main]
async fn main() -> ExitCode {
    let (format, format_error) = match std::env::var(telemetry::ENV_LOG_FORMAT) {
        Ok(raw) => match raw.parse::<LogFormat>() {
            Ok(format) => (format, None),
            Err(e) => (LogFormat::default(), Some(e)),
        },
        Err(_) => (LogFormat::default(), None),
    };

    let telemetry = match telemetry::init(format, std::env::var(telemetry::ENV_OTLP_ENDPOINT).ok()) {
        Ok(telemetry) => telemetry,
        Err(e) => {
            eprintln!("❌ {e:#}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(e) = format_error {
        warn!("{e}; using pretty logs");
    }

    let run_id = RunId::new_random();
    let outcome = try_main()
        .instrument(info_span!("jules_planner", run_id = %run_id))
        .await;

    let code = match outcome {
        Ok(comment) => {
            println!("✅ Successfully posted Jules plan to GitHub: {}", comment.html_url);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "jules-planner failed");
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    };

    telemetry.shutdown();
    code
}

async fn try_main() -> Result<PostedComment> {
    let settings = Settings::from_env().context("invalid environment")?;
    info!(repository = %settings.repository, "settings loaded");

    run(settings).await.context("planning run failed")
}

async fn run(settings: Settings) -> Result<PostedComment, PlannerError> {
    let ctx = github::load_trigger_context(&settings.event_path, settings.repository.clone()).await?;
    info!(
        number = %ctx.number,
        kind = ctx.entity_kind(),
        author = %ctx.author,
        "trigger loaded"
    );

    let planner = JulesPlanner::with_config(settings.jules, settings.repository)?;
    let github = GithubClient::with_config(settings.github)?;
    planner.plan_and_post(&ctx, &github).await
}
