//! Release workflow orchestration
//!
//! Turns raw command-line values into a validated request, runs the
//! read-only preflight and hands off to the release pipeline. Nothing here
//! depends on clap, so the workflow can be driven programmatically.

use crate::config::Settings;
use crate::domain::{BumpKind, Environment, Platform, ReleaseRequest};
use crate::error::Result;
use crate::git;
use crate::pipeline::{ReleaseOutcome, ReleasePipeline, ReleasePlan};
use crate::platform::{strategy_for, ReleaseContext};
use crate::registry::{AppProfile, AppRegistry};
use crate::runner::CommandRunner;
use crate::ui;
use crate::warning::ReleaseWarning;

/// Arguments for the release workflow, as typed by the operator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseArgs {
    pub platform: String,
    pub environment: String,
    pub app_name: String,

    /// Defaults to `patch` when absent
    pub bump_kind: Option<String>,

    /// Replaces the environment as the tag prefix
    pub custom_tag: Option<String>,

    /// Print planned commands instead of executing them
    pub dry_run: bool,
}

/// What the workflow did
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResult {
    Released(ReleaseOutcome),
    Planned(ReleasePlan),
}

/// Resolve raw arguments against the registry.
///
/// Checks platform, environment, app name and bump kind in that order and
/// fails with a validation error on the first unknown value. Runs no
/// external commands.
pub fn validate_request(
    args: &ReleaseArgs,
    registry: &AppRegistry,
) -> Result<(ReleaseRequest, AppProfile)> {
    let platform: Platform = args.platform.parse()?;
    let environment: Environment = args.environment.parse()?;
    let profile = registry.get(&args.app_name)?.clone();
    let bump_kind = match args.bump_kind.as_deref() {
        Some(raw) => raw.parse::<BumpKind>()?,
        None => BumpKind::default(),
    };

    let request = ReleaseRequest {
        platform,
        environment,
        app_name: args.app_name.clone(),
        bump_kind,
        custom_tag: args.custom_tag.clone().filter(|tag| !tag.is_empty()),
    };
    Ok((request, profile))
}

/// Main release workflow
///
/// 1. Validate the request against the registry
/// 2. Select the platform strategy
/// 3. Check the platform directory is inside a git repository
/// 4. Run the release pipeline (or print its plan on a dry run)
///
/// Steps 1-3 never touch the project; any failure there leaves it untouched.
pub fn run_release_workflow(
    args: &ReleaseArgs,
    registry: &AppRegistry,
    settings: &Settings,
    runner: &dyn CommandRunner,
) -> Result<WorkflowResult> {
    let (request, profile) = validate_request(args, registry)?;
    tracing::debug!(?request, "release request validated");

    let context = ReleaseContext::new(request, profile, settings.clone());
    let strategy = strategy_for(context.clone())?;

    let workspace = git::inspect_workspace(strategy.working_dir())?;
    match &workspace.branch {
        Some(branch) => ui::display_status(&format!(
            "Releasing {} {} from branch '{}'",
            context.request.app_name, context.request.platform, branch
        )),
        None => ui::display_warning(&ReleaseWarning::DetachedHead {
            dir: strategy.working_dir().display().to_string(),
        }),
    }

    let mut pipeline = ReleasePipeline::new(&context, strategy.as_ref(), runner);

    if args.dry_run {
        let current = strategy.current_version(runner)?;
        ui::display_status(&format!("Current version: {}", current));
        let plan = pipeline.plan(&current)?;
        ui::display_plan(&plan);
        return Ok(WorkflowResult::Planned(plan));
    }

    let outcome = pipeline.run()?;
    Ok(WorkflowResult::Released(outcome))
}
