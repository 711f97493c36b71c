//! Release orchestration
//!
//! Drives one release through the fixed stage sequence
//! `bump -> commit -> push -> tag -> push-tag`. Stages run strictly one after
//! another; the first failing stage ends the release. Nothing that already
//! happened is rolled back, so a failure after `bump` can leave a bumped
//! version or a local commit behind for the operator to reconcile.

use crate::config::PipelineKind;
use crate::domain::{Environment, PipelineState, ReleaseStage, ReleaseTag};
use crate::error::{ReleaseError, Result};
use crate::platform::{PlatformStrategy, ReleaseContext};
use crate::runner::CommandRunner;
use crate::ui;
use crate::warning::ReleaseWarning;

/// Result of a completed release
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    pub tag: ReleaseTag,
    /// Version read before the bump
    pub previous_version: String,
    pub version: String,
    pub build_number: Option<u64>,
    pub completed: Vec<ReleaseStage>,
    pub warnings: Vec<ReleaseWarning>,
}

/// Planned commands per stage, produced without side effects
pub type ReleasePlan = Vec<(ReleaseStage, Vec<String>)>;

pub struct ReleasePipeline<'a> {
    context: &'a ReleaseContext,
    strategy: &'a dyn PlatformStrategy,
    runner: &'a dyn CommandRunner,
    state: PipelineState,
    completed: Vec<ReleaseStage>,
    warnings: Vec<ReleaseWarning>,
}

impl<'a> ReleasePipeline<'a> {
    pub fn new(
        context: &'a ReleaseContext,
        strategy: &'a dyn PlatformStrategy,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        ReleasePipeline {
            context,
            strategy,
            runner,
            state: PipelineState::Start,
            completed: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn completed(&self) -> &[ReleaseStage] {
        &self.completed
    }

    /// Run the pipeline the environment is configured for.
    ///
    /// # Returns
    /// * `Ok(ReleaseOutcome)` - Every stage succeeded and the tag is on the remote
    /// * `Err(ReleaseError::StageFailed)` - A stage failed; later stages were not attempted
    pub fn run(&mut self) -> Result<ReleaseOutcome> {
        if self.state != PipelineState::Start {
            return Err(ReleaseError::validation(
                "release pipeline has already been run",
            ));
        }

        let environment = self.context.request.environment;
        match self.context.settings.pipeline_for(environment) {
            PipelineKind::Staging => {
                if environment != Environment::Stage {
                    self.warn(ReleaseWarning::SharedPipeline { environment });
                }
                self.run_staging()
            }
        }
    }

    fn run_staging(&mut self) -> Result<ReleaseOutcome> {
        let context = self.context;
        let strategy = self.strategy;
        let runner = self.runner;
        let dir = strategy.working_dir();
        let fastlane = context.fastlane();
        let remote = context.remote();
        let kind = context.request.bump_kind;

        let (previous_version, bump) =
            self.advance(ReleaseStage::Bump, &format!("{} number", kind), || {
                let current = strategy.current_version(runner)?;
                ui::display_status(&format!("Current version: {}", current));
                let bump = strategy.bump(runner, kind, &current)?;
                Ok((current, bump))
            })?;
        ui::display_success(&format!("New version number: {}", bump.tag));
        for warning in &bump.warnings {
            self.warn(warning.clone());
        }

        let tag = bump.tag.clone();

        self.advance(ReleaseStage::Commit, "", || strategy.commit(runner, &tag))?;

        self.advance(ReleaseStage::Push, remote.unwrap_or_default(), || {
            runner.run(dir, &fastlane.push_to_git_remote(remote)).map(drop)
        })?;

        self.advance(ReleaseStage::Tag, tag.name(), || {
            runner.run(dir, &fastlane.add_git_tag(&tag)).map(drop)
        })?;

        self.advance(ReleaseStage::PushTag, &format!("-> {}", tag), || {
            runner.run(dir, &fastlane.push_git_tags(&tag, remote)).map(drop)
        })?;

        Ok(ReleaseOutcome {
            tag,
            previous_version,
            version: bump.version,
            build_number: bump.build_number,
            completed: self.completed.clone(),
            warnings: self.warnings.clone(),
        })
    }

    /// Run one stage and move the state machine forward, or into `Failed`
    fn advance<T>(
        &mut self,
        stage: ReleaseStage,
        detail: &str,
        action: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        if self.state.next_stage() != Some(stage) {
            return Err(ReleaseError::validation(format!(
                "stage '{}' cannot run from state {:?}",
                stage, self.state
            )));
        }

        ui::display_stage_start(stage, detail);
        tracing::info!(%stage, "stage started");

        match action() {
            Ok(value) => {
                self.state = stage.completes_to();
                self.completed.push(stage);
                tracing::info!(%stage, "stage finished");
                ui::display_stage_done(stage);
                Ok(value)
            }
            Err(source) => {
                self.state = PipelineState::Failed(stage);
                tracing::error!(%stage, error = %source, "stage failed");
                if !self.completed.is_empty() {
                    self.warn(ReleaseWarning::PartiallyAdvanced {
                        completed: self.completed.clone(),
                        failed: stage,
                    });
                }
                Err(ReleaseError::StageFailed {
                    stage,
                    completed: self.completed.clone(),
                    source: Box::new(source),
                })
            }
        }
    }

    fn warn(&mut self, warning: ReleaseWarning) {
        tracing::warn!(%warning, "release warning");
        ui::display_warning(&warning);
        self.warnings.push(warning);
    }

    /// Commands each stage would run, starting from `current` version.
    /// The iOS tag is not known until the tool reports the new version, so
    /// `{version}` stands in for it.
    pub fn plan(&self, current: &str) -> Result<ReleasePlan> {
        let kind = self.context.request.bump_kind;
        let fastlane = self.context.fastlane();
        let remote = self.context.remote();
        let tag = self.context.tag_for("{version}", None);

        Ok(vec![
            (
                ReleaseStage::Bump,
                self.strategy.planned_bump(kind, current)?,
            ),
            (ReleaseStage::Commit, self.strategy.commit_commands(&tag)),
            (
                ReleaseStage::Push,
                vec![fastlane.push_to_git_remote(remote)],
            ),
            (ReleaseStage::Tag, vec![fastlane.add_git_tag(&tag)]),
            (
                ReleaseStage::PushTag,
                vec![fastlane.push_git_tags(&tag, remote)],
            ),
        ])
    }
}
