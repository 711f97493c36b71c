use crate::domain::{BumpKind, Platform, ReleaseTag, VersionState};
use crate::error::{ReleaseError, Result};
use crate::platform::fastlane::{self, Fastlane};
use crate::platform::{BumpOutcome, PlatformStrategy, ReleaseContext};
use crate::runner::{tool_result_value, CommandRunner};
use std::path::{Path, PathBuf};

/// Android bump: the version code is incremented by the build tool, the
/// version name is computed here and written back.
#[derive(Debug, Clone)]
pub struct AndroidRelease {
    context: ReleaseContext,
    fastlane: Fastlane,
    dir: PathBuf,
}

impl AndroidRelease {
    pub fn new(context: ReleaseContext) -> Self {
        AndroidRelease {
            fastlane: context.fastlane(),
            dir: context.platform_dir(),
            context,
        }
    }

    fn parse_version_name(raw: &str) -> Result<VersionState> {
        VersionState::parse(raw).map_err(|e| {
            ReleaseError::unsupported_version_format(format!(
                "current android version name '{}' not supported ({}). Supported format: %d.%d.%d",
                raw.trim(),
                e
            ))
        })
    }

    fn read_version_code(&self, runner: &dyn CommandRunner) -> Result<u64> {
        let stdout = runner.run(&self.dir, &self.fastlane.get_version_code())?;
        let value = tool_result_value(&stdout);
        value.parse::<u64>().map_err(|_| {
            ReleaseError::malformed_version(format!("version code '{}' is not numeric", value))
        })
    }
}

impl PlatformStrategy for AndroidRelease {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn working_dir(&self) -> &Path {
        &self.dir
    }

    fn current_version(&self, runner: &dyn CommandRunner) -> Result<String> {
        let stdout = runner.run(&self.dir, &self.fastlane.get_version_name())?;
        Ok(tool_result_value(&stdout))
    }

    fn bump(
        &self,
        runner: &dyn CommandRunner,
        kind: BumpKind,
        current: &str,
    ) -> Result<BumpOutcome> {
        // Validated before anything is written so a bad name leaves the project untouched
        let version = Self::parse_version_name(current)?;
        let next = version.bump_android(kind)?;

        runner.run(&self.dir, &self.fastlane.increment_version_code())?;
        let version_code = self.read_version_code(runner)?;

        let next = next.with_build_number(version_code);
        let version_name = next.format();
        runner.run(&self.dir, &self.fastlane.set_version_name(&version_name))?;

        tracing::debug!(from = %version, to = %version_name, version_code, "android version bumped");

        Ok(BumpOutcome {
            tag: self.context.tag_for(&version_name, next.build_number),
            version: version_name,
            build_number: next.build_number,
            warnings: Vec::new(),
        })
    }

    fn commit_commands(&self, tag: &ReleaseTag) -> Vec<String> {
        let message = self.context.commit_message(tag);
        vec![
            fastlane::git_add(&self.context.settings.android.gradle_file),
            fastlane::git_commit(&message),
        ]
    }

    fn planned_bump(&self, kind: BumpKind, current: &str) -> Result<Vec<String>> {
        let next = Self::parse_version_name(current)?.bump_android(kind)?;
        Ok(vec![
            self.fastlane.increment_version_code(),
            self.fastlane.get_version_code(),
            self.fastlane.set_version_name(&next.format()),
        ])
    }
}
