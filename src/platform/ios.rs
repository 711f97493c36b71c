use crate::config::BuildNumberPolicy;
use crate::domain::{BumpKind, Platform, ReleaseTag, VersionState};
use crate::error::{ReleaseError, Result};
use crate::platform::fastlane::{self, Fastlane};
use crate::platform::{BumpOutcome, PlatformStrategy, ReleaseContext};
use crate::runner::{tool_result_value, CommandRunner};
use crate::warning::ReleaseWarning;
use std::path::{Path, PathBuf};

/// iOS bump: the build tool owns the version arithmetic and is re-read
/// afterwards as the source of truth.
#[derive(Debug, Clone)]
pub struct IosRelease {
    context: ReleaseContext,
    fastlane: Fastlane,
    dir: PathBuf,
    xcodeproj: String,
    target: String,
}

impl IosRelease {
    /// Fails when the registry entry lacks the Xcode project or target
    pub fn new(context: ReleaseContext) -> Result<Self> {
        let profile = &context.profile;
        let xcodeproj = profile.xcodeproj.clone().ok_or_else(|| {
            ReleaseError::validation(format!(
                "App {} has no 'xcodeproj' configured for iOS releases",
                profile.app_name
            ))
        })?;
        let target = profile.target.clone().ok_or_else(|| {
            ReleaseError::validation(format!(
                "App {} has no 'target' configured for iOS releases",
                profile.app_name
            ))
        })?;

        Ok(IosRelease {
            fastlane: context.fastlane(),
            dir: context.platform_dir(),
            context,
            xcodeproj,
            target,
        })
    }

    fn build_number_commands(&self) -> Option<String> {
        match self.context.settings.ios.build_number {
            BuildNumberPolicy::Keep => None,
            BuildNumberPolicy::Increment => {
                Some(self.fastlane.increment_build_number(&self.xcodeproj))
            }
            BuildNumberPolicy::Reset => Some(self.fastlane.reset_build_number(&self.xcodeproj)),
        }
    }

    fn wants_build_number(&self) -> bool {
        self.context.settings.ios.build_number != BuildNumberPolicy::Keep
            || self.context.settings.tag.include_build_number
    }

    fn read_build_number(&self, runner: &dyn CommandRunner) -> Result<u64> {
        let raw = runner.run(&self.dir, &fastlane::agvtool_build_number())?;
        let value = raw.trim();
        value.parse::<u64>().map_err(|_| {
            ReleaseError::malformed_version(format!("build number '{}' is not numeric", value))
        })
    }
}

/// Compare versions when both are plain `X.Y.Z`; anything else is not flagged
fn drift_warning(before: &str, after: &str) -> Option<ReleaseWarning> {
    let old = VersionState::parse(before).ok()?.to_semver();
    let new = VersionState::parse(after).ok()?.to_semver();
    if new > old {
        None
    } else {
        Some(ReleaseWarning::VersionNotAdvanced {
            before: before.to_string(),
            after: after.to_string(),
        })
    }
}

impl PlatformStrategy for IosRelease {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn working_dir(&self) -> &Path {
        &self.dir
    }

    fn current_version(&self, runner: &dyn CommandRunner) -> Result<String> {
        let stdout = runner.run(
            &self.dir,
            &self.fastlane.get_version_number(&self.xcodeproj, &self.target),
        )?;
        let version = tool_result_value(&stdout);
        if version.is_empty() {
            return Err(ReleaseError::malformed_version(
                "build tool reported an empty version number",
            ));
        }
        Ok(version)
    }

    fn bump(
        &self,
        runner: &dyn CommandRunner,
        kind: BumpKind,
        current: &str,
    ) -> Result<BumpOutcome> {
        runner.run(
            &self.dir,
            &self.fastlane.increment_version_number(kind, &self.xcodeproj),
        )?;

        if let Some(command) = self.build_number_commands() {
            runner.run(&self.dir, &command)?;
        }

        let version = self.current_version(runner)?;
        let build_number = if self.wants_build_number() {
            Some(self.read_build_number(runner)?)
        } else {
            None
        };

        let mut warnings = Vec::new();
        if let Some(warning) = drift_warning(current, &version) {
            tracing::warn!(before = current, after = %version, "iOS version did not advance");
            warnings.push(warning);
        }

        Ok(BumpOutcome {
            tag: self.context.tag_for(&version, build_number),
            version,
            build_number,
            warnings,
        })
    }

    fn commit_commands(&self, tag: &ReleaseTag) -> Vec<String> {
        let message = self.context.commit_message(tag);
        vec![self.fastlane.commit_version_bump(&message, &self.xcodeproj)]
    }

    fn planned_bump(&self, kind: BumpKind, _current: &str) -> Result<Vec<String>> {
        let mut commands = vec![self.fastlane.increment_version_number(kind, &self.xcodeproj)];
        commands.extend(self.build_number_commands());
        commands.push(self.fastlane.get_version_number(&self.xcodeproj, &self.target));
        if self.wants_build_number() {
            commands.push(fastlane::agvtool_build_number());
        }
        Ok(commands)
    }
}
