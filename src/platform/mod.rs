//! Platform bump strategies
//!
//! Each platform realises a version bump differently: iOS delegates the
//! arithmetic to the build tool and reads the result back, Android computes
//! the next version name itself and writes it through the tool. Both are
//! exposed through the [PlatformStrategy] trait so the release pipeline can
//! drive either one.

pub mod android;
pub mod fastlane;
pub mod ios;

pub use android::AndroidRelease;
pub use fastlane::Fastlane;
pub use ios::IosRelease;

use crate::config::Settings;
use crate::domain::{commit_message, BumpKind, Platform, ReleaseRequest, ReleaseTag};
use crate::error::Result;
use crate::registry::AppProfile;
use crate::runner::CommandRunner;
use crate::warning::ReleaseWarning;
use std::path::{Path, PathBuf};

/// Everything a strategy needs for one release, merged from the request,
/// the registry entry and the settings.
#[derive(Debug, Clone)]
pub struct ReleaseContext {
    pub request: ReleaseRequest,
    pub profile: AppProfile,
    pub settings: Settings,
}

impl ReleaseContext {
    pub fn new(request: ReleaseRequest, profile: AppProfile, settings: Settings) -> Self {
        ReleaseContext {
            request,
            profile,
            settings,
        }
    }

    pub fn fastlane(&self) -> Fastlane {
        Fastlane::new(self.settings.tool.program.clone())
    }

    pub fn remote(&self) -> Option<&str> {
        self.settings.git.remote.as_deref()
    }

    /// Directory the platform commands run in, e.g. `<project>/ios`
    pub fn platform_dir(&self) -> PathBuf {
        let sub = match self.request.platform {
            Platform::Ios => &self.settings.ios.directory,
            Platform::Android => &self.settings.android.directory,
        };
        self.profile.project_path.join(sub)
    }

    /// Tag for a freshly bumped version
    pub fn tag_for(&self, version: &str, build_number: Option<u64>) -> ReleaseTag {
        let build = if self.settings.tag.include_build_number {
            build_number
        } else {
            None
        };
        ReleaseTag::new(
            self.request.tag_label(),
            self.request.platform,
            version,
            build,
        )
    }

    pub fn commit_message(&self, tag: &ReleaseTag) -> String {
        commit_message(self.request.environment, self.request.platform, tag)
    }
}

/// Result of a successful bump
#[derive(Debug, Clone, PartialEq)]
pub struct BumpOutcome {
    /// Version name as it now stands in the project
    pub version: String,
    pub build_number: Option<u64>,
    pub tag: ReleaseTag,
    pub warnings: Vec<ReleaseWarning>,
}

/// Per-platform version bump and commit behavior
pub trait PlatformStrategy {
    fn platform(&self) -> Platform;

    /// Directory every command for this platform runs in
    fn working_dir(&self) -> &Path;

    /// Read the current version name from the build tool
    fn current_version(&self, runner: &dyn CommandRunner) -> Result<String>;

    /// Bump the version for `kind`, starting from `current`
    fn bump(&self, runner: &dyn CommandRunner, kind: BumpKind, current: &str)
        -> Result<BumpOutcome>;

    /// Commands that record the bumped version files in a commit
    fn commit_commands(&self, tag: &ReleaseTag) -> Vec<String>;

    /// Run [PlatformStrategy::commit_commands] in order, stopping at the first failure
    fn commit(&self, runner: &dyn CommandRunner, tag: &ReleaseTag) -> Result<()> {
        for command in self.commit_commands(tag) {
            runner.run(self.working_dir(), &command)?;
        }
        Ok(())
    }

    /// Commands `bump` would issue, for dry runs. Performs no side effects.
    fn planned_bump(&self, kind: BumpKind, current: &str) -> Result<Vec<String>>;
}

/// Pick the strategy for the request's platform
pub fn strategy_for(context: ReleaseContext) -> Result<Box<dyn PlatformStrategy>> {
    let strategy: Box<dyn PlatformStrategy> = match context.request.platform {
        Platform::Ios => Box::new(IosRelease::new(context)?),
        Platform::Android => Box::new(AndroidRelease::new(context)),
    };
    Ok(strategy)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::domain::Environment;

    pub fn context(platform: Platform, kind: BumpKind, custom_tag: Option<&str>) -> ReleaseContext {
        ReleaseContext::new(
            ReleaseRequest {
                platform,
                environment: Environment::Stage,
                app_name: "shop".to_string(),
                bump_kind: kind,
                custom_tag: custom_tag.map(str::to_string),
            },
            AppProfile {
                app_name: "shop".to_string(),
                project_path: PathBuf::from("/work/shop"),
                xcodeproj: Some("Shop.xcodeproj".to_string()),
                target: Some("Shop".to_string()),
            },
            Settings::default(),
        )
    }
}
