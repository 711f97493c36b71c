use crate::domain::{Environment, Platform};
use std::fmt;

/// Release tag: `{label}-{platform}-{version}[.{build_number}]`.
///
/// Used both as the git tag name and inside the bump commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    name: String,
}

impl ReleaseTag {
    /// Build a tag from its prefix label, see [crate::domain::ReleaseRequest::tag_label]
    pub fn new(label: &str, platform: Platform, version: &str, build_number: Option<u64>) -> Self {
        let mut name = format!("{}-{}-{}", label, platform, version);
        if let Some(build) = build_number {
            name.push_str(&format!(".{}", build));
        }
        ReleaseTag { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Commit message recorded for the version bump
pub fn commit_message(environment: Environment, platform: Platform, tag: &ReleaseTag) -> String {
    format!("Bump {} {} version to -> {}", environment, platform, tag)
}
