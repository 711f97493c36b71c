use crate::domain::BumpKind;
use crate::error::{ReleaseError, Result};
use std::fmt;

/// Three-component version plus the optional store build number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionState {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub build_number: Option<u64>,
}

impl VersionState {
    /// Create a new version without a build number
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        VersionState {
            major,
            minor,
            patch,
            build_number: None,
        }
    }

    pub fn with_build_number(mut self, build_number: u64) -> Self {
        self.build_number = Some(build_number);
        self
    }

    /// Parse a dotted `major.minor.patch` string.
    ///
    /// Exactly three numeric components are accepted; anything else is a
    /// `MalformedVersion` error rather than a coerced value.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseError::malformed_version(format!(
                "'{}' - expected %d.%d.%d",
                trimmed
            )));
        }

        let component = |name: &str, value: &str| {
            // u64::from_str tolerates a leading '+', which is not a version digit
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ReleaseError::malformed_version(format!(
                    "'{}' - invalid {} component '{}'",
                    trimmed, name, value
                )));
            }
            value.parse::<u64>().map_err(|_| {
                ReleaseError::malformed_version(format!(
                    "'{}' - {} component '{}' out of range",
                    trimmed, name, value
                ))
            })
        };

        Ok(VersionState::new(
            component("major", parts[0])?,
            component("minor", parts[1])?,
            component("patch", parts[2])?,
        ))
    }

    /// Render as `major.minor.patch`, without the build number
    pub fn format(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Apply the Android version-name rule for `kind`.
    ///
    /// A major bump leaves minor and patch untouched (`1.2.3` -> `2.2.3`),
    /// unlike semver which resets both.
    pub fn bump_android(&self, kind: BumpKind) -> Result<Self> {
        let increment = |name: &str, value: u64| {
            value.checked_add(1).ok_or_else(|| {
                ReleaseError::malformed_version(format!(
                    "'{}' - {} component cannot be incremented",
                    self, name
                ))
            })
        };

        let mut next = *self;
        match kind {
            BumpKind::Patch => next.patch = increment("patch", self.patch)?,
            BumpKind::Minor => {
                next.minor = increment("minor", self.minor)?;
                next.patch = 0;
            }
            BumpKind::Major => next.major = increment("major", self.major)?,
        }
        Ok(next)
    }

    pub fn to_semver(&self) -> semver::Version {
        semver::Version::new(self.major, self.minor, self.patch)
    }
}

impl fmt::Display for VersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}
