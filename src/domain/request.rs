use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Target mobile platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Ios, Platform::Android];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                ReleaseError::validation(format!(
                    "Platform : {} not found. Available platforms are: [{}]",
                    s,
                    join(&Platform::ALL)
                ))
            })
    }
}

/// Release environment; also the default tag label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Production,
    Stage,
    Feature,
}

impl Environment {
    pub const ALL: [Environment; 3] = [
        Environment::Production,
        Environment::Stage,
        Environment::Feature,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Stage => "stage",
            Environment::Feature => "feature",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Environment::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| {
                ReleaseError::validation(format!(
                    "Environment : {} not found. Available environments are: [{}]",
                    s,
                    join(&Environment::ALL)
                ))
            })
    }
}

/// Granularity of the version increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BumpKind {
    #[default]
    Patch,
    Minor,
    Major,
}

impl BumpKind {
    pub const ALL: [BumpKind; 3] = [BumpKind::Patch, BumpKind::Minor, BumpKind::Major];

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Patch => "patch",
            BumpKind::Minor => "minor",
            BumpKind::Major => "major",
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpKind {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        BumpKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                ReleaseError::validation(format!(
                    "bump_type {} not implemented. Available bump types are: [{}]",
                    s,
                    join(&BumpKind::ALL)
                ))
            })
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A validated release request. Built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    pub platform: Platform,
    pub environment: Environment,
    pub app_name: String,
    pub bump_kind: BumpKind,
    pub custom_tag: Option<String>,
}

impl ReleaseRequest {
    /// Label used as the tag prefix: the custom tag when one was given,
    /// the environment otherwise.
    pub fn tag_label(&self) -> &str {
        match self.custom_tag.as_deref() {
            Some(tag) if !tag.is_empty() => tag,
            _ => self.environment.as_str(),
        }
    }
}
