//! Command strings for the build-tool actions a release uses.
//!
//! Only the invocation contract lives here; what each action does to the
//! project files is owned by the tool.

use crate::domain::{BumpKind, ReleaseTag};

/// Builds `fastlane run <action> key:"value"` command lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fastlane {
    program: String,
}

impl Fastlane {
    pub fn new(program: impl Into<String>) -> Self {
        Fastlane {
            program: program.into(),
        }
    }

    fn action(&self, action: &str, params: &[(&str, &str)]) -> String {
        let mut command = format!("{} run {}", self.program, action);
        for (key, value) in params {
            command.push_str(&format!(" {}:\"{}\"", key, escape(value)));
        }
        command
    }

    pub fn increment_version_number(&self, kind: BumpKind, xcodeproj: &str) -> String {
        self.action(
            "increment_version_number",
            &[("bump_type", kind.as_str()), ("xcodeproj", xcodeproj)],
        )
    }

    pub fn get_version_number(&self, xcodeproj: &str, target: &str) -> String {
        self.action(
            "get_version_number",
            &[("xcodeproj", xcodeproj), ("target", target)],
        )
    }

    pub fn increment_build_number(&self, xcodeproj: &str) -> String {
        self.action("increment_build_number", &[("xcodeproj", xcodeproj)])
    }

    pub fn reset_build_number(&self, xcodeproj: &str) -> String {
        self.action(
            "increment_build_number",
            &[("build_number", "1"), ("xcodeproj", xcodeproj)],
        )
    }

    pub fn commit_version_bump(&self, message: &str, xcodeproj: &str) -> String {
        self.action(
            "commit_version_bump",
            &[("message", message), ("xcodeproj", xcodeproj)],
        )
    }

    pub fn increment_version_code(&self) -> String {
        self.action("increment_version_code", &[])
    }

    pub fn get_version_code(&self) -> String {
        self.action("get_version_code", &[])
    }

    pub fn get_version_name(&self) -> String {
        self.action("get_version_name", &[])
    }

    pub fn set_version_name(&self, version_name: &str) -> String {
        self.action(
            "android_set_version_name",
            &[("version_name", version_name)],
        )
    }

    pub fn push_to_git_remote(&self, remote: Option<&str>) -> String {
        match remote {
            Some(remote) => self.action("push_to_git_remote", &[("remote", remote)]),
            None => self.action("push_to_git_remote", &[]),
        }
    }

    pub fn add_git_tag(&self, tag: &ReleaseTag) -> String {
        self.action("add_git_tag", &[("tag", tag.name())])
    }

    pub fn push_git_tags(&self, tag: &ReleaseTag, remote: Option<&str>) -> String {
        match remote {
            Some(remote) => self.action("push_git_tags", &[("tag", tag.name()), ("remote", remote)]),
            None => self.action("push_git_tags", &[("tag", tag.name())]),
        }
    }
}

impl Default for Fastlane {
    fn default() -> Self {
        Fastlane::new("fastlane")
    }
}

/// Build number as reported by Apple's versioning tool
pub fn agvtool_build_number() -> String {
    "agvtool what-version -terse".to_string()
}

pub fn git_add(path: &str) -> String {
    format!("git add \"{}\"", escape(path))
}

pub fn git_commit(message: &str) -> String {
    format!("git commit -m \"{}\"", escape(message))
}

/// Escape for use inside a double-quoted shell word
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
