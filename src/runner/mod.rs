//! External command execution boundary
//!
//! Every side effect of a release (build-tool actions, git commits, pushes,
//! tags) goes through the [CommandRunner] trait. The pipeline never touches
//! version files or the repository itself.
//!
//! - [shell::ShellRunner]: runs commands through `sh -c`
//! - [mock::MockRunner]: records commands and replays scripted output for tests

pub mod mock;
pub mod shell;

pub use mock::MockRunner;
pub use shell::ShellRunner;

use crate::error::Result;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Executes shell command strings against a working directory.
///
/// Implementations must wait for the command to exit before returning and
/// must report a non-zero exit as [crate::error::ReleaseError::ExternalCommand].
pub trait CommandRunner: Send + Sync {
    /// Run `command` inside `dir`.
    ///
    /// # Returns
    /// * `Ok(String)` - Captured stdout with ANSI color sequences removed
    /// * `Err` - If the process could not be spawned or exited non-zero
    fn run(&self, dir: &Path, command: &str) -> Result<String>;
}

fn ansi_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\x1B(?:\[[0-?]*[ -/]*[@-~]|[@-Z\\-_])").expect("ANSI pattern is valid")
    })
}

/// Remove terminal color/control escape sequences
pub fn strip_ansi(text: &str) -> String {
    ansi_pattern().replace_all(text, "").into_owned()
}

/// Extract the value a build-tool action prints as its result.
///
/// Tool output ends with a line such as `[12:00:01]: Result: 1.2.3`; the
/// value is whatever follows the last `:` in the output, trimmed.
pub fn tool_result_value(stdout: &str) -> String {
    let cleaned = strip_ansi(stdout);
    cleaned
        .rsplit(':')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
