use crate::error::{ReleaseError, Result};
use crate::runner::CommandRunner;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A command the mock saw, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub dir: PathBuf,
    pub command: String,
}

#[derive(Debug, Clone)]
enum Reply {
    Output(String),
    Failure { stdout: String, stderr: String },
}

/// Mock runner for testing without touching the build tool or git.
///
/// Responses are matched by substring against the command; the first
/// registered rule that matches wins. Unmatched commands succeed with empty
/// output.
#[derive(Debug, Default)]
pub struct MockRunner {
    rules: Vec<(String, Reply)>,
    calls: Mutex<Vec<RecordedCommand>>,
}

impl MockRunner {
    /// Create a new mock runner with no scripted replies
    pub fn new() -> Self {
        MockRunner::default()
    }

    /// Reply with `stdout` to any command containing `pattern`
    pub fn respond(mut self, pattern: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.rules
            .push((pattern.into(), Reply::Output(stdout.into())));
        self
    }

    /// Fail any command containing `pattern` with a non-zero exit
    pub fn fail_on(mut self, pattern: impl Into<String>, stderr: impl Into<String>) -> Self {
        self.rules.push((
            pattern.into(),
            Reply::Failure {
                stdout: String::new(),
                stderr: stderr.into(),
            },
        ));
        self
    }

    /// All commands executed so far
    pub fn calls(&self) -> Vec<RecordedCommand> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Just the command strings, in order
    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }

    /// True if any executed command contains `pattern`
    pub fn ran(&self, pattern: &str) -> bool {
        self.commands().iter().any(|c| c.contains(pattern))
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, dir: &Path, command: &str) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCommand {
                dir: dir.to_path_buf(),
                command: command.to_string(),
            });
        }

        let reply = self
            .rules
            .iter()
            .find(|(pattern, _)| command.contains(pattern.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Output(stdout)) => Ok(stdout),
            Some(Reply::Failure { stdout, stderr }) => Err(ReleaseError::external_command(
                command,
                Some(1),
                stdout,
                stderr,
            )),
            None => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_calls_in_order() {
        let runner = MockRunner::new();
        let dir = Path::new("/tmp/app/ios");

        runner.run(dir, "first").unwrap();
        runner.run(dir, "second").unwrap();

        assert_eq!(runner.commands(), vec!["first", "second"]);
        assert_eq!(runner.calls()[0].dir, PathBuf::from("/tmp/app/ios"));
    }

    #[test]
    fn test_mock_scripted_output() {
        let runner = MockRunner::new().respond("get_version_name", "Result: 1.2.3");
        let out = runner
            .run(Path::new("."), "fastlane run get_version_name")
            .unwrap();
        assert_eq!(out, "Result: 1.2.3");
    }

    #[test]
    fn test_mock_failure() {
        let runner = MockRunner::new().fail_on("push_to_git_remote", "rejected");
        let err = runner
            .run(Path::new("."), "fastlane run push_to_git_remote")
            .unwrap_err();
        assert!(matches!(err, ReleaseError::ExternalCommand { .. }));
        assert!(runner.ran("push_to_git_remote"));
    }

    #[test]
    fn test_mock_first_rule_wins() {
        let runner = MockRunner::new()
            .respond("get_version", "first")
            .respond("get_version_code", "second");
        let out = runner
            .run(Path::new("."), "fastlane run get_version_code")
            .unwrap();
        assert_eq!(out, "first");
    }

    #[test]
    fn test_mock_default_is_empty() {
        let runner = MockRunner::default();
        assert!(runner.calls().is_empty());
        assert_eq!(runner.run(Path::new("."), "anything").unwrap(), "");
    }
}
