use crate::error::{ReleaseError, Result};
use crate::runner::{strip_ansi, CommandRunner};
use std::path::Path;
use std::process::Command;

/// Runs commands through the system shell
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new() -> Self {
        ShellRunner {
            shell: "sh".to_string(),
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, dir: &Path, command: &str) -> Result<String> {
        tracing::debug!(dir = %dir.display(), %command, "running external command");

        if !dir.is_dir() {
            return Err(ReleaseError::external_command(
                command,
                None,
                "",
                format!("working directory not found: {}", dir.display()),
            ));
        }

        // Blocks until the tool exits; no timeout is applied.
        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .current_dir(dir)
            .output()
            .map_err(|e| {
                ReleaseError::external_command(
                    command,
                    None,
                    "",
                    format!("failed to spawn {}: {}", self.shell, e),
                )
            })?;

        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        let stderr = strip_ansi(&String::from_utf8_lossy(&output.stderr));
        tracing::trace!(%command, %stdout, "command output");

        if !output.status.success() {
            return Err(ReleaseError::external_command(
                command,
                output.status.code(),
                stdout,
                stderr,
            ));
        }

        Ok(stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let out = ShellRunner::new().run(dir.path(), "echo hello").unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[test]
    fn test_runs_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();

        let out = ShellRunner::new().run(dir.path(), "ls").unwrap();
        assert!(out.contains("marker.txt"));
    }

    #[test]
    fn test_strips_color_codes() {
        let dir = tempfile::tempdir().unwrap();
        let out = ShellRunner::new()
            .run(dir.path(), r"printf '\033[32m1.2.3\033[0m'")
            .unwrap();
        assert_eq!(out, "1.2.3");
    }

    #[test]
    fn test_non_zero_exit_is_external_command_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShellRunner::new()
            .run(dir.path(), "echo out; echo err 1>&2; exit 3")
            .unwrap_err();

        match err {
            ReleaseError::ExternalCommand {
                status,
                stdout,
                stderr,
                ..
            } => {
                assert_eq!(status, "exit code 3");
                assert!(stdout.contains("out"));
                assert!(stderr.contains("err"));
            }
            other => panic!("expected ExternalCommand, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_directory_fails() {
        let err = ShellRunner::new()
            .run(Path::new("/nonexistent/app/ios"), "true")
            .unwrap_err();
        assert!(err.to_string().contains("working directory not found"));
    }
}
