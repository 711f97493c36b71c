use crate::domain::{Environment, ReleaseStage};
use std::fmt;

/// Non-fatal conditions noticed during a release.
/// These are reported to the operator but never change control flow.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseWarning {
    /// The build tool reported a version that is not greater than the one
    /// read before the bump
    VersionNotAdvanced { before: String, after: String },
    /// The environment has no dedicated pipeline and runs the staging one
    SharedPipeline { environment: Environment },
    /// The working directory has no checked-out branch to push
    DetachedHead { dir: String },
    /// The pipeline stopped after some stages already changed the repository
    PartiallyAdvanced {
        completed: Vec<ReleaseStage>,
        failed: ReleaseStage,
    },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::VersionNotAdvanced { before, after } => write!(
                f,
                "Version did not advance after bump ({} -> {})",
                before, after
            ),
            ReleaseWarning::SharedPipeline { environment } => write!(
                f,
                "Environment '{}' has no dedicated pipeline; running the staging pipeline",
                environment
            ),
            ReleaseWarning::DetachedHead { dir } => {
                write!(f, "No branch is checked out in '{}'; push may fail", dir)
            }
            ReleaseWarning::PartiallyAdvanced { completed, failed } => {
                let done: Vec<&str> = completed.iter().map(|s| s.name()).collect();
                write!(
                    f,
                    "Release stopped at '{}' after completing [{}]; the repository must be reconciled manually",
                    failed,
                    done.join(", ")
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_not_advanced_display() {
        let warning = ReleaseWarning::VersionNotAdvanced {
            before: "1.2.3".to_string(),
            after: "1.2.3".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Version did not advance after bump (1.2.3 -> 1.2.3)"
        );
    }

    #[test]
    fn test_shared_pipeline_display() {
        let warning = ReleaseWarning::SharedPipeline {
            environment: Environment::Production,
        };
        assert!(warning.to_string().contains("'production'"));
    }

    #[test]
    fn test_partially_advanced_lists_stages() {
        let warning = ReleaseWarning::PartiallyAdvanced {
            completed: vec![ReleaseStage::Bump, ReleaseStage::Commit],
            failed: ReleaseStage::Push,
        };
        let msg = warning.to_string();
        assert!(msg.contains("stopped at 'push'"));
        assert!(msg.contains("[bump, commit]"));
    }
}
