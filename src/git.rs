//! Read-only repository inspection run before any side effect.
//!
//! The pipeline itself never talks to git through this module; commits,
//! pushes and tags are external commands. This only answers "is the
//! platform directory inside a repository, and on which branch".

use crate::error::{ReleaseError, Result};
use git2::Repository;
use std::path::{Path, PathBuf};

/// What the preflight found about the working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceInfo {
    /// Repository working tree root
    pub root: PathBuf,
    /// Checked-out branch, `None` when HEAD is detached or unborn
    pub branch: Option<String>,
}

/// Discover the repository containing `dir`.
///
/// # Returns
/// * `Ok(WorkspaceInfo)` - Repository root and current branch
/// * `Err` - Validation error if `dir` does not exist or is not inside a git repository
pub fn inspect_workspace(dir: &Path) -> Result<WorkspaceInfo> {
    if !dir.is_dir() {
        return Err(ReleaseError::validation(format!(
            "Project directory not found: {}",
            dir.display()
        )));
    }

    let repo = Repository::discover(dir).map_err(|e| {
        ReleaseError::validation(format!(
            "{} is not inside a git repository: {}",
            dir.display(),
            e.message()
        ))
    })?;

    let root = repo
        .workdir()
        .map(Path::to_path_buf)
        .ok_or_else(|| ReleaseError::validation("bare repositories cannot be released"))?;

    let branch = match repo.head() {
        Ok(head) if head.is_branch() => head.shorthand().map(str::to_string),
        Ok(_) => None,
        Err(e)
            if matches!(
                e.code(),
                git2::ErrorCode::UnbornBranch | git2::ErrorCode::NotFound
            ) =>
        {
            None
        }
        Err(e) => return Err(e.into()),
    };

    Ok(WorkspaceInfo { root, branch })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit_empty(repo: &Repository) {
        let sig = git2::Signature::now("Release Bot", "bot@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
    }

    #[test]
    fn test_missing_directory() {
        let err = inspect_workspace(Path::new("/nonexistent/shop/ios")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_not_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        let err = inspect_workspace(dir.path()).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("not inside a git repository"));
    }

    #[test]
    fn test_discovers_from_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        commit_empty(&repo);
        let ios = dir.path().join("ios");
        std::fs::create_dir(&ios).unwrap();

        let info = inspect_workspace(&ios).unwrap();
        assert_eq!(
            info.root.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
        assert!(info.branch.is_some());
    }

    #[test]
    fn test_unborn_branch_has_no_name() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();

        let info = inspect_workspace(dir.path()).unwrap();
        assert_eq!(info.branch, None);
    }
}
