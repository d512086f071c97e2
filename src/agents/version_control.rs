use crate::error::{LabopsError, Result};
use crate::utils::path_validator::PathValidator;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Outcome of the stage/diff-check/commit/push sequence. A clean index is a
/// success in its own right, not a degenerate commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    NothingToCommit,
}

/// VersionControlAgent drives the `git` binary for catalog commits.
pub struct VersionControlAgent {
    repo_path: PathBuf,
}

impl VersionControlAgent {
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Result<Self> {
        let repo_path = Self::validate_git_path(repo_path.as_ref())?;
        Ok(Self { repo_path })
    }

    /// Stage the catalog file after confirming it lives inside the repo.
    pub fn stage_catalog(&self, catalog_path: &Path) -> Result<()> {
        let catalog_path = PathValidator::validate_file_path(catalog_path, &self.repo_path)
            .map_err(|err| {
                LabopsError::GitOperation(format!("Refusing to stage unsafe path: {err}"))
            })?;

        let catalog_arg = catalog_path.to_string_lossy();
        let output = self.run_git(&["add", catalog_arg.as_ref()])?;
        Self::ensure_success(&output, "git add")?;
        Ok(())
    }

    /// Check whether the index holds staged changes.
    ///
    /// `git diff --cached --quiet` exits 0 on a clean index and 1 when
    /// something is staged.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let output = self.run_git(&["diff", "--cached", "--quiet"])?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(LabopsError::GitOperation(format!(
                "git diff --cached failed: {}",
                String::from_utf8_lossy(&output.stderr)
            ))),
        }
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        let output = self.run_git(&["commit", "-m", message])?;
        Self::ensure_success(&output, "git commit")?;
        Ok(())
    }

    pub fn push(&self) -> Result<()> {
        let output = self.run_git(&["push"])?;
        Self::ensure_success(&output, "git push")?;
        Ok(())
    }

    /// Full sequence: stage, short-circuit on a clean index, commit, push.
    pub fn commit_and_push(&self, catalog_path: &Path, message: &str) -> Result<CommitOutcome> {
        self.stage_catalog(catalog_path)?;

        if !self.has_staged_changes()? {
            return Ok(CommitOutcome::NothingToCommit);
        }

        self.commit(message)?;
        self.push()?;
        Ok(CommitOutcome::Committed)
    }

    fn run_git(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .current_dir(&self.repo_path)
            .args(args)
            .output()
            .map_err(|e| {
                LabopsError::GitOperation(format!(
                    "Failed to execute git command '{}': {e}",
                    args.join(" ")
                ))
            })
    }

    fn ensure_success(output: &Output, command: &str) -> Result<()> {
        if output.status.success() {
            return Ok(());
        }

        Err(LabopsError::GitOperation(format!(
            "{} failed: {}",
            command,
            String::from_utf8_lossy(&output.stderr)
        )))
    }

    fn validate_git_path(path: &Path) -> Result<PathBuf> {
        let dangerous = [';', '|', '&', '$', '`', '\n', '\r'];
        let path_str = path.to_string_lossy();
        if let Some(ch) = dangerous.iter().find(|c| path_str.contains(**c)) {
            return Err(LabopsError::GitOperation(format!(
                "Path contains dangerous character: '{}'",
                ch
            )));
        }

        PathValidator::validate_repo_path(path)
            .map_err(|err| LabopsError::GitOperation(format!("Invalid Git path: {}", err)))
    }
}
