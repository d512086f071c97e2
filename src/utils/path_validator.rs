use crate::error::{LabopsError, Result};
use std::path::{Path, PathBuf};

/// Path safety helpers used before handing paths to the `git` binary.
pub struct PathValidator;

impl PathValidator {
    /// Canonicalise a repository path and confirm it is a directory.
    pub fn validate_repo_path(path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();

        let canonical = path.canonicalize().map_err(|e| {
            LabopsError::Config(format!("Invalid path '{}': {e}", path.display()))
        })?;

        if !canonical.is_dir() {
            return Err(LabopsError::Config(format!(
                "Path '{}' is not a directory",
                canonical.display()
            )));
        }

        Ok(canonical)
    }

    /// Ensures the file path resides inside the provided base directory.
    pub fn validate_file_path(
        file_path: impl AsRef<Path>,
        base_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let file_path = file_path.as_ref();
        let base_dir = base_dir.as_ref();

        let canonical_file = file_path.canonicalize().map_err(|e| {
            LabopsError::Config(format!(
                "Invalid file path '{}': {e}",
                file_path.display()
            ))
        })?;

        let canonical_base = base_dir.canonicalize().map_err(|e| {
            LabopsError::Config(format!(
                "Invalid base directory '{}': {e}",
                base_dir.display()
            ))
        })?;

        if !canonical_file.starts_with(&canonical_base) {
            return Err(LabopsError::Config(
                "File path is outside the allowed directory".to_string(),
            ));
        }

        Ok(canonical_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn validate_repo_path_accepts_directory() {
        let dir = tempdir().unwrap();
        assert!(PathValidator::validate_repo_path(dir.path()).is_ok());
    }

    #[test]
    fn validate_repo_path_rejects_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("file.txt");
        fs::write(&file_path, "test").unwrap();
        let err = PathValidator::validate_repo_path(&file_path).unwrap_err();
        assert!(matches!(err, LabopsError::Config(_)));
    }

    #[test]
    fn validate_file_path_accepts_file_inside_base() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("services.md");
        fs::write(&file_path, "### Foo\n").unwrap();
        assert!(PathValidator::validate_file_path(&file_path, dir.path()).is_ok());
    }

    #[test]
    fn validate_file_path_rejects_outsider() {
        let base = tempdir().unwrap();
        let other = tempdir().unwrap();
        let outside = other.path().join("services.md");
        fs::write(&outside, "### Foo\n").unwrap();
        let result = PathValidator::validate_file_path(&outside, base.path());
        assert!(result.is_err());
    }
}
