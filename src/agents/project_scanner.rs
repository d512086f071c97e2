use crate::config::AutomationConfig;
use crate::error::{LabopsError, Result};
use std::path::{Path, PathBuf};

/// ProjectScannerAgent validates the documentation project structure
pub struct ProjectScannerAgent {
    project_path: PathBuf,
}

impl ProjectScannerAgent {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Validates that the service catalog exists and detects a Git checkout
    pub fn validate(&self, config: &AutomationConfig) -> Result<ProjectInfo> {
        let catalog_path = self.project_path.join(&config.documentation.catalog_path);
        if !catalog_path.exists() {
            return Err(LabopsError::Config(format!(
                "Service catalog not found at {}",
                catalog_path.display()
            )));
        }

        let git_dir = self.project_path.join(".git");
        let has_git = git_dir.exists() && git_dir.is_dir();

        Ok(ProjectInfo {
            project_path: self.project_path.clone(),
            catalog_path,
            has_git,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub project_path: PathBuf,
    pub catalog_path: PathBuf,
    pub has_git: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn validates_project_with_catalog() {
        let dir = tempdir().unwrap();
        let catalog_dir = dir.path().join("docs/applications");
        fs::create_dir_all(&catalog_dir).unwrap();
        fs::write(catalog_dir.join("services.md"), "---\n").unwrap();

        let scanner = ProjectScannerAgent::new(dir.path());
        let info = scanner.validate(&AutomationConfig::default()).unwrap();
        assert!(!info.has_git);
        assert!(info.catalog_path.ends_with("docs/applications/services.md"));
    }

    #[test]
    fn missing_catalog_is_a_config_error() {
        let dir = tempdir().unwrap();
        let scanner = ProjectScannerAgent::new(dir.path());
        let err = scanner.validate(&AutomationConfig::default()).unwrap_err();
        assert!(matches!(err, LabopsError::Config(_)));
    }

    #[test]
    fn detects_git_checkout() {
        let dir = tempdir().unwrap();
        let catalog_dir = dir.path().join("docs/applications");
        fs::create_dir_all(&catalog_dir).unwrap();
        fs::write(catalog_dir.join("services.md"), "---\n").unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let scanner = ProjectScannerAgent::new(dir.path());
        let info = scanner.validate(&AutomationConfig::default()).unwrap();
        assert!(info.has_git);
    }
}
