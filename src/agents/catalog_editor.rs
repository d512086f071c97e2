use crate::catalog::{ServiceRecord, add_section, remove_section, update_section};
use crate::error::{LabopsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of a catalog edit. `AlreadyExists` and `NotFound` leave the file
/// untouched; callers decide whether that fails the surrounding command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    AlreadyExists,
    NotFound,
}

pub struct CatalogEditor {
    catalog_path: PathBuf,
}

impl CatalogEditor {
    pub fn new<P: AsRef<Path>>(catalog_path: P) -> Self {
        Self {
            catalog_path: catalog_path.as_ref().to_path_buf(),
        }
    }

    /// Append a new service section. Refused when the heading already
    /// exists; the operator is expected to run `update` instead.
    pub fn add_service(&self, name: &str, record: &ServiceRecord) -> Result<EditOutcome> {
        let doc = self.load()?;
        match add_section(&doc, name, record) {
            Some(updated) => {
                self.store(&updated)?;
                Ok(EditOutcome::Applied)
            }
            None => Ok(EditOutcome::AlreadyExists),
        }
    }

    /// Overwrite an existing service section with a freshly rendered block.
    pub fn update_service(&self, name: &str, record: &ServiceRecord) -> Result<EditOutcome> {
        let doc = self.load()?;
        match update_section(&doc, name, record) {
            Some(updated) => {
                self.store(&updated)?;
                Ok(EditOutcome::Applied)
            }
            None => Ok(EditOutcome::NotFound),
        }
    }

    /// Delete a service section, leaving the surrounding structure intact.
    pub fn remove_service(&self, name: &str) -> Result<EditOutcome> {
        let doc = self.load()?;
        match remove_section(&doc, name) {
            Some(updated) => {
                self.store(&updated)?;
                Ok(EditOutcome::Applied)
            }
            None => Ok(EditOutcome::NotFound),
        }
    }

    fn load(&self) -> Result<String> {
        fs::read_to_string(&self.catalog_path).map_err(|e| {
            LabopsError::CatalogEdit(format!(
                "Failed to read catalog '{}': {}",
                self.catalog_path.display(),
                e
            ))
        })
    }

    fn store(&self, content: &str) -> Result<()> {
        fs::write(&self.catalog_path, content).map_err(|e| {
            LabopsError::CatalogEdit(format!(
                "Failed to write catalog '{}': {}",
                self.catalog_path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn editor_with(content: &str) -> (tempfile::TempDir, CatalogEditor, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("services.md");
        fs::write(&path, content).unwrap();
        let editor = CatalogEditor::new(&path);
        (dir, editor, path)
    }

    fn record(url: &str) -> ServiceRecord {
        ServiceRecord {
            url: Some(url.to_string()),
            ..ServiceRecord::default()
        }
    }

    #[test]
    fn add_persists_the_new_section() {
        let (_dir, editor, path) = editor_with("### Foo\n- Use Case: A\n---\n");
        let outcome = editor.add_service("Bar", &record("https://bar")).unwrap();
        assert_eq!(outcome, EditOutcome::Applied);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("### Bar\n"));
        assert!(written.ends_with("---\n"));
    }

    #[test]
    fn add_on_existing_service_leaves_file_byte_identical() {
        let original = "### Foo\n- Use Case: A\n---\n";
        let (_dir, editor, path) = editor_with(original);
        let outcome = editor.add_service("Foo", &record("https://foo")).unwrap();
        assert_eq!(outcome, EditOutcome::AlreadyExists);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn update_rewrites_the_section_in_place() {
        let (_dir, editor, path) = editor_with("### Foo\n- Use Case: A\n---\n");
        let outcome = editor
            .update_service(
                "Foo",
                &ServiceRecord {
                    description: Some("Changed".to_string()),
                    ..ServiceRecord::default()
                },
            )
            .unwrap();
        assert_eq!(outcome, EditOutcome::Applied);
        assert!(fs::read_to_string(&path).unwrap().contains("- Use Case: Changed\n"));
    }

    #[test]
    fn remove_on_missing_service_leaves_file_untouched() {
        let original = "### Foo\n- Use Case: A\n---\n";
        let (_dir, editor, path) = editor_with(original);
        let outcome = editor.remove_service("Bar").unwrap();
        assert_eq!(outcome, EditOutcome::NotFound);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn remove_deletes_the_section() {
        let (_dir, editor, path) = editor_with("### Foo\n- Use Case: A\n### Bar\n- Use Case: B\n---\n");
        let outcome = editor.remove_service("Foo").unwrap();
        assert_eq!(outcome, EditOutcome::Applied);
        assert_eq!(fs::read_to_string(&path).unwrap(), "### Bar\n- Use Case: B\n---\n");
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        let dir = tempdir().unwrap();
        let editor = CatalogEditor::new(dir.path().join("absent.md"));
        assert!(editor.add_service("Foo", &record("https://foo")).is_err());
    }
}
