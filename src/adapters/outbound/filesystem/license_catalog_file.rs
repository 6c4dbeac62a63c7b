use crate::license_aggregation::domain::CatalogLicense;
use crate::ports::outbound::LicenseCatalog;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use anyhow::Context;
use std::fs;
use std::path::PathBuf;

/// JsonFileLicenseCatalog adapter reading the license catalog from a JSON file
///
/// The file holds an array of `{"id": "...", "todos": ["..."]}` entries.
pub struct JsonFileLicenseCatalog {
    path: PathBuf,
}

impl JsonFileLicenseCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LicenseCatalog for JsonFileLicenseCatalog {
    fn list_licenses(&self) -> Result<Vec<CatalogLicense>> {
        let file_size = validate_regular_file(&self.path, "license catalog")?;
        validate_file_size(file_size, &self.path, MAX_FILE_SIZE)?;

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read license catalog {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid license catalog {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_catalog() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("licenses.json");
        fs::write(
            &path,
            r#"[{"id": "MIT", "todos": ["Keep the notice"]}, {"id": "Apache-2.0"}]"#,
        )
        .unwrap();

        let licenses = JsonFileLicenseCatalog::new(&path).list_licenses().unwrap();
        assert_eq!(licenses.len(), 2);
        assert_eq!(licenses[0].todos, vec!["Keep the notice".to_string()]);
        assert!(licenses[1].todos.is_empty());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let catalog = JsonFileLicenseCatalog::new(dir.path().join("absent.json"));
        assert!(catalog.list_licenses().is_err());
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("licenses.json");
        fs::write(&path, "{ not json").unwrap();

        let error = JsonFileLicenseCatalog::new(&path).list_licenses().unwrap_err();
        assert!(error.to_string().contains("Invalid license catalog"));
    }
}
