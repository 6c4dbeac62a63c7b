use license_info::license_aggregation::domain::CatalogLicense;
use license_info::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock LicenseCatalog for testing
pub struct MockLicenseCatalog {
    pub licenses: Vec<CatalogLicense>,
    pub should_fail: bool,
    calls: AtomicUsize,
}

impl MockLicenseCatalog {
    pub fn new() -> Self {
        Self {
            licenses: Vec::new(),
            should_fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_todos(mut self, license_id: &str, todos: &[&str]) -> Self {
        self.licenses.push(CatalogLicense::new(
            license_id,
            todos.iter().map(|todo| todo.to_string()).collect(),
        ));
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockLicenseCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl LicenseCatalog for MockLicenseCatalog {
    fn list_licenses(&self) -> Result<Vec<CatalogLicense>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            anyhow::bail!("Mock license catalog failure");
        }
        Ok(self.licenses.clone())
    }
}
