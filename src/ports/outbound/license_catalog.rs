use crate::license_aggregation::domain::CatalogLicense;
use crate::shared::Result;

/// LicenseCatalog port for the license catalogue and its remediation todos
///
/// Read-only. Callers treat a failing catalog as "no todos found".
pub trait LicenseCatalog: Send + Sync {
    /// Lists all licenses known to the catalog together with their todos
    fn list_licenses(&self) -> Result<Vec<CatalogLicense>>;
}
