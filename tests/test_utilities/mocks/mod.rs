/// Mock implementations for testing
mod mock_content_store;
mod mock_license_catalog;
mod mock_release_store;

pub use mock_content_store::MockContentStore;
pub use mock_license_catalog::MockLicenseCatalog;
pub use mock_release_store::MockReleaseStore;
