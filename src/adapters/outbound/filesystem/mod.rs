mod content_store;
mod license_catalog_file;
mod manifest_reader;

pub use content_store::FileSystemContentStore;
pub use license_catalog_file::JsonFileLicenseCatalog;
pub use manifest_reader::{ProjectManifest, DEFAULT_USER_EMAIL};
