/// Network adapters for external API calls
mod license_catalog_client;

pub use license_catalog_client::HttpLicenseCatalog;
