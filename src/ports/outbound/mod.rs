/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (blob store, release store, license
/// catalog) and the pluggable parsers and output formatters.
pub mod attachment_parser;
pub mod content_store;
pub mod license_catalog;
pub mod output_generator;
pub mod parsing_result_cache;
pub mod release_store;

pub use attachment_parser::AttachmentParser;
pub use content_store::AttachmentContentStore;
pub use license_catalog::LicenseCatalog;
pub use output_generator::{LicenseInfoFormatter, OutputPayload};
pub use parsing_result_cache::{ParsingResultCache, SharedParsingResults};
pub use release_store::ReleaseStore;
