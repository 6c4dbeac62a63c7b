//! license-info - License information aggregation and disclosure document generation
//!
//! This library collects license and copyright statements from the scan
//! attachments of software releases (SPDX documents, CLI component license
//! reports, combined CLI reports), removes licenses excluded per attachment,
//! and renders the result as plain text, XHTML or DOCX in a REPORT or
//! DISCLOSURE variant.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`license_aggregation`): Value objects and pure services
//! - **Application Layer** (`application`): Use cases, read models and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Parsers, generators, stores and the result cache
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use license_info::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let content_store = Arc::new(FileSystemContentStore::new("attachments"));
//! let release_store: Arc<dyn ReleaseStore> = Arc::new(
//!     InMemoryReleaseStore::new().with_release(
//!         Release::new("r1", "libfoo", "1.0").with_attachment(Attachment::new(
//!             "att-1",
//!             "libfoo.spdx",
//!             AttachmentType::Other,
//!         )),
//!     ),
//! );
//!
//! let service = LicenseInfoService::new(
//!     ParserFactory::create_all(content_store, release_store.clone(), DEFAULT_EXTERNAL_ID_KEY),
//!     Arc::new(InMemoryParsingResultCache::default()),
//!     release_store,
//!     GeneratorRegistry::with_defaults(),
//! );
//!
//! let request = LicenseInfoFileRequest::new(
//!     Project::new("Demo"),
//!     User::new("dev@example.com"),
//!     TextGenerator::DISCLOSURE,
//! )
//! .with_attachment("r1", "att-1");
//! let file = service.generate_file(&request)?;
//! println!("{}", String::from_utf8_lossy(&file.generated_output));
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod license_aggregation;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::cache::InMemoryParsingResultCache;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemContentStore, JsonFileLicenseCatalog, ProjectManifest,
    };
    pub use crate::adapters::outbound::generators::{DocxGenerator, TextGenerator, XhtmlGenerator};
    pub use crate::adapters::outbound::memory::InMemoryReleaseStore;
    pub use crate::adapters::outbound::network::HttpLicenseCatalog;
    pub use crate::adapters::outbound::parsers::{
        CliParser, CombinedCliParser, SpdxParser, DEFAULT_EXTERNAL_ID_KEY,
    };
    pub use crate::application::dto::{LicenseInfoFile, LicenseInfoFileRequest};
    pub use crate::application::factories::{GeneratorRegistry, ParserFactory};
    pub use crate::application::use_cases::LicenseInfoService;
    pub use crate::license_aggregation::domain::{
        Attachment, AttachmentType, LicenseInfo, LicenseInfoParsingResult,
        LicenseInfoRequestStatus, LicenseNameWithText, OutputFormatInfo, OutputFormatVariant,
        Project, Release, User,
    };
    pub use crate::ports::inbound::LicenseInfoPort;
    pub use crate::ports::outbound::{
        AttachmentContentStore, AttachmentParser, LicenseCatalog, LicenseInfoFormatter,
        ParsingResultCache, ReleaseStore,
    };
    pub use crate::shared::Result;
}
