pub mod attachment;
pub mod catalog_license;
pub mod license_info;
pub mod license_name_with_text;
pub mod output_format;
pub mod parsing_result;
pub mod project;
pub mod release;

pub use attachment::{Attachment, AttachmentType};
pub use catalog_license::CatalogLicense;
pub use license_info::LicenseInfo;
pub use license_name_with_text::LicenseNameWithText;
pub use output_format::{OutputFormatInfo, OutputFormatVariant};
pub use parsing_result::{LicenseInfoParsingResult, LicenseInfoRequestStatus};
pub use project::{Project, User};
pub use release::Release;
