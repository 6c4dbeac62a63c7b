/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod license_info_file;
mod license_info_file_request;

pub use license_info_file::LicenseInfoFile;
pub use license_info_file_request::{
    ExcludedLicenses, LicenseInfoFileRequest, ReleaseAttachmentSelection,
};
