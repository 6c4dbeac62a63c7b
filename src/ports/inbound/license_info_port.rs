use crate::application::dto::{LicenseInfoFile, LicenseInfoFileRequest};
use crate::license_aggregation::domain::{
    LicenseInfoParsingResult, OutputFormatInfo, Release, User,
};
use crate::shared::Result;

/// LicenseInfoPort - Inbound port of the license information service
///
/// This port defines the interface that external adapters (CLI, API, etc.)
/// use to aggregate license information and render it.
pub trait LicenseInfoPort {
    /// Aggregates the selected attachments of all requested releases and
    /// renders them with the requested output generator
    ///
    /// # Errors
    /// Returns an error if:
    /// - The generator id is unknown or an argument is invalid
    /// - A release cannot be resolved
    /// - A parser or collaborator fails
    /// - The document cannot be rendered
    fn generate_file(&self, request: &LicenseInfoFileRequest) -> Result<LicenseInfoFile>;

    /// Lists every (format, variant) combination on offer
    fn possible_output_formats(&self) -> Vec<OutputFormatInfo>;

    /// Describes one generator
    fn output_format_info(&self, generator_id: &str) -> Result<OutputFormatInfo>;

    /// Returns the parsing results for one attachment of a release
    fn attachment_license_info(
        &self,
        release: Option<&Release>,
        attachment_content_id: &str,
        user: &User,
    ) -> Result<Vec<LicenseInfoParsingResult>>;

    /// Returns the bundled default license info header
    fn default_header_text(&self) -> &'static str;
}
