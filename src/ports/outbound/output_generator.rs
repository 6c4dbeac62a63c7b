use crate::application::read_models::LicenseReportReadModel;
use crate::license_aggregation::domain::OutputFormatInfo;
use crate::shared::Result;

/// Rendered document, binary or character data depending on the format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputPayload {
    Text(String),
    Binary(Vec<u8>),
}

impl OutputPayload {
    /// Encodes the payload as bytes; character data is UTF-8
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            OutputPayload::Text(text) => text.into_bytes(),
            OutputPayload::Binary(bytes) => bytes,
        }
    }
}

/// LicenseInfoFormatter port for rendering aggregated license information
///
/// One implementation per output encoding (text, XHTML, DOCX); each instance
/// is bound to one presentation variant.
pub trait LicenseInfoFormatter: Send + Sync {
    /// Describes the (format, variant) combination this instance renders
    fn format_info(&self) -> &OutputFormatInfo;

    /// Renders the read model
    ///
    /// # Errors
    /// Returns `LicenseInfoError::UnsupportedVariant` when the instance was
    /// configured with a variant its format does not offer, and
    /// `LicenseInfoError::Rendering` when the document cannot be built.
    fn format(&self, model: &LicenseReportReadModel) -> Result<OutputPayload>;
}
