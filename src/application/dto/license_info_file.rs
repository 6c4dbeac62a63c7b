use crate::license_aggregation::domain::OutputFormatInfo;

/// LicenseInfoFile - Response DTO carrying the rendered document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseInfoFile {
    pub output_format_info: OutputFormatInfo,
    /// Encoded document; UTF-8 for character formats
    pub generated_output: Vec<u8>,
}

impl LicenseInfoFile {
    pub fn new(output_format_info: OutputFormatInfo, generated_output: Vec<u8>) -> Self {
        Self {
            output_format_info,
            generated_output,
        }
    }
}
