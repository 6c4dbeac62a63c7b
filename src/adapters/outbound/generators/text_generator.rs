use super::template_support::{model_context, output_format_info, render_template};
use crate::application::read_models::LicenseReportReadModel;
use crate::license_aggregation::domain::{OutputFormatInfo, OutputFormatVariant};
use crate::ports::outbound::{LicenseInfoFormatter, OutputPayload};
use crate::shared::Result;

const TEMPLATE_NAME: &str = "textLicenseInfoFile.txt";
const TEMPLATE: &str = include_str!("templates/textLicenseInfoFile.txt");

/// TextGenerator renders license information as plain UTF-8 text.
///
/// Supports both variants.
pub struct TextGenerator {
    info: OutputFormatInfo,
}

impl TextGenerator {
    pub const NAME: &'static str = "TextGenerator";
    pub const DISCLOSURE: &'static str = "TextGenerator::DISCLOSURE";
    pub const REPORT: &'static str = "TextGenerator::REPORT";

    pub fn new(variant: OutputFormatVariant) -> Self {
        Self {
            info: output_format_info(
                Self::NAME,
                "txt",
                "License information as TEXT",
                false,
                "text/plain",
                variant,
            ),
        }
    }
}

impl LicenseInfoFormatter for TextGenerator {
    fn format_info(&self) -> &OutputFormatInfo {
        &self.info
    }

    fn format(&self, model: &LicenseReportReadModel) -> Result<OutputPayload> {
        let context = model_context(&self.info, model)?;
        let text = render_template(&self.info.generator_id, TEMPLATE_NAME, TEMPLATE, &context)?;
        Ok(OutputPayload::Text(text))
    }
}
