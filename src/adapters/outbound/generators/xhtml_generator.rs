use super::template_support::{model_context, output_format_info, render_template};
use crate::application::read_models::LicenseReportReadModel;
use crate::license_aggregation::domain::{OutputFormatInfo, OutputFormatVariant};
use crate::ports::outbound::{LicenseInfoFormatter, OutputPayload};
use crate::shared::{LicenseInfoError, Result};

const TEMPLATE_NAME: &str = "xhtmlLicenseInfoFile.html";
const TEMPLATE: &str = include_str!("templates/xhtmlLicenseInfoFile.html");

/// Escapes the header and turns its line breaks into `<br />`
fn header_to_html(header_text: &str) -> String {
    tera::escape_html(header_text).replace('\n', "<br />")
}

/// XhtmlGenerator renders the DISCLOSURE variant as an XHTML page.
pub struct XhtmlGenerator {
    info: OutputFormatInfo,
}

impl XhtmlGenerator {
    pub const NAME: &'static str = "XhtmlGenerator";
    pub const DISCLOSURE: &'static str = "XhtmlGenerator::DISCLOSURE";

    pub fn new(variant: OutputFormatVariant) -> Self {
        Self {
            info: output_format_info(
                Self::NAME,
                "html",
                "License information as XHTML",
                false,
                "application/xhtml+xml",
                variant,
            ),
        }
    }
}

impl LicenseInfoFormatter for XhtmlGenerator {
    fn format_info(&self) -> &OutputFormatInfo {
        &self.info
    }

    fn format(&self, model: &LicenseReportReadModel) -> Result<OutputPayload> {
        if self.info.variant != OutputFormatVariant::Disclosure {
            return Err(LicenseInfoError::UnsupportedVariant {
                generator_id: Self::NAME.to_string(),
                variant: self.info.variant.to_string(),
            }
            .into());
        }

        let mut context = model_context(&self.info, model)?;
        context.insert("header_html", &header_to_html(&model.header_text));
        let html = render_template(&self.info.generator_id, TEMPLATE_NAME, TEMPLATE, &context)?;
        Ok(OutputPayload::Text(html))
    }
}
