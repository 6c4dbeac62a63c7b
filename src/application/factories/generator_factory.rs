use crate::adapters::outbound::generators::{DocxGenerator, TextGenerator, XhtmlGenerator};
use crate::license_aggregation::domain::{OutputFormatInfo, OutputFormatVariant};
use crate::ports::outbound::LicenseInfoFormatter;
use crate::shared::{LicenseInfoError, Result};
use std::sync::Arc;

/// Registry of output generators, keyed by generator id
///
/// Built once at startup; every entry is one (format, variant) combination.
pub struct GeneratorRegistry {
    generators: Vec<Arc<dyn LicenseInfoFormatter>>,
}

impl GeneratorRegistry {
    /// Registry with every built-in generator
    pub fn with_defaults() -> Self {
        Self::new(vec![
            Arc::new(TextGenerator::new(OutputFormatVariant::Disclosure)),
            Arc::new(TextGenerator::new(OutputFormatVariant::Report)),
            Arc::new(XhtmlGenerator::new(OutputFormatVariant::Disclosure)),
            Arc::new(DocxGenerator::new(OutputFormatVariant::Disclosure)),
            Arc::new(DocxGenerator::new(OutputFormatVariant::Report)),
        ])
    }

    pub fn new(generators: Vec<Arc<dyn LicenseInfoFormatter>>) -> Self {
        Self { generators }
    }

    /// Looks up a generator by its id, e.g. `DocxGenerator::REPORT`
    ///
    /// # Errors
    /// Returns `LicenseInfoError::UnknownOutputGenerator` for unregistered ids.
    pub fn find(&self, generator_id: &str) -> Result<Arc<dyn LicenseInfoFormatter>> {
        self.generators
            .iter()
            .find(|generator| generator.format_info().generator_id == generator_id)
            .cloned()
            .ok_or_else(|| {
                LicenseInfoError::UnknownOutputGenerator {
                    generator_id: generator_id.to_string(),
                }
                .into()
            })
    }

    /// Format descriptors in registration order
    pub fn output_formats(&self) -> Vec<OutputFormatInfo> {
        self.generators
            .iter()
            .map(|generator| generator.format_info().clone())
            .collect()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
