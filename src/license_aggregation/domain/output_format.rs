use serde::{Deserialize, Serialize};
use std::fmt;

/// Presentation variant a generator renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputFormatVariant {
    /// Compact copyright table, per-license detail table with todos, appendix
    Report,
    /// One row per release with licenses and acknowledgements, appendix
    Disclosure,
}

impl OutputFormatVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormatVariant::Report => "REPORT",
            OutputFormatVariant::Disclosure => "DISCLOSURE",
        }
    }
}

impl fmt::Display for OutputFormatVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputFormatVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "REPORT" => Ok(OutputFormatVariant::Report),
            "DISCLOSURE" => Ok(OutputFormatVariant::Disclosure),
            _ => Err(format!(
                "Invalid variant: {}. Please specify 'REPORT' or 'DISCLOSURE'",
                s
            )),
        }
    }
}

/// Descriptor of one (format, variant) combination offered by a generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFormatInfo {
    /// Registry token used to select the generator, e.g. `DocxGenerator::REPORT`
    pub generator_id: String,
    /// Output type token, doubles as file extension (`txt`, `html`, `docx`)
    pub file_extension: String,
    pub description: String,
    pub is_output_binary: bool,
    pub mime_type: String,
    pub variant: OutputFormatVariant,
}
