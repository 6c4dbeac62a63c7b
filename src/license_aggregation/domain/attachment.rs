use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared kind of an uploaded attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttachmentType {
    Source,
    Binary,
    Document,
    ClearingReport,
    ComponentLicenseInfoXml,
    ComponentLicenseInfoCombined,
    ScanResultReport,
    ScanResultReportXml,
    Other,
}

impl AttachmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentType::Source => "SOURCE",
            AttachmentType::Binary => "BINARY",
            AttachmentType::Document => "DOCUMENT",
            AttachmentType::ClearingReport => "CLEARING_REPORT",
            AttachmentType::ComponentLicenseInfoXml => "COMPONENT_LICENSE_INFO_XML",
            AttachmentType::ComponentLicenseInfoCombined => "COMPONENT_LICENSE_INFO_COMBINED",
            AttachmentType::ScanResultReport => "SCAN_RESULT_REPORT",
            AttachmentType::ScanResultReportXml => "SCAN_RESULT_REPORT_XML",
            AttachmentType::Other => "OTHER",
        }
    }
}

impl fmt::Display for AttachmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded scan artifact owned by a release. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attachment {
    content_id: String,
    filename: String,
    attachment_type: AttachmentType,
}

impl Attachment {
    pub fn new(
        content_id: impl Into<String>,
        filename: impl Into<String>,
        attachment_type: AttachmentType,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            filename: filename.into(),
            attachment_type,
        }
    }

    /// Stable identifier of the attachment's content in the blob store
    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn attachment_type(&self) -> AttachmentType {
        self.attachment_type
    }

    /// Case-insensitive suffix check on the filename
    pub fn has_extension(&self, extension: &str) -> bool {
        self.filename
            .to_lowercase()
            .ends_with(&extension.to_lowercase())
    }
}
