use super::attachment::Attachment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A versioned software component instance, read-only to this crate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    id: String,
    name: String,
    version: String,
    vendor: Option<String>,
    attachments: Vec<Attachment>,
    external_ids: BTreeMap<String, String>,
}

impl Release {
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            vendor: None,
            attachments: Vec::new(),
            external_ids: BTreeMap::new(),
        }
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn with_external_id(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.external_ids.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Vendor short name
    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn external_id(&self, key: &str) -> Option<&str> {
        self.external_ids.get(key).map(String::as_str)
    }

    /// Looks up one of this release's attachments by content id
    pub fn find_attachment(&self, content_id: &str) -> Option<&Attachment> {
        self.attachments
            .iter()
            .find(|attachment| attachment.content_id() == content_id)
    }
}
