use serde::{Deserialize, Serialize};

/// A license as found in a scan: display name, optional SPDX id, full text and
/// optional acknowledgement.
///
/// Derived equality is structural. Exclusion matching uses [`matches`], which
/// compares name and text only, ignoring surrounding and repeated whitespace.
///
/// [`matches`]: LicenseNameWithText::matches
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(default)]
pub struct LicenseNameWithText {
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    license_name: Option<String>,
    #[serde(rename = "spdx_id", skip_serializing_if = "Option::is_none")]
    license_spdx_id: Option<String>,
    #[serde(rename = "text", skip_serializing_if = "Option::is_none")]
    license_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    acknowledgements: Option<String>,
}

impl LicenseNameWithText {
    pub fn new(license_name: Option<String>, license_text: Option<String>) -> Self {
        Self {
            license_name,
            license_text,
            ..Self::default()
        }
    }

    /// Convenience constructor for a license with both name and text set
    pub fn named(license_name: &str, license_text: &str) -> Self {
        Self::new(Some(license_name.to_string()), Some(license_text.to_string()))
    }

    pub fn with_spdx_id(mut self, spdx_id: impl Into<String>) -> Self {
        self.license_spdx_id = Some(spdx_id.into());
        self
    }

    pub fn with_acknowledgements(mut self, acknowledgements: impl Into<String>) -> Self {
        self.acknowledgements = Some(acknowledgements.into());
        self
    }

    pub fn license_name(&self) -> Option<&str> {
        self.license_name.as_deref()
    }

    pub fn license_spdx_id(&self) -> Option<&str> {
        self.license_spdx_id.as_deref()
    }

    pub fn license_text(&self) -> Option<&str> {
        self.license_text.as_deref()
    }

    pub fn acknowledgements(&self) -> Option<&str> {
        self.acknowledgements.as_deref()
    }

    /// An entry with no name, no text and no acknowledgement carries nothing worth rendering
    pub fn is_empty(&self) -> bool {
        is_blank(self.license_name.as_deref())
            && is_blank(self.license_text.as_deref())
            && is_blank(self.acknowledgements.as_deref())
    }

    /// Semantic (name, text) comparison used for exclusion matching
    pub fn matches(&self, other: &LicenseNameWithText) -> bool {
        normalize(self.license_name.as_deref()) == normalize(other.license_name.as_deref())
            && normalize(self.license_text.as_deref()) == normalize(other.license_text.as_deref())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

fn normalize(value: Option<&str>) -> String {
    value
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
