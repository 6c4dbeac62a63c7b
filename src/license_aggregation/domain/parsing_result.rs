use super::license_info::LicenseInfo;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of running one parser over one attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseInfoRequestStatus {
    Success,
    NoApplicableSource,
    Failure,
}

impl fmt::Display for LicenseInfoRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicenseInfoRequestStatus::Success => write!(f, "SUCCESS"),
            LicenseInfoRequestStatus::NoApplicableSource => write!(f, "NO_APPLICABLE_SOURCE"),
            LicenseInfoRequestStatus::Failure => write!(f, "FAILURE"),
        }
    }
}

/// One parser's output for one attachment
///
/// Values of this type are shared through the result cache, so nothing here
/// mutates in place after construction: filtering and release assignment
/// return new values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInfoParsingResult {
    status: LicenseInfoRequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license_info: Option<LicenseInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

impl LicenseInfoParsingResult {
    fn with_status(status: LicenseInfoRequestStatus) -> Self {
        Self {
            status,
            message: None,
            license_info: None,
            vendor: None,
            name: None,
            version: None,
        }
    }

    pub fn success(license_info: LicenseInfo) -> Self {
        Self::with_status(LicenseInfoRequestStatus::Success).with_license_info(license_info)
    }

    pub fn no_applicable_source(message: impl Into<String>) -> Self {
        Self::with_status(LicenseInfoRequestStatus::NoApplicableSource).with_message(message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::with_status(LicenseInfoRequestStatus::Failure).with_message(message)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_license_info(mut self, license_info: LicenseInfo) -> Self {
        self.license_info = Some(license_info);
        self
    }

    /// Sets the release-identifying fields as known by the parser
    pub fn with_release_fields(
        mut self,
        vendor: Option<String>,
        name: Option<String>,
        version: Option<String>,
    ) -> Self {
        self.vendor = vendor;
        self.name = name;
        self.version = version;
        self
    }

    /// Adds a filename to the license info, creating an empty one if needed
    pub fn with_filename(mut self, filename: &str) -> Self {
        let info = self.license_info.take().unwrap_or_default();
        self.license_info = Some(info.with_filename(filename));
        self
    }

    pub fn status(&self) -> LicenseInfoRequestStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == LicenseInfoRequestStatus::Success
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn license_info(&self) -> Option<&LicenseInfo> {
        self.license_info.as_ref()
    }

    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// True when the parser set at least one of vendor, name or version
    pub fn has_release_fields(&self) -> bool {
        self.vendor.is_some() || self.name.is_some() || self.version.is_some()
    }

    /// Returns a copy whose license info is replaced by `map(license_info)`
    pub fn map_license_info<F>(&self, map: F) -> Self
    where
        F: FnOnce(&LicenseInfo) -> LicenseInfo,
    {
        Self {
            license_info: self.license_info.as_ref().map(map),
            ..self.clone()
        }
    }
}
