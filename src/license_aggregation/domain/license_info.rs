use super::license_name_with_text::LicenseNameWithText;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// LicenseInfo value object: the license metadata extracted from one attachment
///
/// Built up with the consuming `with_*` methods during extraction; every
/// other operation returns a new value, so a `LicenseInfo` held by the cache
/// is never changed after the fact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInfo {
    license_names_with_texts: BTreeSet<LicenseNameWithText>,
    copyrights: BTreeSet<String>,
    filenames: BTreeSet<String>,
}

impl LicenseInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_license(mut self, license: LicenseNameWithText) -> Self {
        self.license_names_with_texts.insert(license);
        self
    }

    pub fn with_licenses(mut self, licenses: impl IntoIterator<Item = LicenseNameWithText>) -> Self {
        self.license_names_with_texts.extend(licenses);
        self
    }

    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyrights.insert(copyright.into());
        self
    }

    pub fn with_copyrights(mut self, copyrights: impl IntoIterator<Item = String>) -> Self {
        self.copyrights.extend(copyrights);
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filenames.insert(filename.into());
        self
    }

    pub fn license_names_with_texts(&self) -> &BTreeSet<LicenseNameWithText> {
        &self.license_names_with_texts
    }

    pub fn copyrights(&self) -> &BTreeSet<String> {
        &self.copyrights
    }

    pub fn filenames(&self) -> &BTreeSet<String> {
        &self.filenames
    }

    /// Returns a copy keeping only the licenses accepted by `keep`
    pub fn retain_licenses<F>(&self, keep: F) -> Self
    where
        F: Fn(&LicenseNameWithText) -> bool,
    {
        Self {
            license_names_with_texts: self
                .license_names_with_texts
                .iter()
                .filter(|license| keep(license))
                .cloned()
                .collect(),
            copyrights: self.copyrights.clone(),
            filenames: self.filenames.clone(),
        }
    }

    /// Union of two infos, used when one release contributes several results
    pub fn merged_with(&self, other: &LicenseInfo) -> Self {
        Self {
            license_names_with_texts: self
                .license_names_with_texts
                .union(&other.license_names_with_texts)
                .cloned()
                .collect(),
            copyrights: self.copyrights.union(&other.copyrights).cloned().collect(),
            filenames: self.filenames.union(&other.filenames).cloned().collect(),
        }
    }
}
