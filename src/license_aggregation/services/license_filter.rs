use crate::license_aggregation::domain::{LicenseInfoParsingResult, LicenseNameWithText};

/// LicenseFilter - Removes licenses from parsing results
///
/// Both operations are pure: the input results may be shared with the
/// result cache, so a new result is built instead of editing the input.
pub struct LicenseFilter;

impl LicenseFilter {
    /// Removes every license semantically equal (by name and text) to one of
    /// `licenses_to_exclude`. All other fields pass through unchanged.
    pub fn exclude(
        result: &LicenseInfoParsingResult,
        licenses_to_exclude: &[LicenseNameWithText],
    ) -> LicenseInfoParsingResult {
        if licenses_to_exclude.is_empty() {
            return result.clone();
        }

        result.map_license_info(|info| {
            info.retain_licenses(|license| {
                !licenses_to_exclude
                    .iter()
                    .any(|excluded| license.matches(excluded))
            })
        })
    }

    /// Drops license entries without name, text and acknowledgement
    pub fn without_empty_licenses(result: &LicenseInfoParsingResult) -> LicenseInfoParsingResult {
        result.map_license_info(|info| info.retain_licenses(|license| !license.is_empty()))
    }
}
