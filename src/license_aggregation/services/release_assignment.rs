use crate::license_aggregation::domain::{LicenseInfoParsingResult, Release};

/// ReleaseAssignment - Back-fills release-identifying fields onto parsing results
pub struct ReleaseAssignment;

impl ReleaseAssignment {
    /// Copies vendor, name and version from `release` onto every result for
    /// which the parser set none of the three. A parser that set any of them
    /// knows better than the owning release, so those results are kept as-is.
    pub fn assign(
        results: Vec<LicenseInfoParsingResult>,
        release: &Release,
    ) -> Vec<LicenseInfoParsingResult> {
        results
            .into_iter()
            .map(|result| {
                if result.has_release_fields() {
                    result
                } else {
                    result.with_release_fields(
                        Some(release.vendor().unwrap_or_default().to_string()),
                        Some(release.name().to_string()),
                        Some(release.version().to_string()),
                    )
                }
            })
            .collect()
    }
}
