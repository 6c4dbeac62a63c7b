use crate::application::dto::ExcludedLicenses;
use crate::application::use_cases::ParserSelector;
use crate::license_aggregation::domain::{LicenseInfoParsingResult, Release, User};
use crate::license_aggregation::services::{LicenseFilter, ReleaseAssignment};
use crate::ports::outbound::{ParsingResultCache, SharedParsingResults};
use crate::shared::{LicenseInfoError, Result};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

pub const NO_RELEASE_MESSAGE: &str = "No release given";
pub const NO_APPLICABLE_PARSER_MESSAGE: &str =
    "No applicable parser has been found for the attachment";

/// AggregateLicenseInfoUseCase - Collects parsing results for selected attachments
///
/// Results of one attachment are computed once and kept in the parsing result
/// cache. Cached results are shared and never edited; exclusion filtering
/// builds new results for each request.
pub struct AggregateLicenseInfoUseCase {
    selector: ParserSelector,
    cache: Arc<dyn ParsingResultCache>,
}

impl AggregateLicenseInfoUseCase {
    pub fn new(selector: ParserSelector, cache: Arc<dyn ParsingResultCache>) -> Self {
        Self { selector, cache }
    }

    /// Returns the parsing results of one attachment of a release
    ///
    /// # Errors
    /// Returns an error if:
    /// - The attachment does not belong to the release
    /// - A parser fails to decide applicability or to extract
    pub fn attachment_license_info(
        &self,
        release: Option<&Release>,
        attachment_content_id: &str,
        user: &User,
    ) -> Result<SharedParsingResults> {
        let Some(release) = release else {
            return Ok(Arc::new(vec![LicenseInfoParsingResult::no_applicable_source(
                NO_RELEASE_MESSAGE,
            )]));
        };

        if let Some(cached) = self.cache.get(attachment_content_id) {
            debug!(attachment = attachment_content_id, "Parsing result cache hit");
            return Ok(cached);
        }
        debug!(attachment = attachment_content_id, "Parsing result cache miss");

        let attachment = release.find_attachment(attachment_content_id).ok_or_else(|| {
            LicenseInfoError::AttachmentNotInRelease {
                release_id: release.id().to_string(),
                attachment_content_id: attachment_content_id.to_string(),
            }
        })?;

        let parsers = self.selector.select_applicable(attachment, user, release)?;
        if parsers.is_empty() {
            warn!(
                attachment = attachment_content_id,
                filename = attachment.filename(),
                release = release.id(),
                "No applicable parser has been found for the attachment"
            );
            let result = LicenseInfoParsingResult::no_applicable_source(NO_APPLICABLE_PARSER_MESSAGE)
                .with_filename(attachment.filename());
            return Ok(Arc::new(ReleaseAssignment::assign(vec![result], release)));
        }

        let results: Vec<_> = ParserSelector::extract(&parsers, attachment, user, release)?
            .iter()
            .map(LicenseFilter::without_empty_licenses)
            .collect();
        let results = Arc::new(ReleaseAssignment::assign(results, release));

        self.cache.put(attachment_content_id, Arc::clone(&results));
        Ok(results)
    }

    /// Aggregates the selected attachments of all given releases
    ///
    /// Blank attachment ids are skipped. The licenses configured for an
    /// attachment in `excluded_licenses` are removed from its results.
    pub fn all_release_license_infos(
        &self,
        selection: &[(Release, BTreeSet<String>)],
        user: &User,
        excluded_licenses: &ExcludedLicenses,
    ) -> Result<Vec<LicenseInfoParsingResult>> {
        let mut aggregated = Vec::new();
        for (release, attachment_content_ids) in selection {
            for attachment_content_id in attachment_content_ids {
                if attachment_content_id.trim().is_empty() {
                    continue;
                }

                let results =
                    self.attachment_license_info(Some(release), attachment_content_id, user)?;
                let exclusions = excluded_licenses
                    .get(attachment_content_id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                aggregated.extend(
                    results
                        .iter()
                        .map(|result| LicenseFilter::exclude(result, exclusions)),
                );
            }
        }
        Ok(aggregated)
    }
}
