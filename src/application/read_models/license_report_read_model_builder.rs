//! Builder for constructing LicenseReportReadModel from parsing results

use super::license_report_read_model::{
    DisclosureErrorView, DisclosureRowView, LicenseReferenceView, LicenseReportReadModel,
    LicenseTextView, ReleaseCopyrightView, ReleaseLicenseView,
};
use crate::license_aggregation::domain::{
    CatalogLicense, LicenseInfo, LicenseInfoParsingResult, LicenseNameWithText,
    OutputFormatVariant,
};
use crate::license_aggregation::policies::RemediationTodos;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Display name for licenses the scan did not name
pub const UNKNOWN_LICENSE_NAME: &str = "Unknown license name";

/// Copy of `text` that XML 1.0 documents accept: form feeds and vertical
/// tabs become line breaks, other control characters are dropped
fn xml_safe_text(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\t' | '\n' | '\r' => Some(c),
            '\u{0b}' | '\u{0c}' => Some('\n'),
            '\u{00}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => None,
            _ => Some(c),
        })
        .collect()
}

/// All results belonging to one release (same name and version)
struct ReleaseGroup<'a> {
    name: String,
    version: String,
    results: Vec<&'a LicenseInfoParsingResult>,
}

/// Builder for constructing LicenseReportReadModel
///
/// The aggregator gives no ordering guarantee across releases, so the
/// builder imposes one: results are grouped by release and the groups are
/// sorted by name, then version, ignoring case. Every text taken from the
/// results is stripped of characters XML documents cannot carry.
pub struct LicenseReportReadModelBuilder;

impl LicenseReportReadModelBuilder {
    /// Builds the read model
    ///
    /// # Arguments
    /// * `results` - Aggregated (already exclusion-filtered) parsing results
    /// * `project_name` - Name of the project the document is for
    /// * `header_text` - License info header placed at the top of the document
    /// * `variant` - Presentation variant requested by the caller
    /// * `catalog` - Catalog licenses for todo lookup; empty when unavailable
    pub fn build(
        results: &[LicenseInfoParsingResult],
        project_name: &str,
        header_text: &str,
        variant: OutputFormatVariant,
        catalog: &[CatalogLicense],
    ) -> LicenseReportReadModel {
        let groups = Self::group_by_release(results);
        let license_texts = Self::build_license_texts(&groups);

        let disclosure_rows = {
            let anchors: HashMap<&str, &str> = license_texts
                .iter()
                .map(|entry| (entry.name.as_str(), entry.anchor.as_str()))
                .collect();
            Self::build_disclosure_rows(&groups, &anchors)
        };

        LicenseReportReadModel {
            project_name: xml_safe_text(project_name),
            header_text: xml_safe_text(header_text),
            variant,
            releases: Self::build_release_copyrights(&groups),
            license_details: Self::build_license_details(&groups, catalog),
            disclosure_rows,
            license_texts,
        }
    }

    fn group_by_release(results: &[LicenseInfoParsingResult]) -> Vec<ReleaseGroup<'_>> {
        let mut groups: BTreeMap<(String, String, String, String), Vec<&LicenseInfoParsingResult>> =
            BTreeMap::new();

        for result in results {
            let name = xml_safe_text(result.name().unwrap_or_default());
            let version = xml_safe_text(result.version().unwrap_or_default());
            groups
                .entry((name.to_lowercase(), version.to_lowercase(), name, version))
                .or_default()
                .push(result);
        }

        groups
            .into_iter()
            .map(|((_, _, name, version), results)| ReleaseGroup {
                name,
                version,
                results,
            })
            .collect()
    }

    fn merged_license_info<'a>(
        results: impl IntoIterator<Item = &'a LicenseInfoParsingResult>,
    ) -> LicenseInfo {
        results
            .into_iter()
            .filter_map(LicenseInfoParsingResult::license_info)
            .fold(LicenseInfo::new(), |merged, info| merged.merged_with(info))
    }

    fn display_name(license: &LicenseNameWithText) -> String {
        xml_safe_text(
            license
                .license_name()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(UNKNOWN_LICENSE_NAME),
        )
    }

    fn copyrights(info: &LicenseInfo) -> Vec<String> {
        info.copyrights()
            .iter()
            .map(|copyright| xml_safe_text(copyright))
            .collect()
    }

    fn build_release_copyrights(groups: &[ReleaseGroup<'_>]) -> Vec<ReleaseCopyrightView> {
        groups
            .iter()
            .map(|group| {
                let merged = Self::merged_license_info(group.results.iter().copied());
                ReleaseCopyrightView {
                    name: group.name.clone(),
                    version: group.version.clone(),
                    copyrights: Self::copyrights(&merged),
                }
            })
            .collect()
    }

    fn build_license_details(
        groups: &[ReleaseGroup<'_>],
        catalog: &[CatalogLicense],
    ) -> Vec<ReleaseLicenseView> {
        let mut rows = Vec::new();

        for group in groups {
            let merged = Self::merged_license_info(group.results.iter().copied());
            for (index, license) in merged.license_names_with_texts().iter().enumerate() {
                rows.push(ReleaseLicenseView {
                    release_name: group.name.clone(),
                    release_version: group.version.clone(),
                    first_of_release: index == 0,
                    license_name: Self::display_name(license),
                    todos: RemediationTodos::for_license(license, catalog)
                        .iter()
                        .map(|todo| xml_safe_text(todo))
                        .collect(),
                    acknowledgements: license
                        .acknowledgements()
                        .map(|ack| vec![xml_safe_text(ack)])
                        .unwrap_or_default(),
                });
            }
        }

        rows
    }

    fn build_disclosure_rows(
        groups: &[ReleaseGroup<'_>],
        anchors: &HashMap<&str, &str>,
    ) -> Vec<DisclosureRowView> {
        let mut rows = Vec::new();

        for group in groups {
            let successful: Vec<&LicenseInfoParsingResult> = group
                .results
                .iter()
                .copied()
                .filter(|result| result.is_success())
                .collect();

            if !successful.is_empty() {
                let merged = Self::merged_license_info(successful);
                let licenses = merged
                    .license_names_with_texts()
                    .iter()
                    .map(Self::display_name)
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .map(|name| LicenseReferenceView {
                        anchor: anchors.get(name.as_str()).map(|anchor| anchor.to_string()),
                        name,
                    })
                    .collect();
                let acknowledgements = merged
                    .license_names_with_texts()
                    .iter()
                    .filter_map(LicenseNameWithText::acknowledgements)
                    .map(xml_safe_text)
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();

                rows.push(DisclosureRowView {
                    name: group.name.clone(),
                    version: group.version.clone(),
                    licenses,
                    acknowledgements,
                    copyrights: Self::copyrights(&merged),
                    error: None,
                });
            }

            for failed in group.results.iter().filter(|result| !result.is_success()) {
                let filename = failed
                    .license_info()
                    .and_then(|info| info.filenames().iter().next())
                    .map(|filename| xml_safe_text(filename))
                    .unwrap_or_default();
                rows.push(DisclosureRowView {
                    name: group.name.clone(),
                    version: group.version.clone(),
                    licenses: Vec::new(),
                    acknowledgements: Vec::new(),
                    copyrights: Vec::new(),
                    error: Some(DisclosureErrorView {
                        status: failed.status().to_string(),
                        message: xml_safe_text(failed.message().unwrap_or_default()),
                        filename,
                    }),
                });
            }
        }

        rows
    }

    /// One entry per distinct license name across the whole collection
    fn build_license_texts(groups: &[ReleaseGroup<'_>]) -> Vec<LicenseTextView> {
        let mut texts_by_name: BTreeMap<String, String> = BTreeMap::new();

        let licenses = groups
            .iter()
            .flat_map(|group| group.results.iter())
            .filter_map(|result| result.license_info())
            .flat_map(|info| info.license_names_with_texts().iter());

        for license in licenses {
            let text = license.license_text().unwrap_or_default();
            if license.license_name().is_none() && text.trim().is_empty() {
                continue;
            }
            let entry = texts_by_name.entry(Self::display_name(license)).or_default();
            if entry.trim().is_empty() {
                *entry = xml_safe_text(text);
            }
        }

        let mut entries: Vec<(String, String)> = texts_by_name.into_iter().collect();
        entries.sort_by_key(|(name, _)| name.to_lowercase());

        entries
            .into_iter()
            .enumerate()
            .map(|(index, (name, text))| LicenseTextView {
                anchor: format!("licenseTextItem{}", index + 1),
                name,
                text,
            })
            .collect()
    }
}
