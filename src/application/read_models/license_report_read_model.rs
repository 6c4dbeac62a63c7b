//! License report read model
//!
//! A rendering-oriented view of the aggregated parsing results. Every output
//! generator renders from this model, so grouping, ordering, todo lookup and
//! appendix de-duplication happen once, here.

use crate::license_aggregation::domain::OutputFormatVariant;
use serde::Serialize;

/// Main read model handed to the output generators
#[derive(Debug, Clone, Serialize)]
pub struct LicenseReportReadModel {
    pub project_name: String,
    pub header_text: String,
    pub variant: OutputFormatVariant,
    /// REPORT: one row per release with its copyright statements
    pub releases: Vec<ReleaseCopyrightView>,
    /// REPORT: one row per (release, license) pair
    pub license_details: Vec<ReleaseLicenseView>,
    /// DISCLOSURE: one row per release, plus one error row per failed result
    pub disclosure_rows: Vec<DisclosureRowView>,
    /// Appendix: one entry per distinct license name, sorted by name
    pub license_texts: Vec<LicenseTextView>,
}

/// Release with its copyright statements
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseCopyrightView {
    pub name: String,
    pub version: String,
    pub copyrights: Vec<String>,
}

/// One license of one release, with remediation todos
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseLicenseView {
    pub release_name: String,
    pub release_version: String,
    /// Only the first row of each release carries the release identifier
    pub first_of_release: bool,
    pub license_name: String,
    pub todos: Vec<String>,
    pub acknowledgements: Vec<String>,
}

/// Row of the disclosure table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisclosureRowView {
    pub name: String,
    pub version: String,
    pub licenses: Vec<LicenseReferenceView>,
    pub acknowledgements: Vec<String>,
    pub copyrights: Vec<String>,
    /// Set for results that were not parsed successfully
    pub error: Option<DisclosureErrorView>,
}

/// License name pointing at its appendix entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseReferenceView {
    pub name: String,
    pub anchor: Option<String>,
}

/// Failure details rendered in place of a release's license data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisclosureErrorView {
    pub status: String,
    pub message: String,
    pub filename: String,
}

/// Appendix entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseTextView {
    pub anchor: String,
    pub name: String,
    pub text: String,
}
