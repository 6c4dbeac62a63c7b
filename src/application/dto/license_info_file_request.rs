use crate::license_aggregation::domain::{LicenseNameWithText, Project, User};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Selected attachment content ids per release id
pub type ReleaseAttachmentSelection = BTreeMap<String, BTreeSet<String>>;

/// Licenses to leave out, per attachment content id
pub type ExcludedLicenses = HashMap<String, Vec<LicenseNameWithText>>;

/// LicenseInfoFileRequest - Request DTO for generating a license information file
#[derive(Debug, Clone)]
pub struct LicenseInfoFileRequest {
    pub project: Project,
    pub user: User,
    /// Registry token of the output generator, e.g. `TextGenerator::DISCLOSURE`
    pub generator_id: String,
    pub release_ids_to_attachment_ids: ReleaseAttachmentSelection,
    pub excluded_licenses_per_attachment: ExcludedLicenses,
}

impl LicenseInfoFileRequest {
    pub fn new(project: Project, user: User, generator_id: impl Into<String>) -> Self {
        Self {
            project,
            user,
            generator_id: generator_id.into(),
            release_ids_to_attachment_ids: BTreeMap::new(),
            excluded_licenses_per_attachment: HashMap::new(),
        }
    }

    /// Selects an attachment of a release for the generated file
    pub fn with_attachment(mut self, release_id: &str, attachment_content_id: &str) -> Self {
        self.release_ids_to_attachment_ids
            .entry(release_id.to_string())
            .or_default()
            .insert(attachment_content_id.to_string());
        self
    }

    /// Excludes a license from one attachment's results
    pub fn with_excluded_license(
        mut self,
        attachment_content_id: &str,
        license: LicenseNameWithText,
    ) -> Self {
        self.excluded_licenses_per_attachment
            .entry(attachment_content_id.to_string())
            .or_default()
            .push(license);
        self
    }
}
