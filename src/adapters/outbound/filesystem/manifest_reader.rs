use crate::adapters::outbound::memory::InMemoryReleaseStore;
use crate::application::dto::LicenseInfoFileRequest;
use crate::license_aggregation::domain::{
    Attachment, AttachmentType, LicenseNameWithText, Project, Release, User,
};
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// User the CLI acts as when the manifest names none
pub const DEFAULT_USER_EMAIL: &str = "license-info@localhost";

/// Project manifest describing releases, attachments and the selection to render
///
/// ```toml
/// [project]
/// name = "Demo"
///
/// [[releases]]
/// id = "r1"
/// name = "libfoo"
/// version = "1.0"
///
/// [[releases.attachments]]
/// content_id = "att-1"
/// filename = "libfoo.spdx"
/// type = "COMPONENT_LICENSE_INFO_XML"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectManifest {
    project: ProjectSection,
    #[serde(default)]
    user: Option<UserSection>,
    /// Attachment content directory, relative to the manifest
    #[serde(default)]
    content_dir: Option<PathBuf>,
    #[serde(default)]
    releases: Vec<ReleaseEntry>,
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectSection {
    name: String,
    #[serde(default)]
    license_info_header: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct UserSection {
    email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReleaseEntry {
    id: String,
    name: String,
    version: String,
    #[serde(default)]
    vendor: Option<String>,
    #[serde(default)]
    readers: Vec<String>,
    #[serde(default)]
    external_ids: BTreeMap<String, String>,
    #[serde(default)]
    attachments: Vec<AttachmentEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct AttachmentEntry {
    content_id: String,
    filename: String,
    #[serde(rename = "type")]
    attachment_type: AttachmentType,
    #[serde(default = "default_selected")]
    selected: bool,
    #[serde(default)]
    excluded_licenses: Vec<LicenseNameWithText>,
}

fn default_selected() -> bool {
    true
}

impl ProjectManifest {
    /// Loads and parses a manifest file
    ///
    /// # Errors
    /// Returns an error if the file is missing, a symlink, too large or not valid TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let file_size = validate_regular_file(path, "project manifest")?;
        validate_file_size(file_size, path, MAX_FILE_SIZE)?;

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read project manifest {}", path.display()))?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::parse(&content, base_dir)
            .with_context(|| format!("Invalid project manifest {}", path.display()))
    }

    /// Parses manifest text; relative paths resolve against `base_dir`
    pub fn parse(content: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut manifest: ProjectManifest = toml::from_str(content)?;
        manifest.base_dir = base_dir.into();
        Ok(manifest)
    }

    pub fn project(&self) -> Project {
        let project = Project::new(self.project.name.clone());
        match &self.project.license_info_header {
            Some(header) => project.with_license_info_header_text(header.clone()),
            None => project,
        }
    }

    pub fn user(&self) -> User {
        let email = self
            .user
            .as_ref()
            .map(|user| user.email.as_str())
            .unwrap_or(DEFAULT_USER_EMAIL);
        User::new(email)
    }

    /// Content directory named by the manifest, resolved against its location
    pub fn content_dir(&self) -> Option<PathBuf> {
        self.content_dir.as_ref().map(|dir| self.base_dir.join(dir))
    }

    pub fn releases(&self) -> Vec<Release> {
        self.releases.iter().map(ReleaseEntry::to_release).collect()
    }

    pub fn find_release(&self, release_id: &str) -> Option<Release> {
        self.releases
            .iter()
            .find(|entry| entry.id == release_id)
            .map(ReleaseEntry::to_release)
    }

    /// Builds a release store holding every release of the manifest
    pub fn release_store(&self) -> InMemoryReleaseStore {
        self.releases
            .iter()
            .fold(InMemoryReleaseStore::new(), |store, entry| {
                store.with_restricted_release(entry.to_release(), entry.readers.iter().cloned())
            })
    }

    /// Builds the generation request for the selected attachments
    pub fn file_request(&self, generator_id: &str) -> LicenseInfoFileRequest {
        let mut request = LicenseInfoFileRequest::new(self.project(), self.user(), generator_id);
        for release in &self.releases {
            for attachment in release.attachments.iter().filter(|a| a.selected) {
                request = request.with_attachment(&release.id, &attachment.content_id);
                for license in &attachment.excluded_licenses {
                    request = request.with_excluded_license(&attachment.content_id, license.clone());
                }
            }
        }
        request
    }
}

impl ReleaseEntry {
    fn to_release(&self) -> Release {
        let mut release = Release::new(self.id.clone(), self.name.clone(), self.version.clone());
        if let Some(vendor) = &self.vendor {
            release = release.with_vendor(vendor.clone());
        }
        for (key, value) in &self.external_ids {
            release = release.with_external_id(key.clone(), value.clone());
        }
        for attachment in &self.attachments {
            release = release.with_attachment(Attachment::new(
                attachment.content_id.clone(),
                attachment.filename.clone(),
                attachment.attachment_type,
            ));
        }
        release
    }
}
