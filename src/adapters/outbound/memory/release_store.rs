use crate::license_aggregation::domain::{Release, User};
use crate::ports::outbound::ReleaseStore;
use crate::shared::{LicenseInfoError, Result};
use std::collections::{BTreeSet, HashMap};

struct StoredRelease {
    release: Release,
    /// Empty means every user may read the release
    readers: BTreeSet<String>,
}

/// InMemoryReleaseStore adapter holding releases loaded up front
///
/// Read access is checked per release against an optional reader list.
#[derive(Default)]
pub struct InMemoryReleaseStore {
    releases: HashMap<String, StoredRelease>,
}

impl InMemoryReleaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a release readable by everyone
    pub fn with_release(self, release: Release) -> Self {
        self.with_restricted_release(release, std::iter::empty::<String>())
    }

    /// Adds a release readable only by the listed user emails
    pub fn with_restricted_release<I, S>(mut self, release: Release, readers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let readers = readers.into_iter().map(Into::into).collect();
        self.releases
            .insert(release.id().to_string(), StoredRelease { release, readers });
        self
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    fn is_readable_by(stored: &StoredRelease, user: &User) -> bool {
        stored.readers.is_empty() || stored.readers.contains(user.email())
    }
}

impl ReleaseStore for InMemoryReleaseStore {
    fn get_release(&self, release_id: &str, user: &User) -> Result<Release> {
        let stored = self
            .releases
            .get(release_id)
            .ok_or_else(|| LicenseInfoError::not_found("Release", release_id))?;

        if !Self::is_readable_by(stored, user) {
            return Err(LicenseInfoError::PermissionDenied {
                release_id: release_id.to_string(),
                user: user.email().to_string(),
            }
            .into());
        }

        Ok(stored.release.clone())
    }

    fn releases_with_external_id(
        &self,
        key: &str,
        value: &str,
        user: &User,
    ) -> Result<Vec<Release>> {
        let mut matches: Vec<Release> = self
            .releases
            .values()
            .filter(|stored| Self::is_readable_by(stored, user))
            .filter(|stored| stored.release.external_id(key) == Some(value))
            .map(|stored| stored.release.clone())
            .collect();
        matches.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(matches)
    }
}
