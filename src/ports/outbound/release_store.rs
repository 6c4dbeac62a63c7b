use crate::license_aggregation::domain::{Release, User};
use crate::shared::Result;

/// ReleaseStore port for resolving releases
///
/// This port abstracts the persistence of releases and their attachments.
/// The pipeline only ever reads from it.
pub trait ReleaseStore: Send + Sync {
    /// Fetches a release by id on behalf of `user`
    ///
    /// # Errors
    /// Returns `LicenseInfoError::NotFound` for unknown ids and
    /// `LicenseInfoError::PermissionDenied` when the user may not read the release.
    fn get_release(&self, release_id: &str, user: &User) -> Result<Release>;

    /// Lists releases carrying the external id `key = value`
    ///
    /// Used by the combined CLI parser to map component ids to releases.
    fn releases_with_external_id(&self, key: &str, value: &str, user: &User)
        -> Result<Vec<Release>>;
}
