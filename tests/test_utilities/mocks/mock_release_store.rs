use license_info::prelude::*;

/// Mock ReleaseStore for testing: serves fixed releases or fails every call
pub struct MockReleaseStore {
    inner: InMemoryReleaseStore,
    pub should_fail: bool,
}

impl MockReleaseStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryReleaseStore::new(),
            should_fail: false,
        }
    }

    pub fn with_release(mut self, release: Release) -> Self {
        self.inner = self.inner.with_release(release);
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }
}

impl Default for MockReleaseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseStore for MockReleaseStore {
    fn get_release(&self, release_id: &str, user: &User) -> Result<Release> {
        if self.should_fail {
            anyhow::bail!("Mock release store failure");
        }
        self.inner.get_release(release_id, user)
    }

    fn releases_with_external_id(
        &self,
        key: &str,
        value: &str,
        user: &User,
    ) -> Result<Vec<Release>> {
        if self.should_fail {
            anyhow::bail!("Mock release store failure");
        }
        self.inner.releases_with_external_id(key, value, user)
    }
}
