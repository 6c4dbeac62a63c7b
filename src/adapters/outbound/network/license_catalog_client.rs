use crate::license_aggregation::domain::CatalogLicense;
use crate::ports::outbound::LicenseCatalog;
use crate::shared::Result;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// HttpLicenseCatalog adapter fetching license todos from an HTTP endpoint
///
/// The endpoint answers `GET` with a JSON array of `{"id", "todos"}` objects.
/// Transient failures are retried a bounded number of times before the error
/// is handed back to the caller.
pub struct HttpLicenseCatalog {
    client: reqwest::blocking::Client,
    url: String,
    max_retries: u32,
}

impl HttpLicenseCatalog {
    /// Creates a catalog client with default timeout and retry settings
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_settings(url, Duration::from_secs(10), 3)
    }

    pub fn with_settings(
        url: impl Into<String>,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self> {
        let url = url.into();
        Self::validate_url(&url)?;

        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("license-info/{}", version);
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            url,
            max_retries: max_retries.max(1),
        })
    }

    fn validate_url(url: &str) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!(
                "License catalog URL must use http or https: {}\n\n💡 Hint: Use `license_catalog.file` for local catalogs",
                url
            );
        }
        Ok(())
    }

    fn fetch_with_retry(&self) -> Result<Vec<CatalogLicense>> {
        let mut attempt = 1;
        loop {
            match self.fetch() {
                Ok(licenses) => return Ok(licenses),
                Err(e) if attempt < self.max_retries => {
                    debug!(attempt, error = %e, "License catalog request failed, retrying");
                    thread::sleep(Duration::from_millis(100 * attempt as u64));
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn fetch(&self) -> Result<Vec<CatalogLicense>> {
        let response = self.client.get(&self.url).send()?;

        if !response.status().is_success() {
            anyhow::bail!("License catalog returned status code {}", response.status());
        }

        Ok(response.json::<Vec<CatalogLicense>>()?)
    }
}

impl LicenseCatalog for HttpLicenseCatalog {
    fn list_licenses(&self) -> Result<Vec<CatalogLicense>> {
        self.fetch_with_retry()
    }
}
