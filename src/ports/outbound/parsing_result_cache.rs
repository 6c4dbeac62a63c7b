use crate::license_aggregation::domain::LicenseInfoParsingResult;
use std::sync::Arc;

/// Parsing results of one attachment as stored in the cache
///
/// Shared read-only; consumers that need a different view build new values.
pub type SharedParsingResults = Arc<Vec<LicenseInfoParsingResult>>;

/// ParsingResultCache port, keyed by attachment content id
pub trait ParsingResultCache: Send + Sync {
    /// Returns the cached results unless absent or expired
    fn get(&self, attachment_content_id: &str) -> Option<SharedParsingResults>;

    /// Stores results for an attachment, replacing any previous entry
    fn put(&self, attachment_content_id: &str, results: SharedParsingResults);
}
