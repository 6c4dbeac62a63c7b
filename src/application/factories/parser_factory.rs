use crate::adapters::outbound::parsers::{CliParser, CombinedCliParser, SpdxParser};
use crate::ports::outbound::{AttachmentContentStore, AttachmentParser, ReleaseStore};
use std::sync::Arc;

/// Factory for the attachment parser set
///
/// Parsers are registered in a fixed order (SPDX, CLI, combined CLI); the
/// order only affects the order of results when several parsers apply.
pub struct ParserFactory;

impl ParserFactory {
    /// Creates every known parser, wired to the given stores
    ///
    /// # Arguments
    /// * `content_store` - Source of attachment bytes
    /// * `release_store` - Used by the combined CLI parser to resolve component ids
    /// * `external_id_key` - External id key linking combined CLI components to releases
    pub fn create_all(
        content_store: Arc<dyn AttachmentContentStore>,
        release_store: Arc<dyn ReleaseStore>,
        external_id_key: &str,
    ) -> Vec<Arc<dyn AttachmentParser>> {
        vec![
            Arc::new(SpdxParser::new(Arc::clone(&content_store))),
            Arc::new(CliParser::new(Arc::clone(&content_store))),
            Arc::new(CombinedCliParser::new(
                content_store,
                release_store,
                external_id_key,
            )),
        ]
    }
}
