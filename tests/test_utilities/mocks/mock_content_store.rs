use license_info::prelude::*;
use license_info::shared::LicenseInfoError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock AttachmentContentStore for testing
pub struct MockContentStore {
    pub contents: HashMap<String, Vec<u8>>,
    pub should_fail: bool,
    reads: AtomicUsize,
}

impl MockContentStore {
    pub fn new() -> Self {
        Self {
            contents: HashMap::new(),
            should_fail: false,
            reads: AtomicUsize::new(0),
        }
    }

    pub fn with_content(mut self, attachment_content_id: &str, content: &str) -> Self {
        self.contents
            .insert(attachment_content_id.to_string(), content.as_bytes().to_vec());
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    /// Number of `get_content` calls so far
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Default for MockContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AttachmentContentStore for MockContentStore {
    fn get_content(&self, attachment_content_id: &str) -> Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            anyhow::bail!("Mock content store failure");
        }

        self.contents
            .get(attachment_content_id)
            .cloned()
            .ok_or_else(|| LicenseInfoError::not_found("Attachment content", attachment_content_id).into())
    }
}
