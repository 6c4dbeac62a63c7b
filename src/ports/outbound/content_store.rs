use crate::shared::Result;

/// AttachmentContentStore port for reading raw attachment bytes
///
/// This port abstracts the content-addressed blob store that holds the
/// uploaded scan files. Every parser reads attachments through it.
pub trait AttachmentContentStore: Send + Sync {
    /// Returns the raw content of an attachment
    ///
    /// # Errors
    /// Returns `LicenseInfoError::NotFound` if no content exists for the id,
    /// or an error describing why the store could not be read.
    fn get_content(&self, attachment_content_id: &str) -> Result<Vec<u8>>;
}
