use crate::license_aggregation::domain::{Attachment, LicenseInfoParsingResult, Release, User};
use crate::shared::Result;

/// AttachmentParser port: the capability every license info extractor offers
pub trait AttachmentParser: Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &'static str;

    /// Decides whether this parser understands the attachment
    ///
    /// May read the attachment content (e.g. to sniff the XML root element).
    ///
    /// # Errors
    /// Returns an error when the decision itself cannot be made, e.g. the
    /// content store is unreachable.
    fn is_applicable_to(&self, attachment: &Attachment, user: &User, release: &Release)
        -> Result<bool>;

    /// Extracts license information from the attachment
    ///
    /// Unreadable content (broken XML/JSON) is reported as a `FAILURE`
    /// result, not an error. Errors are reserved for collaborator failures.
    fn license_infos(
        &self,
        attachment: &Attachment,
        user: &User,
        release: &Release,
    ) -> Result<Vec<LicenseInfoParsingResult>>;
}
