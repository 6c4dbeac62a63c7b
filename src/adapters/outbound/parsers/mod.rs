/// Attachment parsers extracting license information from scan reports
mod cli_parser;
mod combined_cli_parser;
mod license_expression;
mod spdx_parser;
mod xml_document;

pub use cli_parser::CliParser;
pub use combined_cli_parser::{CombinedCliParser, DEFAULT_EXTERNAL_ID_KEY};
pub use spdx_parser::SpdxParser;

use crate::license_aggregation::domain::Attachment;
use crate::ports::outbound::AttachmentContentStore;
use crate::shared::{LicenseInfoError, Result};

/// Reads attachment content, reporting store failures as upstream errors
fn read_content(
    content_store: &dyn AttachmentContentStore,
    attachment: &Attachment,
) -> Result<Vec<u8>> {
    content_store
        .get_content(attachment.content_id())
        .map_err(|e| {
            LicenseInfoError::upstream(
                "content store",
                format!("attachment {}", attachment.content_id()),
                e,
            )
            .into()
        })
}
