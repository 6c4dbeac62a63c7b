use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum attachment / manifest size (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Maximum length of an attachment content id used as a file name
const MAX_IDENTIFIER_LENGTH: usize = 255;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Returns
/// The file size in bytes
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<u64> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(metadata.len())
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Validates an identifier that is joined onto a directory to form a path
///
/// Content ids come from manifests and requests; they must stay inside the
/// store root.
pub fn validate_path_segment(identifier: &str, identifier_type: &str) -> Result<()> {
    if identifier.trim().is_empty() {
        anyhow::bail!("{} must not be empty", identifier_type);
    }

    if identifier.len() > MAX_IDENTIFIER_LENGTH {
        anyhow::bail!(
            "{} is too long ({} bytes). Maximum allowed: {} bytes",
            identifier_type,
            identifier.len(),
            MAX_IDENTIFIER_LENGTH
        );
    }

    if identifier.contains('/') || identifier.contains('\\') {
        anyhow::bail!(
            "Security: {} contains path separators which are not allowed",
            identifier_type
        );
    }

    if identifier.contains("..") {
        anyhow::bail!(
            "Security: {} contains '..' which is not allowed",
            identifier_type
        );
    }

    Ok(())
}
