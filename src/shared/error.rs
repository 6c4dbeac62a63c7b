use std::fmt;
use thiserror::Error;

/// Boxed cause carried by collaborator and parser failures.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The requested document or listing was produced
    Success = 0,
    /// Application error (unknown generator, parser failure, store failure, I/O error, etc.)
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Typed failures of the license information pipeline.
///
/// Every variant names the identifiers (attachment content id, release id,
/// generator id) needed to diagnose the failure without looking at internals.
/// The crate passes these around as `anyhow::Error`; callers recover the
/// variant with `downcast_ref::<LicenseInfoError>()`.
#[derive(Debug, Error)]
pub enum LicenseInfoError {
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    #[error("Attachment selected for license info generation is not found in release's attachments. Release id: {release_id}. Attachment content id: {attachment_content_id}")]
    AttachmentNotInRelease {
        release_id: String,
        attachment_content_id: String,
    },

    #[error("Unknown output generator: {generator_id}\n\n💡 Hint: Run `license-info formats` to list the available generators")]
    UnknownOutputGenerator { generator_id: String },

    #[error("Unsupported variant {variant} for output generator {generator_id}")]
    UnsupportedVariant {
        generator_id: String,
        variant: String,
    },

    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    #[error("User {user} is not allowed to read release {release_id}")]
    PermissionDenied { release_id: String, user: String },

    #[error("Upstream failure in {service} ({context})")]
    Upstream {
        service: String,
        context: String,
        #[source]
        source: BoxedCause,
    },

    #[error("Parser {parser} failed for attachment {attachment_content_id} of release {release_id}")]
    ParserFailure {
        parser: String,
        attachment_content_id: String,
        release_id: String,
        #[source]
        source: BoxedCause,
    },

    #[error("Could not render output with generator {generator_id}: {details}")]
    Rendering {
        generator_id: String,
        details: String,
    },
}

impl LicenseInfoError {
    pub fn invalid_argument(argument: &str, reason: &str) -> Self {
        Self::InvalidArgument {
            argument: argument.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn not_found(kind: &str, id: &str) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }

    /// Wraps a collaborator failure. `anyhow::Error` causes are unwrapped
    /// into their boxed form so the source chain stays intact.
    pub fn upstream(service: &str, context: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Upstream {
            service: service.to_string(),
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn rendering(generator_id: &str, details: impl fmt::Display) -> Self {
        Self::Rendering {
            generator_id: generator_id.to_string(),
            details: details.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
    }

    #[test]
    fn test_attachment_not_in_release_names_both_ids() {
        let error = LicenseInfoError::AttachmentNotInRelease {
            release_id: "rel-1".to_string(),
            attachment_content_id: "att-9".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("rel-1"));
        assert!(display.contains("att-9"));
    }

    #[test]
    fn test_unknown_output_generator_display() {
        let error = LicenseInfoError::UnknownOutputGenerator {
            generator_id: "Foo".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unknown output generator: Foo"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_upstream_keeps_source_chain() {
        let error = LicenseInfoError::upstream(
            "content store",
            "attachment att-1",
            anyhow::anyhow!("connection refused"),
        );
        assert!(format!("{}", error).contains("content store"));
        let source = std::error::Error::source(&error).expect("source is kept");
        assert_eq!(source.to_string(), "connection refused");
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let error: anyhow::Error = LicenseInfoError::not_found("Release", "r-1").into();
        match error.downcast_ref::<LicenseInfoError>() {
            Some(LicenseInfoError::NotFound { kind, id }) => {
                assert_eq!(kind, "Release");
                assert_eq!(id, "r-1");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rendering_display() {
        let error = LicenseInfoError::rendering("DocxGenerator::REPORT", "zip failure");
        let display = format!("{}", error);
        assert!(display.contains("DocxGenerator::REPORT"));
        assert!(display.contains("zip failure"));
    }
}
