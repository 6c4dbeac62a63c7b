use crate::license_aggregation::domain::{Attachment, LicenseInfoParsingResult, Release, User};
use crate::ports::outbound::AttachmentParser;
use crate::shared::{LicenseInfoError, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// ParserSelector - Picks the parsers applicable to an attachment
///
/// Parsers are asked in registration order and the applicable ones keep that
/// order. Failures of a parser, whether deciding applicability or extracting,
/// are reported as `LicenseInfoError::ParserFailure` naming the parser,
/// attachment and release.
pub struct ParserSelector {
    parsers: Vec<Arc<dyn AttachmentParser>>,
}

impl ParserSelector {
    pub fn new(parsers: Vec<Arc<dyn AttachmentParser>>) -> Self {
        Self { parsers }
    }

    pub fn parser_names(&self) -> Vec<&'static str> {
        self.parsers.iter().map(|parser| parser.name()).collect()
    }

    /// Returns every parser that accepts the attachment, in registration order
    ///
    /// # Errors
    /// Returns `LicenseInfoError::ParserFailure` for the first parser whose
    /// applicability check fails.
    pub fn select_applicable(
        &self,
        attachment: &Attachment,
        user: &User,
        release: &Release,
    ) -> Result<Vec<Arc<dyn AttachmentParser>>> {
        let mut applicable = Vec::new();
        for parser in &self.parsers {
            let accepted = parser
                .is_applicable_to(attachment, user, release)
                .map_err(|e| parser_failure(parser.as_ref(), attachment, release, e))?;
            if accepted {
                applicable.push(Arc::clone(parser));
            }
        }

        let names: Vec<_> = applicable.iter().map(|parser| parser.name()).collect();
        debug!(
            attachment = attachment.content_id(),
            parsers = ?names,
            "Selected parsers"
        );
        if applicable.len() > 1 {
            info!(
                attachment = attachment.content_id(),
                release = release.id(),
                parsers = ?names,
                "Multiple parsers apply to attachment, using the results of all of them"
            );
        }

        Ok(applicable)
    }

    /// Runs the given parsers and concatenates their results in order
    ///
    /// The first failing parser aborts the call.
    pub fn extract(
        parsers: &[Arc<dyn AttachmentParser>],
        attachment: &Attachment,
        user: &User,
        release: &Release,
    ) -> Result<Vec<LicenseInfoParsingResult>> {
        parsers.iter().try_fold(Vec::new(), |mut results, parser| {
            let parsed = parser
                .license_infos(attachment, user, release)
                .map_err(|e| parser_failure(parser.as_ref(), attachment, release, e))?;
            results.extend(parsed);
            Ok(results)
        })
    }
}

fn parser_failure(
    parser: &dyn AttachmentParser,
    attachment: &Attachment,
    release: &Release,
    source: anyhow::Error,
) -> anyhow::Error {
    LicenseInfoError::ParserFailure {
        parser: parser.name().to_string(),
        attachment_content_id: attachment.content_id().to_string(),
        release_id: release.id().to_string(),
        source: source.into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license_aggregation::domain::{AttachmentType, LicenseInfo};

    type StubOutcome<T> = std::result::Result<T, &'static str>;

    struct StubParser {
        name: &'static str,
        applicable: StubOutcome<bool>,
        extraction: StubOutcome<&'static str>,
    }

    impl AttachmentParser for StubParser {
        fn name(&self) -> &'static str {
            self.name
        }

        fn is_applicable_to(&self, _: &Attachment, _: &User, _: &Release) -> Result<bool> {
            self.applicable.map_err(|e| anyhow::anyhow!(e))
        }

        fn license_infos(
            &self,
            _: &Attachment,
            _: &User,
            _: &Release,
        ) -> Result<Vec<LicenseInfoParsingResult>> {
            self.extraction
                .map(|copyright| {
                    vec![LicenseInfoParsingResult::success(
                        LicenseInfo::new().with_copyright(copyright),
                    )]
                })
                .map_err(|e| anyhow::anyhow!(e))
        }
    }

    fn parser(
        name: &'static str,
        applicable: StubOutcome<bool>,
        extraction: StubOutcome<&'static str>,
    ) -> Arc<dyn AttachmentParser> {
        Arc::new(StubParser {
            name,
            applicable,
            extraction,
        })
    }

    fn fixture() -> (Attachment, User, Release) {
        let attachment = Attachment::new("att-1", "scan.xml", AttachmentType::Other);
        let release = Release::new("rel-1", "R", "1.0").with_attachment(attachment.clone());
        (attachment, User::new("dev@example.com"), release)
    }

    #[test]
    fn test_select_keeps_registration_order() {
        let (attachment, user, release) = fixture();
        let selector = ParserSelector::new(vec![
            parser("B", Ok(true), Ok("b")),
            parser("X", Ok(false), Ok("x")),
            parser("A", Ok(true), Ok("a")),
        ]);

        let selected = selector
            .select_applicable(&attachment, &user, &release)
            .unwrap();
        let names: Vec<_> = selected.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_select_none() {
        let (attachment, user, release) = fixture();
        let selector = ParserSelector::new(vec![parser("X", Ok(false), Ok("x"))]);
        assert!(selector
            .select_applicable(&attachment, &user, &release)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_applicability_failure_is_wrapped() {
        let (attachment, user, release) = fixture();
        let selector = ParserSelector::new(vec![
            parser("A", Ok(true), Ok("a")),
            parser("Broken", Err("store down"), Ok("b")),
        ]);

        let error = selector
            .select_applicable(&attachment, &user, &release)
            .err()
            .unwrap();
        match error.downcast_ref::<LicenseInfoError>() {
            Some(LicenseInfoError::ParserFailure {
                parser,
                attachment_content_id,
                release_id,
                ..
            }) => {
                assert_eq!(parser, "Broken");
                assert_eq!(attachment_content_id, "att-1");
                assert_eq!(release_id, "rel-1");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(format!("{:#}", error).contains("store down"));
    }

    #[test]
    fn test_extract_concatenates_in_order() {
        let (attachment, user, release) = fixture();
        let parsers = vec![parser("A", Ok(true), Ok("a")), parser("B", Ok(true), Ok("b"))];

        let results = ParserSelector::extract(&parsers, &attachment, &user, &release).unwrap();
        let copyrights: Vec<_> = results
            .iter()
            .flat_map(|r| r.license_info().unwrap().copyrights().iter().cloned())
            .collect();
        assert_eq!(copyrights, vec!["a", "b"]);
    }

    #[test]
    fn test_extract_fails_fast() {
        let (attachment, user, release) = fixture();
        let parsers = vec![
            parser("A", Ok(true), Ok("a")),
            parser("Broken", Ok(true), Err("bad input")),
        ];

        let error = ParserSelector::extract(&parsers, &attachment, &user, &release)
            .err()
            .unwrap();
        assert!(matches!(
            error.downcast_ref::<LicenseInfoError>(),
            Some(LicenseInfoError::ParserFailure { parser, .. }) if parser == "Broken"
        ));
    }
}
