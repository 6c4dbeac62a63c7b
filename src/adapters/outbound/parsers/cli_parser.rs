use super::read_content;
use super::xml_document::{parse_document, root_element_name, XmlElement};
use crate::license_aggregation::domain::{
    Attachment, AttachmentType, LicenseInfo, LicenseInfoParsingResult, LicenseNameWithText,
    Release, User,
};
use crate::ports::outbound::{AttachmentContentStore, AttachmentParser};
use crate::shared::Result;
use std::sync::Arc;

pub(crate) const XML_EXTENSION: &str = ".xml";

/// Builds a license entry from a `License` element
pub(crate) fn license_from_element(element: &XmlElement) -> LicenseNameWithText {
    let mut license = LicenseNameWithText::new(
        element.attribute("name").map(str::to_string),
        element.child_text("Content"),
    );
    if let Some(spdx_id) = element.attribute("spdxidentifier").filter(|id| !id.is_empty()) {
        license = license.with_spdx_id(spdx_id);
    }
    if let Some(acknowledgements) = element.child_text("Acknowledgements") {
        license = license.with_acknowledgements(acknowledgements);
    }
    license
}

/// Copyright statement of a `Copyright` element, if it has one
pub(crate) fn copyright_from_element(element: &XmlElement) -> Option<String> {
    element.child_text("Content")
}

/// CliParser reads component license information (CLI) XML reports:
///
/// ```xml
/// <ComponentLicenseInformation>
///   <License name="MIT" spdxidentifier="MIT">
///     <Content><![CDATA[...]]></Content>
///     <Acknowledgements>...</Acknowledgements>
///   </License>
///   <Copyright><Content>Copyright (c) ...</Content></Copyright>
/// </ComponentLicenseInformation>
/// ```
pub struct CliParser {
    content_store: Arc<dyn AttachmentContentStore>,
}

impl CliParser {
    pub const NAME: &'static str = "CLIParser";
    pub const ROOT_ELEMENT: &'static str = "ComponentLicenseInformation";

    pub fn new(content_store: Arc<dyn AttachmentContentStore>) -> Self {
        Self { content_store }
    }
}

impl AttachmentParser for CliParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_applicable_to(
        &self,
        attachment: &Attachment,
        _user: &User,
        _release: &Release,
    ) -> Result<bool> {
        let kind_matches = matches!(
            attachment.attachment_type(),
            AttachmentType::ComponentLicenseInfoXml | AttachmentType::ComponentLicenseInfoCombined
        );
        if !kind_matches || !attachment.has_extension(XML_EXTENSION) {
            return Ok(false);
        }

        let content = read_content(self.content_store.as_ref(), attachment)?;
        Ok(root_element_name(&content).as_deref() == Some(Self::ROOT_ELEMENT))
    }

    fn license_infos(
        &self,
        attachment: &Attachment,
        _user: &User,
        _release: &Release,
    ) -> Result<Vec<LicenseInfoParsingResult>> {
        let content = read_content(self.content_store.as_ref(), attachment)?;

        let result = match parse_document(&content) {
            Ok(root) => {
                let info = LicenseInfo::new()
                    .with_licenses(root.descendants("License").into_iter().map(license_from_element))
                    .with_copyrights(
                        root.descendants("Copyright")
                            .into_iter()
                            .filter_map(copyright_from_element),
                    )
                    .with_filename(attachment.filename());
                LicenseInfoParsingResult::success(info)
            }
            Err(e) => LicenseInfoParsingResult::failure(format!(
                "Could not parse CLI file {}: {}",
                attachment.filename(),
                e
            ))
            .with_filename(attachment.filename()),
        };

        Ok(vec![result])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license_aggregation::domain::LicenseInfoRequestStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct SingleContentStore {
        content: Option<Vec<u8>>,
        reads: AtomicUsize,
    }

    impl SingleContentStore {
        fn new(content: &str) -> Self {
            Self {
                content: Some(content.as_bytes().to_vec()),
                reads: AtomicUsize::new(0),
            }
        }

        fn unavailable() -> Self {
            Self {
                content: None,
                reads: AtomicUsize::new(0),
            }
        }
    }

    impl AttachmentContentStore for SingleContentStore {
        fn get_content(&self, _attachment_content_id: &str) -> Result<Vec<u8>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.content
                .clone()
                .ok_or_else(|| anyhow::anyhow!("blob store unreachable"))
        }
    }

    const CLI_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ComponentLicenseInformation component="R" version="1.0">
  <Copyright>
    <Content><![CDATA[Copyright (c) 2019 Acme Corp.]]></Content>
    <Files>src/main.c</Files>
  </Copyright>
  <License type="global" name="MIT" spdxidentifier="MIT">
    <Content><![CDATA[Permission is hereby granted, free of charge]]></Content>
    <Acknowledgements><![CDATA[Thanks to the MIT authors]]></Acknowledgements>
  </License>
  <License type="global" name="Apache License 2.0" spdxidentifier="Apache-2.0">
    <Content><![CDATA[Apache text]]></Content>
  </License>
</ComponentLicenseInformation>"#;

    fn user() -> User {
        User::new("user@example.com")
    }

    fn release() -> Release {
        Release::new("r1", "R", "1.0")
    }

    #[test]
    fn test_applicable_to_cli_xml() {
        let parser = CliParser::new(Arc::new(SingleContentStore::new(CLI_XML)));
        let attachment = Attachment::new("a", "cli.xml", AttachmentType::ComponentLicenseInfoXml);
        assert!(parser.is_applicable_to(&attachment, &user(), &release()).unwrap());
    }

    #[test]
    fn test_not_applicable_to_other_kinds_without_reading() {
        let store = Arc::new(SingleContentStore::new(CLI_XML));
        let parser = CliParser::new(store.clone());
        let attachment = Attachment::new("a", "cli.xml", AttachmentType::Source);

        assert!(!parser.is_applicable_to(&attachment, &user(), &release()).unwrap());
        assert_eq!(store.reads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_not_applicable_to_other_root_element() {
        let parser = CliParser::new(Arc::new(SingleContentStore::new("<CombinedCLI/>")));
        let attachment =
            Attachment::new("a", "cli.xml", AttachmentType::ComponentLicenseInfoCombined);
        assert!(!parser.is_applicable_to(&attachment, &user(), &release()).unwrap());
    }

    #[test]
    fn test_applicability_fails_when_store_unavailable() {
        let parser = CliParser::new(Arc::new(SingleContentStore::unavailable()));
        let attachment = Attachment::new("a", "cli.xml", AttachmentType::ComponentLicenseInfoXml);
        assert!(parser.is_applicable_to(&attachment, &user(), &release()).is_err());
    }

    #[test]
    fn test_extracts_licenses_and_copyrights() {
        let parser = CliParser::new(Arc::new(SingleContentStore::new(CLI_XML)));
        let attachment = Attachment::new("a", "cli.xml", AttachmentType::ComponentLicenseInfoXml);

        let results = parser.license_infos(&attachment, &user(), &release()).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_success());
        assert!(!results[0].has_release_fields());

        let info = results[0].license_info().unwrap();
        assert_eq!(info.license_names_with_texts().len(), 2);
        let mit = info
            .license_names_with_texts()
            .iter()
            .find(|l| l.license_spdx_id() == Some("MIT"))
            .unwrap();
        assert_eq!(mit.license_name(), Some("MIT"));
        assert_eq!(
            mit.license_text(),
            Some("Permission is hereby granted, free of charge")
        );
        assert_eq!(mit.acknowledgements(), Some("Thanks to the MIT authors"));
        assert!(info.copyrights().contains("Copyright (c) 2019 Acme Corp."));
        assert!(info.filenames().contains("cli.xml"));
    }

    #[test]
    fn test_broken_xml_is_failure_result() {
        let parser = CliParser::new(Arc::new(SingleContentStore::new(
            "<ComponentLicenseInformation><License>",
        )));
        let attachment = Attachment::new("a", "cli.xml", AttachmentType::ComponentLicenseInfoXml);

        let results = parser.license_infos(&attachment, &user(), &release()).unwrap();
        assert_eq!(results[0].status(), LicenseInfoRequestStatus::Failure);
        assert!(results[0].message().unwrap().contains("cli.xml"));
    }
}
