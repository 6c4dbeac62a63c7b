use super::license_expression::{base_license_id, is_no_assertion, license_ids};
use super::read_content;
use crate::license_aggregation::domain::{
    Attachment, LicenseInfo, LicenseInfoParsingResult, LicenseNameWithText, Release, User,
};
use crate::ports::outbound::{AttachmentContentStore, AttachmentParser};
use crate::shared::Result;
use anyhow::{bail, Context};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

const TAG_VALUE_EXTENSION: &str = ".spdx";
const JSON_EXTENSION: &str = ".spdx.json";

/// License defined inside the document (`LicenseRef-*`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ExtractedLicense {
    license_id: String,
    name: Option<String>,
    extracted_text: Option<String>,
}

/// The parts of an SPDX document that carry license information
#[derive(Debug, Default)]
struct SpdxLicenseData {
    license_expressions: Vec<String>,
    copyright_texts: Vec<String>,
    extracted_licenses: Vec<ExtractedLicense>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsonPackage {
    license_concluded: Option<String>,
    license_declared: Option<String>,
    license_info_from_files: Vec<String>,
    copyright_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsonFile {
    license_concluded: Option<String>,
    license_info_in_files: Vec<String>,
    copyright_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonDocument {
    spdx_version: String,
    #[serde(default)]
    has_extracted_licensing_infos: Vec<ExtractedLicense>,
    #[serde(default)]
    packages: Vec<JsonPackage>,
    #[serde(default)]
    files: Vec<JsonFile>,
}

impl SpdxLicenseData {
    fn from_json(content: &[u8]) -> Result<Self> {
        let document: JsonDocument =
            serde_json::from_slice(content).context("Invalid SPDX JSON document")?;
        debug!(spdx_version = %document.spdx_version, "Parsed SPDX JSON document");

        let mut data = SpdxLicenseData {
            extracted_licenses: document.has_extracted_licensing_infos,
            ..Self::default()
        };

        for package in document.packages {
            data.license_expressions.extend(package.license_concluded);
            data.license_expressions.extend(package.license_declared);
            data.license_expressions.extend(package.license_info_from_files);
            data.copyright_texts.extend(package.copyright_text);
        }
        for file in document.files {
            data.license_expressions.extend(file.license_concluded);
            data.license_expressions.extend(file.license_info_in_files);
            data.copyright_texts.extend(file.copyright_text);
        }

        Ok(data)
    }

    fn from_tag_value(content: &[u8]) -> Result<Self> {
        let content =
            std::str::from_utf8(content).context("SPDX tag-value document is not UTF-8")?;
        let mut data = SpdxLicenseData::default();
        let mut has_version = false;
        let mut lines = content.lines().enumerate();

        while let Some((index, line)) = lines.next() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((tag, value)) = line.split_once(':') else {
                bail!("Line {} is not a 'Tag: Value' pair: {}", index + 1, line);
            };
            let mut value = value.trim().to_string();

            if value.starts_with("<text>") && !value.contains("</text>") {
                loop {
                    let Some((_, continuation)) = lines.next() else {
                        bail!("Unterminated <text> value for tag {} at line {}", tag, index + 1);
                    };
                    value.push('\n');
                    value.push_str(continuation);
                    if continuation.contains("</text>") {
                        break;
                    }
                }
            }
            let value = strip_text_tags(&value);

            match tag.trim() {
                "SPDXVersion" => has_version = true,
                "PackageLicenseConcluded"
                | "PackageLicenseDeclared"
                | "PackageLicenseInfoFromFiles"
                | "LicenseConcluded"
                | "LicenseInfoInFile" => data.license_expressions.push(value),
                "PackageCopyrightText" | "FileCopyrightText" => data.copyright_texts.push(value),
                "LicenseID" => data.extracted_licenses.push(ExtractedLicense {
                    license_id: value,
                    ..ExtractedLicense::default()
                }),
                "ExtractedText" => {
                    if let Some(extracted) = data.extracted_licenses.last_mut() {
                        extracted.extracted_text = Some(value);
                    }
                }
                "LicenseName" => {
                    if let Some(extracted) = data.extracted_licenses.last_mut() {
                        extracted.name = Some(value);
                    }
                }
                _ => {}
            }
        }

        if !has_version {
            bail!("Missing SPDXVersion tag");
        }
        Ok(data)
    }

    fn resolve(&self, id: &str) -> LicenseNameWithText {
        let base = base_license_id(id);
        let extracted = self
            .extracted_licenses
            .iter()
            .find(|extracted| extracted.license_id == base);

        match extracted {
            Some(extracted) => {
                let name = extracted
                    .name
                    .as_deref()
                    .filter(|name| !is_no_assertion(name))
                    .map(|name| id.replacen(base, name, 1))
                    .unwrap_or_else(|| id.to_string());
                LicenseNameWithText::new(Some(name), extracted.extracted_text.clone())
                    .with_spdx_id(id)
            }
            None => LicenseNameWithText::new(Some(id.to_string()), None).with_spdx_id(id),
        }
    }

    fn into_license_info(self, filename: &str) -> LicenseInfo {
        let licenses: Vec<LicenseNameWithText> = self
            .license_expressions
            .iter()
            .flat_map(|expression| license_ids(expression))
            .map(|id| self.resolve(&id))
            .collect();

        LicenseInfo::new()
            .with_licenses(licenses)
            .with_copyrights(
                self.copyright_texts
                    .into_iter()
                    .filter(|text| !is_no_assertion(text)),
            )
            .with_filename(filename)
    }
}

fn strip_text_tags(value: &str) -> String {
    value
        .trim()
        .trim_start_matches("<text>")
        .trim_end_matches("</text>")
        .trim()
        .to_string()
}

/// SpdxParser reads SPDX 2.x documents in tag-value (`.spdx`) or JSON
/// (`.spdx.json`) form.
///
/// Release fields are left unset; the aggregator back-fills them from the
/// owning release.
pub struct SpdxParser {
    content_store: Arc<dyn AttachmentContentStore>,
}

impl SpdxParser {
    pub const NAME: &'static str = "SPDXParser";

    pub fn new(content_store: Arc<dyn AttachmentContentStore>) -> Self {
        Self { content_store }
    }
}

impl AttachmentParser for SpdxParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_applicable_to(
        &self,
        attachment: &Attachment,
        _user: &User,
        _release: &Release,
    ) -> Result<bool> {
        Ok(attachment.has_extension(TAG_VALUE_EXTENSION) || attachment.has_extension(JSON_EXTENSION))
    }

    fn license_infos(
        &self,
        attachment: &Attachment,
        _user: &User,
        _release: &Release,
    ) -> Result<Vec<LicenseInfoParsingResult>> {
        let content = read_content(self.content_store.as_ref(), attachment)?;

        let parsed = if attachment.has_extension(JSON_EXTENSION) {
            SpdxLicenseData::from_json(&content)
        } else {
            SpdxLicenseData::from_tag_value(&content)
        };

        let result = match parsed {
            Ok(data) => LicenseInfoParsingResult::success(data.into_license_info(attachment.filename())),
            Err(e) => LicenseInfoParsingResult::failure(format!(
                "Could not parse SPDX document {}: {:#}",
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
    use crate::license_aggregation::domain::{AttachmentType, LicenseInfoRequestStatus};
    use crate::shared::LicenseInfoError;
    use std::collections::HashMap;

    struct StaticContentStore(HashMap<String, Vec<u8>>);

    impl AttachmentContentStore for StaticContentStore {
        fn get_content(&self, attachment_content_id: &str) -> Result<Vec<u8>> {
            self.0
                .get(attachment_content_id)
                .cloned()
                .ok_or_else(|| LicenseInfoError::not_found("Attachment content", attachment_content_id).into())
        }
    }

    const TAG_VALUE: &str = "SPDXVersion: SPDX-2.2
DataLicense: CC0-1.0
PackageName: R
PackageLicenseConcluded: LicenseRef-1 AND Apache-2.0
PackageLicenseDeclared: NOASSERTION
PackageCopyrightText: <text>Copyright (c) 2020 Acme
Copyright (c) 2021 Acme</text>
FileName: ./src/main.c
LicenseConcluded: (Apache-2.0 OR NONE)
FileCopyrightText: NONE

LicenseID: LicenseRef-1
ExtractedText: <text>T</text>
LicenseName: MIT
";

    const JSON: &str = r#"{
  "spdxVersion": "SPDX-2.3",
  "hasExtractedLicensingInfos": [
    { "licenseId": "LicenseRef-1", "extractedText": "T", "name": "MIT" }
  ],
  "packages": [
    {
      "name": "R",
      "licenseConcluded": "LicenseRef-1",
      "licenseDeclared": "BSD-3-Clause",
      "copyrightText": "Copyright (c) Acme"
    }
  ],
  "files": [
    { "fileName": "a.c", "licenseInfoInFiles": ["NOASSERTION"], "copyrightText": "NOASSERTION" }
  ]
}"#;

    fn parser_with(id: &str, content: &str) -> SpdxParser {
        let mut contents = HashMap::new();
        contents.insert(id.to_string(), content.as_bytes().to_vec());
        SpdxParser::new(Arc::new(StaticContentStore(contents)))
    }

    fn parse(parser: &SpdxParser, attachment: &Attachment) -> LicenseInfoParsingResult {
        let release = Release::new("r1", "R", "1.0");
        let mut results = parser
            .license_infos(attachment, &User::new("user@example.com"), &release)
            .unwrap();
        assert_eq!(results.len(), 1);
        results.remove(0)
    }

    fn license_names(result: &LicenseInfoParsingResult) -> Vec<String> {
        result
            .license_info()
            .unwrap()
            .license_names_with_texts()
            .iter()
            .filter_map(|l| l.license_name().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_applicability_by_extension() {
        let parser = parser_with("a", "");
        let user = User::new("user@example.com");
        let release = Release::new("r1", "R", "1.0");

        for (filename, expected) in [
            ("scan.spdx", true),
            ("scan.SPDX.json", true),
            ("scan.xml", false),
            ("scan.json", false),
        ] {
            let attachment = Attachment::new("a", filename, AttachmentType::Other);
            assert_eq!(
                parser.is_applicable_to(&attachment, &user, &release).unwrap(),
                expected,
                "{}",
                filename
            );
        }
    }

    #[test]
    fn test_tag_value_document() {
        let parser = parser_with("a", TAG_VALUE);
        let attachment = Attachment::new("a", "r.spdx", AttachmentType::Other);
        let result = parse(&parser, &attachment);

        assert_eq!(result.status(), LicenseInfoRequestStatus::Success);
        assert!(!result.has_release_fields());
        assert_eq!(license_names(&result), vec!["Apache-2.0", "MIT"]);

        let info = result.license_info().unwrap();
        let mit = info
            .license_names_with_texts()
            .iter()
            .find(|l| l.license_name() == Some("MIT"))
            .unwrap();
        assert_eq!(mit.license_text(), Some("T"));
        assert_eq!(mit.license_spdx_id(), Some("LicenseRef-1"));
        assert!(info
            .copyrights()
            .contains("Copyright (c) 2020 Acme\nCopyright (c) 2021 Acme"));
        assert_eq!(info.copyrights().len(), 1);
        assert!(info.filenames().contains("r.spdx"));
    }

    #[test]
    fn test_json_document() {
        let parser = parser_with("a", JSON);
        let attachment = Attachment::new("a", "r.spdx.json", AttachmentType::Other);
        let result = parse(&parser, &attachment);

        assert!(result.is_success());
        assert_eq!(license_names(&result), vec!["BSD-3-Clause", "MIT"]);
        let info = result.license_info().unwrap();
        assert_eq!(
            info.copyrights().iter().collect::<Vec<_>>(),
            vec!["Copyright (c) Acme"]
        );
    }

    #[test]
    fn test_malformed_document_is_failure_result() {
        let parser = parser_with("a", "{ not json");
        let attachment = Attachment::new("a", "broken.spdx.json", AttachmentType::Other);
        let result = parse(&parser, &attachment);

        assert_eq!(result.status(), LicenseInfoRequestStatus::Failure);
        assert!(result.message().unwrap().contains("broken.spdx.json"));
        assert!(result
            .license_info()
            .unwrap()
            .filenames()
            .contains("broken.spdx.json"));
    }

    #[test]
    fn test_tag_value_without_version_is_failure() {
        let parser = parser_with("a", "PackageName: R\n");
        let attachment = Attachment::new("a", "r.spdx", AttachmentType::Other);
        let result = parse(&parser, &attachment);
        assert_eq!(result.status(), LicenseInfoRequestStatus::Failure);
    }

    #[test]
    fn test_missing_content_is_error() {
        let parser = parser_with("other", TAG_VALUE);
        let attachment = Attachment::new("a", "r.spdx", AttachmentType::Other);
        let release = Release::new("r1", "R", "1.0");

        let error = parser
            .license_infos(&attachment, &User::new("user@example.com"), &release)
            .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<LicenseInfoError>(),
            Some(LicenseInfoError::Upstream { .. })
        ));
    }
}
