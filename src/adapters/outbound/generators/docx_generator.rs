use super::docx_body::{Cell, DocxBody, RunStyle};
use super::template_support::output_format_info;
use crate::application::read_models::LicenseReportReadModel;
use crate::license_aggregation::domain::{OutputFormatInfo, OutputFormatVariant};
use crate::ports::outbound::{LicenseInfoFormatter, OutputPayload};
use crate::shared::{LicenseInfoError, Result};
use std::io::{Cursor, Write};
use xml::escape::escape_str_pcdata;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const DOCUMENT_TEMPLATE: &str = include_str!("templates/docx/document.xml");
const STYLES: &str = include_str!("templates/docx/styles.xml");
const CONTENT_TYPES: &str = include_str!("templates/docx/content_types.xml");
const PACKAGE_RELS: &str = include_str!("templates/docx/package.rels");
const DOCUMENT_RELS: &str = include_str!("templates/docx/document.xml.rels");
const CORE_PROPERTIES: &str = include_str!("templates/docx/core.xml");

type BodyResult = std::result::Result<(), xml::writer::Error>;

const BODY_MARKER: &str = "<!--$licenseInfoBody-->";
const LINE_BREAK: &str = "</w:t><w:br/><w:t xml:space=\"preserve\">";

const DISCLOSURE_HEADERS: [&str; 5] = [
    "Name of OSS Component",
    "Version of OSS Component",
    "Name and Version of License (see Appendix for License Text)",
    "Acknowledgements",
    "More Information",
];
const REPORT_LIST_HEADERS: [&str; 3] = [
    "Name of OSS Component",
    "Version of OSS Component",
    "Copyright Statements",
];
const REPORT_DETAIL_HEADERS: [&str; 4] = ["Component", "License", "Todos", "Acknowledgements"];
const DETAILS_HEADING: &str = "Detailed Release Information";
const APPENDIX_HEADING: &str = "Appendix - License Texts";

/// Replaces every `$placeholder` in one pass, so substituted values are
/// never scanned for further placeholders
fn substitute(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(index) = rest.find('$') {
        output.push_str(&rest[..index]);
        let candidate = &rest[index..];
        match replacements
            .iter()
            .find(|(placeholder, _)| candidate.starts_with(placeholder))
        {
            Some((placeholder, value)) => {
                output.push_str(value);
                rest = &candidate[placeholder.len()..];
            }
            None => {
                output.push('$');
                rest = &candidate[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

/// DocxGenerator renders license information as an Office Open XML
/// word processing document.
///
/// The front page comes from a bundled `document.xml` template with the
/// placeholders `$Heading1`, `$Heading2`, `$projectname` and
/// `$licenseInfoHeader`; tables and the appendix are generated.
pub struct DocxGenerator {
    info: OutputFormatInfo,
}

impl DocxGenerator {
    pub const NAME: &'static str = "DocxGenerator";
    pub const DISCLOSURE: &'static str = "DocxGenerator::DISCLOSURE";
    pub const REPORT: &'static str = "DocxGenerator::REPORT";

    pub fn new(variant: OutputFormatVariant) -> Self {
        let description = match variant {
            OutputFormatVariant::Disclosure => "License information as DOCX",
            OutputFormatVariant::Report => "License information report as DOCX",
        };
        Self {
            info: output_format_info(
                Self::NAME,
                "docx",
                description,
                true,
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                variant,
            ),
        }
    }

    fn rendering_error(&self, details: impl std::fmt::Display) -> anyhow::Error {
        LicenseInfoError::rendering(&self.info.generator_id, details).into()
    }

    fn disclosure_body(model: &LicenseReportReadModel, body: &mut DocxBody) -> BodyResult {
        let rows: Vec<Vec<Cell>> = model
            .disclosure_rows
            .iter()
            .map(|row| match &row.error {
                Some(error) => vec![
                    Cell::text(&row.name),
                    Cell::text(&row.version),
                    Cell::text(format!(
                        "Error reading license information: {}",
                        error.message
                    ))
                    .styled(RunStyle::alert()),
                    Cell::empty(),
                    Cell::text(format!("Source file: {}", error.filename))
                        .styled(RunStyle::alert()),
                ],
                None => vec![
                    Cell::text(&row.name),
                    Cell::text(&row.version),
                    Cell::lines(
                        row.licenses
                            .iter()
                            .map(|license| license.name.clone())
                            .collect(),
                    ),
                    Cell::lines(row.acknowledgements.clone()),
                    Cell::lines(row.copyrights.clone()),
                ],
            })
            .collect();

        body.table(&DISCLOSURE_HEADERS, &rows)
    }

    fn report_body(model: &LicenseReportReadModel, body: &mut DocxBody) -> BodyResult {
        let list_rows: Vec<Vec<Cell>> = model
            .releases
            .iter()
            .map(|release| {
                vec![
                    Cell::text(&release.name),
                    Cell::text(&release.version),
                    Cell::lines(release.copyrights.clone()),
                ]
            })
            .collect();
        body.table(&REPORT_LIST_HEADERS, &list_rows)?;

        body.section_heading(DETAILS_HEADING)?;
        let detail_rows: Vec<Vec<Cell>> = model
            .license_details
            .iter()
            .map(|detail| {
                let component = if detail.first_of_release
                    && !detail.release_name.is_empty()
                    && !detail.release_version.is_empty()
                {
                    Cell::lines(vec![
                        detail.release_name.clone(),
                        detail.release_version.clone(),
                    ])
                } else {
                    Cell::empty()
                };
                vec![
                    component,
                    Cell::text(&detail.license_name),
                    Cell::lines(detail.todos.clone()),
                    Cell::lines(detail.acknowledgements.clone()),
                ]
            })
            .collect();
        body.table(&REPORT_DETAIL_HEADERS, &detail_rows)
    }

    fn appendix(model: &LicenseReportReadModel, body: &mut DocxBody) -> BodyResult {
        body.section_heading(APPENDIX_HEADING)?;
        for license in &model.license_texts {
            body.bookmarked_heading(&license.name, &license.anchor)?;
            body.paragraph(&license.text)?;
        }
        Ok(())
    }

    fn document_xml(&self, model: &LicenseReportReadModel) -> Result<Vec<u8>> {
        let (front, back) = DOCUMENT_TEMPLATE
            .split_once(BODY_MARKER)
            .ok_or_else(|| self.rendering_error("document template has no body marker"))?;

        let mut body = DocxBody::new();
        match self.info.variant {
            OutputFormatVariant::Disclosure => Self::disclosure_body(model, &mut body),
            OutputFormatVariant::Report => Self::report_body(model, &mut body),
        }
        .and_then(|_| Self::appendix(model, &mut body))
        .map_err(|e| self.rendering_error(e))?;

        let project_name = escape_str_pcdata(&model.project_name);
        let header = escape_str_pcdata(&model.header_text).replace('\n', LINE_BREAK);
        let replacements = [
            ("$Heading1", ""),
            ("$Heading2", ""),
            ("$projectname", &*project_name),
            ("$licenseInfoHeader", header.as_str()),
        ];

        let mut xml = substitute(front, &replacements).into_bytes();
        xml.extend(body.into_bytes());
        xml.extend(substitute(back, &replacements).into_bytes());
        Ok(xml)
    }

    fn core_properties(model: &LicenseReportReadModel) -> String {
        let created = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let project_name = escape_str_pcdata(&model.project_name);
        substitute(
            CORE_PROPERTIES,
            &[
                ("$projectname", &*project_name),
                ("$created", created.as_str()),
            ],
        )
    }

    fn package(parts: &[(&str, &[u8])]) -> zip::result::ZipResult<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, content) in parts {
            zip.start_file(*name, options)?;
            zip.write_all(content)?;
        }

        Ok(zip.finish()?.into_inner())
    }
}

impl LicenseInfoFormatter for DocxGenerator {
    fn format_info(&self) -> &OutputFormatInfo {
        &self.info
    }

    fn format(&self, model: &LicenseReportReadModel) -> Result<OutputPayload> {
        let document = self.document_xml(model)?;
        let core = Self::core_properties(model);

        let bytes = Self::package(&[
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
            ("_rels/.rels", PACKAGE_RELS.as_bytes()),
            ("word/document.xml", document.as_slice()),
            ("word/styles.xml", STYLES.as_bytes()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes()),
            ("docProps/core.xml", core.as_bytes()),
        ])
        .map_err(|e| self.rendering_error(e))?;

        Ok(OutputPayload::Binary(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::LicenseReportReadModelBuilder;
    use crate::license_aggregation::domain::{
        LicenseInfo, LicenseInfoParsingResult, LicenseNameWithText,
    };
    use crate::adapters::outbound::generators::docx_body::ALERT_COLOR;
    use std::io::Read;

    fn model(variant: OutputFormatVariant) -> LicenseReportReadModel {
        let mit =
            LicenseNameWithText::named("MIT", "Permission is hereby granted").with_spdx_id("MIT");
        let results = vec![
            LicenseInfoParsingResult::success(
                LicenseInfo::new()
                    .with_license(mit.clone())
                    .with_copyright("Copyright (c) Acme"),
            )
            .with_release_fields(Some(String::new()), Some("R".into()), Some("1.0".into())),
            LicenseInfoParsingResult::success(LicenseInfo::new().with_license(mit))
                .with_release_fields(Some(String::new()), Some("Q".into()), Some("3.1".into())),
            LicenseInfoParsingResult::failure("broken XML")
                .with_filename("scan.xml")
                .with_release_fields(Some(String::new()), Some("S".into()), Some("2.0".into())),
        ];
        LicenseReportReadModelBuilder::build(
            &results,
            "P & Co",
            "Header\nSecond line",
            variant,
            &[],
        )
    }

    fn document_xml(variant: OutputFormatVariant) -> String {
        document_xml_of(variant, &model(variant))
    }

    fn document_xml_of(variant: OutputFormatVariant, model: &LicenseReportReadModel) -> String {
        let bytes = match DocxGenerator::new(variant).format(model).unwrap() {
            OutputPayload::Binary(bytes) => bytes,
            OutputPayload::Text(_) => panic!("docx generator produced text output"),
        };
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/styles.xml",
            "word/_rels/document.xml.rels",
            "docProps/core.xml",
        ] {
            assert!(archive.by_name(part).is_ok(), "missing part {}", part);
        }

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[test]
    fn test_substitute_single_pass() {
        assert_eq!(
            substitute("$a and $b, $c", &[("$a", "$b"), ("$b", "B")]),
            "$b and B, $c"
        );
    }

    #[test]
    fn test_format_info() {
        let generator = DocxGenerator::new(OutputFormatVariant::Report);
        let info = generator.format_info();
        assert_eq!(info.generator_id, DocxGenerator::REPORT);
        assert!(info.is_output_binary);
        assert_eq!(info.file_extension, "docx");
    }

    #[test]
    fn test_placeholders_replaced() {
        let xml = document_xml(OutputFormatVariant::Disclosure);

        assert!(!xml.contains("$Heading1"));
        assert!(!xml.contains("$Heading2"));
        assert!(!xml.contains("$projectname"));
        assert!(!xml.contains("$licenseInfoHeader"));
        assert!(!xml.contains(BODY_MARKER));
        assert!(xml.contains("P &amp; Co"));
        assert!(xml.contains(&format!("Header{}Second line", LINE_BREAK)));
    }

    #[test]
    fn test_disclosure_document() {
        let xml = document_xml(OutputFormatVariant::Disclosure);

        assert!(xml.contains("Name and Version of License (see Appendix for License Text)"));
        assert!(xml.contains("Error reading license information: broken XML"));
        assert!(xml.contains("Source file: scan.xml"));
        assert!(xml.contains(ALERT_COLOR));
        assert!(xml.contains(APPENDIX_HEADING));
        assert!(!xml.contains(DETAILS_HEADING));
        assert_eq!(xml.matches("Permission is hereby granted").count(), 1);
    }

    #[test]
    fn test_document_is_well_formed_xml_with_control_characters() {
        let gpl = LicenseNameWithText::named(
            "GPL-2.0",
            "GNU GENERAL PUBLIC LICENSE\n\u{0c}\nEND OF TERMS",
        )
        .with_acknowledgements("Thanks\u{0b}to all");
        let results = vec![LicenseInfoParsingResult::success(
            LicenseInfo::new()
                .with_license(gpl)
                .with_copyright("Copyright (c) \u{1b}Acme"),
        )
        .with_release_fields(Some(String::new()), Some("R".into()), Some("1.0".into()))];

        for variant in [OutputFormatVariant::Disclosure, OutputFormatVariant::Report] {
            let model = LicenseReportReadModelBuilder::build(
                &results,
                "P\u{0c}",
                "Header\u{0c}text",
                variant,
                &[],
            );
            let xml = document_xml_of(variant, &model);

            for event in xml::reader::EventReader::new(xml.as_bytes()) {
                if let Err(e) = event {
                    panic!("document.xml for {} is not well-formed: {}", variant, e);
                }
            }
            assert!(xml.contains("GNU GENERAL PUBLIC LICENSE"));
            assert!(xml.contains("END OF TERMS"));
            assert!(!xml.contains('\u{0c}'));
        }
    }

    #[test]
    fn test_report_document() {
        let xml = document_xml(OutputFormatVariant::Report);

        assert!(xml.contains("Copyright Statements"));
        assert!(xml.contains(DETAILS_HEADING));
        assert!(xml.contains("todo not determined so far."));
        assert!(xml.contains(APPENDIX_HEADING));
        assert_eq!(xml.matches("Permission is hereby granted").count(), 1);
    }
}
