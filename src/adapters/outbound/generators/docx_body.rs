//! WordprocessingML body fragments
//!
//! Each block (paragraph, table) is written by its own `EventWriter` into a
//! shared buffer, so the fragment can be spliced into the document template
//! where the `w` prefix is already bound.

use xml::writer::{EmitterConfig, Error as EmitterError, EventWriter, XmlEvent};

/// Body text size in points
pub const FONT_SIZE: u32 = 12;

/// Text colour of error rows
pub const ALERT_COLOR: &str = "e95850";

const FONT_FAMILY: &str = "Calibri";

/// Formatting of one run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStyle {
    pub bold: bool,
    pub color: Option<&'static str>,
    pub size: u32,
}

impl Default for RunStyle {
    fn default() -> Self {
        Self {
            bold: false,
            color: None,
            size: FONT_SIZE,
        }
    }
}

impl RunStyle {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn alert() -> Self {
        Self {
            color: Some(ALERT_COLOR),
            ..Self::default()
        }
    }
}

/// Table cell content: one line per entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    lines: Vec<String>,
    style: RunStyle,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self::lines(vec![text.into()])
    }

    pub fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            style: RunStyle::default(),
        }
    }

    pub fn empty() -> Self {
        Self::lines(Vec::new())
    }

    pub fn styled(mut self, style: RunStyle) -> Self {
        self.style = style;
        self
    }
}

type Writer<'a> = EventWriter<&'a mut Vec<u8>>;

/// Accumulates the serialized body blocks
#[derive(Debug, Default)]
pub struct DocxBody {
    xml: Vec<u8>,
    next_bookmark_id: u32,
}

impl DocxBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.xml
    }

    fn writer(&mut self) -> Writer<'_> {
        EmitterConfig::new()
            .write_document_declaration(false)
            .create_writer(&mut self.xml)
    }

    /// Table with a bold header row
    pub fn table(&mut self, headers: &[&str], rows: &[Vec<Cell>]) -> Result<(), EmitterError> {
        let mut w = self.writer();

        w.write(XmlEvent::start_element("w:tbl"))?;
        w.write(XmlEvent::start_element("w:tblPr"))?;
        empty_element(&mut w, XmlEvent::start_element("w:tblStyle").attr("w:val", "TableGrid"))?;
        empty_element(
            &mut w,
            XmlEvent::start_element("w:tblW")
                .attr("w:w", "5000")
                .attr("w:type", "pct"),
        )?;
        w.write(XmlEvent::end_element())?;

        w.write(XmlEvent::start_element("w:tblGrid"))?;
        for _ in headers {
            empty_element(&mut w, XmlEvent::start_element("w:gridCol"))?;
        }
        w.write(XmlEvent::end_element())?;

        let header_row: Vec<Cell> = headers
            .iter()
            .map(|header| Cell::text(*header).styled(RunStyle::bold()))
            .collect();
        write_row(&mut w, &header_row, headers.len())?;
        for row in rows {
            write_row(&mut w, row, headers.len())?;
        }

        w.write(XmlEvent::end_element())?;
        Ok(())
    }

    /// Page break followed by a `Heading1` paragraph
    pub fn section_heading(&mut self, text: &str) -> Result<(), EmitterError> {
        let mut w = self.writer();

        w.write(XmlEvent::start_element("w:p"))?;
        w.write(XmlEvent::start_element("w:r"))?;
        empty_element(&mut w, XmlEvent::start_element("w:br").attr("w:type", "page"))?;
        w.write(XmlEvent::end_element())?;
        w.write(XmlEvent::end_element())?;
        drop(w);

        let style = RunStyle {
            size: FONT_SIZE + 4,
            ..RunStyle::default()
        };
        self.styled_paragraph(Some("Heading1"), None, text, style)
    }

    /// `Heading2` paragraph carrying a bookmark other parts can link to
    pub fn bookmarked_heading(&mut self, text: &str, bookmark: &str) -> Result<(), EmitterError> {
        self.styled_paragraph(Some("Heading2"), Some(bookmark), text, RunStyle::default())
    }

    /// Plain paragraph; `\n` in `text` become line breaks
    pub fn paragraph(&mut self, text: &str) -> Result<(), EmitterError> {
        self.styled_paragraph(None, None, text, RunStyle::default())
    }

    fn styled_paragraph(
        &mut self,
        paragraph_style: Option<&str>,
        bookmark: Option<&str>,
        text: &str,
        run_style: RunStyle,
    ) -> Result<(), EmitterError> {
        let bookmark_id = self.next_bookmark_id.to_string();
        if bookmark.is_some() {
            self.next_bookmark_id += 1;
        }
        let mut w = self.writer();

        w.write(XmlEvent::start_element("w:p"))?;
        if let Some(paragraph_style) = paragraph_style {
            w.write(XmlEvent::start_element("w:pPr"))?;
            empty_element(
                &mut w,
                XmlEvent::start_element("w:pStyle").attr("w:val", paragraph_style),
            )?;
            w.write(XmlEvent::end_element())?;
        }
        if let Some(bookmark) = bookmark {
            empty_element(
                &mut w,
                XmlEvent::start_element("w:bookmarkStart")
                    .attr("w:id", &bookmark_id)
                    .attr("w:name", bookmark),
            )?;
        }
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        write_run(&mut w, &lines, run_style)?;
        if bookmark.is_some() {
            empty_element(
                &mut w,
                XmlEvent::start_element("w:bookmarkEnd").attr("w:id", &bookmark_id),
            )?;
        }
        w.write(XmlEvent::end_element())?;
        Ok(())
    }
}

fn empty_element<'e, E>(w: &mut Writer<'_>, element: E) -> Result<(), EmitterError>
where
    E: Into<XmlEvent<'e>>,
{
    w.write(element)?;
    w.write(XmlEvent::end_element())
}

fn write_row(w: &mut Writer<'_>, cells: &[Cell], columns: usize) -> Result<(), EmitterError> {
    w.write(XmlEvent::start_element("w:tr"))?;
    for index in 0..columns {
        let empty = Cell::empty();
        let cell = cells.get(index).unwrap_or(&empty);

        w.write(XmlEvent::start_element("w:tc"))?;
        w.write(XmlEvent::start_element("w:p"))?;
        w.write(XmlEvent::start_element("w:pPr"))?;
        empty_element(w, XmlEvent::start_element("w:ind").attr("w:left", "0"))?;
        empty_element(w, XmlEvent::start_element("w:jc").attr("w:val", "left"))?;
        w.write(XmlEvent::end_element())?;
        write_run(w, &cell.lines, cell.style)?;
        w.write(XmlEvent::end_element())?;
        w.write(XmlEvent::end_element())?;
    }
    w.write(XmlEvent::end_element())
}

fn write_run(w: &mut Writer<'_>, lines: &[String], style: RunStyle) -> Result<(), EmitterError> {
    let half_points = (style.size * 2).to_string();

    w.write(XmlEvent::start_element("w:r"))?;
    w.write(XmlEvent::start_element("w:rPr"))?;
    empty_element(
        w,
        XmlEvent::start_element("w:rFonts")
            .attr("w:ascii", FONT_FAMILY)
            .attr("w:hAnsi", FONT_FAMILY),
    )?;
    if style.bold {
        empty_element(w, XmlEvent::start_element("w:b"))?;
    }
    if let Some(color) = style.color {
        empty_element(w, XmlEvent::start_element("w:color").attr("w:val", color))?;
    }
    empty_element(w, XmlEvent::start_element("w:sz").attr("w:val", &half_points))?;
    w.write(XmlEvent::end_element())?;

    let lines = lines.iter().flat_map(|entry| entry.lines());
    for (index, line) in lines.enumerate() {
        if index > 0 {
            empty_element(w, XmlEvent::start_element("w:br"))?;
        }
        w.write(XmlEvent::start_element("w:t").attr("xml:space", "preserve"))?;
        w.write(XmlEvent::characters(line))?;
        w.write(XmlEvent::end_element())?;
    }

    w.write(XmlEvent::end_element())
}
