//! Minimal XML element tree on top of `xml-rs`
//!
//! The scan report formats are small, so the parsers read the whole document
//! into memory and query it by element name. Namespaces are ignored; elements
//! and attributes are matched by local name.

use std::io::Cursor;
use xml::reader::{EventReader, XmlEvent};

/// One element with its attributes, text content and child elements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Text directly inside this element, CDATA included, trimmed
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Trimmed text of the first child called `name`, if non-empty
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name)
            .map(XmlElement::text)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }

    /// All descendants called `name`, in document order
    pub fn descendants<'a>(&'a self, name: &'a str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        for child in &self.children {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }
}

/// Parses a complete document into its root element
pub fn parse_document(content: &[u8]) -> Result<XmlElement, xml::reader::Error> {
    let reader = EventReader::new(Cursor::new(content));
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root = None;

    for event in reader {
        match event? {
            XmlEvent::StartElement {
                name, attributes, ..
            } => stack.push(XmlElement {
                name: name.local_name,
                attributes: attributes
                    .into_iter()
                    .map(|attribute| (attribute.name.local_name, attribute.value))
                    .collect(),
                ..XmlElement::default()
            }),
            XmlEvent::EndElement { .. } => {
                if let Some(element) = stack.pop() {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => root = Some(element),
                    }
                }
            }
            XmlEvent::Characters(text) | XmlEvent::CData(text) | XmlEvent::Whitespace(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            _ => {}
        }
    }

    // EventReader reports unbalanced documents as errors, so a missing root
    // only happens for an empty element stack at EOF.
    Ok(root.unwrap_or_default())
}

/// Local name of the document's root element, or `None` when the content
/// is not XML or has no element before the first parse error
pub fn root_element_name(content: &[u8]) -> Option<String> {
    let reader = EventReader::new(Cursor::new(content));
    for event in reader {
        match event {
            Ok(XmlEvent::StartElement { name, .. }) => return Some(name.local_name),
            Ok(XmlEvent::EndDocument) | Err(_) => return None,
            Ok(_) => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Root xmlns:x="urn:test">
  <License name="MIT" x:kind="global">
    <Content><![CDATA[Permission is hereby granted]]></Content>
  </License>
  <Group>
    <License name="BSD"><Content>  BSD text  </Content></License>
  </Group>
</Root>"#;

    #[test]
    fn test_parse_document_builds_tree() {
        let root = parse_document(SAMPLE.as_bytes()).unwrap();
        assert_eq!(root.name, "Root");

        let licenses = root.descendants("License");
        assert_eq!(licenses.len(), 2);
        assert_eq!(licenses[0].attribute("name"), Some("MIT"));
        assert_eq!(licenses[0].attribute("kind"), Some("global"));
        assert_eq!(
            licenses[0].child_text("Content").as_deref(),
            Some("Permission is hereby granted")
        );
        assert_eq!(licenses[1].child_text("Content").as_deref(), Some("BSD text"));
    }

    #[test]
    fn test_parse_document_rejects_broken_xml() {
        assert!(parse_document(b"<Root><License></Root>").is_err());
    }

    #[test]
    fn test_root_element_name() {
        assert_eq!(root_element_name(SAMPLE.as_bytes()).as_deref(), Some("Root"));
        assert_eq!(root_element_name(b"SPDXVersion: SPDX-2.2"), None);
    }
}
