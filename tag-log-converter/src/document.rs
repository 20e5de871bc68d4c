//! In-memory XML document model
//!
//! The converter operates on one whole document at a time, so the input is
//! parsed into a plain element tree in a single pass and then queried with
//! a handful of accessors. The accessors implement the read-with-default
//! policy used throughout the converter: an absent or unparseable optional
//! field resolves to its documented default, never to an error. Only a
//! structurally malformed document fails, and it fails the whole parse.

use crate::types::{ConverterError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::str::FromStr;

/// One element of the parsed document: tag name, accumulated text and
/// child elements in document order. Attributes are not used by any
/// conversion rule and are dropped at parse time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Tag name
    pub name: String,
    /// Concatenated character data directly inside this element
    pub text: String,
    /// Child elements in document order
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn new(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// First direct child with the given tag name, if any.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Direct children with the given tag name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// All descendants with the given tag name, at any depth, in document
    /// order. The element itself is never included.
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
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

    /// Text of the first direct child with the given tag name, or the
    /// empty string when the child is absent or has no text.
    pub fn child_text(&self, name: &str) -> String {
        self.child(name).map(|c| c.text.clone()).unwrap_or_default()
    }

    /// Parsed text of the first direct child with the given tag name.
    ///
    /// Resolves to `default` when the child is absent, empty, or its text
    /// does not parse as `T`. This single helper covers every optional
    /// numeric field in the document.
    pub fn child_parse_or<T: FromStr>(&self, name: &str, default: T) -> T {
        self.child(name)
            .and_then(|c| c.text.trim().parse().ok())
            .unwrap_or(default)
    }
}

/// Parse a complete XML document into an element tree.
///
/// # Arguments
/// * `xml` - The full document text
///
/// # Returns
/// * `Result<XmlElement>` - The root element, or an error if the document
///   is not well-formed
pub fn parse_document(xml: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    let config = reader.config_mut();
    config.trim_text(true);
    config.check_end_names = true;

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(ConverterError::MalformedDocument(
                        "content after the root element".to_string(),
                    ));
                }
                stack.push(XmlElement::new(tag_name(&start)));
            }
            Event::Empty(start) => {
                let element = XmlElement::new(tag_name(&start));
                attach(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| ConverterError::MalformedDocument(e.to_string()))?;
                    current.text.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    ConverterError::MalformedDocument("unexpected closing tag".to_string())
                })?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and DTDs
            // carry no conversion-relevant data
            _ => {}
        }
    }

    if let Some(unclosed) = stack.last() {
        return Err(ConverterError::MalformedDocument(format!(
            "unclosed element <{}>",
            unclosed.name
        )));
    }

    root.ok_or(ConverterError::EmptyDocument)
}

fn tag_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

/// Attach a completed element to its parent, or install it as the root.
fn attach(
    element: XmlElement,
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_some() {
                return Err(ConverterError::MalformedDocument(
                    "content after the root element".to_string(),
                ));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_document() {
        let xml = r#"
            <file>
                <ALL_INSTANCES>
                    <instance>
                        <code>Goal</code>
                        <start>5.0</start>
                    </instance>
                </ALL_INSTANCES>
            </file>
        "#;

        let root = parse_document(xml).unwrap();
        assert_eq!(root.name, "file");

        let instances = root.descendants("instance");
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].child_text("code"), "Goal");
    }

    #[test]
    fn test_descendants_any_depth_in_document_order() {
        let xml = r#"
            <root>
                <row><code>A</code></row>
                <group>
                    <row><code>B</code></row>
                </group>
                <row><code>C</code></row>
            </root>
        "#;

        let root = parse_document(xml).unwrap();
        let codes: Vec<String> = root
            .descendants("row")
            .iter()
            .map(|r| r.child_text("code"))
            .collect();
        assert_eq!(codes, ["A", "B", "C"]);
    }

    #[test]
    fn test_children_named_is_direct_only() {
        let xml = r#"
            <instance>
                <label><text>direct</text></label>
                <wrapper>
                    <label><text>nested</text></label>
                </wrapper>
            </instance>
        "#;

        let root = parse_document(xml).unwrap();
        let labels: Vec<&XmlElement> = root.children_named("label").collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].child_text("text"), "direct");
    }

    #[test]
    fn test_child_text_defaults_to_empty() {
        let root = parse_document("<row><code>Goal</code></row>").unwrap();
        assert_eq!(root.child_text("code"), "Goal");
        assert_eq!(root.child_text("missing"), "");
    }

    #[test]
    fn test_child_parse_or_handles_missing_and_malformed() {
        let root =
            parse_document("<row><R>65535</R><G>not-a-number</G><F>1.25</F></row>").unwrap();
        assert_eq!(root.child_parse_or("R", 32767u16), 65535);
        assert_eq!(root.child_parse_or("G", 32767u16), 32767);
        assert_eq!(root.child_parse_or("B", 32767u16), 32767);
        assert_eq!(root.child_parse_or("F", 0.0f64), 1.25);
    }

    #[test]
    fn test_text_entities_are_unescaped() {
        let root = parse_document("<row><code>Shot &amp; Goal</code></row>").unwrap();
        assert_eq!(root.child_text("code"), "Shot & Goal");
    }

    #[test]
    fn test_empty_element_form() {
        let root = parse_document("<file><instance><code/></instance></file>").unwrap();
        let instance = root.child("instance").unwrap();
        assert!(instance.child("code").is_some());
        assert_eq!(instance.child_text("code"), "");
    }

    #[test]
    fn test_malformed_document_fails() {
        assert!(parse_document("<file><row></file>").is_err());
        assert!(parse_document("<file>").is_err());
        assert!(parse_document("not xml at all").is_err());
        assert!(parse_document("").is_err());
    }

    #[test]
    fn test_content_after_root_fails() {
        assert!(parse_document("<a></a><b></b>").is_err());
    }
}
