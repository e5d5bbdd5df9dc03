//! Minimal XML element tree.
//!
//! The builders work on a materialized element tree rather than on the raw
//! event stream. This module folds `quick-xml` events into [`XmlElement`]
//! nodes (name, attributes, child elements). Text content, comments and
//! processing instructions are dropped because nothing in URDF reads them.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Result, UrdfError};

/// One element with its attributes and child elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an element with no attributes or children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Add a child element.
    #[must_use]
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unescaped value of an attribute, if present.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All child elements in document order.
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// First child element, whatever its name.
    pub fn first_child(&self) -> Option<&XmlElement> {
        self.children.first()
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// Parse a complete document and return its root element.
///
/// # Errors
///
/// Returns [`UrdfError::MalformedDocument`] if the text is not well-formed,
/// has no root element, or has more than one.
pub fn parse_document(xml: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => stack.push(element_from_start(e)?),
            Ok(Event::Empty(ref e)) => {
                let element = element_from_start(e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(ref e)) => {
                let element = stack.pop().ok_or_else(|| {
                    UrdfError::malformed(format!(
                        "unmatched closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(ref t)) if stack.is_empty() && !t.is_empty() => {
                return Err(UrdfError::malformed(format!(
                    "text outside the root element at byte {}",
                    reader.buffer_position()
                )));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(UrdfError::malformed(format!(
                    "{e} (at byte {})",
                    reader.buffer_position()
                )));
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(UrdfError::malformed(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| UrdfError::malformed("document has no root element"))
}

/// Attach a completed element to its parent, or make it the root.
fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(UrdfError::malformed(format!(
            "multiple root elements (second is <{}>)",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn element_from_start(e: &BytesStart) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = Vec::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| {
            UrdfError::malformed(format!("bad attribute on <{name}>: {err}"))
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| {
                UrdfError::malformed(format!("bad value for attribute '{key}' on <{name}>: {err}"))
            })?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_nested() {
        let root = parse_document(
            r#"<?xml version="1.0"?>
            <robot name="r">
                <!-- comment -->
                <link name="a"><visual/></link>
                <link name="b"/>
            </robot>"#,
        )
        .expect("should parse");

        assert_eq!(root.name(), "robot");
        assert_eq!(root.attribute("name"), Some("r"));
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children_named("link").count(), 2);

        let a = root.child("link").expect("link a");
        assert_eq!(a.attribute("name"), Some("a"));
        assert_eq!(a.first_child().map(XmlElement::name), Some("visual"));
    }

    #[test]
    fn test_attribute_unescaped() {
        let root = parse_document(r#"<robot name="a &amp; b"/>"#).expect("should parse");
        assert_eq!(root.attribute("name"), Some("a & b"));
        assert_eq!(root.attribute("missing"), None);
    }

    #[test]
    fn test_mismatched_tags() {
        let err = parse_document("<robot><link></robot>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
    }

    #[test]
    fn test_unclosed_root() {
        let err = parse_document("<robot><link/>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
    }

    #[test]
    fn test_empty_document() {
        let err = parse_document("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
    }

    #[test]
    fn test_two_roots() {
        let err = parse_document("<robot/><robot/>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
    }

    #[test]
    fn test_builder() {
        let el = XmlElement::new("sphere").with_attribute("radius", "0.5");
        let geometry = XmlElement::new("geometry").with_child(el);
        assert_eq!(
            geometry.child("sphere").and_then(|s| s.attribute("radius")),
            Some("0.5")
        );
    }
}
