// crates/wtx-dialect/src/dom.rs

//! Internal element tree built from the `quick-xml` event stream.
//!
//! The WTX dialects keep every value in element attributes and rely on two
//! lookup scopes: document-wide descendant scans and direct-child scans.
//! Neither fits a fixed deserialization schema (type trees nest without
//! bound, and cards may sit anywhere under the root), so the extractors walk
//! this small owned tree instead.

use crate::error::WtxError;
use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// One element of the parsed document: its name, its attributes in
/// declaration order, and its child elements in document order.
///
/// Text, CDATA and comments are not kept; no WTX dialect reads them.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element {
    pub(crate) name: String,
    pub(crate) attributes: IndexMap<String, String>,
    pub(crate) children: Vec<Element>,
}

impl Element {
    /// The attribute's value, if present.
    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The attribute's value, or `""` when the attribute is absent.
    pub(crate) fn attr_or_empty(&self, name: &str) -> String {
        self.attr(name).unwrap_or_default().to_string()
    }

    /// Direct children with the given element name, in document order.
    pub(crate) fn children_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// All descendants with the given element name, in document order
    /// (preorder). The element itself is never included.
    pub(crate) fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_descendants(self, name, &mut found);
        found
    }
}

fn collect_descendants<'a>(element: &'a Element, name: &str, found: &mut Vec<&'a Element>) {
    for child in &element.children {
        if child.name == name {
            found.push(child);
        }
        collect_descendants(child, name, found);
    }
}

/// Parses a document into its root element.
///
/// A single pass over the event stream. The stack of open elements makes
/// unclosed tags and content outside the root detectable even where the
/// reader itself is lenient about fragments.
pub(crate) fn parse_document(content: &str) -> Result<Element, WtxError> {
    let mut reader = Reader::from_str(content);
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                open.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                place(element, &mut open, &mut root)?;
            }
            Event::End(_) => {
                // The reader has already matched the closing name against the
                // opening tag, so an empty stack means a stray closing tag.
                let element = open.pop().ok_or_else(|| {
                    WtxError::MalformedDocument("closing tag without an open element".to_string())
                })?;
                place(element, &mut open, &mut root)?;
            }
            Event::Text(text) if open.is_empty() => {
                // Whitespace around the root is fine; anything else at the
                // top level is not markup.
                if !text.iter().all(|b| b.is_ascii_whitespace()) {
                    return Err(WtxError::MalformedDocument(
                        "content outside the root element".to_string(),
                    ));
                }
            }
            // CDATA and entity references only carry data inside elements.
            Event::CData(_) | Event::GeneralRef(_) if open.is_empty() => {
                return Err(WtxError::MalformedDocument(
                    "content outside the root element".to_string(),
                ));
            }
            // A doctype belongs to the prolog, before the root opens.
            Event::DocType(_) if root.is_some() || !open.is_empty() => {
                return Err(WtxError::MalformedDocument(
                    "misplaced doctype declaration".to_string(),
                ));
            }
            Event::Eof => break,
            // Inner text and CDATA, comments, the XML declaration, PIs, and
            // a prolog doctype.
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(WtxError::MalformedDocument(format!(
            "document ended inside <{}>",
            unclosed.name
        )));
    }
    root.ok_or_else(|| WtxError::MalformedDocument("document has no root element".to_string()))
}

/// Attaches a completed element to its parent, or installs it as the root.
fn place(
    element: Element,
    open: &mut Vec<Element>,
    root: &mut Option<Element>,
) -> Result<(), WtxError> {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_some() {
                return Err(WtxError::MalformedDocument(
                    "more than one root element".to_string(),
                ));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

/// Builds an element (children still empty) from an opening tag.
fn element_from_start(start: &BytesStart<'_>) -> Result<Element, WtxError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attributes = IndexMap::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| {
            WtxError::MalformedDocument(format!("bad attribute in <{}>: {}", name, e))
        })?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| {
                WtxError::MalformedDocument(format!("bad attribute value in <{}>: {}", name, e))
            })?
            .into_owned();
        attributes.insert(key, value);
    }

    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}
