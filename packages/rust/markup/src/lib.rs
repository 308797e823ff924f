//! SVG markup normalization.
//!
//! [`normalize`] parses a document holding a single root element and returns
//! the root's attributes plus its children re-serialized without any
//! namespace information. The input is never modified.
//!
//! Parsing builds an explicit node arena ([`tree`]) from `quick-xml` events;
//! namespace prefixes and `xmlns` declarations are dropped while each node is
//! created, so no later step has to strip them again.

mod tree;

use std::borrow::Cow;

use iconforge_shared::{AttributeMap, IconForgeError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{instrument, trace};

use tree::{Node, NodeId, Tree};

/// Root attribute that never reaches the attribute map.
const RESERVED_ATTRIBUTE: &str = "class";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Result of normalizing one SVG document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedMarkup {
    /// Root attributes in source order, minus namespace declarations and `class`.
    pub attributes: AttributeMap,
    /// Compact serialization of the root's children, namespace-free.
    pub inner: String,
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Parse `document` and extract its root attributes and inner markup.
///
/// Whitespace-only text nodes are dropped, other text is kept verbatim,
/// comments and CDATA keep their original syntax, and processing
/// instructions inside the root are discarded. Malformed input yields
/// [`IconForgeError::Markup`] with the byte offset where parsing stopped.
#[instrument(level = "trace", skip_all, fields(len = document.len()))]
pub fn normalize(document: &str) -> Result<NormalizedMarkup> {
    let (tree, root) = parse_tree(document.trim_start_matches('\u{feff}'))?;

    let attributes = match tree.get(root) {
        Node::Element { attributes, .. } => attributes
            .iter()
            .filter(|(key, _)| key != RESERVED_ATTRIBUTE)
            .cloned()
            .collect(),
        _ => AttributeMap::new(),
    };

    let inner = tree.inner_markup(root);
    trace!(attributes = attributes.len(), inner_len = inner.len(), "normalized markup");

    Ok(NormalizedMarkup { attributes, inner })
}

// ---------------------------------------------------------------------------
// Tree construction
// ---------------------------------------------------------------------------

fn parse_tree(document: &str) -> Result<(Tree, NodeId)> {
    let mut reader = Reader::from_str(document);
    let mut tree = Tree::default();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut root: Option<NodeId> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|e| IconForgeError::markup(e.to_string(), reader.buffer_position() as u64))?;

        match event {
            Event::Start(start) => {
                let id = open_element(&mut tree, &stack, &mut root, &start, position)?;
                stack.push(id);
            }
            Event::Empty(start) => {
                open_element(&mut tree, &stack, &mut root, &start, position)?;
            }
            Event::End(_) => {
                if stack.pop().is_none() {
                    return Err(IconForgeError::markup("unexpected closing tag", position));
                }
            }
            Event::Text(text) => {
                let raw = utf8(&text, position)?;
                text.unescape()
                    .map_err(|e| IconForgeError::markup(e.to_string(), position))?;
                if raw.trim().is_empty() {
                    continue;
                }
                let Some(&parent) = stack.last() else {
                    return Err(IconForgeError::markup(
                        "text outside of the root element",
                        position,
                    ));
                };
                let id = tree.push(Node::Text(raw.into_owned()));
                tree.append_child(parent, id);
            }
            Event::Comment(text) => {
                if let Some(&parent) = stack.last() {
                    let id = tree.push(Node::Comment(utf8(&text, position)?.into_owned()));
                    tree.append_child(parent, id);
                }
            }
            Event::CData(data) => {
                let Some(&parent) = stack.last() else {
                    return Err(IconForgeError::markup(
                        "CDATA outside of the root element",
                        position,
                    ));
                };
                let id = tree.push(Node::CData(utf8(&data, position)?.into_owned()));
                tree.append_child(parent, id);
            }
            Event::Eof => break,
            // Declarations, doctypes and processing instructions carry nothing we emit.
            _ => {}
        }
    }

    if let Some(&open) = stack.last() {
        let name = match tree.get(open) {
            Node::Element { name, .. } => name.as_str(),
            _ => "?",
        };
        return Err(IconForgeError::markup(
            format!("unexpected end of document: <{name}> is not closed"),
            reader.buffer_position() as u64,
        ));
    }

    root.map(|id| (tree, id))
        .ok_or_else(|| IconForgeError::markup("document has no root element", 0))
}

/// Create an element node with namespaces stripped and attach it to the tree.
fn open_element(
    tree: &mut Tree,
    stack: &[NodeId],
    root: &mut Option<NodeId>,
    start: &BytesStart<'_>,
    position: u64,
) -> Result<NodeId> {
    let name = utf8(start.local_name().as_ref(), position)?.into_owned();
    let attributes = local_attributes(start, position)?;

    let id = tree.push(Node::Element {
        name,
        attributes,
        children: Vec::new(),
    });

    match stack.last() {
        Some(&parent) => tree.append_child(parent, id),
        None if root.is_none() => *root = Some(id),
        None => {
            return Err(IconForgeError::markup(
                "document has more than one root element",
                position,
            ));
        }
    }

    Ok(id)
}

/// Attributes keyed by local name, excluding namespace declarations.
///
/// Values are unescaped. Two attributes that collapse onto the same local
/// name (e.g. `href` and `xlink:href`) are rejected.
fn local_attributes(start: &BytesStart<'_>, position: u64) -> Result<Vec<(String, String)>> {
    let mut attributes: Vec<(String, String)> = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| IconForgeError::markup(e.to_string(), position))?;

        if attr.key.as_namespace_binding().is_some() {
            continue;
        }

        let key = utf8(attr.key.local_name().as_ref(), position)?.into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| IconForgeError::markup(e.to_string(), position))?
            .into_owned();

        if attributes.iter().any(|(existing, _)| *existing == key) {
            return Err(IconForgeError::markup(
                format!("duplicate attribute `{key}` after removing namespace prefixes"),
                position,
            ));
        }

        attributes.push((key, value));
    }

    Ok(attributes)
}

fn utf8(bytes: &[u8], position: u64) -> Result<Cow<'_, str>> {
    std::str::from_utf8(bytes)
        .map(Cow::Borrowed)
        .map_err(|e| IconForgeError::markup(format!("invalid UTF-8: {e}"), position))
}
