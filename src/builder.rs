//! Streaming feature-tree builder
//!
//! Consumes an XML byte stream event-by-event, checking every element
//! against the supplied [`SchemaSet`] and incrementally constructing the
//! feature tree on an explicit stack of in-progress nodes. A node is
//! finalized on its end tag, so no partially-built node is ever observable.
//!
//! XML attributes (other than namespace and `xsi:` machinery) surface as
//! leading leaf children of their element, which keeps identity (`gml:id`)
//! and references (`xlink:href`) reachable through the uniform child-lookup
//! API.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Gml2RdfError, Result};
use crate::feature::{Attribute, ComplexFeature, SimpleAttribute};
use crate::schema::SchemaSet;

/// Schema-validating streaming parser producing a single root feature
pub struct FeatureTreeBuilder<'s> {
    schema: &'s SchemaSet,
}

/// An in-progress node on the builder stack
struct Frame {
    type_name: String,
    local_name: String,
    children: Vec<Attribute>,
    /// How many leading children came from XML attributes
    attr_count: usize,
    text: String,
}

impl<'s> FeatureTreeBuilder<'s> {
    /// Create a builder validating against `schema`
    pub fn new(schema: &'s SchemaSet) -> Self {
        Self { schema }
    }

    /// Parse a complete document into its root feature
    ///
    /// Fails with [`Gml2RdfError::MalformedInput`] on any well-formedness or
    /// schema violation; no partial tree is returned.
    pub fn parse(&self, input: &[u8]) -> Result<ComplexFeature> {
        let text = std::str::from_utf8(input)
            .map_err(|e| Gml2RdfError::malformed(format!("input is not valid UTF-8: {e}")))?;
        let mut reader = Reader::from_str(text);

        let mut frames: Vec<Frame> = Vec::new();
        let mut scopes: Vec<HashMap<String, String>> = Vec::new();
        let mut root: Option<ComplexFeature> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    if root.is_some() {
                        return Err(Gml2RdfError::malformed(
                            "content after the document element",
                        ));
                    }
                    scopes.push(collect_namespace_decls(e));
                    frames.push(self.open_frame(e, &scopes)?);
                }
                Ok(Event::Empty(ref e)) => {
                    if root.is_some() {
                        return Err(Gml2RdfError::malformed(
                            "content after the document element",
                        ));
                    }
                    scopes.push(collect_namespace_decls(e));
                    let frame = self.open_frame(e, &scopes)?;
                    scopes.pop();
                    Self::attach(finalize(frame), &mut frames, &mut root);
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(frame) = frames.last_mut() {
                        let unescaped = e.unescape().map_err(|err| {
                            Gml2RdfError::malformed(format!("invalid character data: {err}"))
                        })?;
                        frame.text.push_str(&unescaped);
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if let Some(frame) = frames.last_mut() {
                        frame.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                }
                Ok(Event::End(ref e)) => {
                    let frame = frames.pop().ok_or_else(|| {
                        Gml2RdfError::malformed("end tag without matching start tag")
                    })?;
                    let (_, local) = split_qname(e.name().as_ref());
                    if local != frame.local_name {
                        return Err(Gml2RdfError::malformed(format!(
                            "mismatched end tag: expected </{}>, found </{}>",
                            frame.local_name, local
                        )));
                    }
                    scopes.pop();
                    Self::attach(finalize(frame), &mut frames, &mut root);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(Gml2RdfError::malformed(format!("XML parse error: {e}")));
                }
            }
        }

        if !frames.is_empty() {
            return Err(Gml2RdfError::malformed(format!(
                "unexpected end of document: {} element(s) left open",
                frames.len()
            )));
        }
        root.ok_or_else(|| Gml2RdfError::malformed("document has no root element"))
    }

    /// Open a frame for an element start tag, checking it against the schema
    fn open_frame(&self, e: &BytesStart, scopes: &[HashMap<String, String>]) -> Result<Frame> {
        let (prefix, local) = split_qname(e.name().as_ref());
        let ns = resolve_prefix(&prefix, scopes).ok_or_else(|| {
            Gml2RdfError::malformed(format!("undeclared namespace prefix: {prefix}"))
        })?;

        let type_name = self.schema.element_type(&ns, &local).ok_or_else(|| {
            Gml2RdfError::malformed(format!(
                "element {{{ns}}}{local} is not declared by the schema"
            ))
        })?;

        let children = attribute_children(e);
        let attr_count = children.len();
        Ok(Frame {
            type_name,
            local_name: local,
            children,
            attr_count,
            text: String::new(),
        })
    }

    /// Append a finalized node to its parent, or set it as the root
    fn attach(node: Attribute, frames: &mut Vec<Frame>, root: &mut Option<ComplexFeature>) {
        match frames.last_mut() {
            Some(parent) => parent.children.push(node),
            None => {
                *root = Some(match node {
                    Attribute::Complex(c) => c,
                    // A text-only document element still yields a complex
                    // root, holding its value as a single leaf child
                    Attribute::Simple(s) => ComplexFeature::new(
                        s.type_name.clone(),
                        s.local_name.clone(),
                        vec![Attribute::Simple(s)],
                    ),
                });
            }
        }
    }
}

/// Freeze an in-progress frame into a tree node
///
/// An element with element children is complex. A childless, attribute-free
/// element with character data is a leaf. An attribute-bearing element with
/// character data (GML CodeType and friends) becomes a complex node whose
/// attribute children are followed by a self-named leaf holding the text,
/// reachable via [`Attribute::lexical_value`]. Anything else is a complex
/// node carrying just its attribute children.
fn finalize(frame: Frame) -> Attribute {
    let has_element_children = frame.children.len() > frame.attr_count;
    let text = frame.text.trim();
    if has_element_children || text.is_empty() {
        return Attribute::Complex(ComplexFeature::new(
            frame.type_name,
            frame.local_name,
            frame.children,
        ));
    }
    if frame.attr_count == 0 {
        return Attribute::Simple(SimpleAttribute::new(
            frame.type_name,
            frame.local_name,
            text,
        ));
    }
    let mut children = frame.children;
    children.push(Attribute::Simple(SimpleAttribute::new(
        frame.type_name.clone(),
        frame.local_name.clone(),
        text,
    )));
    Attribute::Complex(ComplexFeature::new(
        frame.type_name,
        frame.local_name,
        children,
    ))
}

/// Split a qualified XML name into (prefix, local)
fn split_qname(name: &[u8]) -> (String, String) {
    let name = String::from_utf8_lossy(name);
    match name.find(':') {
        Some(pos) => (name[..pos].to_string(), name[pos + 1..].to_string()),
        None => (String::new(), name.to_string()),
    }
}

/// Collect the xmlns declarations of one element
///
/// The default namespace is stored under the empty prefix.
fn collect_namespace_decls(e: &BytesStart) -> HashMap<String, String> {
    let mut decls = HashMap::new();
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = String::from_utf8_lossy(&attr.value).to_string();
        if key == "xmlns" {
            decls.insert(String::new(), value);
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            decls.insert(prefix.to_string(), value);
        }
    }
    decls
}

/// Resolve a prefix against the in-scope namespace declarations
///
/// Innermost declaration wins. An unprefixed name with no default namespace
/// in scope resolves to the empty namespace.
fn resolve_prefix(prefix: &str, scopes: &[HashMap<String, String>]) -> Option<String> {
    for scope in scopes.iter().rev() {
        if let Some(ns) = scope.get(prefix) {
            return Some(ns.clone());
        }
    }
    if prefix.is_empty() {
        Some(String::new())
    } else {
        None
    }
}

/// Materialize an element's XML attributes as leading leaf children
///
/// Namespace declarations and `xsi:` machinery are dropped; everything else
/// (notably `gml:id` and `xlink:href`) is kept under its local name.
fn attribute_children(e: &BytesStart) -> Vec<Attribute> {
    let mut children = Vec::new();
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        if key == "xmlns" || key.starts_with("xmlns:") || key.starts_with("xsi:") {
            continue;
        }
        let (_, local) = split_qname(key.as_bytes());
        let value = String::from_utf8_lossy(&attr.value).to_string();
        children.push(Attribute::Simple(SimpleAttribute::new(
            local.clone(),
            local,
            value,
        )));
    }
    children
}
