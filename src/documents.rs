//! XML element tree and document parsing
//!
//! [`Element`] is the parsed-element input every component is constructed
//! from. Elements come either from [`Document`] parsing or from component
//! data constructors, which build them programmatically.

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::{NamespaceContext, QName};
use indexmap::IndexMap;

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element qualified name
    pub qname: QName,
    /// Prefix the element name is written with
    pub prefix: Option<String>,
    /// Element attributes, in document order
    pub attributes: IndexMap<QName, String>,
    /// Text content, if any non-whitespace text is present
    pub text: Option<String>,
    /// Child elements, in document order
    pub children: Vec<Element>,
    /// Prefix bindings used by this element's name and attributes
    pub namespaces: NamespaceContext,
}

impl Element {
    /// Create a new element
    pub fn new(qname: QName) -> Self {
        Self {
            qname,
            prefix: None,
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
            namespaces: NamespaceContext::new(),
        }
    }

    /// Create a namespaced element written with a prefix
    pub fn prefixed(prefix: &str, namespace: &str, local_name: &str) -> Self {
        let mut element = Self::new(QName::namespaced(namespace, local_name));
        element.prefix = Some(prefix.to_string());
        element.namespaces.add_prefix(prefix, namespace);
        element
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.qname.local_name
    }

    /// Get the namespace of the element
    pub fn namespace(&self) -> Option<&str> {
        self.qname.namespace.as_deref()
    }

    /// Get the name as written, e.g. `ddms:identifier`
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, self.qname.local_name),
            _ => self.qname.local_name.clone(),
        }
    }

    /// Get an attribute value by namespace and local name
    pub fn get_attribute(&self, namespace: Option<&str>, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(qname, _)| {
                qname.local_name == local_name && qname.namespace.as_deref() == namespace
            })
            .map(|(_, value)| value.as_str())
    }

    /// Set a namespaced attribute, binding its prefix on this element
    pub fn set_attribute(&mut self, prefix: &str, namespace: &str, local_name: &str, value: impl Into<String>) {
        self.namespaces.add_prefix(prefix, namespace);
        self.attributes
            .insert(QName::namespaced(namespace, local_name), value.into());
    }

    /// Set an attribute only when the value is present and non-empty
    pub fn set_optional_attribute(&mut self, prefix: &str, namespace: &str, local_name: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.set_attribute(prefix, namespace, local_name, value);
        }
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Add a `<prefix:local>text</prefix:local>` child in this element's namespace
    pub fn add_text_child(&mut self, local_name: &str, text: &str) {
        let prefix = self.prefix.clone().unwrap_or_default();
        let namespace = self.namespace().unwrap_or_default().to_string();
        let mut child = Element::prefixed(&prefix, &namespace, local_name);
        child.set_text(text.to_string());
        self.add_child(child);
    }

    /// Set text content
    pub fn set_text(&mut self, text: String) {
        self.text = if text.is_empty() { None } else { Some(text) };
    }

    /// Text content, or "" when absent
    pub fn text_value(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// True if this element has nested child elements
    pub fn has_child_elements(&self) -> bool {
        !self.children.is_empty()
    }

    /// Find child elements by namespace and local name
    pub fn find_children(&self, namespace: Option<&str>, local_name: &str) -> Vec<&Element> {
        self.children
            .iter()
            .filter(|e| e.local_name() == local_name && e.namespace() == namespace)
            .collect()
    }

    /// Find the first child element by namespace and local name
    pub fn find_child(&self, namespace: Option<&str>, local_name: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|e| e.local_name() == local_name && e.namespace() == namespace)
    }

    /// Text values of all matching children, in document order
    pub fn child_texts(&self, namespace: Option<&str>, local_name: &str) -> Vec<String> {
        self.find_children(namespace, local_name)
            .into_iter()
            .map(|e| e.text_value().to_string())
            .collect()
    }
}

/// XML Document representation
#[derive(Debug)]
pub struct Document {
    /// Root element of the document
    pub root: Element,
}

impl Document {
    /// Parse an XML document from a string with default limits
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse_with_limits(xml, &Limits::default())
    }

    /// Parse an XML document from a string, enforcing the given limits
    pub fn parse_with_limits(xml: &str, limits: &Limits) -> Result<Self> {
        limits.check_xml_size(xml.len())?;

        let options = roxmltree::ParsingOptions {
            allow_dtd: false,
            nodes_limit: limits.max_nodes,
            ..Default::default()
        };
        let doc = roxmltree::Document::parse_with_options(xml, options)?;
        let root = Self::convert(doc.root_element(), limits, 1)?;
        tracing::trace!(root = %root.qualified_name(), "parsed XML document");
        Ok(Document { root })
    }

    /// Convert a roxmltree element node into an [`Element`]
    fn convert(node: roxmltree::Node<'_, '_>, limits: &Limits, depth: usize) -> Result<Element> {
        limits.check_xml_depth(depth)?;

        let tag = node.tag_name();
        let mut element = Element::new(QName::new(tag.namespace(), tag.name()));
        if let Some(ns) = tag.namespace() {
            let prefix = node.lookup_prefix(ns).unwrap_or("");
            element.namespaces.add_prefix(prefix, ns);
            if !prefix.is_empty() {
                element.prefix = Some(prefix.to_string());
            }
        }

        let mut count = 0;
        for attr in node.attributes() {
            count += 1;
            let qname = QName::new(attr.namespace(), attr.name());
            if let Some(ns) = attr.namespace() {
                let prefix = node.lookup_prefix(ns).ok_or_else(|| {
                    Error::Xml(format!("No prefix bound for attribute namespace: {}", ns))
                })?;
                element.namespaces.add_prefix(prefix, ns);
            }
            element.attributes.insert(qname, attr.value().to_string());
        }
        limits.check_attributes(count)?;

        let mut text = String::new();
        for child in node.children() {
            if child.is_element() {
                element.add_child(Self::convert(child, limits, depth + 1)?);
            } else if child.is_text() {
                text.push_str(child.text().unwrap_or(""));
            }
        }
        if !text.trim().is_empty() {
            element.text = Some(text);
        }

        Ok(element)
    }

    /// Get the root element
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Take ownership of the root element
    pub fn into_root(self) -> Element {
        self.root
    }
}
