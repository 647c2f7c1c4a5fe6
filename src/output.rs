//! Component output
//!
//! Canonical XML serialization of [`Element`] trees, plus the flattened
//! `key: value` form used for HTML meta tags and plain text.

use crate::documents::Element;
use crate::error::{Error, Result};
use crate::namespaces::NamespaceContext;
use quick_xml::escape::{escape, partial_escape};
use serde::Serialize;
use std::fmt::Write;

/// How repeated fields are indexed in HTML and text output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexLevel {
    /// Never index (level 0)
    #[default]
    None,
    /// Index a repeatable field only when it has more than one value (level 1)
    Multiple,
    /// Index every repeatable field, even with a single value (level 2)
    Repeatable,
}

impl IndexLevel {
    /// Parse from the numeric level
    pub fn from_u8(level: u8) -> Result<Self> {
        match level {
            0 => Ok(IndexLevel::None),
            1 => Ok(IndexLevel::Multiple),
            2 => Ok(IndexLevel::Repeatable),
            other => Err(Error::Config(format!(
                "Invalid index level: {}. Must be 0, 1, or 2",
                other
            ))),
        }
    }

    /// The numeric level
    pub fn as_u8(&self) -> u8 {
        match self {
            IndexLevel::None => 0,
            IndexLevel::Multiple => 1,
            IndexLevel::Repeatable => 2,
        }
    }

    /// Index suffix for item `index` (0-based) of `total` values
    pub fn suffix(&self, index: usize, total: usize, repeatable: bool) -> String {
        let indexed = match self {
            IndexLevel::None => false,
            IndexLevel::Multiple => repeatable && total > 1,
            IndexLevel::Repeatable => repeatable,
        };
        if indexed {
            format!("[{}]", index + 1)
        } else {
            String::new()
        }
    }
}

/// One flattened output field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputEntry {
    /// Dotted key, e.g. `recordKeeper.name[1]`
    pub key: String,
    /// Field value
    pub value: String,
}

/// Ordered flattened output of a component tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEntries {
    level: IndexLevel,
    entries: Vec<OutputEntry>,
}

impl OutputEntries {
    /// Create an empty output at the given index level
    pub fn new(level: IndexLevel) -> Self {
        Self {
            level,
            entries: Vec::new(),
        }
    }

    /// The index level in effect
    pub fn level(&self) -> IndexLevel {
        self.level
    }

    /// Index suffix for item `index` of `total`
    pub fn suffix(&self, index: usize, total: usize, repeatable: bool) -> String {
        self.level.suffix(index, total, repeatable)
    }

    /// Add a field; empty values are skipped
    pub fn push(&mut self, key: impl Into<String>, value: impl AsRef<str>) {
        let value = value.as_ref();
        if !value.is_empty() {
            self.entries.push(OutputEntry {
                key: key.into(),
                value: value.to_string(),
            });
        }
    }

    /// Add a repeatable field, indexing each value per the index level
    pub fn push_list(&mut self, key: &str, values: &[String]) {
        for (i, value) in values.iter().enumerate() {
            let suffix = self.suffix(i, values.len(), true);
            self.push(format!("{}{}", key, suffix), value);
        }
    }

    /// The collected entries
    pub fn entries(&self) -> &[OutputEntry] {
        &self.entries
    }

    /// Render as `key: value` lines
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let _ = writeln!(out, "{}: {}", entry.key, entry.value);
        }
        out
    }

    /// Render as HTML meta tags
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "<meta name=\"{}\" content=\"{}\" />",
                escape(entry.key.as_str()),
                escape(entry.value.as_str())
            );
        }
        out
    }
}

/// Serialize an element tree as canonical XML
///
/// Every namespace used in the tree is declared on the root, starting with
/// the root element's own namespace. Attributes and children are written in
/// the order they were added. Elements without content self-close as
/// `<p:name ... />`.
pub fn write_xml(element: &Element) -> String {
    let mut namespaces = NamespaceContext::new();
    collect_namespaces(element, &mut namespaces);

    let mut out = String::new();
    write_element(element, Some(&namespaces), &namespaces, &mut out);
    out
}

fn collect_namespaces(element: &Element, namespaces: &mut NamespaceContext) {
    namespaces.merge(&element.namespaces);
    for child in &element.children {
        collect_namespaces(child, namespaces);
    }
}

fn write_element(
    element: &Element,
    declarations: Option<&NamespaceContext>,
    namespaces: &NamespaceContext,
    out: &mut String,
) {
    let name = element.qualified_name();
    out.push('<');
    out.push_str(&name);

    if let Some(declarations) = declarations {
        for (prefix, uri) in declarations.iter() {
            if prefix.is_empty() {
                let _ = write!(out, " xmlns=\"{}\"", escape(uri));
            } else {
                let _ = write!(out, " xmlns:{}=\"{}\"", prefix, escape(uri));
            }
        }
    }

    for (qname, value) in &element.attributes {
        let prefix = qname.namespace.as_deref().and_then(|ns| {
            element
                .namespaces
                .prefix_for(ns)
                .or_else(|| namespaces.prefix_for(ns))
        });
        match prefix {
            Some(prefix) if !prefix.is_empty() => {
                let _ = write!(out, " {}:{}=\"{}\"", prefix, qname.local_name, escape(value.as_str()));
            }
            _ => {
                let _ = write!(out, " {}=\"{}\"", qname.local_name, escape(value.as_str()));
            }
        }
    }

    if element.text.is_none() && element.children.is_empty() {
        out.push_str(" />");
        return;
    }

    out.push('>');
    if let Some(text) = &element.text {
        out.push_str(&partial_escape(text.as_str()));
    }
    for child in &element.children {
        write_element(child, None, namespaces, out);
    }
    let _ = write!(out, "</{}>", name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DDMS_4: &str = "urn:us:mil:ces:metadata:ddms:4";
    const ISM: &str = "urn:us:gov:ic:ism";

    #[test]
    fn test_index_level_suffixes() {
        assert_eq!(IndexLevel::None.suffix(0, 2, true), "");
        assert_eq!(IndexLevel::Multiple.suffix(0, 1, true), "");
        assert_eq!(IndexLevel::Multiple.suffix(1, 2, true), "[2]");
        assert_eq!(IndexLevel::Repeatable.suffix(0, 1, true), "[1]");
        assert_eq!(IndexLevel::Repeatable.suffix(0, 1, false), "");
        assert!(IndexLevel::from_u8(3).is_err());
    }

    #[test]
    fn test_text_and_html_rendering() {
        let mut out = OutputEntries::new(IndexLevel::Multiple);
        out.push("organization.name", "A&B");
        out.push("organization.acronym", "");
        out.push_list("organization.phone", &["1".to_string(), "2".to_string()]);

        assert_eq!(
            out.to_text(),
            "organization.name: A&B\norganization.phone[1]: 1\norganization.phone[2]: 2\n"
        );
        assert!(out
            .to_html()
            .starts_with("<meta name=\"organization.name\" content=\"A&amp;B\" />\n"));
    }

    #[test]
    fn test_write_self_closing_element() {
        let mut elem = Element::prefixed("ddms", DDMS_4, "identifier");
        elem.set_attribute("ddms", DDMS_4, "qualifier", "URI");
        elem.set_attribute("ddms", DDMS_4, "value", "urn:x");

        assert_eq!(
            write_xml(&elem),
            format!(
                "<ddms:identifier xmlns:ddms=\"{}\" ddms:qualifier=\"URI\" ddms:value=\"urn:x\" />",
                DDMS_4
            )
        );
    }

    #[test]
    fn test_write_declares_all_namespaces_on_root() {
        let mut org = Element::prefixed("ddms", DDMS_4, "organization");
        org.add_text_child("name", "DISA");
        let mut sub = Element::prefixed("ddms", DDMS_4, "subOrganization");
        sub.set_text("sub1 <x>".to_string());
        sub.set_attribute("ism", ISM, "classification", "U");
        org.add_child(sub);

        assert_eq!(
            write_xml(&org),
            format!(
                "<ddms:organization xmlns:ddms=\"{}\" xmlns:ism=\"{}\"><ddms:name>DISA</ddms:name>\
                 <ddms:subOrganization ism:classification=\"U\">sub1 &lt;x&gt;</ddms:subOrganization>\
                 </ddms:organization>",
                DDMS_4, ISM
            )
        );
    }
}
