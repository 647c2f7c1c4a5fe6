//! XML namespace handling
//!
//! This module provides qualified names (QNames), namespace prefix mappings
//! and the namespace URIs that do not vary between DDMS versions.

use indexmap::IndexMap;

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// XLink namespace (identical in every DDMS version)
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }
}

/// Ordered prefix-to-namespace mappings
///
/// Insertion order is preserved so namespace declarations render
/// deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceContext {
    prefixes: IndexMap<Prefix, NamespaceUri>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace prefix mapping; an existing prefix keeps its first URI
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes
            .entry(prefix.into())
            .or_insert_with(|| namespace.into());
    }

    /// Get the first prefix bound to a namespace
    pub fn prefix_for(&self, namespace: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|(_, uri)| uri.as_str() == namespace)
            .map(|(prefix, _)| prefix.as_str())
    }

    /// Merge another context into this one, keeping existing bindings
    pub fn merge(&mut self, other: &NamespaceContext) {
        for (prefix, uri) in other.iter() {
            self.add_prefix(prefix, uri);
        }
    }

    /// Iterate over (prefix, namespace) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// True if there are no bindings
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qname_creation() {
        let qname = QName::namespaced("urn:us:mil:ces:metadata:ddms:4", "identifier");
        assert_eq!(
            qname.namespace,
            Some("urn:us:mil:ces:metadata:ddms:4".to_string())
        );
        assert_eq!(qname.local_name, "identifier");
    }

    #[test]
    fn test_namespace_context_keeps_first_binding() {
        let mut ctx = NamespaceContext::new();
        ctx.add_prefix("ddms", "urn:one");
        ctx.add_prefix("ism", "urn:us:gov:ic:ism");
        ctx.add_prefix("ddms", "urn:two");

        assert_eq!(ctx.prefix_for("urn:one"), Some("ddms"));
        assert_eq!(ctx.prefix_for("urn:two"), None);
        assert_eq!(ctx.prefix_for("urn:us:gov:ic:ism"), Some("ism"));
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_merge_preserves_order() {
        let mut a = NamespaceContext::new();
        a.add_prefix("ddms", "urn:ddms");
        let mut b = NamespaceContext::new();
        b.add_prefix("xlink", XLINK_NAMESPACE);
        b.add_prefix("ddms", "urn:other");
        a.merge(&b);

        let prefixes: Vec<_> = a.iter().map(|(p, _)| p).collect();
        assert_eq!(prefixes, vec!["ddms", "xlink"]);
        assert_eq!(a.prefix_for("urn:ddms"), Some("ddms"));
        assert_eq!(a.prefix_for("urn:other"), None);
    }
}
