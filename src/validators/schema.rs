//! Static element descriptors
//!
//! An [`ElementSchema`] names an element per version and lists the
//! attributes and child elements the validation engine checks. Schemas are
//! `'static` tables shared by every construction call.

use crate::versions::{Context, DdmsVersion};

/// Namespace an attribute lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeNamespace {
    /// The DDMS namespace of the active version
    Ddms,
    /// The ISM namespace of the active version
    Ism,
    /// The XLink namespace
    XLink,
}

impl AttributeNamespace {
    /// Namespace URI under a context
    pub fn uri(&self, ctx: &Context) -> &'static str {
        match self {
            AttributeNamespace::Ddms => ctx.version().namespace(),
            AttributeNamespace::Ism => ctx.version().ism_namespace(),
            AttributeNamespace::XLink => ctx.version().xlink_namespace(),
        }
    }

    /// Configured prefix under a context
    pub fn prefix<'a>(&self, ctx: &'a Context) -> &'a str {
        match self {
            AttributeNamespace::Ddms => ctx.ddms_prefix(),
            AttributeNamespace::Ism => ctx.ism_prefix(),
            AttributeNamespace::XLink => ctx.xlink_prefix(),
        }
    }
}

/// An attribute the element may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRule {
    /// Local name
    pub name: &'static str,
    /// Namespace
    pub namespace: AttributeNamespace,
    /// Whether the attribute must be present with a non-empty value
    pub required: bool,
    /// First version allowing the attribute
    pub since: Option<DdmsVersion>,
    /// Last version allowing the attribute
    pub until: Option<DdmsVersion>,
}

impl AttributeRule {
    /// Required DDMS attribute
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            namespace: AttributeNamespace::Ddms,
            required: true,
            since: None,
            until: None,
        }
    }

    /// Optional DDMS attribute
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            namespace: AttributeNamespace::Ddms,
            required: false,
            since: None,
            until: None,
        }
    }

    /// Place the attribute in another namespace
    pub const fn in_namespace(mut self, namespace: AttributeNamespace) -> Self {
        self.namespace = namespace;
        self
    }

    /// Allow the attribute from `version` onward
    pub const fn since(mut self, version: DdmsVersion) -> Self {
        self.since = Some(version);
        self
    }

    /// Allow the attribute up to and including `version`
    pub const fn until(mut self, version: DdmsVersion) -> Self {
        self.until = Some(version);
        self
    }

    /// True if the attribute may appear under `version`
    pub fn is_supported(&self, version: DdmsVersion) -> bool {
        self.since.map_or(true, |v| version.is_at_least(v))
            && self.until.map_or(true, |v| v.is_at_least(version))
    }
}

/// A child element and its cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRule {
    /// Local name (children are always in the DDMS namespace)
    pub name: &'static str,
    /// Minimum occurrences
    pub min: usize,
    /// Maximum occurrences, `None` for unbounded
    pub max: Option<usize>,
    /// First version allowing the child
    pub since: Option<DdmsVersion>,
    /// Version from which the maximum no longer applies
    pub unbounded_since: Option<DdmsVersion>,
    /// Whether the child carries a simple text value
    pub text: bool,
}

impl ChildRule {
    /// Text-valued child with bounds
    pub const fn text(name: &'static str, min: usize, max: Option<usize>) -> Self {
        Self {
            name,
            min,
            max,
            since: None,
            unbounded_since: None,
            text: true,
        }
    }

    /// Nested component child with bounds
    pub const fn component(name: &'static str, min: usize, max: Option<usize>) -> Self {
        Self {
            name,
            min,
            max,
            since: None,
            unbounded_since: None,
            text: false,
        }
    }

    /// Allow the child from `version` onward
    pub const fn since(mut self, version: DdmsVersion) -> Self {
        self.since = Some(version);
        self
    }

    /// Drop the maximum from `version` onward
    pub const fn unbounded_since(mut self, version: DdmsVersion) -> Self {
        self.unbounded_since = Some(version);
        self
    }

    /// Effective maximum under `version`
    pub fn max_for(&self, version: DdmsVersion) -> Option<usize> {
        match self.unbounded_since {
            Some(v) if version.is_at_least(v) => None,
            _ => self.max,
        }
    }
}

/// Static descriptor of one component type
#[derive(Debug, Clone, Copy)]
pub struct ElementSchema {
    /// Local names, each valid from the paired version onward
    pub names: &'static [(DdmsVersion, &'static str)],
    /// First version the element exists in
    pub since: Option<DdmsVersion>,
    /// Own attributes, in output order
    pub attributes: &'static [AttributeRule],
    /// Child elements, in output order
    pub children: &'static [ChildRule],
}

impl ElementSchema {
    /// Local name under `version`
    pub fn name(&self, version: DdmsVersion) -> &'static str {
        self.names
            .iter()
            .rev()
            .find(|(since, _)| version.is_at_least(*since))
            .or_else(|| self.names.first())
            .map(|(_, name)| *name)
            .unwrap_or_default()
    }

    /// True if the element exists under `version`
    pub fn is_supported(&self, version: DdmsVersion) -> bool {
        self.since.map_or(true, |v| version.is_at_least(v))
    }

    /// Look up an attribute rule
    pub fn attribute(&self, name: &str) -> Option<&AttributeRule> {
        self.attributes.iter().find(|rule| rule.name == name)
    }

    /// Look up a child rule
    pub fn child(&self, name: &str) -> Option<&ChildRule> {
        self.children.iter().find(|rule| rule.name == name)
    }
}
