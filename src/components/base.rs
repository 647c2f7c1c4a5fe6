//! Shared component behavior
//!
//! Every component carries a [`ComponentHeader`] and implements
//! [`DdmsComponent`], which supplies XML, HTML and text rendering on top of
//! `to_element` and `write_output`.

use crate::documents::Element;
use crate::error::Result;
use crate::output::{write_xml, IndexLevel, OutputEntries};
use crate::validators::engine::require_same_version;
use crate::validators::{ElementSchema, ValidationWarning};
use crate::versions::{Context, DdmsVersion};
use std::hash::{Hash, Hasher};

/// Name, construction context and warnings of a built component
///
/// Two headers are equal when they name the same element in the same
/// namespace. The context and warnings do not take part in equality.
#[derive(Debug, Clone)]
pub struct ComponentHeader {
    name: &'static str,
    ctx: Context,
    warnings: Vec<ValidationWarning>,
}

impl ComponentHeader {
    pub(crate) fn new(name: &'static str, ctx: &Context, warnings: Vec<ValidationWarning>) -> Self {
        tracing::debug!(
            element = name,
            version = %ctx.version(),
            warnings = warnings.len(),
            "component constructed"
        );
        Self {
            name,
            ctx: ctx.clone(),
            warnings,
        }
    }

    /// Local name of the element
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Context the component was built under
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Warnings collected during construction
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// `prefix:name` using the configured DDMS prefix
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.ctx.ddms_prefix(), self.name)
    }

    /// An empty element carrying this component's name
    pub(crate) fn element(&self) -> Element {
        Element::prefixed(self.ctx.ddms_prefix(), self.ctx.version().namespace(), self.name)
    }
}

impl PartialEq for ComponentHeader {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.ctx.version().namespace() == other.ctx.version().namespace()
    }
}

impl Eq for ComponentHeader {}

impl Hash for ComponentHeader {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.ctx.version().namespace().hash(state);
    }
}

/// Behavior shared by every bindable component
pub trait DdmsComponent {
    /// The component's header
    fn header(&self) -> &ComponentHeader;

    /// Rebuild the canonical element for this component
    fn to_element(&self) -> Element;

    /// Add this component's fields to flattened output
    ///
    /// Keys start with `prefix`, then the element name and `suffix`.
    fn write_output(&self, out: &mut OutputEntries, prefix: &str, suffix: &str);

    /// Local name of the element
    fn name(&self) -> &'static str {
        self.header().name()
    }

    /// `prefix:name` of the element
    fn qualified_name(&self) -> String {
        self.header().qualified_name()
    }

    /// Version the component was built under
    fn version(&self) -> DdmsVersion {
        self.header().context().version()
    }

    /// Non-fatal findings collected during construction
    fn validation_warnings(&self) -> &[ValidationWarning] {
        self.header().warnings()
    }

    /// Canonical XML
    fn to_xml(&self) -> String {
        write_xml(&self.to_element())
    }

    /// Flattened output at an index level
    fn output(&self, level: IndexLevel) -> OutputEntries {
        let mut out = OutputEntries::new(level);
        self.write_output(&mut out, "", "");
        out
    }

    /// HTML meta tags
    fn to_html(&self, level: IndexLevel) -> String {
        self.output(level).to_html()
    }

    /// Plain `key: value` lines
    fn to_text(&self, level: IndexLevel) -> String {
        self.output(level).to_text()
    }
}

/// An empty element named per `schema` under `ctx`
pub(crate) fn schema_element(schema: &ElementSchema, ctx: &Context) -> Element {
    Element::prefixed(
        ctx.ddms_prefix(),
        ctx.version().namespace(),
        schema.name(ctx.version()),
    )
}

/// Key prefix for a component's own fields
pub(crate) fn key_base(prefix: &str, name: &str, suffix: &str) -> String {
    format!("{}{}{}", prefix, name, suffix)
}

/// Warnings of nested components, re-rooted under the parent element
pub(crate) fn nested_warnings<'a, C, I>(parent: &Element, children: I) -> Vec<ValidationWarning>
where
    C: DdmsComponent + 'a,
    I: IntoIterator<Item = &'a C>,
{
    let parent_name = parent.qualified_name();
    children
        .into_iter()
        .flat_map(|child| child.validation_warnings().iter().map(|w| w.under(&parent_name)))
        .collect()
}

/// Fail if a nested component was built under a different version than `ctx`
pub(crate) fn require_child_version<C: DdmsComponent>(ctx: &Context, child: &C) -> Result<()> {
    require_same_version(ctx.version(), child.version(), &child.qualified_name())
}
