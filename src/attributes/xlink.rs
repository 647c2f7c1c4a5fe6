//! XLink attributes
//!
//! The XLink attribute group used by links (locator type) and revision
//! recalls (resource type).

use crate::builder::is_blank;
use crate::documents::Element;
use crate::error::{invalid, ErrorKind, Result};
use crate::output::OutputEntries;
use crate::validators::engine::require_value;
use crate::validators::values::{require_token, require_valid_uri};
use crate::versions::Context;
use std::fmt;

const SHOW_TYPES: &[&str] = &["new", "replace", "embed", "other", "none"];
const ACTUATE_TYPES: &[&str] = &["onLoad", "onRequest", "other", "none"];

/// Value of the `xlink:type` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XLinkType {
    /// simple
    Simple,
    /// locator
    Locator,
    /// resource
    Resource,
}

impl XLinkType {
    /// Parse from the attribute value
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "simple" => Ok(XLinkType::Simple),
            "locator" => Ok(XLinkType::Locator),
            "resource" => Ok(XLinkType::Resource),
            other => invalid(
                ErrorKind::Value,
                format!("{} is not a valid value for the type attribute.", other),
            ),
        }
    }

    /// Get the type as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            XLinkType::Simple => "simple",
            XLinkType::Locator => "locator",
            XLinkType::Resource => "resource",
        }
    }
}

impl fmt::Display for XLinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The XLink attribute group
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct XLinkAttributes {
    link_type: Option<XLinkType>,
    href: Option<String>,
    role: Option<String>,
    title: Option<String>,
    label: Option<String>,
    arcrole: Option<String>,
    show: Option<String>,
    actuate: Option<String>,
}

impl XLinkAttributes {
    /// Read and validate the group from an element's XLink attributes
    pub fn from_element(element: &Element, ctx: &Context) -> Result<Self> {
        let ns = Some(ctx.version().xlink_namespace());
        let get = |name: &str| {
            element
                .get_attribute(ns, name)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let attributes = Self {
            link_type: get("type").map(|t| XLinkType::from_str(&t)).transpose()?,
            href: get("href"),
            role: get("role"),
            title: get("title"),
            label: get("label"),
            arcrole: get("arcrole"),
            show: get("show"),
            actuate: get("actuate"),
        };
        attributes.validate()?;
        Ok(attributes)
    }

    /// A locator: `href` is required, the rest optional
    pub fn locator(href: &str, role: Option<&str>, title: Option<&str>, label: Option<&str>, ctx: &Context) -> Result<Self> {
        XLinkAttributesBuilder {
            link_type: XLinkType::Locator.as_str().to_string(),
            href: href.to_string(),
            role: role.unwrap_or_default().to_string(),
            title: title.unwrap_or_default().to_string(),
            label: label.unwrap_or_default().to_string(),
            ..Default::default()
        }
        .commit(ctx)
    }

    /// A resource: role, title and label are optional
    pub fn resource(role: Option<&str>, title: Option<&str>, label: Option<&str>, ctx: &Context) -> Result<Self> {
        XLinkAttributesBuilder {
            link_type: XLinkType::Resource.as_str().to_string(),
            role: role.unwrap_or_default().to_string(),
            title: title.unwrap_or_default().to_string(),
            label: label.unwrap_or_default().to_string(),
            ..Default::default()
        }
        .commit(ctx)
    }

    fn validate(&self) -> Result<()> {
        if let Some(href) = &self.href {
            require_valid_uri(href)?;
        }
        if let Some(role) = &self.role {
            require_valid_uri(role)?;
        }
        if let Some(arcrole) = &self.arcrole {
            require_valid_uri(arcrole)?;
        }
        if let Some(show) = &self.show {
            require_token("show", show, SHOW_TYPES)?;
        }
        if let Some(actuate) = &self.actuate {
            require_token("actuate", actuate, ACTUATE_TYPES)?;
        }
        if self.link_type == Some(XLinkType::Locator) {
            require_value("href attribute", self.href.as_deref().unwrap_or_default())?;
        }
        Ok(())
    }

    /// Fail unless the type is `expected`; an absent type fails only when `required`
    pub fn require_type(&self, expected: XLinkType, required: bool) -> Result<()> {
        match self.link_type {
            Some(actual) if actual == expected => Ok(()),
            None if !required => Ok(()),
            _ => invalid(
                ErrorKind::Value,
                format!(
                    "The type attribute must have a fixed value of \"{}\".",
                    expected
                ),
            ),
        }
    }

    /// Write the group's attributes onto an element
    pub fn apply_to(&self, element: &mut Element, ctx: &Context) {
        let prefix = ctx.xlink_prefix();
        let ns = ctx.version().xlink_namespace();
        element.set_optional_attribute(prefix, ns, "type", self.link_type.map(|t| t.as_str()));
        for (name, value) in self.named_values() {
            element.set_optional_attribute(prefix, ns, name, value);
        }
    }

    /// Add the group's fields to flattened output
    pub fn write_output(&self, out: &mut OutputEntries, prefix: &str) {
        if let Some(link_type) = self.link_type {
            out.push(format!("{}type", prefix), link_type.as_str());
        }
        for (name, value) in self.named_values() {
            out.push(format!("{}{}", prefix, name), value.unwrap_or_default());
        }
    }

    fn named_values(&self) -> [(&'static str, Option<&str>); 7] {
        [
            ("href", self.href.as_deref()),
            ("role", self.role.as_deref()),
            ("title", self.title.as_deref()),
            ("label", self.label.as_deref()),
            ("arcrole", self.arcrole.as_deref()),
            ("show", self.show.as_deref()),
            ("actuate", self.actuate.as_deref()),
        ]
    }

    /// True if no attribute is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The link type
    pub fn link_type(&self) -> Option<XLinkType> {
        self.link_type
    }

    /// The link target
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// The role URI
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// The title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The label
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The arc role URI
    pub fn arcrole(&self) -> Option<&str> {
        self.arcrole.as_deref()
    }

    /// The show behavior
    pub fn show(&self) -> Option<&str> {
        self.show.as_deref()
    }

    /// The actuate behavior
    pub fn actuate(&self) -> Option<&str> {
        self.actuate.as_deref()
    }
}

/// Mutable form of [`XLinkAttributes`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XLinkAttributesBuilder {
    /// Link type: simple, locator or resource
    pub link_type: String,
    /// Target URI
    pub href: String,
    /// Role URI
    pub role: String,
    /// Title
    pub title: String,
    /// Label
    pub label: String,
    /// Arc role URI
    pub arcrole: String,
    /// Show behavior
    pub show: String,
    /// Actuate behavior
    pub actuate: String,
}

impl XLinkAttributesBuilder {
    fn fields(&self) -> [(&'static str, &String); 8] {
        [
            ("type", &self.link_type),
            ("href", &self.href),
            ("role", &self.role),
            ("title", &self.title),
            ("label", &self.label),
            ("arcrole", &self.arcrole),
            ("show", &self.show),
            ("actuate", &self.actuate),
        ]
    }

    /// True if every field is blank
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| is_blank(v))
    }

    /// Validate and build the group
    pub fn commit(&self, ctx: &Context) -> Result<XLinkAttributes> {
        let prefix = ctx.xlink_prefix();
        let ns = ctx.version().xlink_namespace();
        let mut scratch = Element::prefixed(ctx.ddms_prefix(), ctx.version().namespace(), "scratch");
        for (name, value) in self.fields() {
            if !is_blank(value) {
                scratch.set_attribute(prefix, ns, name, value.trim());
            }
        }
        XLinkAttributes::from_element(&scratch, ctx)
    }
}

impl From<&XLinkAttributes> for XLinkAttributesBuilder {
    fn from(attributes: &XLinkAttributes) -> Self {
        let owned = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            link_type: attributes
                .link_type
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
            href: owned(&attributes.href),
            role: owned(&attributes.role),
            title: owned(&attributes.title),
            label: owned(&attributes.label),
            arcrole: owned(&attributes.arcrole),
            show: owned(&attributes.show),
            actuate: owned(&attributes.actuate),
        }
    }
}
