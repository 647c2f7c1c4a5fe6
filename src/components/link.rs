//! ddms:link

use super::base::{key_base, schema_element, ComponentHeader, DdmsComponent};
use crate::attributes::{SecurityAttributes, SecurityAttributesBuilder, XLinkAttributes, XLinkAttributesBuilder, XLinkType};
use crate::builder::ComponentBuilder;
use crate::documents::Element;
use crate::error::{invalid, ErrorKind, Result};
use crate::output::OutputEntries;
use crate::validators::{locate, validate_element, AttributeNamespace, AttributeRule, ElementSchema};
use crate::versions::{Context, DdmsVersion};

static SCHEMA: ElementSchema = ElementSchema {
    names: &[(DdmsVersion::V2_0, "link")],
    since: None,
    attributes: &[
        AttributeRule::required("type").in_namespace(AttributeNamespace::XLink),
        AttributeRule::required("href").in_namespace(AttributeNamespace::XLink),
    ],
    children: &[],
};

/// An XLink locator to a related resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    header: ComponentHeader,
    xlink: XLinkAttributes,
    security: SecurityAttributes,
}

impl Link {
    /// Build from a parsed element
    pub fn from_element(element: &Element, ctx: &Context) -> Result<Self> {
        let warnings = validate_element(&SCHEMA, element, ctx)?;
        let xlink = XLinkAttributes::from_element(element, ctx)
            .and_then(|x| x.require_type(XLinkType::Locator, true).map(|_| x))
            .map_err(|e| locate(e, element))?;
        let security = SecurityAttributes::from_element(element, ctx).map_err(|e| locate(e, element))?;
        if !security.is_empty() && !ctx.version().is_at_least(DdmsVersion::V4_1) {
            return invalid(
                ErrorKind::VersionGating,
                "Security attributes cannot be applied to this component before DDMS 4.1.",
            )
            .map_err(|e| locate(e, element));
        }

        Ok(Self {
            header: ComponentHeader::new(SCHEMA.name(ctx.version()), ctx, warnings),
            xlink,
            security,
        })
    }

    /// Build from locator attributes and security attributes (DDMS 4.1 and later)
    pub fn new(xlink: &XLinkAttributes, security: &SecurityAttributes, ctx: &Context) -> Result<Self> {
        let mut element = schema_element(&SCHEMA, ctx);
        xlink.apply_to(&mut element, ctx);
        security.apply_to(&mut element, ctx);
        Self::from_element(&element, ctx)
    }

    /// XLink attributes
    pub fn xlink_attributes(&self) -> &XLinkAttributes {
        &self.xlink
    }

    /// Security attributes
    pub fn security_attributes(&self) -> &SecurityAttributes {
        &self.security
    }
}

impl DdmsComponent for Link {
    fn header(&self) -> &ComponentHeader {
        &self.header
    }

    fn to_element(&self) -> Element {
        let ctx = self.header.context();
        let mut element = self.header.element();
        self.xlink.apply_to(&mut element, ctx);
        self.security.apply_to(&mut element, ctx);
        element
    }

    fn write_output(&self, out: &mut OutputEntries, prefix: &str, suffix: &str) {
        let base = format!("{}.", key_base(prefix, self.name(), suffix));
        self.xlink.write_output(out, &base);
        self.security.write_output(out, &base);
    }
}

/// Builder for [`Link`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkBuilder {
    /// XLink attributes
    pub xlink: XLinkAttributesBuilder,
    /// Security attributes
    pub security: SecurityAttributesBuilder,
}

impl ComponentBuilder for LinkBuilder {
    type Target = Link;

    fn is_empty(&self) -> bool {
        self.xlink.is_empty() && self.security.is_empty()
    }

    fn commit(&self, ctx: &Context) -> Result<Option<Link>> {
        if self.is_empty() {
            return Ok(None);
        }
        let xlink = self.xlink.commit(ctx)?;
        let security = self.security.commit(ctx)?;
        Link::new(&xlink, &security, ctx).map(Some)
    }
}

impl From<&Link> for LinkBuilder {
    fn from(link: &Link) -> Self {
        Self {
            xlink: XLinkAttributesBuilder::from(&link.xlink),
            security: SecurityAttributesBuilder::from(&link.security),
        }
    }
}
