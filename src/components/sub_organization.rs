//! ddms:subOrganization

use super::base::{key_base, schema_element, ComponentHeader, DdmsComponent};
use crate::attributes::{SecurityAttributes, SecurityAttributesBuilder};
use crate::builder::{is_blank, ComponentBuilder};
use crate::documents::Element;
use crate::error::Result;
use crate::output::OutputEntries;
use crate::validators::{locate, require_value, validate_element, ElementSchema};
use crate::versions::{Context, DdmsVersion};

static SCHEMA: ElementSchema = ElementSchema {
    names: &[(DdmsVersion::V2_0, "subOrganization")],
    since: Some(DdmsVersion::V4_0_1),
    attributes: &[],
    children: &[],
};

/// A named sub-unit of an organization
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubOrganization {
    header: ComponentHeader,
    value: String,
    security: SecurityAttributes,
}

impl SubOrganization {
    /// Build from a parsed element
    pub fn from_element(element: &Element, ctx: &Context) -> Result<Self> {
        let warnings = validate_element(&SCHEMA, element, ctx)?;
        let value = element.text_value();
        require_value("value", value).map_err(|e| locate(e, element))?;
        let security = SecurityAttributes::from_element(element, ctx).map_err(|e| locate(e, element))?;

        Ok(Self {
            header: ComponentHeader::new(SCHEMA.name(ctx.version()), ctx, warnings),
            value: value.to_string(),
            security,
        })
    }

    /// Build from a value and security attributes
    pub fn new(value: &str, security: &SecurityAttributes, ctx: &Context) -> Result<Self> {
        let mut element = schema_element(&SCHEMA, ctx);
        element.set_text(value.to_string());
        security.apply_to(&mut element, ctx);
        Self::from_element(&element, ctx)
    }

    /// The sub-organization name
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Security attributes
    pub fn security_attributes(&self) -> &SecurityAttributes {
        &self.security
    }
}

impl DdmsComponent for SubOrganization {
    fn header(&self) -> &ComponentHeader {
        &self.header
    }

    fn to_element(&self) -> Element {
        let mut element = self.header.element();
        element.set_text(self.value.clone());
        self.security.apply_to(&mut element, self.header.context());
        element
    }

    fn write_output(&self, out: &mut OutputEntries, prefix: &str, suffix: &str) {
        let base = key_base(prefix, self.name(), suffix);
        out.push(base.as_str(), &self.value);
        self.security.write_output(out, &format!("{}.", base));
    }
}

/// Builder for [`SubOrganization`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubOrganizationBuilder {
    /// Name of the sub-organization
    pub value: String,
    /// Security attributes
    pub security: SecurityAttributesBuilder,
}

impl ComponentBuilder for SubOrganizationBuilder {
    type Target = SubOrganization;

    fn is_empty(&self) -> bool {
        is_blank(&self.value) && self.security.is_empty()
    }

    fn commit(&self, ctx: &Context) -> Result<Option<SubOrganization>> {
        if self.is_empty() {
            return Ok(None);
        }
        let security = self.security.commit(ctx)?;
        SubOrganization::new(&self.value, &security, ctx).map(Some)
    }
}

impl From<&SubOrganization> for SubOrganizationBuilder {
    fn from(sub: &SubOrganization) -> Self {
        Self {
            value: sub.value.clone(),
            security: SecurityAttributesBuilder::from(&sub.security),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Document;
    use crate::output::IndexLevel;
    use pretty_assertions::assert_eq;

    fn ctx() -> Context {
        Context::new(DdmsVersion::V4_1)
    }

    #[test]
    fn test_constructor_equivalence() {
        let xml = "<ddms:subOrganization xmlns:ddms=\"urn:us:mil:ces:metadata:ddms:4\" \
                   xmlns:ism=\"urn:us:gov:ic:ism\" ism:classification=\"U\" ism:ownerProducer=\"USA\">\
                   sub1</ddms:subOrganization>";
        let element = Document::from_string(xml).unwrap().into_root();
        let parsed = SubOrganization::from_element(&element, &ctx()).unwrap();
        let security = SecurityAttributes::new("U", &["USA"], &ctx()).unwrap();
        let built = SubOrganization::new("sub1", &security, &ctx()).unwrap();
        assert_eq!(parsed, built);
        assert_eq!(parsed.to_xml(), xml);
    }

    #[test]
    fn test_value_required() {
        let err = SubOrganization::new(" ", &SecurityAttributes::default(), &ctx()).unwrap_err();
        assert_eq!(err.to_string(), "value is required.");
    }

    #[test]
    fn test_version_gate() {
        let old = Context::new(DdmsVersion::V3_1);
        let err = SubOrganization::new("sub1", &SecurityAttributes::default(), &old).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The subOrganization element cannot be used until DDMS 4.0.1 or later."
        );
    }

    #[test]
    fn test_output() {
        let security = SecurityAttributes::new("U", &["USA"], &ctx()).unwrap();
        let sub = SubOrganization::new("sub1", &security, &ctx()).unwrap();
        assert_eq!(
            sub.to_text(IndexLevel::None),
            "subOrganization: sub1\nsubOrganization.classification: U\nsubOrganization.ownerProducer: USA\n"
        );
    }

    #[test]
    fn test_builder() {
        let sub = SubOrganization::new("sub1", &SecurityAttributes::default(), &ctx()).unwrap();
        assert_eq!(SubOrganizationBuilder::from(&sub).commit(&ctx()).unwrap(), Some(sub));
        assert_eq!(SubOrganizationBuilder::default().commit(&ctx()).unwrap(), None);
    }
}
