//! ddms:identifier

use super::base::{key_base, schema_element, ComponentHeader, DdmsComponent};
use crate::builder::{is_blank, ComponentBuilder};
use crate::documents::Element;
use crate::error::Result;
use crate::output::OutputEntries;
use crate::validators::values::require_valid_uri;
use crate::validators::{locate, validate_element, AttributeRule, ElementSchema};
use crate::versions::{Context, DdmsVersion};

static SCHEMA: ElementSchema = ElementSchema {
    names: &[(DdmsVersion::V2_0, "identifier")],
    since: None,
    attributes: &[AttributeRule::required("qualifier"), AttributeRule::required("value")],
    children: &[],
};

/// A unique identifier: a qualifier URI and a value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    header: ComponentHeader,
    qualifier: String,
    value: String,
}

impl Identifier {
    /// Build from a parsed element
    pub fn from_element(element: &Element, ctx: &Context) -> Result<Self> {
        let warnings = validate_element(&SCHEMA, element, ctx)?;
        let ns = Some(ctx.version().namespace());
        let qualifier = element.get_attribute(ns, "qualifier").unwrap_or_default();
        let value = element.get_attribute(ns, "value").unwrap_or_default();
        require_valid_uri(qualifier).map_err(|e| locate(e, element))?;

        Ok(Self {
            header: ComponentHeader::new(SCHEMA.name(ctx.version()), ctx, warnings),
            qualifier: qualifier.to_string(),
            value: value.to_string(),
        })
    }

    /// Build from a qualifier and value
    pub fn new(qualifier: &str, value: &str, ctx: &Context) -> Result<Self> {
        let ns = ctx.version().namespace();
        let mut element = schema_element(&SCHEMA, ctx);
        element.set_attribute(ctx.ddms_prefix(), ns, "qualifier", qualifier);
        element.set_attribute(ctx.ddms_prefix(), ns, "value", value);
        Self::from_element(&element, ctx)
    }

    /// The qualifier URI
    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    /// The identifier value
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl DdmsComponent for Identifier {
    fn header(&self) -> &ComponentHeader {
        &self.header
    }

    fn to_element(&self) -> Element {
        let ctx = self.header.context();
        let ns = ctx.version().namespace();
        let mut element = self.header.element();
        element.set_attribute(ctx.ddms_prefix(), ns, "qualifier", &self.qualifier);
        element.set_attribute(ctx.ddms_prefix(), ns, "value", &self.value);
        element
    }

    fn write_output(&self, out: &mut OutputEntries, prefix: &str, suffix: &str) {
        let base = key_base(prefix, self.name(), suffix);
        out.push(format!("{}.qualifier", base), &self.qualifier);
        out.push(format!("{}.value", base), &self.value);
    }
}

/// Builder for [`Identifier`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierBuilder {
    /// Qualifier URI
    pub qualifier: String,
    /// Value
    pub value: String,
}

impl ComponentBuilder for IdentifierBuilder {
    type Target = Identifier;

    fn is_empty(&self) -> bool {
        is_blank(&self.qualifier) && is_blank(&self.value)
    }

    fn commit(&self, ctx: &Context) -> Result<Option<Identifier>> {
        if self.is_empty() {
            return Ok(None);
        }
        Identifier::new(&self.qualifier, &self.value, ctx).map(Some)
    }
}

impl From<&Identifier> for IdentifierBuilder {
    fn from(identifier: &Identifier) -> Self {
        Self {
            qualifier: identifier.qualifier.clone(),
            value: identifier.value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Document;
    use crate::output::IndexLevel;
    use pretty_assertions::assert_eq;

    const QUALIFIER: &str = "URI";
    const VALUE: &str = "urn:buri:ddmsence:testIdentifier";

    fn fixture(version: DdmsVersion) -> Element {
        let xml = format!(
            "<ddms:identifier xmlns:ddms=\"{}\" ddms:qualifier=\"{}\" ddms:value=\"{}\" />",
            version.namespace(),
            QUALIFIER,
            VALUE
        );
        Document::from_string(&xml).unwrap().into_root()
    }

    #[test]
    fn test_constructor_equivalence() {
        for version in DdmsVersion::ALL {
            let ctx = Context::new(version);
            let parsed = Identifier::from_element(&fixture(version), &ctx).unwrap();
            let built = Identifier::new(QUALIFIER, VALUE, &ctx).unwrap();
            assert_eq!(parsed, built);
            assert!(parsed.validation_warnings().is_empty());
            assert_eq!(parsed.to_xml(), built.to_xml());
        }
    }

    #[test]
    fn test_xml_output() {
        let ctx = Context::new(DdmsVersion::V4_1);
        let identifier = Identifier::new(QUALIFIER, VALUE, &ctx).unwrap();
        assert_eq!(
            identifier.to_xml(),
            "<ddms:identifier xmlns:ddms=\"urn:us:mil:ces:metadata:ddms:4\" \
             ddms:qualifier=\"URI\" ddms:value=\"urn:buri:ddmsence:testIdentifier\" />"
        );
    }

    #[test]
    fn test_text_and_html_output() {
        let ctx = Context::new(DdmsVersion::V4_1);
        let identifier = Identifier::new(QUALIFIER, VALUE, &ctx).unwrap();
        assert_eq!(
            identifier.to_text(IndexLevel::None),
            "identifier.qualifier: URI\nidentifier.value: urn:buri:ddmsence:testIdentifier\n"
        );
        assert_eq!(
            identifier.to_html(IndexLevel::None),
            "<meta name=\"identifier.qualifier\" content=\"URI\" />\n\
             <meta name=\"identifier.value\" content=\"urn:buri:ddmsence:testIdentifier\" />\n"
        );
    }

    #[test]
    fn test_missing_values() {
        let ctx = Context::new(DdmsVersion::V4_1);
        assert_eq!(
            Identifier::new("", VALUE, &ctx).unwrap_err().to_string(),
            "qualifier attribute is required."
        );
        assert_eq!(
            Identifier::new(QUALIFIER, " ", &ctx).unwrap_err().to_string(),
            "value attribute is required."
        );
    }

    #[test]
    fn test_invalid_qualifier_uri() {
        let ctx = Context::new(DdmsVersion::V4_1);
        let err = Identifier::new("base uri", VALUE, &ctx).unwrap_err();
        assert!(err.to_string().starts_with("Invalid URI"));
    }

    #[test]
    fn test_wrong_name() {
        let ctx = Context::new(DdmsVersion::V4_1);
        let element = Element::prefixed("ddms", ctx.version().namespace(), "identifiers");
        assert_eq!(
            Identifier::from_element(&element, &ctx).unwrap_err().to_string(),
            "Unexpected namespace URI and local name encountered: ddms:identifiers"
        );
    }

    #[test]
    fn test_inequality() {
        let ctx = Context::new(DdmsVersion::V4_1);
        let identifier = Identifier::new(QUALIFIER, VALUE, &ctx).unwrap();
        assert_ne!(identifier, Identifier::new(QUALIFIER, "other", &ctx).unwrap());
        assert_ne!(identifier, Identifier::new(QUALIFIER, VALUE, &Context::new(DdmsVersion::V3_0)).unwrap());
    }

    #[test]
    fn test_builder() {
        let ctx = Context::new(DdmsVersion::V4_1);
        let identifier = Identifier::new(QUALIFIER, VALUE, &ctx).unwrap();
        let builder = IdentifierBuilder::from(&identifier);
        assert_eq!(builder.commit(&ctx).unwrap(), Some(identifier));
        assert_eq!(IdentifierBuilder::default().commit(&ctx).unwrap(), None);

        let partial = IdentifierBuilder {
            value: VALUE.to_string(),
            ..Default::default()
        };
        assert!(!partial.is_empty());
        assert!(partial.commit(&ctx).is_err());
    }
}
