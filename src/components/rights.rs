//! ddms:rights

use super::base::{key_base, schema_element, ComponentHeader, DdmsComponent};
use crate::builder::ComponentBuilder;
use crate::documents::Element;
use crate::error::Result;
use crate::output::OutputEntries;
use crate::validators::values::parse_boolean;
use crate::validators::{locate, validate_element, AttributeRule, ElementSchema};
use crate::versions::{Context, DdmsVersion};

static SCHEMA: ElementSchema = ElementSchema {
    names: &[(DdmsVersion::V2_0, "rights")],
    since: None,
    attributes: &[
        AttributeRule::optional("privacyAct"),
        AttributeRule::optional("intellectualProperty"),
        AttributeRule::optional("copyright"),
    ],
    children: &[],
};

/// Privacy, intellectual property and copyright flags
///
/// Every flag defaults to false when absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rights {
    header: ComponentHeader,
    privacy_act: bool,
    intellectual_property: bool,
    copyright: bool,
}

impl Rights {
    /// Build from a parsed element
    pub fn from_element(element: &Element, ctx: &Context) -> Result<Self> {
        let warnings = validate_element(&SCHEMA, element, ctx)?;
        let ns = Some(ctx.version().namespace());
        let flag = |name: &str| -> Result<bool> {
            match element.get_attribute(ns, name).map(str::trim) {
                Some(value) if !value.is_empty() => {
                    parse_boolean(name, value).map_err(|e| locate(e, element))
                }
                _ => Ok(false),
            }
        };

        Ok(Self {
            privacy_act: flag("privacyAct")?,
            intellectual_property: flag("intellectualProperty")?,
            copyright: flag("copyright")?,
            header: ComponentHeader::new(SCHEMA.name(ctx.version()), ctx, warnings),
        })
    }

    /// Build from the three flags
    pub fn new(privacy_act: bool, intellectual_property: bool, copyright: bool, ctx: &Context) -> Result<Self> {
        let mut element = schema_element(&SCHEMA, ctx);
        write_flags(&mut element, ctx, [privacy_act, intellectual_property, copyright]);
        Self::from_element(&element, ctx)
    }

    /// Whether the Privacy Act applies
    pub fn privacy_act(&self) -> bool {
        self.privacy_act
    }

    /// Whether intellectual property rights apply
    pub fn intellectual_property(&self) -> bool {
        self.intellectual_property
    }

    /// Whether the resource is copyrighted
    pub fn copyright(&self) -> bool {
        self.copyright
    }
}

fn write_flags(element: &mut Element, ctx: &Context, flags: [bool; 3]) {
    let ns = ctx.version().namespace();
    for (rule, flag) in SCHEMA.attributes.iter().zip(flags) {
        element.set_attribute(ctx.ddms_prefix(), ns, rule.name, flag.to_string());
    }
}

impl DdmsComponent for Rights {
    fn header(&self) -> &ComponentHeader {
        &self.header
    }

    fn to_element(&self) -> Element {
        let mut element = self.header.element();
        write_flags(
            &mut element,
            self.header.context(),
            [self.privacy_act, self.intellectual_property, self.copyright],
        );
        element
    }

    fn write_output(&self, out: &mut OutputEntries, prefix: &str, suffix: &str) {
        let base = key_base(prefix, self.name(), suffix);
        out.push(format!("{}.privacyAct", base), self.privacy_act.to_string());
        out.push(
            format!("{}.intellectualProperty", base),
            self.intellectual_property.to_string(),
        );
        out.push(format!("{}.copyright", base), self.copyright.to_string());
    }
}

/// Builder for [`Rights`]
///
/// Unset flags commit as false; a builder with no flag set is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RightsBuilder {
    /// Privacy Act flag
    pub privacy_act: Option<bool>,
    /// Intellectual property flag
    pub intellectual_property: Option<bool>,
    /// Copyright flag
    pub copyright: Option<bool>,
}

impl ComponentBuilder for RightsBuilder {
    type Target = Rights;

    fn is_empty(&self) -> bool {
        self.privacy_act.is_none() && self.intellectual_property.is_none() && self.copyright.is_none()
    }

    fn commit(&self, ctx: &Context) -> Result<Option<Rights>> {
        if self.is_empty() {
            return Ok(None);
        }
        Rights::new(
            self.privacy_act.unwrap_or_default(),
            self.intellectual_property.unwrap_or_default(),
            self.copyright.unwrap_or_default(),
            ctx,
        )
        .map(Some)
    }
}

impl From<&Rights> for RightsBuilder {
    fn from(rights: &Rights) -> Self {
        Self {
            privacy_act: Some(rights.privacy_act),
            intellectual_property: Some(rights.intellectual_property),
            copyright: Some(rights.copyright),
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
    fn test_defaults_to_false() {
        let xml = format!("<ddms:rights xmlns:ddms=\"{}\" />", DdmsVersion::V4_1.namespace());
        let element = Document::from_string(&xml).unwrap().into_root();
        let rights = Rights::from_element(&element, &ctx()).unwrap();
        assert!(!rights.privacy_act());
        assert!(!rights.intellectual_property());
        assert!(!rights.copyright());
        assert_eq!(rights, Rights::new(false, false, false, &ctx()).unwrap());
    }

    #[test]
    fn test_parsed_flags() {
        let xml = format!(
            "<ddms:rights xmlns:ddms=\"{}\" ddms:privacyAct=\"true\" ddms:intellectualProperty=\"1\" ddms:copyright=\"false\" />",
            DdmsVersion::V3_1.namespace()
        );
        let c = Context::new(DdmsVersion::V3_1);
        let element = Document::from_string(&xml).unwrap().into_root();
        let rights = Rights::from_element(&element, &c).unwrap();
        assert_eq!(rights, Rights::new(true, true, false, &c).unwrap());
    }

    #[test]
    fn test_invalid_boolean() {
        let c = ctx();
        let mut element = schema_element(&SCHEMA, &c);
        element.set_attribute("ddms", c.version().namespace(), "copyright", "maybe");
        let err = Rights::from_element(&element, &c).unwrap_err();
        assert_eq!(err.to_string(), "The copyright attribute must be a boolean value: maybe");
        assert_eq!(err.as_validation().unwrap().locator.as_deref(), Some("/ddms:rights"));
    }

    #[test]
    fn test_output_always_renders_flags() {
        let rights = Rights::new(true, false, true, &ctx()).unwrap();
        assert_eq!(
            rights.to_text(IndexLevel::Repeatable),
            "rights.privacyAct: true\nrights.intellectualProperty: false\nrights.copyright: true\n"
        );
        assert_eq!(
            rights.to_xml(),
            "<ddms:rights xmlns:ddms=\"urn:us:mil:ces:metadata:ddms:4\" ddms:privacyAct=\"true\" \
             ddms:intellectualProperty=\"false\" ddms:copyright=\"true\" />"
        );
    }

    #[test]
    fn test_builder() {
        let rights = Rights::new(true, false, false, &ctx()).unwrap();
        assert_eq!(RightsBuilder::from(&rights).commit(&ctx()).unwrap(), Some(rights));
        assert_eq!(RightsBuilder::default().commit(&ctx()).unwrap(), None);

        let partial = RightsBuilder {
            copyright: Some(true),
            ..Default::default()
        };
        let committed = partial.commit(&ctx()).unwrap().unwrap();
        assert!(committed.copyright());
        assert!(!committed.privacy_act());
    }
}
