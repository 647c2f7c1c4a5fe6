//! ddms:dates

use super::base::{key_base, schema_element, ComponentHeader, DdmsComponent};
use crate::builder::{is_blank, ComponentBuilder};
use crate::documents::Element;
use crate::error::Result;
use crate::output::OutputEntries;
use crate::validators::engine::locator;
use crate::validators::values::XmlDate;
use crate::validators::{locate, validate_element, AttributeRule, ElementSchema, ValidationWarning};
use crate::versions::{Context, DdmsVersion};

static SCHEMA: ElementSchema = ElementSchema {
    names: &[(DdmsVersion::V2_0, "dates")],
    since: None,
    attributes: &[
        AttributeRule::optional("created"),
        AttributeRule::optional("posted"),
        AttributeRule::optional("validTil"),
        AttributeRule::optional("infoCutOff"),
        AttributeRule::optional("approvedOn").since(DdmsVersion::V3_1),
        AttributeRule::optional("receivedOn").since(DdmsVersion::V4_0_1),
    ],
    children: &[],
};

/// Dates associated with a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dates {
    header: ComponentHeader,
    created: Option<XmlDate>,
    posted: Option<XmlDate>,
    valid_til: Option<XmlDate>,
    info_cut_off: Option<XmlDate>,
    approved_on: Option<XmlDate>,
    received_on: Option<XmlDate>,
}

impl Dates {
    /// Build from a parsed element
    pub fn from_element(element: &Element, ctx: &Context) -> Result<Self> {
        let mut warnings = validate_element(&SCHEMA, element, ctx)?;
        let ns = Some(ctx.version().namespace());
        let date = |name: &str| -> Result<Option<XmlDate>> {
            element
                .get_attribute(ns, name)
                .filter(|v| !v.trim().is_empty())
                .map(|v| XmlDate::parse(name, v).map_err(|e| locate(e, element)))
                .transpose()
        };

        let created = date("created")?;
        let posted = date("posted")?;
        let valid_til = date("validTil")?;
        let info_cut_off = date("infoCutOff")?;
        let approved_on = date("approvedOn")?;
        let received_on = date("receivedOn")?;

        let completely_empty = [&created, &posted, &valid_til, &info_cut_off, &approved_on, &received_on]
            .iter()
            .all(|v| v.is_none());
        if completely_empty {
            warnings.push(ValidationWarning::new(
                format!("A completely empty {} element was found.", element.qualified_name()),
                locator(element),
            ));
        }

        Ok(Self {
            header: ComponentHeader::new(SCHEMA.name(ctx.version()), ctx, warnings),
            created,
            posted,
            valid_til,
            info_cut_off,
            approved_on,
            received_on,
        })
    }

    /// Build from lexical date values; `None` or blank leaves a date unset
    pub fn new(
        created: Option<&str>,
        posted: Option<&str>,
        valid_til: Option<&str>,
        info_cut_off: Option<&str>,
        approved_on: Option<&str>,
        received_on: Option<&str>,
        ctx: &Context,
    ) -> Result<Self> {
        let ns = ctx.version().namespace();
        let mut element = schema_element(&SCHEMA, ctx);
        let values = [created, posted, valid_til, info_cut_off, approved_on, received_on];
        for (rule, value) in SCHEMA.attributes.iter().zip(values) {
            element.set_optional_attribute(ctx.ddms_prefix(), ns, rule.name, value.map(str::trim));
        }
        Self::from_element(&element, ctx)
    }

    fn values(&self) -> [(&'static str, Option<&XmlDate>); 6] {
        [
            ("created", self.created.as_ref()),
            ("posted", self.posted.as_ref()),
            ("validTil", self.valid_til.as_ref()),
            ("infoCutOff", self.info_cut_off.as_ref()),
            ("approvedOn", self.approved_on.as_ref()),
            ("receivedOn", self.received_on.as_ref()),
        ]
    }

    /// Creation date
    pub fn created(&self) -> Option<&XmlDate> {
        self.created.as_ref()
    }

    /// Posting date
    pub fn posted(&self) -> Option<&XmlDate> {
        self.posted.as_ref()
    }

    /// Expiration date
    pub fn valid_til(&self) -> Option<&XmlDate> {
        self.valid_til.as_ref()
    }

    /// Information cut-off date
    pub fn info_cut_off(&self) -> Option<&XmlDate> {
        self.info_cut_off.as_ref()
    }

    /// Approval date (DDMS 3.1 and later)
    pub fn approved_on(&self) -> Option<&XmlDate> {
        self.approved_on.as_ref()
    }

    /// Receipt date (DDMS 4.0.1 and later)
    pub fn received_on(&self) -> Option<&XmlDate> {
        self.received_on.as_ref()
    }
}

impl DdmsComponent for Dates {
    fn header(&self) -> &ComponentHeader {
        &self.header
    }

    fn to_element(&self) -> Element {
        let ctx = self.header.context();
        let ns = ctx.version().namespace();
        let mut element = self.header.element();
        for (name, value) in self.values() {
            element.set_optional_attribute(ctx.ddms_prefix(), ns, name, value.map(XmlDate::as_str));
        }
        element
    }

    fn write_output(&self, out: &mut OutputEntries, prefix: &str, suffix: &str) {
        let base = key_base(prefix, self.name(), suffix);
        for (name, value) in self.values() {
            if let Some(value) = value {
                out.push(format!("{}.{}", base, name), value.as_str());
            }
        }
    }
}

/// Builder for [`Dates`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatesBuilder {
    /// Creation date
    pub created: String,
    /// Posting date
    pub posted: String,
    /// Expiration date
    pub valid_til: String,
    /// Information cut-off date
    pub info_cut_off: String,
    /// Approval date
    pub approved_on: String,
    /// Receipt date
    pub received_on: String,
}

impl DatesBuilder {
    fn fields(&self) -> [&String; 6] {
        [
            &self.created,
            &self.posted,
            &self.valid_til,
            &self.info_cut_off,
            &self.approved_on,
            &self.received_on,
        ]
    }
}

impl ComponentBuilder for DatesBuilder {
    type Target = Dates;

    fn is_empty(&self) -> bool {
        self.fields().into_iter().all(|v| is_blank(v))
    }

    fn commit(&self, ctx: &Context) -> Result<Option<Dates>> {
        if self.is_empty() {
            return Ok(None);
        }
        let [created, posted, valid_til, info_cut_off, approved_on, received_on] =
            self.fields().map(|v| Some(v.as_str()));
        Dates::new(created, posted, valid_til, info_cut_off, approved_on, received_on, ctx).map(Some)
    }
}

impl From<&Dates> for DatesBuilder {
    fn from(dates: &Dates) -> Self {
        let owned = |v: &Option<XmlDate>| v.as_ref().map(|d| d.as_str().to_string()).unwrap_or_default();
        Self {
            created: owned(&dates.created),
            posted: owned(&dates.posted),
            valid_til: owned(&dates.valid_til),
            info_cut_off: owned(&dates.info_cut_off),
            approved_on: owned(&dates.approved_on),
            received_on: owned(&dates.received_on),
        }
    }
}
