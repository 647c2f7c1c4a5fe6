//! ddms:processingInfo

use super::base::{key_base, schema_element, ComponentHeader, DdmsComponent};
use crate::attributes::{SecurityAttributes, SecurityAttributesBuilder};
use crate::builder::{is_blank, ComponentBuilder};
use crate::documents::Element;
use crate::error::Result;
use crate::output::OutputEntries;
use crate::validators::engine::{empty_value_warning, locator};
use crate::validators::values::XmlDate;
use crate::validators::{locate, validate_element, AttributeRule, ElementSchema};
use crate::versions::{Context, DdmsVersion};

static SCHEMA: ElementSchema = ElementSchema {
    names: &[(DdmsVersion::V2_0, "processingInfo")],
    since: Some(DdmsVersion::V4_1),
    attributes: &[AttributeRule::required("dateProcessed")],
    children: &[],
};

/// A record of how a resource was processed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessingInfo {
    header: ComponentHeader,
    value: String,
    date_processed: XmlDate,
    security: SecurityAttributes,
}

impl ProcessingInfo {
    /// Build from a parsed element
    pub fn from_element(element: &Element, ctx: &Context) -> Result<Self> {
        let mut warnings = validate_element(&SCHEMA, element, ctx)?;
        let ns = Some(ctx.version().namespace());
        let date_processed = XmlDate::parse(
            "dateProcessed",
            element.get_attribute(ns, "dateProcessed").unwrap_or_default(),
        )
        .map_err(|e| locate(e, element))?;
        let security = SecurityAttributes::from_element(element, ctx)
            .and_then(|s| s.require_classification().map(|_| s))
            .map_err(|e| locate(e, element))?;

        let value = element.text_value();
        if value.trim().is_empty() {
            warnings.push(empty_value_warning("element", &element.qualified_name(), &locator(element)));
        }

        Ok(Self {
            header: ComponentHeader::new(SCHEMA.name(ctx.version()), ctx, warnings),
            value: value.to_string(),
            date_processed,
            security,
        })
    }

    /// Build from a description, processing date and security attributes
    pub fn new(value: &str, date_processed: &str, security: &SecurityAttributes, ctx: &Context) -> Result<Self> {
        let mut element = schema_element(&SCHEMA, ctx);
        element.set_text(value.to_string());
        element.set_attribute(ctx.ddms_prefix(), ctx.version().namespace(), "dateProcessed", date_processed);
        security.apply_to(&mut element, ctx);
        Self::from_element(&element, ctx)
    }

    /// Description of the processing
    pub fn value(&self) -> &str {
        &self.value
    }

    /// When the processing happened
    pub fn date_processed(&self) -> &XmlDate {
        &self.date_processed
    }

    /// Security attributes
    pub fn security_attributes(&self) -> &SecurityAttributes {
        &self.security
    }
}

impl DdmsComponent for ProcessingInfo {
    fn header(&self) -> &ComponentHeader {
        &self.header
    }

    fn to_element(&self) -> Element {
        let ctx = self.header.context();
        let mut element = self.header.element();
        element.set_text(self.value.clone());
        element.set_attribute(
            ctx.ddms_prefix(),
            ctx.version().namespace(),
            "dateProcessed",
            self.date_processed.as_str(),
        );
        self.security.apply_to(&mut element, ctx);
        element
    }

    fn write_output(&self, out: &mut OutputEntries, prefix: &str, suffix: &str) {
        let base = key_base(prefix, self.name(), suffix);
        out.push(base.as_str(), &self.value);
        out.push(format!("{}.dateProcessed", base), self.date_processed.as_str());
        self.security.write_output(out, &format!("{}.", base));
    }
}

/// Builder for [`ProcessingInfo`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingInfoBuilder {
    /// Description of the processing
    pub value: String,
    /// Processing date
    pub date_processed: String,
    /// Security attributes
    pub security: SecurityAttributesBuilder,
}

impl ComponentBuilder for ProcessingInfoBuilder {
    type Target = ProcessingInfo;

    fn is_empty(&self) -> bool {
        is_blank(&self.value) && is_blank(&self.date_processed) && self.security.is_empty()
    }

    fn commit(&self, ctx: &Context) -> Result<Option<ProcessingInfo>> {
        if self.is_empty() {
            return Ok(None);
        }
        let security = self.security.commit(ctx)?;
        ProcessingInfo::new(&self.value, &self.date_processed, &security, ctx).map(Some)
    }
}

impl From<&ProcessingInfo> for ProcessingInfoBuilder {
    fn from(info: &ProcessingInfo) -> Self {
        Self {
            value: info.value.clone(),
            date_processed: info.date_processed.as_str().to_string(),
            security: SecurityAttributesBuilder::from(&info.security),
        }
    }
}
