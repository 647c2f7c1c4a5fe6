//! ISM security attributes
//!
//! The security attribute group attached to many components. Each
//! component owns its own copy; the group is validated against the ISM
//! namespace of the version it is built under.

use crate::builder::is_blank;
use crate::documents::Element;
use crate::error::{invalid, ErrorKind, Result};
use crate::names::{is_valid_nmtoken, join_tokens, split_tokens};
use crate::output::OutputEntries;
use crate::validators::engine::check_attributes;
use crate::validators::values::{parse_boolean, XmlDate};
use crate::validators::{AttributeNamespace, AttributeRule};
use crate::versions::{Context, DdmsVersion};
use std::collections::HashSet;

lazy_static::lazy_static! {
    /// CVEnumISMClassificationAll
    static ref CLASSIFICATIONS: HashSet<&'static str> = [
        "U", "C", "S", "TS", "R", "CTS", "CTS-B", "CTS-BALK", "NU", "NR", "NC", "NS",
        "CTSA", "NSAT", "NCA",
    ]
    .into_iter()
    .collect();
}

static RULES: &[AttributeRule] = &[
    AttributeRule::optional("classification").in_namespace(AttributeNamespace::Ism),
    AttributeRule::optional("ownerProducer").in_namespace(AttributeNamespace::Ism),
    AttributeRule::optional("SCIcontrols").in_namespace(AttributeNamespace::Ism),
    AttributeRule::optional("disseminationControls").in_namespace(AttributeNamespace::Ism),
    AttributeRule::optional("releasableTo").in_namespace(AttributeNamespace::Ism),
    AttributeRule::optional("declassDate").in_namespace(AttributeNamespace::Ism),
    AttributeRule::optional("declassManualReview")
        .in_namespace(AttributeNamespace::Ism)
        .until(DdmsVersion::V3_0),
    AttributeRule::optional("classifiedBy").in_namespace(AttributeNamespace::Ism),
];

/// The ISM security attribute group
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SecurityAttributes {
    classification: Option<String>,
    owner_producers: Vec<String>,
    sci_controls: Vec<String>,
    dissemination_controls: Vec<String>,
    releasable_to: Vec<String>,
    declass_date: Option<XmlDate>,
    declass_manual_review: Option<bool>,
    classified_by: Option<String>,
}

impl SecurityAttributes {
    /// Read and validate the group from an element's ISM attributes
    pub fn from_element(element: &Element, ctx: &Context) -> Result<Self> {
        check_attributes(RULES, element, ctx)?;

        let ns = Some(ctx.version().ism_namespace());
        let get = |name: &str| {
            element
                .get_attribute(ns, name)
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let attributes = Self {
            classification: get("classification").map(str::to_string),
            owner_producers: get("ownerProducer").map(split_tokens).unwrap_or_default(),
            sci_controls: get("SCIcontrols").map(split_tokens).unwrap_or_default(),
            dissemination_controls: get("disseminationControls")
                .map(split_tokens)
                .unwrap_or_default(),
            releasable_to: get("releasableTo").map(split_tokens).unwrap_or_default(),
            declass_date: get("declassDate")
                .map(|v| XmlDate::parse("declassDate", v))
                .transpose()?,
            declass_manual_review: get("declassManualReview")
                .map(|v| parse_boolean("declassManualReview", v))
                .transpose()?,
            classified_by: get("classifiedBy").map(str::to_string),
        };
        attributes.validate()?;
        Ok(attributes)
    }

    /// Build a group with a classification and owner/producers
    pub fn new(classification: &str, owner_producers: &[&str], ctx: &Context) -> Result<Self> {
        SecurityAttributesBuilder {
            classification: classification.to_string(),
            owner_producers: join_tokens(
                &owner_producers.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            ),
            ..Default::default()
        }
        .commit(ctx)
    }

    fn validate(&self) -> Result<()> {
        if let Some(classification) = &self.classification {
            if !CLASSIFICATIONS.contains(classification.as_str()) {
                return invalid(
                    ErrorKind::Value,
                    format!(
                        "{} is not a valid value for the classification attribute.",
                        classification
                    ),
                );
            }
        }
        for (name, tokens) in [
            ("ownerProducer", &self.owner_producers),
            ("SCIcontrols", &self.sci_controls),
            ("disseminationControls", &self.dissemination_controls),
            ("releasableTo", &self.releasable_to),
        ] {
            if let Some(bad) = tokens.iter().find(|t| !is_valid_nmtoken(t)) {
                return invalid(
                    ErrorKind::Value,
                    format!("{} is not a valid token for the {} attribute.", bad, name),
                );
            }
        }
        Ok(())
    }

    /// Fail unless a classification and at least one owner/producer are set
    pub fn require_classification(&self) -> Result<()> {
        if self.classification.is_none() {
            return invalid(ErrorKind::Value, "classification is required.");
        }
        if self.owner_producers.is_empty() {
            return invalid(ErrorKind::Value, "ownerProducer is required.");
        }
        Ok(())
    }

    /// Write the group's attributes onto an element
    pub fn apply_to(&self, element: &mut Element, ctx: &Context) {
        let prefix = ctx.ism_prefix();
        let ns = ctx.version().ism_namespace();
        let lists = [
            ("ownerProducer", &self.owner_producers),
            ("SCIcontrols", &self.sci_controls),
            ("disseminationControls", &self.dissemination_controls),
            ("releasableTo", &self.releasable_to),
        ];

        element.set_optional_attribute(prefix, ns, "classification", self.classification.as_deref());
        for (name, tokens) in lists {
            if !tokens.is_empty() {
                element.set_attribute(prefix, ns, name, join_tokens(tokens));
            }
        }
        if let Some(date) = &self.declass_date {
            element.set_attribute(prefix, ns, "declassDate", date.as_str());
        }
        if let Some(review) = self.declass_manual_review {
            element.set_attribute(prefix, ns, "declassManualReview", review.to_string());
        }
        element.set_optional_attribute(prefix, ns, "classifiedBy", self.classified_by.as_deref());
    }

    /// Add the group's fields to flattened output
    pub fn write_output(&self, out: &mut OutputEntries, prefix: &str) {
        out.push(
            format!("{}classification", prefix),
            self.classification.as_deref().unwrap_or_default(),
        );
        out.push(format!("{}ownerProducer", prefix), join_tokens(&self.owner_producers));
        out.push(format!("{}SCIcontrols", prefix), join_tokens(&self.sci_controls));
        out.push(
            format!("{}disseminationControls", prefix),
            join_tokens(&self.dissemination_controls),
        );
        out.push(format!("{}releasableTo", prefix), join_tokens(&self.releasable_to));
        if let Some(date) = &self.declass_date {
            out.push(format!("{}declassDate", prefix), date.as_str());
        }
        if let Some(review) = self.declass_manual_review {
            out.push(format!("{}declassManualReview", prefix), review.to_string());
        }
        out.push(
            format!("{}classifiedBy", prefix),
            self.classified_by.as_deref().unwrap_or_default(),
        );
    }

    /// True if no attribute is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The classification
    pub fn classification(&self) -> Option<&str> {
        self.classification.as_deref()
    }

    /// The owner/producer tokens
    pub fn owner_producers(&self) -> &[String] {
        &self.owner_producers
    }

    /// The SCI control tokens
    pub fn sci_controls(&self) -> &[String] {
        &self.sci_controls
    }

    /// The dissemination control tokens
    pub fn dissemination_controls(&self) -> &[String] {
        &self.dissemination_controls
    }

    /// The releasable-to tokens
    pub fn releasable_to(&self) -> &[String] {
        &self.releasable_to
    }

    /// The declassification date
    pub fn declass_date(&self) -> Option<&XmlDate> {
        self.declass_date.as_ref()
    }

    /// The manual review flag (DDMS 2.0 and 3.0 only)
    pub fn declass_manual_review(&self) -> Option<bool> {
        self.declass_manual_review
    }

    /// Who classified the resource
    pub fn classified_by(&self) -> Option<&str> {
        self.classified_by.as_deref()
    }
}

/// Mutable form of [`SecurityAttributes`]; token lists are space-delimited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityAttributesBuilder {
    /// Classification
    pub classification: String,
    /// Space-delimited owner/producers
    pub owner_producers: String,
    /// Space-delimited SCI controls
    pub sci_controls: String,
    /// Space-delimited dissemination controls
    pub dissemination_controls: String,
    /// Space-delimited releasable-to countries
    pub releasable_to: String,
    /// Declassification date
    pub declass_date: String,
    /// Manual review flag, as "true"/"false"
    pub declass_manual_review: String,
    /// Classified by
    pub classified_by: String,
}

impl SecurityAttributesBuilder {
    /// True if every field is blank
    pub fn is_empty(&self) -> bool {
        [
            &self.classification,
            &self.owner_producers,
            &self.sci_controls,
            &self.dissemination_controls,
            &self.releasable_to,
            &self.declass_date,
            &self.declass_manual_review,
            &self.classified_by,
        ]
        .into_iter()
        .all(|v| is_blank(v))
    }

    /// Validate and build the group
    pub fn commit(&self, ctx: &Context) -> Result<SecurityAttributes> {
        let prefix = ctx.ism_prefix();
        let ns = ctx.version().ism_namespace();
        let mut scratch = Element::prefixed(ctx.ddms_prefix(), ctx.version().namespace(), "scratch");
        for (name, value) in [
            ("classification", &self.classification),
            ("ownerProducer", &self.owner_producers),
            ("SCIcontrols", &self.sci_controls),
            ("disseminationControls", &self.dissemination_controls),
            ("releasableTo", &self.releasable_to),
            ("declassDate", &self.declass_date),
            ("declassManualReview", &self.declass_manual_review),
            ("classifiedBy", &self.classified_by),
        ] {
            if !is_blank(value) {
                scratch.set_attribute(prefix, ns, name, value.trim());
            }
        }
        SecurityAttributes::from_element(&scratch, ctx)
    }
}

impl From<&SecurityAttributes> for SecurityAttributesBuilder {
    fn from(attributes: &SecurityAttributes) -> Self {
        Self {
            classification: attributes.classification.clone().unwrap_or_default(),
            owner_producers: join_tokens(&attributes.owner_producers),
            sci_controls: join_tokens(&attributes.sci_controls),
            dissemination_controls: join_tokens(&attributes.dissemination_controls),
            releasable_to: join_tokens(&attributes.releasable_to),
            declass_date: attributes
                .declass_date
                .as_ref()
                .map(|d| d.as_str().to_string())
                .unwrap_or_default(),
            declass_manual_review: attributes
                .declass_manual_review
                .map(|b| b.to_string())
                .unwrap_or_default(),
            classified_by: attributes.classified_by.clone().unwrap_or_default(),
        }
    }
}
