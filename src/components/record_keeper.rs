//! ddms:recordKeeper

use super::base::{key_base, nested_warnings, require_child_version, schema_element, ComponentHeader, DdmsComponent};
use super::organization::{Organization, OrganizationBuilder};
use crate::builder::{is_blank, ComponentBuilder};
use crate::documents::Element;
use crate::error::{Error, ErrorKind, Result, ValidationError};
use crate::output::OutputEntries;
use crate::validators::{locate, require_value, validate_element, ChildRule, ElementSchema};
use crate::versions::{Context, DdmsVersion};

static SCHEMA: ElementSchema = ElementSchema {
    names: &[(DdmsVersion::V2_0, "recordKeeper")],
    since: Some(DdmsVersion::V4_1),
    attributes: &[],
    children: &[
        ChildRule::text("recordKeeperID", 1, Some(1)),
        ChildRule::component("organization", 1, Some(1)),
    ],
};

/// The organization responsible for maintaining a record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKeeper {
    header: ComponentHeader,
    record_keeper_id: String,
    organization: Organization,
}

impl RecordKeeper {
    /// Build from a parsed element
    pub fn from_element(element: &Element, ctx: &Context) -> Result<Self> {
        let mut warnings = validate_element(&SCHEMA, element, ctx)?;
        let ns = Some(ctx.version().namespace());

        let record_keeper_id = element
            .find_child(ns, "recordKeeperID")
            .map(Element::text_value)
            .unwrap_or_default();
        require_value("recordKeeperID", record_keeper_id).map_err(|e| locate(e, element))?;

        let organization = element
            .find_child(ns, "organization")
            .ok_or_else(|| {
                Error::Validation(ValidationError::new(
                    ErrorKind::Cardinality,
                    "Exactly 1 organization element must exist.",
                ))
            })
            .and_then(|child| Organization::from_element(child, ctx))?;
        warnings.extend(nested_warnings(element, [&organization]));

        Ok(Self {
            header: ComponentHeader::new(SCHEMA.name(ctx.version()), ctx, warnings),
            record_keeper_id: record_keeper_id.to_string(),
            organization,
        })
    }

    /// Build from an ID and the keeping organization
    pub fn new(record_keeper_id: &str, organization: &Organization, ctx: &Context) -> Result<Self> {
        require_child_version(ctx, organization)?;
        let mut element = schema_element(&SCHEMA, ctx);
        element.add_text_child("recordKeeperID", record_keeper_id);
        element.add_child(organization.to_element());
        Self::from_element(&element, ctx)
    }

    /// The record keeper ID
    pub fn record_keeper_id(&self) -> &str {
        &self.record_keeper_id
    }

    /// The keeping organization
    pub fn organization(&self) -> &Organization {
        &self.organization
    }
}

impl DdmsComponent for RecordKeeper {
    fn header(&self) -> &ComponentHeader {
        &self.header
    }

    fn to_element(&self) -> Element {
        let mut element = self.header.element();
        element.add_text_child("recordKeeperID", &self.record_keeper_id);
        element.add_child(self.organization.to_element());
        element
    }

    fn write_output(&self, out: &mut OutputEntries, prefix: &str, suffix: &str) {
        let base = key_base(prefix, self.name(), suffix);
        out.push(format!("{}.recordKeeperID", base), &self.record_keeper_id);
        self.organization.write_output(out, &format!("{}.", base), "");
    }
}

/// Builder for [`RecordKeeper`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordKeeperBuilder {
    /// Record keeper ID
    pub record_keeper_id: String,
    /// Keeping organization
    pub organization: OrganizationBuilder,
}

impl ComponentBuilder for RecordKeeperBuilder {
    type Target = RecordKeeper;

    fn is_empty(&self) -> bool {
        is_blank(&self.record_keeper_id) && self.organization.is_empty()
    }

    fn commit(&self, ctx: &Context) -> Result<Option<RecordKeeper>> {
        if self.is_empty() {
            return Ok(None);
        }
        let organization = self.organization.commit(ctx)?.ok_or_else(|| {
            Error::Validation(ValidationError::new(
                ErrorKind::Cardinality,
                "Exactly 1 organization element must exist.",
            ))
        })?;
        RecordKeeper::new(&self.record_keeper_id, &organization, ctx).map(Some)
    }
}

impl From<&RecordKeeper> for RecordKeeperBuilder {
    fn from(keeper: &RecordKeeper) -> Self {
        Self {
            record_keeper_id: keeper.record_keeper_id.clone(),
            organization: OrganizationBuilder::from(&keeper.organization),
        }
    }
}
