//! ddms:organization (ddms:Organization before DDMS 4.0.1)

use super::base::{nested_warnings, require_child_version, schema_element, ComponentHeader, DdmsComponent};
use super::entity::EntityFields;
use super::sub_organization::{SubOrganization, SubOrganizationBuilder};
use crate::builder::{all_blank, is_blank, BuilderList, ComponentBuilder};
use crate::documents::Element;
use crate::error::Result;
use crate::names::split_tokens;
use crate::output::OutputEntries;
use crate::validators::{locate, validate_element, AttributeNamespace, AttributeRule, ChildRule, ElementSchema};
use crate::versions::{Context, DdmsVersion};

pub(crate) static SCHEMA: ElementSchema = ElementSchema {
    names: &[
        (DdmsVersion::V2_0, "Organization"),
        (DdmsVersion::V4_0_1, "organization"),
    ],
    since: None,
    attributes: &[
        AttributeRule::optional("pocType")
            .in_namespace(AttributeNamespace::Ism)
            .since(DdmsVersion::V4_0_1),
        AttributeRule::optional("acronym").since(DdmsVersion::V4_0_1),
    ],
    children: &[
        ChildRule::text("name", 1, None),
        ChildRule::text("phone", 0, None),
        ChildRule::text("email", 0, None),
        ChildRule::component("subOrganization", 0, None).since(DdmsVersion::V4_0_1),
    ],
};

/// An organization acting as a producer or addressee
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Organization {
    header: ComponentHeader,
    entity: EntityFields,
    sub_organizations: Vec<SubOrganization>,
    acronym: Option<String>,
}

impl Organization {
    /// Build from a parsed element
    pub fn from_element(element: &Element, ctx: &Context) -> Result<Self> {
        let mut warnings = validate_element(&SCHEMA, element, ctx)?;
        let entity = EntityFields::read(element, ctx).map_err(|e| locate(e, element))?;
        let ns = Some(ctx.version().namespace());

        let sub_organizations = element
            .find_children(ns, "subOrganization")
            .into_iter()
            .map(|child| SubOrganization::from_element(child, ctx))
            .collect::<Result<Vec<_>>>()?;
        warnings.extend(nested_warnings(element, &sub_organizations));

        let acronym = element
            .get_attribute(ns, "acronym")
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Ok(Self {
            header: ComponentHeader::new(SCHEMA.name(ctx.version()), ctx, warnings),
            entity,
            sub_organizations,
            acronym,
        })
    }

    /// Build from names, contact details, sub-organizations and optional acronym
    pub fn new(
        names: &[&str],
        phones: &[&str],
        emails: &[&str],
        sub_organizations: &[SubOrganization],
        acronym: Option<&str>,
        ctx: &Context,
    ) -> Result<Self> {
        Self::with_poc_types(names, phones, emails, sub_organizations, acronym, &[], ctx)
    }

    /// Build with point-of-contact types (DDMS 4.0.1 and later)
    pub fn with_poc_types(
        names: &[&str],
        phones: &[&str],
        emails: &[&str],
        sub_organizations: &[SubOrganization],
        acronym: Option<&str>,
        poc_types: &[&str],
        ctx: &Context,
    ) -> Result<Self> {
        for sub in sub_organizations {
            require_child_version(ctx, sub)?;
        }
        let to_owned = |values: &[&str]| values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
        let entity = EntityFields {
            names: to_owned(names),
            phones: to_owned(phones),
            emails: to_owned(emails),
            poc_types: poc_types.iter().flat_map(|t| split_tokens(t)).collect(),
        };

        let mut element = schema_element(&SCHEMA, ctx);
        write_element(&mut element, ctx, &entity, sub_organizations, acronym);
        Self::from_element(&element, ctx)
    }

    /// Names of the organization
    pub fn names(&self) -> &[String] {
        &self.entity.names
    }

    /// Phone numbers
    pub fn phones(&self) -> &[String] {
        &self.entity.phones
    }

    /// Email addresses
    pub fn emails(&self) -> &[String] {
        &self.entity.emails
    }

    /// Point-of-contact types
    pub fn poc_types(&self) -> &[String] {
        &self.entity.poc_types
    }

    /// Sub-organizations (DDMS 4.0.1 and later)
    pub fn sub_organizations(&self) -> &[SubOrganization] {
        &self.sub_organizations
    }

    /// Acronym (DDMS 4.0.1 and later)
    pub fn acronym(&self) -> Option<&str> {
        self.acronym.as_deref()
    }
}

fn write_element(
    element: &mut Element,
    ctx: &Context,
    entity: &EntityFields,
    sub_organizations: &[SubOrganization],
    acronym: Option<&str>,
) {
    entity.apply_poc_type(element, ctx);
    element.set_optional_attribute(ctx.ddms_prefix(), ctx.version().namespace(), "acronym", acronym);
    entity.add_names(element);
    entity.add_contacts(element);
    for sub in sub_organizations {
        element.add_child(sub.to_element());
    }
}

impl DdmsComponent for Organization {
    fn header(&self) -> &ComponentHeader {
        &self.header
    }

    fn to_element(&self) -> Element {
        let mut element = self.header.element();
        write_element(
            &mut element,
            self.header.context(),
            &self.entity,
            &self.sub_organizations,
            self.acronym.as_deref(),
        );
        element
    }

    fn write_output(&self, out: &mut OutputEntries, prefix: &str, _suffix: &str) {
        self.entity.write_names(out, prefix, self.name());
        self.entity.write_contacts(out, prefix);
        let total = self.sub_organizations.len();
        for (i, sub) in self.sub_organizations.iter().enumerate() {
            let sub_suffix = out.suffix(i, total, true);
            sub.write_output(out, prefix, &sub_suffix);
        }
        out.push(format!("{}acronym", prefix), self.acronym.as_deref().unwrap_or_default());
        self.entity.write_poc_type(out, prefix);
    }
}

/// Builder for [`Organization`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationBuilder {
    /// Names
    pub names: Vec<String>,
    /// Phone numbers
    pub phones: Vec<String>,
    /// Email addresses
    pub emails: Vec<String>,
    /// Sub-organizations
    pub sub_organizations: BuilderList<SubOrganizationBuilder>,
    /// Acronym
    pub acronym: String,
    /// Point-of-contact types
    pub poc_types: Vec<String>,
}

impl ComponentBuilder for OrganizationBuilder {
    type Target = Organization;

    fn is_empty(&self) -> bool {
        all_blank(&self.names)
            && all_blank(&self.phones)
            && all_blank(&self.emails)
            && self.sub_organizations.all_empty()
            && is_blank(&self.acronym)
            && all_blank(&self.poc_types)
    }

    fn commit(&self, ctx: &Context) -> Result<Option<Organization>> {
        if self.is_empty() {
            return Ok(None);
        }
        let sub_organizations = self.sub_organizations.commit_all(ctx)?;
        let acronym = Some(self.acronym.as_str()).filter(|a| !is_blank(a));

        Organization::with_poc_types(
            &as_strs(&self.names),
            &as_strs(&self.phones),
            &as_strs(&self.emails),
            &sub_organizations,
            acronym,
            &as_strs(&self.poc_types),
            ctx,
        )
        .map(Some)
    }
}

pub(crate) fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

impl From<&Organization> for OrganizationBuilder {
    fn from(organization: &Organization) -> Self {
        Self {
            names: organization.entity.names.clone(),
            phones: organization.entity.phones.clone(),
            emails: organization.entity.emails.clone(),
            sub_organizations: organization
                .sub_organizations
                .iter()
                .map(SubOrganizationBuilder::from)
                .collect(),
            acronym: organization.acronym.clone().unwrap_or_default(),
            poc_types: organization.entity.poc_types.clone(),
        }
    }
}
