//! ddms:addressee

use super::base::{key_base, nested_warnings, require_child_version, schema_element, ComponentHeader, DdmsComponent};
use super::organization::{Organization, OrganizationBuilder};
use super::person::{Person, PersonBuilder};
use crate::attributes::{SecurityAttributes, SecurityAttributesBuilder};
use crate::builder::ComponentBuilder;
use crate::documents::Element;
use crate::error::{invalid, ErrorKind, Result};
use crate::output::OutputEntries;
use crate::validators::{locate, validate_element, ChildRule, ElementSchema};
use crate::versions::{Context, DdmsVersion};

static SCHEMA: ElementSchema = ElementSchema {
    names: &[(DdmsVersion::V2_0, "addressee")],
    since: Some(DdmsVersion::V4_1),
    attributes: &[],
    children: &[
        ChildRule::component("organization", 0, Some(1)),
        ChildRule::component("person", 0, Some(1)),
    ],
};

/// The producer entity an addressee points at
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProducerEntity {
    /// An organization
    Organization(Organization),
    /// A person
    Person(Person),
}

impl ProducerEntity {
    fn component(&self) -> &dyn DdmsComponent {
        match self {
            ProducerEntity::Organization(o) => o,
            ProducerEntity::Person(p) => p,
        }
    }
}

/// An individual or organization to whom a resource is directed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Addressee {
    header: ComponentHeader,
    entity: ProducerEntity,
    security: SecurityAttributes,
}

impl Addressee {
    /// Build from a parsed element
    pub fn from_element(element: &Element, ctx: &Context) -> Result<Self> {
        let mut warnings = validate_element(&SCHEMA, element, ctx)?;
        let ns = Some(ctx.version().namespace());

        let organization = element.find_child(ns, "organization");
        let person = element.find_child(ns, "person");
        let entity = match (organization, person) {
            (Some(child), None) => ProducerEntity::Organization(Organization::from_element(child, ctx)?),
            (None, Some(child)) => ProducerEntity::Person(Person::from_element(child, ctx)?),
            _ => {
                return invalid(
                    ErrorKind::Cardinality,
                    "Exactly 1 producer entity element must exist.",
                )
                .map_err(|e| locate(e, element))
            }
        };
        let parent = element.qualified_name();
        warnings.extend(
            entity
                .component()
                .validation_warnings()
                .iter()
                .map(|w| w.under(&parent)),
        );

        let security = SecurityAttributes::from_element(element, ctx)
            .and_then(|s| s.require_classification().map(|_| s))
            .map_err(|e| locate(e, element))?;

        Ok(Self {
            header: ComponentHeader::new(SCHEMA.name(ctx.version()), ctx, warnings),
            entity,
            security,
        })
    }

    /// Build addressed to an organization
    pub fn for_organization(organization: &Organization, security: &SecurityAttributes, ctx: &Context) -> Result<Self> {
        require_child_version(ctx, organization)?;
        Self::build(organization.to_element(), security, ctx)
    }

    /// Build addressed to a person
    pub fn for_person(person: &Person, security: &SecurityAttributes, ctx: &Context) -> Result<Self> {
        require_child_version(ctx, person)?;
        Self::build(person.to_element(), security, ctx)
    }

    fn build(entity: Element, security: &SecurityAttributes, ctx: &Context) -> Result<Self> {
        let mut element = schema_element(&SCHEMA, ctx);
        element.add_child(entity);
        security.apply_to(&mut element, ctx);
        Self::from_element(&element, ctx)
    }

    /// The addressed entity
    pub fn entity(&self) -> &ProducerEntity {
        &self.entity
    }

    /// Security attributes
    pub fn security_attributes(&self) -> &SecurityAttributes {
        &self.security
    }
}

impl DdmsComponent for Addressee {
    fn header(&self) -> &ComponentHeader {
        &self.header
    }

    fn to_element(&self) -> Element {
        let ctx = self.header.context();
        let mut element = self.header.element();
        element.add_child(self.entity.component().to_element());
        self.security.apply_to(&mut element, ctx);
        element
    }

    fn write_output(&self, out: &mut OutputEntries, prefix: &str, suffix: &str) {
        let base = key_base(prefix, self.name(), suffix);
        self.entity.component().write_output(out, &format!("{}.", base), "");
        self.security.write_output(out, &format!("{}.", base));
    }
}

/// Builder for [`Addressee`]
///
/// Exactly one of the organization and person builders may be filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddresseeBuilder {
    /// Addressed organization
    pub organization: OrganizationBuilder,
    /// Addressed person
    pub person: PersonBuilder,
    /// Security attributes
    pub security: SecurityAttributesBuilder,
}

impl ComponentBuilder for AddresseeBuilder {
    type Target = Addressee;

    fn is_empty(&self) -> bool {
        self.organization.is_empty() && self.person.is_empty() && self.security.is_empty()
    }

    fn commit(&self, ctx: &Context) -> Result<Option<Addressee>> {
        if self.is_empty() {
            return Ok(None);
        }
        tracing::debug!(element = "addressee", "committing builder");
        let security = self.security.commit(ctx)?;
        let mut element = schema_element(&SCHEMA, ctx);
        if let Some(organization) = self.organization.commit(ctx)? {
            element.add_child(organization.to_element());
        }
        if let Some(person) = self.person.commit(ctx)? {
            element.add_child(person.to_element());
        }
        security.apply_to(&mut element, ctx);
        Addressee::from_element(&element, ctx).map(Some)
    }
}

impl From<&Addressee> for AddresseeBuilder {
    fn from(addressee: &Addressee) -> Self {
        let mut builder = Self {
            security: SecurityAttributesBuilder::from(&addressee.security),
            ..Default::default()
        };
        match &addressee.entity {
            ProducerEntity::Organization(o) => builder.organization = OrganizationBuilder::from(o),
            ProducerEntity::Person(p) => builder.person = PersonBuilder::from(p),
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Document;
    use crate::output::IndexLevel;
    use pretty_assertions::assert_eq;

    const XML: &str = "<ddms:addressee xmlns:ddms=\"urn:us:mil:ces:metadata:ddms:4\" \
                       xmlns:ism=\"urn:us:gov:ic:ism\" ism:classification=\"U\" ism:ownerProducer=\"USA\">\
                       <ddms:organization><ddms:name>DISA</ddms:name></ddms:organization></ddms:addressee>";

    fn ctx() -> Context {
        Context::new(DdmsVersion::V4_1)
    }

    fn security() -> SecurityAttributes {
        SecurityAttributes::new("U", &["USA"], &ctx()).unwrap()
    }

    fn disa() -> Organization {
        Organization::new(&["DISA"], &[], &[], &[], None, &ctx()).unwrap()
    }

    #[test]
    fn test_constructor_equivalence() {
        let element = Document::from_string(XML).unwrap().into_root();
        let parsed = Addressee::from_element(&element, &ctx()).unwrap();
        let built = Addressee::for_organization(&disa(), &security(), &ctx()).unwrap();
        assert_eq!(parsed, built);
        assert_eq!(built.to_xml(), XML);
    }

    #[test]
    fn test_person_addressee() {
        let person = Person::new(&["Brian"], "Uri", None, &[], &[], &[], &ctx()).unwrap();
        let addressee = Addressee::for_person(&person, &security(), &ctx()).unwrap();
        assert_eq!(addressee.entity(), &ProducerEntity::Person(person));
    }

    #[test]
    fn test_exactly_one_entity() {
        let mut element = schema_element(&SCHEMA, &ctx());
        security().apply_to(&mut element, &ctx());
        let err = Addressee::from_element(&element, &ctx()).unwrap_err();
        assert_eq!(err.to_string(), "Exactly 1 producer entity element must exist.");

        let builder = AddresseeBuilder {
            organization: OrganizationBuilder::from(&disa()),
            person: PersonBuilder::from(&Person::new(&["Brian"], "Uri", None, &[], &[], &[], &ctx()).unwrap()),
            security: SecurityAttributesBuilder::from(&security()),
        };
        assert_eq!(
            builder.commit(&ctx()).unwrap_err().to_string(),
            "Exactly 1 producer entity element must exist."
        );
    }

    #[test]
    fn test_requires_classification() {
        assert_eq!(
            Addressee::for_organization(&disa(), &SecurityAttributes::default(), &ctx())
                .unwrap_err()
                .to_string(),
            "classification is required."
        );
    }

    #[test]
    fn test_version_gate() {
        let old = Context::new(DdmsVersion::V4_0_1);
        let organization = Organization::new(&["DISA"], &[], &[], &[], None, &old).unwrap();
        let security = SecurityAttributes::new("U", &["USA"], &old).unwrap();
        assert_eq!(
            Addressee::for_organization(&organization, &security, &old)
                .unwrap_err()
                .to_string(),
            "The addressee element cannot be used until DDMS 4.1 or later."
        );
    }

    #[test]
    fn test_text_output() {
        let addressee = Addressee::for_organization(&disa(), &security(), &ctx()).unwrap();
        assert_eq!(
            addressee.to_text(IndexLevel::None),
            "addressee.entityType: organization\n\
             addressee.name: DISA\n\
             addressee.classification: U\naddressee.ownerProducer: USA\n"
        );
    }

    #[test]
    fn test_builder() {
        let addressee = Addressee::for_organization(&disa(), &security(), &ctx()).unwrap();
        assert_eq!(AddresseeBuilder::from(&addressee).commit(&ctx()).unwrap(), Some(addressee));
        assert_eq!(AddresseeBuilder::default().commit(&ctx()).unwrap(), None);
    }
}
