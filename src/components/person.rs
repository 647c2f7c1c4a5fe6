//! ddms:person (ddms:Person before DDMS 4.0.1)

use super::base::{schema_element, ComponentHeader, DdmsComponent};
use super::entity::EntityFields;
use crate::builder::{all_blank, is_blank, ComponentBuilder};
use crate::documents::Element;
use crate::error::Result;
use crate::names::split_tokens;
use crate::output::OutputEntries;
use crate::validators::{
    locate, require_value, validate_element, AttributeNamespace, AttributeRule, ChildRule, ElementSchema,
};
use crate::versions::{Context, DdmsVersion};

pub(crate) static SCHEMA: ElementSchema = ElementSchema {
    names: &[(DdmsVersion::V2_0, "Person"), (DdmsVersion::V4_0_1, "person")],
    since: None,
    attributes: &[AttributeRule::optional("pocType")
        .in_namespace(AttributeNamespace::Ism)
        .since(DdmsVersion::V4_0_1)],
    children: &[
        ChildRule::text("name", 1, None),
        ChildRule::text("surname", 1, Some(1)),
        ChildRule::text("userID", 0, Some(1)),
        ChildRule::text("affiliation", 0, Some(1)).unbounded_since(DdmsVersion::V4_0_1),
        ChildRule::text("phone", 0, None),
        ChildRule::text("email", 0, None),
    ],
};

/// A person acting as a producer or addressee
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    header: ComponentHeader,
    entity: EntityFields,
    surname: String,
    user_id: Option<String>,
    affiliations: Vec<String>,
}

impl Person {
    /// Build from a parsed element
    pub fn from_element(element: &Element, ctx: &Context) -> Result<Self> {
        let warnings = validate_element(&SCHEMA, element, ctx)?;
        let entity = EntityFields::read(element, ctx).map_err(|e| locate(e, element))?;
        let ns = Some(ctx.version().namespace());

        let surname = element
            .find_child(ns, "surname")
            .map(Element::text_value)
            .unwrap_or_default();
        require_value("surname", surname).map_err(|e| locate(e, element))?;

        Ok(Self {
            header: ComponentHeader::new(SCHEMA.name(ctx.version()), ctx, warnings),
            entity,
            surname: surname.to_string(),
            user_id: element.find_child(ns, "userID").map(|e| e.text_value().to_string()),
            affiliations: element.child_texts(ns, "affiliation"),
        })
    }

    /// Build from names, surname and optional details
    pub fn new(
        names: &[&str],
        surname: &str,
        user_id: Option<&str>,
        affiliations: &[&str],
        phones: &[&str],
        emails: &[&str],
        ctx: &Context,
    ) -> Result<Self> {
        PersonBuilder {
            names: to_owned(names),
            surname: surname.to_string(),
            user_id: user_id.map(str::to_string),
            affiliations: to_owned(affiliations),
            phones: to_owned(phones),
            emails: to_owned(emails),
            poc_types: Vec::new(),
        }
        .build(ctx)
    }

    /// Build with point-of-contact types (DDMS 4.0.1 and later)
    pub fn with_poc_types(
        names: &[&str],
        surname: &str,
        affiliations: &[&str],
        poc_types: &[&str],
        ctx: &Context,
    ) -> Result<Self> {
        PersonBuilder {
            names: to_owned(names),
            surname: surname.to_string(),
            affiliations: to_owned(affiliations),
            poc_types: to_owned(poc_types),
            ..Default::default()
        }
        .build(ctx)
    }

    /// Names
    pub fn names(&self) -> &[String] {
        &self.entity.names
    }

    /// Surname
    pub fn surname(&self) -> &str {
        &self.surname
    }

    /// User ID
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Affiliations; at most one before DDMS 4.0.1
    pub fn affiliations(&self) -> &[String] {
        &self.affiliations
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
}

fn to_owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn write_element(
    element: &mut Element,
    ctx: &Context,
    entity: &EntityFields,
    surname: &str,
    user_id: Option<&str>,
    affiliations: &[String],
) {
    entity.apply_poc_type(element, ctx);
    entity.add_names(element);
    element.add_text_child("surname", surname);
    if let Some(user_id) = user_id {
        element.add_text_child("userID", user_id);
    }
    for affiliation in affiliations {
        element.add_text_child("affiliation", affiliation);
    }
    entity.add_contacts(element);
}

impl DdmsComponent for Person {
    fn header(&self) -> &ComponentHeader {
        &self.header
    }

    fn to_element(&self) -> Element {
        let mut element = self.header.element();
        write_element(
            &mut element,
            self.header.context(),
            &self.entity,
            &self.surname,
            self.user_id.as_deref(),
            &self.affiliations,
        );
        element
    }

    fn write_output(&self, out: &mut OutputEntries, prefix: &str, _suffix: &str) {
        self.entity.write_names(out, prefix, self.name());
        out.push(format!("{}surname", prefix), &self.surname);
        out.push(format!("{}userID", prefix), self.user_id.as_deref().unwrap_or_default());
        out.push_list(&format!("{}affiliation", prefix), &self.affiliations);
        self.entity.write_contacts(out, prefix);
        self.entity.write_poc_type(out, prefix);
    }
}

/// Builder for [`Person`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonBuilder {
    /// Names
    pub names: Vec<String>,
    /// Surname
    pub surname: String,
    /// User ID; `Some("")` writes an empty userID element
    pub user_id: Option<String>,
    /// Affiliations
    pub affiliations: Vec<String>,
    /// Phone numbers
    pub phones: Vec<String>,
    /// Email addresses
    pub emails: Vec<String>,
    /// Point-of-contact types
    pub poc_types: Vec<String>,
}

impl PersonBuilder {
    /// Build the element from every field as given and validate it
    fn build(&self, ctx: &Context) -> Result<Person> {
        let entity = EntityFields {
            names: self.names.clone(),
            phones: self.phones.clone(),
            emails: self.emails.clone(),
            poc_types: self.poc_types.iter().flat_map(|t| split_tokens(t)).collect(),
        };

        let mut element = schema_element(&SCHEMA, ctx);
        write_element(
            &mut element,
            ctx,
            &entity,
            &self.surname,
            self.user_id.as_deref(),
            &self.affiliations,
        );
        Person::from_element(&element, ctx)
    }
}

impl ComponentBuilder for PersonBuilder {
    type Target = Person;

    fn is_empty(&self) -> bool {
        all_blank(&self.names)
            && is_blank(&self.surname)
            && self.user_id.as_deref().map_or(true, is_blank)
            && all_blank(&self.affiliations)
            && all_blank(&self.phones)
            && all_blank(&self.emails)
            && all_blank(&self.poc_types)
    }

    fn commit(&self, ctx: &Context) -> Result<Option<Person>> {
        if self.is_empty() {
            return Ok(None);
        }
        self.build(ctx).map(Some)
    }
}

impl From<&Person> for PersonBuilder {
    fn from(person: &Person) -> Self {
        Self {
            names: person.entity.names.clone(),
            surname: person.surname.clone(),
            user_id: person.user_id.clone(),
            affiliations: person.affiliations.clone(),
            phones: person.entity.phones.clone(),
            emails: person.entity.emails.clone(),
            poc_types: person.entity.poc_types.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Document;
    use crate::output::IndexLevel;
    use pretty_assertions::assert_eq;

    fn ctx(version: DdmsVersion) -> Context {
        Context::new(version)
    }

    fn fixture(version: DdmsVersion) -> String {
        let name = if version.is_at_least(DdmsVersion::V4_0_1) { "person" } else { "Person" };
        format!(
            "<ddms:{name} xmlns:ddms=\"{ns}\"><ddms:name>Brian</ddms:name><ddms:name>BU</ddms:name>\
             <ddms:surname>Uri</ddms:surname><ddms:userID>123</ddms:userID>\
             <ddms:affiliation>DISA</ddms:affiliation><ddms:phone>703-885-1000</ddms:phone>\
             <ddms:email>ddms@fgm.com</ddms:email></ddms:{name}>",
            name = name,
            ns = version.namespace()
        )
    }

    #[test]
    fn test_constructor_equivalence() {
        for version in DdmsVersion::ALL {
            let c = ctx(version);
            let element = Document::from_string(&fixture(version)).unwrap().into_root();
            let parsed = Person::from_element(&element, &c).unwrap();
            let built = Person::new(
                &["Brian", "BU"],
                "Uri",
                Some("123"),
                &["DISA"],
                &["703-885-1000"],
                &["ddms@fgm.com"],
                &c,
            )
            .unwrap();
            assert_eq!(parsed, built);
            assert_eq!(built.to_xml(), fixture(version));
        }
    }

    #[test]
    fn test_surname_rules() {
        let c = ctx(DdmsVersion::V4_1);
        assert_eq!(
            Person::new(&["Brian"], " ", None, &[], &[], &[], &c).unwrap_err().to_string(),
            "surname is required."
        );
    }

    #[test]
    fn test_affiliation_cardinality_by_version() {
        let old = ctx(DdmsVersion::V3_1);
        assert_eq!(
            Person::new(&["Brian"], "Uri", None, &["A", "B"], &[], &[], &old)
                .unwrap_err()
                .to_string(),
            "No more than 1 affiliation element can exist."
        );
        let new = ctx(DdmsVersion::V4_0_1);
        let person = Person::new(&["Brian"], "Uri", None, &["A", "B"], &[], &[], &new).unwrap();
        assert_eq!(person.affiliations().len(), 2);
    }

    #[test]
    fn test_poc_type_gate() {
        let err = Person::with_poc_types(&["Brian"], "Uri", &[], &["ICD-710"], &ctx(DdmsVersion::V3_1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "This component cannot have a pocType attribute before DDMS 4.0.1."
        );
        let person = Person::with_poc_types(&["Brian"], "Uri", &[], &["ICD-710"], &ctx(DdmsVersion::V4_1)).unwrap();
        assert_eq!(person.poc_types(), &["ICD-710".to_string()]);
    }

    #[test]
    fn test_text_output() {
        let c = ctx(DdmsVersion::V4_1);
        let person = Person::new(&["Brian", "BU"], "Uri", Some("123"), &["DISA"], &[], &[], &c).unwrap();
        assert_eq!(
            person.to_text(IndexLevel::Multiple),
            "entityType: person\nname[1]: Brian\nname[2]: BU\n\
             surname: Uri\nuserID: 123\naffiliation: DISA\n"
        );
    }

    #[test]
    fn test_builder() {
        let c = ctx(DdmsVersion::V4_1);
        let person = Person::new(&["Brian"], "Uri", None, &["DISA"], &["555"], &[], &c).unwrap();
        assert_eq!(PersonBuilder::from(&person).commit(&c).unwrap(), Some(person));
        assert_eq!(PersonBuilder::default().commit(&c).unwrap(), None);

        let missing_surname = PersonBuilder {
            names: vec!["Brian".to_string()],
            ..Default::default()
        };
        assert_eq!(
            missing_surname.commit(&c).unwrap_err().to_string(),
            "surname is required."
        );
    }

    #[test]
    fn test_builder_keeps_empty_user_id() {
        let c = ctx(DdmsVersion::V4_1);
        let xml = "<ddms:person xmlns:ddms=\"urn:us:mil:ces:metadata:ddms:4\"><ddms:name>Brian</ddms:name>\
                   <ddms:surname>Uri</ddms:surname><ddms:userID></ddms:userID></ddms:person>";
        let element = Document::from_string(xml).unwrap().into_root();
        let person = Person::from_element(&element, &c).unwrap();
        assert_eq!(person.user_id(), Some(""));
        assert_eq!(
            person.validation_warnings()[0].text(),
            "A ddms:userID element was found with no value."
        );

        let builder = PersonBuilder::from(&person);
        assert_eq!(builder.user_id.as_deref(), Some(""));
        assert_eq!(builder.commit(&c).unwrap(), Some(person));

        let absent = PersonBuilder {
            user_id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(absent.commit(&c).unwrap(), None);
    }
}
