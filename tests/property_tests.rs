//! Property tests: round trip and builder idempotence over generated values

use ddms::builder::ComponentBuilder;
use ddms::{
    Component, Context, DdmsComponent, DdmsVersion, Identifier, IdentifierBuilder, IndexLevel, Organization,
    OrganizationBuilder, Person, PersonBuilder, Rights, RightsBuilder, SecurityAttributes, SubOrganization,
};
use proptest::prelude::*;

fn version() -> impl Strategy<Value = DdmsVersion> {
    prop::sample::select(DdmsVersion::ALL.to_vec())
}

/// Non-blank text without leading or trailing whitespace
fn text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 &<>'\"._-]{0,15}[A-Za-z0-9]"
}

fn texts(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(text(), 1..=max)
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

proptest! {
    #[test]
    fn identifier_round_trip(version in version(), value in text()) {
        let c = Context::new(version);
        let identifier = Identifier::new("URI", &value, &c).unwrap();
        let reparsed = Component::parse(&identifier.to_xml(), &c).unwrap();
        prop_assert_eq!(reparsed, Component::from(identifier.clone()));
        prop_assert_eq!(IdentifierBuilder::from(&identifier).commit(&c).unwrap(), Some(identifier));
    }

    #[test]
    fn rights_round_trip(version in version(), flags in any::<(bool, bool, bool)>()) {
        let c = Context::new(version);
        let rights = Rights::new(flags.0, flags.1, flags.2, &c).unwrap();
        let reparsed = Component::parse(&rights.to_xml(), &c).unwrap();
        prop_assert_eq!(reparsed, Component::from(rights.clone()));
        prop_assert_eq!(RightsBuilder::from(&rights).commit(&c).unwrap(), Some(rights));
    }

    #[test]
    fn organization_round_trip(
        names in texts(3),
        phones in prop::collection::vec(text(), 0..3),
        subs in prop::collection::vec(text(), 0..3),
    ) {
        let c = Context::new(DdmsVersion::V4_1);
        let subs = subs
            .iter()
            .map(|s| SubOrganization::new(s, &SecurityAttributes::default(), &c).unwrap())
            .collect::<Vec<_>>();
        let organization = Organization::new(&as_strs(&names), &as_strs(&phones), &[], &subs, None, &c).unwrap();
        prop_assert!(organization.validation_warnings().is_empty());

        let reparsed = Component::parse(&organization.to_xml(), &c).unwrap();
        prop_assert_eq!(reparsed, Component::from(organization.clone()));
        prop_assert_eq!(OrganizationBuilder::from(&organization).commit(&c).unwrap(), Some(organization));
    }

    #[test]
    fn person_round_trip(version in version(), names in texts(2), surname in text()) {
        let c = Context::new(version);
        let person = Person::new(&as_strs(&names), &surname, None, &[], &[], &[], &c).unwrap();
        let reparsed = Component::parse(&person.to_xml(), &c).unwrap();
        prop_assert_eq!(reparsed, Component::from(person.clone()));
        prop_assert_eq!(PersonBuilder::from(&person).commit(&c).unwrap(), Some(person));
    }

    #[test]
    fn index_level_two_indexes_every_name(names in texts(4)) {
        let c = Context::new(DdmsVersion::V4_1);
        let organization = Organization::new(&as_strs(&names), &[], &[], &[], None, &c).unwrap();
        let text = organization.to_text(IndexLevel::Repeatable);
        for i in 1..=names.len() {
            let key = format!("name[{}]: ", i);
            prop_assert!(text.contains(&key));
        }
    }
}
