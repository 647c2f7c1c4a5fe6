//! Bindable DDMS components
//!
//! Each component validates itself completely on construction, whether it
//! is read from an [`Element`] or assembled from plain values. A component
//! that exists is valid; non-fatal findings ride along as warnings.

pub mod base;
pub(crate) mod entity;

pub mod addressee;
pub mod dates;
pub mod identifier;
pub mod link;
pub mod organization;
pub mod person;
pub mod processing_info;
pub mod record_keeper;
pub mod revision_recall;
pub mod rights;
pub mod sub_organization;

pub use addressee::{Addressee, AddresseeBuilder, ProducerEntity};
pub use base::{ComponentHeader, DdmsComponent};
pub use dates::{Dates, DatesBuilder};
pub use identifier::{Identifier, IdentifierBuilder};
pub use link::{Link, LinkBuilder};
pub use organization::{Organization, OrganizationBuilder};
pub use person::{Person, PersonBuilder};
pub use processing_info::{ProcessingInfo, ProcessingInfoBuilder};
pub use record_keeper::{RecordKeeper, RecordKeeperBuilder};
pub use revision_recall::{RevisionAttributes, RevisionRecall, RevisionRecallBuilder};
pub use rights::{Rights, RightsBuilder};
pub use sub_organization::{SubOrganization, SubOrganizationBuilder};

use crate::config::Config;
use crate::documents::{Document, Element};
use crate::error::{invalid, ErrorKind, Result};
use crate::output::OutputEntries;
use crate::validators::locate;
use crate::versions::{Context, DdmsVersion};

/// Any supported component
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Component {
    /// ddms:addressee
    Addressee(Addressee),
    /// ddms:dates
    Dates(Dates),
    /// ddms:identifier
    Identifier(Identifier),
    /// ddms:link
    Link(Link),
    /// ddms:organization
    Organization(Organization),
    /// ddms:person
    Person(Person),
    /// ddms:processingInfo
    ProcessingInfo(ProcessingInfo),
    /// ddms:recordKeeper
    RecordKeeper(RecordKeeper),
    /// ddms:revisionRecall
    RevisionRecall(RevisionRecall),
    /// ddms:rights
    Rights(Rights),
    /// ddms:subOrganization
    SubOrganization(SubOrganization),
}

impl Component {
    /// Build the component matching the element's local name
    pub fn from_element(element: &Element, ctx: &Context) -> Result<Self> {
        tracing::debug!(element = element.local_name(), version = %ctx.version(), "binding element");
        let component = match element.local_name() {
            "addressee" => Component::Addressee(Addressee::from_element(element, ctx)?),
            "dates" => Component::Dates(Dates::from_element(element, ctx)?),
            "identifier" => Component::Identifier(Identifier::from_element(element, ctx)?),
            "link" => Component::Link(Link::from_element(element, ctx)?),
            "Organization" | "organization" => {
                Component::Organization(Organization::from_element(element, ctx)?)
            }
            "Person" | "person" => Component::Person(Person::from_element(element, ctx)?),
            "processingInfo" => Component::ProcessingInfo(ProcessingInfo::from_element(element, ctx)?),
            "recordKeeper" => Component::RecordKeeper(RecordKeeper::from_element(element, ctx)?),
            "revisionRecall" => Component::RevisionRecall(RevisionRecall::from_element(element, ctx)?),
            "rights" => Component::Rights(Rights::from_element(element, ctx)?),
            "subOrganization" => Component::SubOrganization(SubOrganization::from_element(element, ctx)?),
            _ => {
                return invalid(
                    ErrorKind::Structural,
                    format!(
                        "Unexpected namespace URI and local name encountered: {}",
                        element.qualified_name()
                    ),
                )
                .map_err(|e| locate(e, element))
            }
        };
        Ok(component)
    }

    /// Parse XML text and bind its root element under `ctx`
    pub fn parse(xml: &str, ctx: &Context) -> Result<Self> {
        let document = Document::parse_with_limits(xml, &ctx.config().limits)?;
        Self::from_element(document.root(), ctx)
    }

    /// Parse XML text, taking the version from the root element's namespace
    ///
    /// 4.0.1 and 4.1 share a namespace, so such documents bind as 4.1.
    pub fn parse_detected(xml: &str, config: Config) -> Result<Self> {
        let document = Document::parse_with_limits(xml, &config.limits)?;
        let namespace = document.root().namespace().unwrap_or_default();
        let version = DdmsVersion::for_namespace(namespace)?;
        Self::from_element(document.root(), &Context::with_config(version, config))
    }

    fn inner(&self) -> &dyn DdmsComponent {
        match self {
            Component::Addressee(c) => c,
            Component::Dates(c) => c,
            Component::Identifier(c) => c,
            Component::Link(c) => c,
            Component::Organization(c) => c,
            Component::Person(c) => c,
            Component::ProcessingInfo(c) => c,
            Component::RecordKeeper(c) => c,
            Component::RevisionRecall(c) => c,
            Component::Rights(c) => c,
            Component::SubOrganization(c) => c,
        }
    }
}

impl DdmsComponent for Component {
    fn header(&self) -> &ComponentHeader {
        self.inner().header()
    }

    fn to_element(&self) -> Element {
        self.inner().to_element()
    }

    fn write_output(&self, out: &mut OutputEntries, prefix: &str, suffix: &str) {
        self.inner().write_output(out, prefix, suffix)
    }
}

macro_rules! impl_from_component {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Component {
                fn from(component: $variant) -> Self {
                    Component::$variant(component)
                }
            }
        )*
    };
}

impl_from_component!(
    Addressee,
    Dates,
    Identifier,
    Link,
    Organization,
    Person,
    ProcessingInfo,
    RecordKeeper,
    RevisionRecall,
    Rights,
    SubOrganization
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::IndexLevel;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dispatch_on_local_name() {
        let ctx = Context::new(DdmsVersion::V3_0);
        let xml = "<ddms:Organization xmlns:ddms=\"http://metadata.dod.mil/mdr/ns/DDMS/3.0/\">\
                   <ddms:name>DISA</ddms:name></ddms:Organization>";
        let component = Component::parse(xml, &ctx).unwrap();
        assert!(matches!(component, Component::Organization(_)));
        assert_eq!(component.name(), "Organization");
        assert_eq!(component.to_xml(), xml);
    }

    #[test]
    fn test_unknown_element() {
        let ctx = Context::new(DdmsVersion::V4_1);
        let xml = "<ddms:resource xmlns:ddms=\"urn:us:mil:ces:metadata:ddms:4\" />";
        let err = Component::parse(xml, &ctx).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected namespace URI and local name encountered: ddms:resource"
        );
        assert_eq!(err.as_validation().unwrap().kind, ErrorKind::Structural);
    }

    #[test]
    fn test_parse_detected_version() {
        let xml = "<ddms:identifier xmlns:ddms=\"http://metadata.dod.mil/mdr/ns/DDMS/3.1/\" \
                   ddms:qualifier=\"URI\" ddms:value=\"urn:buri:ddmsence:testIdentifier\" />";
        let component = Component::parse_detected(xml, Config::default()).unwrap();
        assert_eq!(component.version(), DdmsVersion::V3_1);

        let err = Component::parse_detected("<identifier />", Config::default()).unwrap_err();
        assert!(err.to_string().starts_with("Unsupported DDMS"));
    }

    #[test]
    fn test_delegated_output() {
        let ctx = Context::new(DdmsVersion::V4_1);
        let component: Component = Identifier::new("URI", "urn:x", &ctx).unwrap().into();
        assert_eq!(
            component.to_text(IndexLevel::None),
            "identifier.qualifier: URI\nidentifier.value: urn:x\n"
        );
    }
}
