//! ddms:revisionRecall

use super::base::{key_base, nested_warnings, require_child_version, schema_element, ComponentHeader, DdmsComponent};
use super::link::{Link, LinkBuilder};
use crate::attributes::{SecurityAttributes, SecurityAttributesBuilder, XLinkAttributes, XLinkAttributesBuilder, XLinkType};
use crate::builder::{is_blank, BuilderList, ComponentBuilder};
use crate::documents::Element;
use crate::error::Result;
use crate::output::OutputEntries;
use crate::validators::values::{parse_positive_int, require_token};
use crate::validators::{
    locate, require_exclusive_content, validate_element, AttributeRule, ChildRule, ElementSchema,
};
use crate::versions::{Context, DdmsVersion};

/// Allowed values of `ddms:revisionType`
pub const REVISION_TYPES: &[&str] = &[
    "ADMINISTRATIVE RECALL",
    "ADMINISTRATIVE REVISION",
    "SECURITY RECALL",
    "SECURITY REVISION",
];

/// Allowed values of `ddms:network`
pub const NETWORKS: &[&str] = &[
    "NIPRNet", "SIPRNet", "JWICS", "ADSN", "StoneGhost", "LOCE", "CENTRIXS", "Other",
];

static SCHEMA: ElementSchema = ElementSchema {
    names: &[(DdmsVersion::V2_0, "revisionRecall")],
    since: Some(DdmsVersion::V4_1),
    attributes: &[
        AttributeRule::required("revisionID"),
        AttributeRule::required("revisionType"),
        AttributeRule::optional("network"),
        AttributeRule::optional("otherNetwork"),
    ],
    children: &[ChildRule::component("link", 0, None)],
};

/// The revision or recall attributes of a [`RevisionRecall`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RevisionAttributes {
    /// Positive revision number
    pub revision_id: i32,
    /// One of [`REVISION_TYPES`]
    pub revision_type: String,
    /// One of [`NETWORKS`]
    pub network: Option<String>,
    /// Network name when `network` is "Other"
    pub other_network: Option<String>,
}

impl RevisionAttributes {
    /// Attributes with an ID and type and no network
    pub fn new(revision_id: i32, revision_type: &str) -> Self {
        Self {
            revision_id,
            revision_type: revision_type.to_string(),
            network: None,
            other_network: None,
        }
    }

    /// Set the network and other network
    pub fn with_network(mut self, network: &str, other_network: Option<&str>) -> Self {
        self.network = Some(network.to_string());
        self.other_network = other_network.map(str::to_string);
        self
    }

    fn lexical(&self) -> [(&'static str, Option<String>); 4] {
        [
            ("revisionID", Some(self.revision_id.to_string())),
            ("revisionType", Some(self.revision_type.clone())),
            ("network", self.network.clone()),
            ("otherNetwork", self.other_network.clone()),
        ]
    }
}

/// A notice that a resource was revised or recalled
///
/// The content is either a text description or nested links, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevisionRecall {
    header: ComponentHeader,
    links: Vec<Link>,
    value: String,
    revision: RevisionAttributes,
    xlink: XLinkAttributes,
    security: SecurityAttributes,
}

impl RevisionRecall {
    /// Build from a parsed element
    pub fn from_element(element: &Element, ctx: &Context) -> Result<Self> {
        let mut warnings = validate_element(&SCHEMA, element, ctx)?;
        require_exclusive_content(element).map_err(|e| locate(e, element))?;

        let revision = read_revision(element, ctx).map_err(|e| locate(e, element))?;
        let xlink = XLinkAttributes::from_element(element, ctx)
            .and_then(|x| x.require_type(XLinkType::Resource, false).map(|_| x))
            .map_err(|e| locate(e, element))?;
        let security = SecurityAttributes::from_element(element, ctx)
            .and_then(|s| s.require_classification().map(|_| s))
            .map_err(|e| locate(e, element))?;

        let links = element
            .find_children(Some(ctx.version().namespace()), "link")
            .into_iter()
            .map(|child| Link::from_element(child, ctx))
            .collect::<Result<Vec<_>>>()?;
        warnings.extend(nested_warnings(element, &links));

        Ok(Self {
            header: ComponentHeader::new(SCHEMA.name(ctx.version()), ctx, warnings),
            links,
            value: element.text_value().to_string(),
            revision,
            xlink,
            security,
        })
    }

    /// Build with nested links as content
    pub fn with_links(
        links: &[Link],
        revision: &RevisionAttributes,
        xlink: &XLinkAttributes,
        security: &SecurityAttributes,
        ctx: &Context,
    ) -> Result<Self> {
        for link in links {
            require_child_version(ctx, link)?;
        }
        let mut element = schema_element(&SCHEMA, ctx);
        write_element(&mut element, ctx, links, "", &revision.lexical(), xlink, security);
        Self::from_element(&element, ctx)
    }

    /// Build with a text description as content
    pub fn with_value(
        value: &str,
        revision: &RevisionAttributes,
        xlink: &XLinkAttributes,
        security: &SecurityAttributes,
        ctx: &Context,
    ) -> Result<Self> {
        let mut element = schema_element(&SCHEMA, ctx);
        write_element(&mut element, ctx, &[], value, &revision.lexical(), xlink, security);
        Self::from_element(&element, ctx)
    }

    /// Nested links
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Text description
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Revision ID, type and network
    pub fn revision(&self) -> &RevisionAttributes {
        &self.revision
    }

    /// XLink resource attributes
    pub fn xlink_attributes(&self) -> &XLinkAttributes {
        &self.xlink
    }

    /// Security attributes
    pub fn security_attributes(&self) -> &SecurityAttributes {
        &self.security
    }
}

fn read_revision(element: &Element, ctx: &Context) -> Result<RevisionAttributes> {
    let ns = Some(ctx.version().namespace());
    let get = |name: &str| {
        element
            .get_attribute(ns, name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let revision_id = parse_positive_int("revisionID", get("revisionID").unwrap_or_default())?;
    let revision_type = get("revisionType").unwrap_or_default();
    require_token("revisionType", revision_type, REVISION_TYPES)?;
    let network = get("network");
    if let Some(network) = network {
        require_token("network", network, NETWORKS)?;
    }

    Ok(RevisionAttributes {
        revision_id,
        revision_type: revision_type.to_string(),
        network: network.map(str::to_string),
        other_network: get("otherNetwork").map(str::to_string),
    })
}

fn write_element(
    element: &mut Element,
    ctx: &Context,
    links: &[Link],
    value: &str,
    revision: &[(&str, Option<String>)],
    xlink: &XLinkAttributes,
    security: &SecurityAttributes,
) {
    let ns = ctx.version().namespace();
    for (name, lexical) in revision {
        element.set_optional_attribute(ctx.ddms_prefix(), ns, name, lexical.as_deref());
    }
    xlink.apply_to(element, ctx);
    security.apply_to(element, ctx);
    for link in links {
        element.add_child(link.to_element());
    }
    element.set_text(value.to_string());
}

impl DdmsComponent for RevisionRecall {
    fn header(&self) -> &ComponentHeader {
        &self.header
    }

    fn to_element(&self) -> Element {
        let mut element = self.header.element();
        write_element(
            &mut element,
            self.header.context(),
            &self.links,
            &self.value,
            &self.revision.lexical(),
            &self.xlink,
            &self.security,
        );
        element
    }

    fn write_output(&self, out: &mut OutputEntries, prefix: &str, suffix: &str) {
        let base = key_base(prefix, self.name(), suffix);
        let total = self.links.len();
        for (i, link) in self.links.iter().enumerate() {
            let link_suffix = out.suffix(i, total, true);
            link.write_output(out, &format!("{}.", base), &link_suffix);
        }
        for (name, lexical) in self.revision.lexical() {
            out.push(format!("{}.{}", base, name), lexical.unwrap_or_default());
        }
        self.xlink.write_output(out, &format!("{}.", base));
        out.push(base.as_str(), &self.value);
        self.security.write_output(out, &format!("{}.", base));
    }
}

/// Builder for [`RevisionRecall`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionRecallBuilder {
    /// Nested links
    pub links: BuilderList<LinkBuilder>,
    /// Text description
    pub value: String,
    /// Revision ID, as text
    pub revision_id: String,
    /// Revision type
    pub revision_type: String,
    /// Network
    pub network: String,
    /// Other network
    pub other_network: String,
    /// XLink resource attributes
    pub xlink: XLinkAttributesBuilder,
    /// Security attributes
    pub security: SecurityAttributesBuilder,
}

impl ComponentBuilder for RevisionRecallBuilder {
    type Target = RevisionRecall;

    fn is_empty(&self) -> bool {
        self.links.all_empty()
            && [
                &self.value,
                &self.revision_id,
                &self.revision_type,
                &self.network,
                &self.other_network,
            ]
            .into_iter()
            .all(|v| is_blank(v))
            && self.xlink.is_empty()
            && self.security.is_empty()
    }

    fn commit(&self, ctx: &Context) -> Result<Option<RevisionRecall>> {
        if self.is_empty() {
            return Ok(None);
        }
        let links = self.links.commit_all(ctx)?;
        let xlink = self.xlink.commit(ctx)?;
        let security = self.security.commit(ctx)?;
        let optional = |v: &String| Some(v.trim().to_string()).filter(|v| !v.is_empty());
        let revision = [
            ("revisionID", optional(&self.revision_id)),
            ("revisionType", optional(&self.revision_type)),
            ("network", optional(&self.network)),
            ("otherNetwork", optional(&self.other_network)),
        ];

        let mut element = schema_element(&SCHEMA, ctx);
        write_element(&mut element, ctx, &links, &self.value, &revision, &xlink, &security);
        RevisionRecall::from_element(&element, ctx).map(Some)
    }
}

impl From<&RevisionRecall> for RevisionRecallBuilder {
    fn from(recall: &RevisionRecall) -> Self {
        Self {
            links: recall.links.iter().map(LinkBuilder::from).collect(),
            value: recall.value.clone(),
            revision_id: recall.revision.revision_id.to_string(),
            revision_type: recall.revision.revision_type.clone(),
            network: recall.revision.network.clone().unwrap_or_default(),
            other_network: recall.revision.other_network.clone().unwrap_or_default(),
            xlink: XLinkAttributesBuilder::from(&recall.xlink),
            security: SecurityAttributesBuilder::from(&recall.security),
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

    fn security() -> SecurityAttributes {
        SecurityAttributes::new("U", &["USA"], &ctx()).unwrap()
    }

    fn revision() -> RevisionAttributes {
        RevisionAttributes::new(1, "ADMINISTRATIVE RECALL").with_network("NIPRNet", None)
    }

    fn resource() -> XLinkAttributes {
        XLinkAttributes::resource(Some("tank"), Some("Tank Page"), Some("tank"), &ctx()).unwrap()
    }

    fn link() -> Link {
        let xlink = XLinkAttributes::locator("http://en.wikipedia.org/wiki/Tank", None, None, None, &ctx()).unwrap();
        Link::new(&xlink, &SecurityAttributes::default(), &ctx()).unwrap()
    }

    #[test]
    fn test_constructor_equivalence_with_value() {
        let xml = "<ddms:revisionRecall xmlns:ddms=\"urn:us:mil:ces:metadata:ddms:4\" \
                   xmlns:xlink=\"http://www.w3.org/1999/xlink\" xmlns:ism=\"urn:us:gov:ic:ism\" \
                   ddms:revisionID=\"1\" ddms:revisionType=\"ADMINISTRATIVE RECALL\" ddms:network=\"NIPRNet\" \
                   xlink:type=\"resource\" xlink:role=\"tank\" xlink:title=\"Tank Page\" xlink:label=\"tank\" \
                   ism:classification=\"U\" ism:ownerProducer=\"USA\">Description of Recall</ddms:revisionRecall>";
        let element = Document::from_string(xml).unwrap().into_root();
        let parsed = RevisionRecall::from_element(&element, &ctx()).unwrap();
        let built =
            RevisionRecall::with_value("Description of Recall", &revision(), &resource(), &security(), &ctx()).unwrap();
        assert_eq!(parsed, built);
        assert_eq!(built.to_xml(), xml);
    }

    #[test]
    fn test_constructor_with_links() {
        let recall = RevisionRecall::with_links(&[link()], &revision(), &resource(), &security(), &ctx()).unwrap();
        let element = Document::from_string(&recall.to_xml()).unwrap().into_root();
        assert_eq!(RevisionRecall::from_element(&element, &ctx()).unwrap(), recall);
        assert_eq!(recall.links().len(), 1);
        assert_eq!(recall.value(), "");
    }

    #[test]
    fn test_mixed_content_rejected() {
        let mut element = schema_element(&SCHEMA, &ctx());
        write_element(&mut element, &ctx(), &[link()], "text", &revision().lexical(), &resource(), &security());
        let err = RevisionRecall::from_element(&element, &ctx()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "A ddms:revisionRecall element cannot have both child text and nested elements."
        );
    }

    #[test]
    fn test_distinct_messages_for_type_and_id() {
        let locator = XLinkAttributes::locator("http://example.com/", None, None, None, &ctx()).unwrap();
        assert_eq!(
            RevisionRecall::with_value("x", &revision(), &locator, &security(), &ctx())
                .unwrap_err()
                .to_string(),
            "The type attribute must have a fixed value of \"resource\"."
        );

        let builder = RevisionRecallBuilder {
            value: "x".to_string(),
            revision_type: "ADMINISTRATIVE RECALL".to_string(),
            security: SecurityAttributesBuilder::from(&security()),
            ..Default::default()
        };
        assert_eq!(
            builder.commit(&ctx()).unwrap_err().to_string(),
            "revisionID attribute is required."
        );
    }

    #[test]
    fn test_value_checks() {
        let bad_id = RevisionAttributes::new(0, "ADMINISTRATIVE RECALL");
        assert_eq!(
            RevisionRecall::with_value("x", &bad_id, &resource(), &security(), &ctx())
                .unwrap_err()
                .to_string(),
            "The revisionID attribute must be a positive integer: 0"
        );
        let bad_type = RevisionAttributes::new(1, "RECALL");
        assert_eq!(
            RevisionRecall::with_value("x", &bad_type, &resource(), &security(), &ctx())
                .unwrap_err()
                .to_string(),
            "RECALL is not a valid value for the revisionType attribute."
        );
        let bad_network = RevisionAttributes::new(1, "SECURITY REVISION").with_network("Internet", None);
        assert!(RevisionRecall::with_value("x", &bad_network, &resource(), &security(), &ctx()).is_err());
        assert_eq!(
            RevisionRecall::with_value("x", &revision(), &resource(), &SecurityAttributes::default(), &ctx())
                .unwrap_err()
                .to_string(),
            "classification is required."
        );
    }

    #[test]
    fn test_version_gate() {
        let old = Context::new(DdmsVersion::V4_0_1);
        let security = SecurityAttributes::new("U", &["USA"], &old).unwrap();
        let resource = XLinkAttributes::resource(None, None, None, &old).unwrap();
        assert_eq!(
            RevisionRecall::with_value("x", &revision(), &resource, &security, &old)
                .unwrap_err()
                .to_string(),
            "The revisionRecall element cannot be used until DDMS 4.1 or later."
        );
    }

    #[test]
    fn test_indexed_link_output() {
        let recall = RevisionRecall::with_links(&[link()], &revision(), &resource(), &security(), &ctx()).unwrap();
        let text = recall.to_text(IndexLevel::Repeatable);
        assert!(text.starts_with(
            "revisionRecall.link[1].type: locator\n\
             revisionRecall.link[1].href: http://en.wikipedia.org/wiki/Tank\n\
             revisionRecall.revisionID: 1\n\
             revisionRecall.revisionType: ADMINISTRATIVE RECALL\n\
             revisionRecall.network: NIPRNet\n\
             revisionRecall.type: resource\n"
        ));
        assert!(text.ends_with("revisionRecall.classification: U\nrevisionRecall.ownerProducer: USA\n"));
    }

    #[test]
    fn test_builder() {
        let recall = RevisionRecall::with_links(&[link()], &revision(), &resource(), &security(), &ctx()).unwrap();
        assert_eq!(RevisionRecallBuilder::from(&recall).commit(&ctx()).unwrap(), Some(recall));
        assert_eq!(RevisionRecallBuilder::default().commit(&ctx()).unwrap(), None);
    }
}
