//! Fields shared by producer entities (organizations and persons)

use crate::documents::Element;
use crate::error::{invalid, ErrorKind, Result};
use crate::names::{is_valid_nmtoken, join_tokens, split_tokens};
use crate::output::OutputEntries;
use crate::versions::Context;

/// Names, contact details and point-of-contact types of an entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub(crate) struct EntityFields {
    pub(crate) names: Vec<String>,
    pub(crate) phones: Vec<String>,
    pub(crate) emails: Vec<String>,
    pub(crate) poc_types: Vec<String>,
}

impl EntityFields {
    /// Read the shared fields; cardinality is already checked by the schema
    pub(crate) fn read(element: &Element, ctx: &Context) -> Result<Self> {
        let ns = Some(ctx.version().namespace());
        let fields = Self {
            names: element.child_texts(ns, "name"),
            phones: element.child_texts(ns, "phone"),
            emails: element.child_texts(ns, "email"),
            poc_types: element
                .get_attribute(Some(ctx.version().ism_namespace()), "pocType")
                .map(split_tokens)
                .unwrap_or_default(),
        };

        if fields.names.iter().all(|n| n.trim().is_empty()) {
            return invalid(
                ErrorKind::Cardinality,
                "At least 1 name element must have a non-empty value.",
            );
        }
        if let Some(bad) = fields.poc_types.iter().find(|t| !is_valid_nmtoken(t)) {
            return invalid(
                ErrorKind::Value,
                format!("{} is not a valid token for the pocType attribute.", bad),
            );
        }
        Ok(fields)
    }

    /// Set the `ism:pocType` attribute, if any types are present
    pub(crate) fn apply_poc_type(&self, element: &mut Element, ctx: &Context) {
        if !self.poc_types.is_empty() {
            element.set_attribute(
                ctx.ism_prefix(),
                ctx.version().ism_namespace(),
                "pocType",
                join_tokens(&self.poc_types),
            );
        }
    }

    /// Append `name` children
    pub(crate) fn add_names(&self, element: &mut Element) {
        for name in &self.names {
            element.add_text_child("name", name);
        }
    }

    /// Append `phone` then `email` children
    pub(crate) fn add_contacts(&self, element: &mut Element) {
        for phone in &self.phones {
            element.add_text_child("phone", phone);
        }
        for email in &self.emails {
            element.add_text_child("email", email);
        }
    }

    /// Output for the entity type and names.
    ///
    /// Entity fields sit directly under the parent's prefix; the
    /// `entityType` entry names the entity.
    pub(crate) fn write_names(&self, out: &mut OutputEntries, prefix: &str, entity_type: &str) {
        out.push(format!("{}entityType", prefix), entity_type);
        out.push_list(&format!("{}name", prefix), &self.names);
    }

    /// Output for the contact details
    pub(crate) fn write_contacts(&self, out: &mut OutputEntries, prefix: &str) {
        out.push_list(&format!("{}phone", prefix), &self.phones);
        out.push_list(&format!("{}email", prefix), &self.emails);
    }

    /// Output for the point-of-contact types
    pub(crate) fn write_poc_type(&self, out: &mut OutputEntries, prefix: &str) {
        out.push(format!("{}pocType", prefix), join_tokens(&self.poc_types));
    }
}
