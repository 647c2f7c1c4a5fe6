//! Shared validation engine
//!
//! Every component runs its element through [`validate_element`] before
//! reading component-specific rules. The element-based and data-based
//! constructors both end up here, so neither can skip a check.

use super::schema::{AttributeRule, ChildRule, ElementSchema};
use super::warnings::ValidationWarning;
use crate::documents::Element;
use crate::error::{invalid, Error, ErrorKind, Result, ValidationError};
use crate::versions::{Context, DdmsVersion};

/// Locator for an element's own warnings and errors
pub fn locator(element: &Element) -> String {
    format!("/{}", element.qualified_name())
}

/// Run the structural checks of `schema` against `element`
///
/// Checks, in order: element version gating, element name and namespace,
/// attribute version gating and presence, child version gating and
/// cardinality, then rejects DDMS children the schema does not name. Returns the warnings for optional attributes and text
/// children that are present with no value.
pub fn validate_element(
    schema: &ElementSchema,
    element: &Element,
    ctx: &Context,
) -> Result<Vec<ValidationWarning>> {
    let version = ctx.version();
    let name = schema.name(version);
    tracing::trace!(element = name, version = %version, "validating element");

    require_element_version(schema, name, version)?;
    require_qname(element, version.namespace(), name)?;

    check_attributes(schema.attributes, element, ctx).map_err(|e| locate(e, element))?;
    for rule in schema.children {
        check_child(rule, element, version).map_err(|e| locate(e, element))?;
    }
    reject_unexpected_children(schema, element, version).map_err(|e| locate(e, element))?;

    Ok(collect_warnings(schema, element, ctx))
}

/// Attach the element's locator to a validation error that has none
pub fn locate(err: Error, element: &Element) -> Error {
    match err {
        Error::Validation(e) if e.locator.is_none() => {
            Error::Validation(e.with_locator(locator(element)))
        }
        other => other,
    }
}

/// Check version gating and presence for a set of attribute rules
pub fn check_attributes(rules: &[AttributeRule], element: &Element, ctx: &Context) -> Result<()> {
    for rule in rules {
        check_attribute(rule, element, ctx)?;
    }
    Ok(())
}

/// Fail unless the element type exists under `version`
pub fn require_element_version(schema: &ElementSchema, name: &str, version: DdmsVersion) -> Result<()> {
    match schema.since {
        Some(since) if !version.is_at_least(since) => invalid(
            ErrorKind::VersionGating,
            format!(
                "The {} element cannot be used until DDMS {} or later.",
                name, since
            ),
        ),
        _ => Ok(()),
    }
}

/// Fail unless the element has the expected namespace and local name
pub fn require_qname(element: &Element, namespace: &str, local_name: &str) -> Result<()> {
    if element.namespace() == Some(namespace) && element.local_name() == local_name {
        Ok(())
    } else {
        invalid(
            ErrorKind::Structural,
            format!(
                "Unexpected namespace URI and local name encountered: {}",
                element.qualified_name()
            ),
        )
    }
}

fn check_attribute(rule: &AttributeRule, element: &Element, ctx: &Context) -> Result<()> {
    let value = element.get_attribute(Some(rule.namespace.uri(ctx)), rule.name);
    let version = ctx.version();

    if value.is_some() && !rule.is_supported(version) {
        if let Some(since) = rule.since.filter(|v| !version.is_at_least(*v)) {
            return invalid(
                ErrorKind::VersionGating,
                format!(
                    "This component cannot have a {} attribute before DDMS {}.",
                    rule.name, since
                ),
            );
        }
        if let Some(until) = rule.until {
            return invalid(
                ErrorKind::VersionGating,
                format!(
                    "The {} attribute can only be used until DDMS {}.",
                    rule.name, until
                ),
            );
        }
    }

    if rule.required && value.map_or(true, |v| v.trim().is_empty()) {
        return invalid(
            ErrorKind::Value,
            format!("{} attribute is required.", rule.name),
        );
    }
    Ok(())
}

fn check_child(rule: &ChildRule, element: &Element, version: DdmsVersion) -> Result<()> {
    let count = element
        .find_children(Some(version.namespace()), rule.name)
        .len();

    if let Some(since) = rule.since {
        if count > 0 && !version.is_at_least(since) {
            return invalid(
                ErrorKind::VersionGating,
                format!(
                    "The {} element cannot be used until DDMS {} or later.",
                    rule.name, since
                ),
            );
        }
    }

    require_bounded_count(rule.name, count, rule.min, rule.max_for(version))
}

fn reject_unexpected_children(schema: &ElementSchema, element: &Element, version: DdmsVersion) -> Result<()> {
    let unexpected = element
        .children
        .iter()
        .filter(|child| child.namespace() == Some(version.namespace()))
        .find(|child| schema.child(child.local_name()).is_none());
    match unexpected {
        Some(child) => invalid(
            ErrorKind::Structural,
            format!("Unexpected child element: {}", child.qualified_name()),
        ),
        None => Ok(()),
    }
}

/// Fail unless `count` lies within `min..=max`
pub fn require_bounded_count(name: &str, count: usize, min: usize, max: Option<usize>) -> Result<()> {
    match max {
        Some(max) if min == max && count != min => invalid(
            ErrorKind::Cardinality,
            format!("Exactly {} {} element must exist.", min, name),
        ),
        _ if count < min => invalid(
            ErrorKind::Cardinality,
            format!("At least {} {} element must exist.", min, name),
        ),
        Some(max) if count > max => invalid(
            ErrorKind::Cardinality,
            format!("No more than {} {} element can exist.", max, name),
        ),
        _ => Ok(()),
    }
}

/// Fail if a required value is blank
pub fn require_value(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        invalid(ErrorKind::Value, format!("{} is required.", name))
    } else {
        Ok(())
    }
}

/// Fail if an element mixes non-whitespace text with nested elements
pub fn require_exclusive_content(element: &Element) -> Result<()> {
    let has_text = element
        .text
        .as_deref()
        .map_or(false, |t| !t.trim().is_empty());
    if has_text && element.has_child_elements() {
        invalid(
            ErrorKind::ContentModel,
            format!(
                "A {} element cannot have both child text and nested elements.",
                element.qualified_name()
            ),
        )
    } else {
        Ok(())
    }
}

/// Fail if a nested component was built under a different version
pub fn require_same_version(
    parent: DdmsVersion,
    child: DdmsVersion,
    child_name: &str,
) -> Result<()> {
    // 4.0.1 and 4.1 share a namespace, so only a namespace change is a mismatch
    if parent.namespace() == child.namespace() {
        Ok(())
    } else {
        Err(Error::Validation(ValidationError::new(
            ErrorKind::VersionGating,
            format!(
                "A child component, {}, is using a different version of DDMS from its parent.",
                child_name
            ),
        )))
    }
}

/// Warning for an optional construct present without a value
pub fn empty_value_warning(kind: &str, qualified_name: &str, locator: &str) -> ValidationWarning {
    ValidationWarning::new(
        format!("A {} {} was found with no value.", qualified_name, kind),
        locator,
    )
}

fn collect_warnings(schema: &ElementSchema, element: &Element, ctx: &Context) -> Vec<ValidationWarning> {
    let here = locator(element);
    let mut warnings = Vec::new();

    for rule in schema.attributes.iter().filter(|r| !r.required) {
        let present_empty = element
            .get_attribute(Some(rule.namespace.uri(ctx)), rule.name)
            .map_or(false, |v| v.trim().is_empty());
        if present_empty {
            let qualified = format!("{}:{}", rule.namespace.prefix(ctx), rule.name);
            warnings.push(empty_value_warning("attribute", &qualified, &here));
        }
    }

    let namespace = ctx.version().namespace();
    for rule in schema.children.iter().filter(|r| r.text && r.min == 0) {
        for child in element.find_children(Some(namespace), rule.name) {
            if child.text_value().trim().is_empty() {
                warnings.push(empty_value_warning("element", &child.qualified_name(), &here));
            }
        }
    }

    warnings
}
