//! Component validation
//!
//! This module contains the static element descriptors, the shared
//! validation engine every component runs through, lexical value checks,
//! and the non-fatal warning type.

pub mod engine;
pub mod schema;
pub mod values;
pub mod warnings;

// Re-exports
pub use engine::{
    check_attributes, locate, locator, require_bounded_count, require_exclusive_content, require_same_version,
    require_value, validate_element,
};
pub use schema::{AttributeNamespace, AttributeRule, ChildRule, ElementSchema};
pub use values::{DateKind, XmlDate};
pub use warnings::ValidationWarning;
