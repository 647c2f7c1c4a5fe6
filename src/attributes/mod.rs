//! Attribute groups
//!
//! Reusable bundles of attributes validated and attached as a unit.

pub mod security;
pub mod xlink;

pub use security::{SecurityAttributes, SecurityAttributesBuilder};
pub use xlink::{XLinkAttributes, XLinkAttributesBuilder, XLinkType};
