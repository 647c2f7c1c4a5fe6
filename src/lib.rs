//! # ddms
//!
//! Versioned, validating XML bindings for DDMS metadata components.
//!
//! Every component is immutable and valid once constructed. It can be read
//! from XML or built from plain values, and both paths run the same checks
//! for the DDMS version in the caller's [`Context`]. Non-fatal findings are
//! kept on the component as [`ValidationWarning`]s.
//!
//! ## Features
//!
//! - DDMS 2.0, 3.0, 3.1, 4.0.1 and 4.1
//! - Element and attribute gating by version
//! - Canonical XML, HTML meta tag and text output
//! - Mutable builders for form-style editing
//! - Protection against oversized or deeply nested input
//!
//! ## Example
//!
//! ```rust,ignore
//! use ddms::{Context, DdmsComponent, DdmsVersion, Identifier, IndexLevel};
//!
//! let ctx = Context::new(DdmsVersion::V4_1);
//! let identifier = Identifier::new("URI", "urn:buri:ddmsence:testIdentifier", &ctx)?;
//! println!("{}", identifier.to_xml());
//! println!("{}", identifier.to_text(IndexLevel::None));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;
pub mod config;

// XML plumbing
pub mod namespaces;
pub mod names;
pub mod documents;

// Versions and validation
pub mod versions;
pub mod validators;

// Components
pub mod attributes;
pub mod builder;
pub mod components;
pub mod output;

// Re-exports for convenience
pub use attributes::{SecurityAttributes, XLinkAttributes, XLinkType};
pub use builder::{BuilderList, ComponentBuilder};
pub use components::*;
pub use config::Config;
pub use error::{Error, ErrorKind, Result, ValidationError};
pub use output::IndexLevel;
pub use validators::ValidationWarning;
pub use versions::{Context, DdmsVersion};

/// Version of the ddms library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
