//! DDMS versions and the per-call construction context
//!
//! There is no process-wide "current version". Every construction,
//! validation and builder commit receives a [`Context`] naming the version
//! it runs under, so components for different versions can be built side by
//! side.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::namespaces::XLINK_NAMESPACE;
use std::fmt;

/// A supported DDMS specification version, in release order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DdmsVersion {
    /// DDMS 2.0
    V2_0,
    /// DDMS 3.0
    V3_0,
    /// DDMS 3.1
    V3_1,
    /// DDMS 4.0.1
    V4_0_1,
    /// DDMS 4.1
    V4_1,
}

impl DdmsVersion {
    /// All supported versions, oldest first
    pub const ALL: [DdmsVersion; 5] = [
        DdmsVersion::V2_0,
        DdmsVersion::V3_0,
        DdmsVersion::V3_1,
        DdmsVersion::V4_0_1,
        DdmsVersion::V4_1,
    ];

    /// Parse a version token such as `"3.1"` or `"4.0.1"`
    ///
    /// `"4.0"` is accepted as an alias of 4.0.1.
    pub fn parse(token: &str) -> Result<Self> {
        match token.trim() {
            "2.0" => Ok(DdmsVersion::V2_0),
            "3.0" => Ok(DdmsVersion::V3_0),
            "3.1" => Ok(DdmsVersion::V3_1),
            "4.0" | "4.0.1" => Ok(DdmsVersion::V4_0_1),
            "4.1" => Ok(DdmsVersion::V4_1),
            other => Err(Error::UnsupportedVersion(format!(
                "Unsupported DDMS Version: {}",
                other
            ))),
        }
    }

    /// The newest version
    pub fn latest() -> Self {
        DdmsVersion::V4_1
    }

    /// The newest version whose DDMS namespace is `namespace`
    pub fn for_namespace(namespace: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|v| v.namespace() == namespace)
            .ok_or_else(|| {
                Error::UnsupportedVersion(format!(
                    "Unsupported DDMS namespace: {}",
                    namespace
                ))
            })
    }

    /// The version token
    pub fn as_str(&self) -> &'static str {
        match self {
            DdmsVersion::V2_0 => "2.0",
            DdmsVersion::V3_0 => "3.0",
            DdmsVersion::V3_1 => "3.1",
            DdmsVersion::V4_0_1 => "4.0.1",
            DdmsVersion::V4_1 => "4.1",
        }
    }

    /// True if this version is `other` or newer
    pub fn is_at_least(&self, other: DdmsVersion) -> bool {
        *self >= other
    }

    /// DDMS namespace URI
    pub fn namespace(&self) -> &'static str {
        match self {
            DdmsVersion::V2_0 => "http://metadata.dod.mil/mdr/ns/DDMS/2.0/",
            DdmsVersion::V3_0 => "http://metadata.dod.mil/mdr/ns/DDMS/3.0/",
            DdmsVersion::V3_1 => "http://metadata.dod.mil/mdr/ns/DDMS/3.1/",
            DdmsVersion::V4_0_1 | DdmsVersion::V4_1 => "urn:us:mil:ces:metadata:ddms:4",
        }
    }

    /// ISM (security attributes) namespace URI
    pub fn ism_namespace(&self) -> &'static str {
        match self {
            DdmsVersion::V2_0 => "urn:us:gov:ic:ism:v2",
            _ => "urn:us:gov:ic:ism",
        }
    }

    /// XLink namespace URI
    pub fn xlink_namespace(&self) -> &'static str {
        XLINK_NAMESPACE
    }
}

impl fmt::Display for DdmsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for DdmsVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl std::str::FromStr for DdmsVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Immutable context for constructing and validating components
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    version: DdmsVersion,
    config: Config,
}

impl Context {
    /// Context for a version with default configuration
    pub fn new(version: DdmsVersion) -> Self {
        Self {
            version,
            config: Config::default(),
        }
    }

    /// Context for a version token such as `"4.1"`
    pub fn for_version_token(token: &str) -> Result<Self> {
        Ok(Self::new(DdmsVersion::parse(token)?))
    }

    /// Context with an explicit configuration
    pub fn with_config(version: DdmsVersion, config: Config) -> Self {
        Self { version, config }
    }

    /// The active version
    pub fn version(&self) -> DdmsVersion {
        self.version
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Copy of this context running under another version
    pub fn at(&self, version: DdmsVersion) -> Self {
        Self {
            version,
            config: self.config.clone(),
        }
    }

    /// Prefix for the DDMS namespace
    pub fn ddms_prefix(&self) -> &str {
        &self.config.ddms_prefix
    }

    /// Prefix for the ISM namespace
    pub fn ism_prefix(&self) -> &str {
        &self.config.ism_prefix
    }

    /// Prefix for the XLink namespace
    pub fn xlink_prefix(&self) -> &str {
        &self.config.xlink_prefix
    }
}
