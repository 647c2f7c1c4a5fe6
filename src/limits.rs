//! Limits and constraints for component parsing
//!
//! This module defines limits applied while reading XML input, to protect
//! against oversized or pathologically nested documents.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Input limits configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum element nesting depth
    pub max_xml_depth: usize,

    /// Maximum XML input size in bytes
    pub max_xml_size: usize,

    /// Maximum number of nodes in a parsed document
    pub max_nodes: u32,

    /// Maximum number of attributes per element
    pub max_attributes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_xml_depth: 64,
            max_xml_size: 10 * 1024 * 1024, // 10 MB
            max_nodes: 100_000,
            max_attributes: 256,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_xml_depth: 16,
            max_xml_size: 1024 * 1024, // 1 MB
            max_nodes: 10_000,
            max_attributes: 64,
        }
    }

    /// Check if XML depth is within limits
    pub fn check_xml_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_xml_depth {
            Err(Error::LimitExceeded(format!(
                "XML depth {} exceeds maximum {}",
                depth, self.max_xml_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if XML size is within limits
    pub fn check_xml_size(&self, size: usize) -> Result<()> {
        if size > self.max_xml_size {
            Err(Error::LimitExceeded(format!(
                "XML size {} bytes exceeds maximum {} bytes",
                size, self.max_xml_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if number of attributes is within limits
    pub fn check_attributes(&self, count: usize) -> Result<()> {
        if count > self.max_attributes {
            Err(Error::LimitExceeded(format!(
                "Attribute count {} exceeds maximum {}",
                count, self.max_attributes
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_xml_depth, 64);
        assert!(limits.check_xml_depth(10).is_ok());
        assert!(limits.check_xml_depth(65).is_err());
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert!(limits.max_xml_depth < Limits::default().max_xml_depth);
        assert!(limits.check_xml_depth(17).is_err());
    }

    #[test]
    fn test_check_xml_size() {
        let limits = Limits::default();
        assert!(limits.check_xml_size(1024).is_ok());
        assert!(limits.check_xml_size(20 * 1024 * 1024).is_err());
    }

    #[test]
    fn test_check_attributes() {
        let limits = Limits::strict();
        assert!(limits.check_attributes(10).is_ok());
        assert!(matches!(
            limits.check_attributes(100),
            Err(Error::LimitExceeded(_))
        ));
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let limits: Limits = serde_json::from_str(r#"{"max_xml_depth": 8}"#).unwrap();
        assert_eq!(limits.max_xml_depth, 8);
        assert_eq!(limits.max_nodes, Limits::default().max_nodes);
    }
}
