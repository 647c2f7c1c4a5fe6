//! Library configuration
//!
//! Prefixes used when components are built from data, the default output
//! index level, and input limits. Every field has a default, so a
//! configuration file only needs to name what it overrides.

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::names::is_valid_ncname;
use crate::output::IndexLevel;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Library configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix for the DDMS namespace
    pub ddms_prefix: String,
    /// Prefix for the ISM (security) namespace
    pub ism_prefix: String,
    /// Prefix for the XLink namespace
    pub xlink_prefix: String,
    /// Default output index level (0, 1 or 2)
    pub index_level: u8,
    /// Input limits
    pub limits: Limits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ddms_prefix: "ddms".to_string(),
            ism_prefix: "ism".to_string(),
            xlink_prefix: "xlink".to_string(),
            index_level: 0,
            limits: Limits::default(),
        }
    }
}

impl Config {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check prefixes and index level
    pub fn validate(&self) -> Result<()> {
        for (key, prefix) in [
            ("ddms_prefix", &self.ddms_prefix),
            ("ism_prefix", &self.ism_prefix),
            ("xlink_prefix", &self.xlink_prefix),
        ] {
            if !is_valid_ncname(prefix) {
                return Err(Error::Config(format!(
                    "{} must be a valid NCName: '{}'",
                    key, prefix
                )));
            }
        }
        if self.ddms_prefix == self.ism_prefix
            || self.ddms_prefix == self.xlink_prefix
            || self.ism_prefix == self.xlink_prefix
        {
            return Err(Error::Config("namespace prefixes must be distinct".to_string()));
        }
        self.output_index_level()?;
        Ok(())
    }

    /// The configured index level as an [`IndexLevel`]
    pub fn output_index_level(&self) -> Result<IndexLevel> {
        IndexLevel::from_u8(self.index_level)
    }

    /// Set the DDMS prefix
    pub fn with_ddms_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.ddms_prefix = prefix.into();
        self
    }

    /// Set the ISM prefix
    pub fn with_ism_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.ism_prefix = prefix.into();
        self
    }

    /// Set the default index level
    pub fn with_index_level(mut self, level: IndexLevel) -> Self {
        self.index_level = level.as_u8();
        self
    }

    /// Set the input limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ddms_prefix, "ddms");
        assert_eq!(config.ism_prefix, "ism");
        assert_eq!(config.xlink_prefix, "xlink");
        assert_eq!(config.output_index_level().unwrap(), IndexLevel::None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_overrides() {
        let config = Config::from_json_str(r#"{"ddms_prefix": "d", "index_level": 2}"#).unwrap();
        assert_eq!(config.ddms_prefix, "d");
        assert_eq!(config.ism_prefix, "ism");
        assert_eq!(config.output_index_level().unwrap(), IndexLevel::Repeatable);
    }

    #[test]
    fn test_rejects_bad_index_level() {
        let err = Config::from_json_str(r#"{"index_level": 3}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_bad_prefix() {
        assert!(Config::from_json_str(r#"{"ism_prefix": "1sm"}"#).is_err());
        assert!(Config::from_json_str(r#"{"ism_prefix": "ddms"}"#).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"xlink_prefix": "xl", "limits": {{"max_xml_depth": 4}}}}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.xlink_prefix, "xl");
        assert_eq!(config.limits.max_xml_depth, 4);
    }
}
