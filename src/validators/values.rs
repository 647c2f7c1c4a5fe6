//! Lexical value checks
//!
//! URI, boolean, integer, enumeration and date checks shared by the
//! components and attribute groups.

use crate::error::{invalid, ErrorKind, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use url::Url;

static TIMEZONE: &str = r"(Z|[+-](0\d|1[0-4]):[0-5]\d)?";

static GYEAR: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"^-?\d{{4,}}{}$", TIMEZONE)).unwrap());

static GYEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^-?\d{{4,}}-(0[1-9]|1[0-2]){}$", TIMEZONE)).unwrap());

static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^(\d{{4}}-\d{{2}}-\d{{2}}){}$", TIMEZONE)).unwrap());

static BASE_URI: Lazy<Url> = Lazy::new(|| Url::parse("http://localhost/").unwrap());

/// Check that a value is a syntactically valid absolute or relative URI
pub fn require_valid_uri(value: &str) -> Result<()> {
    if value.chars().any(char::is_whitespace) {
        return invalid(
            ErrorKind::Value,
            format!("Invalid URI (contains whitespace): {}", value),
        );
    }
    match Url::options().base_url(Some(&*BASE_URI)).parse(value) {
        Ok(_) => Ok(()),
        Err(err) => invalid(ErrorKind::Value, format!("Invalid URI ({}): {}", err, value)),
    }
}

/// Parse an xs:boolean
pub fn parse_boolean(name: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => invalid(
            ErrorKind::Value,
            format!("The {} attribute must be a boolean value: {}", name, value),
        ),
    }
}

/// Parse a positive xs:int
pub fn parse_positive_int(name: &str, value: &str) -> Result<i32> {
    match value.trim().parse::<i32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => invalid(
            ErrorKind::Value,
            format!("The {} attribute must be a positive integer: {}", name, value),
        ),
    }
}

/// Check that a value is one of a controlled vocabulary
pub fn require_token(name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        invalid(
            ErrorKind::Value,
            format!("{} is not a valid value for the {} attribute.", value, name),
        )
    }
}

/// Lexical type of a date value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateKind {
    /// xs:dateTime
    DateTime,
    /// xs:date
    Date,
    /// xs:gYearMonth
    GYearMonth,
    /// xs:gYear
    GYear,
}

impl DateKind {
    /// Schema type name
    pub fn as_str(&self) -> &'static str {
        match self {
            DateKind::DateTime => "xs:dateTime",
            DateKind::Date => "xs:date",
            DateKind::GYearMonth => "xs:gYearMonth",
            DateKind::GYear => "xs:gYear",
        }
    }
}

/// A date attribute value, kept in its lexical form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlDate {
    lexical: String,
    kind: DateKind,
}

impl XmlDate {
    /// Parse a value in any of the accepted date types
    pub fn parse(name: &str, value: &str) -> Result<Self> {
        let value = value.trim();
        match date_kind(value) {
            Some(kind) => Ok(Self {
                lexical: value.to_string(),
                kind,
            }),
            None => invalid(
                ErrorKind::Value,
                format!(
                    "The {} attribute must be an xs:date, xs:dateTime, xs:gYearMonth or xs:gYear: {}",
                    name, value
                ),
            ),
        }
    }

    /// The value as written
    pub fn as_str(&self) -> &str {
        &self.lexical
    }

    /// Which date type the value matched
    pub fn kind(&self) -> DateKind {
        self.kind
    }
}

impl fmt::Display for XmlDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical)
    }
}

fn date_kind(value: &str) -> Option<DateKind> {
    if value.contains('T') {
        let valid = DateTime::parse_from_rfc3339(value).is_ok()
            || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok();
        return valid.then_some(DateKind::DateTime);
    }
    if let Some(caps) = DATE.captures(value) {
        let day = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        return NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .ok()
            .map(|_| DateKind::Date);
    }
    if GYEAR_MONTH.is_match(value) {
        return Some(DateKind::GYearMonth);
    }
    if GYEAR.is_match(value) {
        return Some(DateKind::GYear);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uris() {
        assert!(require_valid_uri("urn:buri:ddmsence:testIdentifier").is_ok());
        assert!(require_valid_uri("http://www.example.com/").is_ok());
        assert!(require_valid_uri("URI").is_ok());
        assert!(require_valid_uri("a b").is_err());
        assert!(require_valid_uri("http://[::1").is_err());
    }

    #[test]
    fn test_booleans() {
        assert!(parse_boolean("copyright", "true").unwrap());
        assert!(parse_boolean("copyright", "1").unwrap());
        assert!(!parse_boolean("copyright", "false").unwrap());
        let err = parse_boolean("copyright", "yes").unwrap_err();
        assert_eq!(
            err.to_string(),
            "The copyright attribute must be a boolean value: yes"
        );
    }

    #[test]
    fn test_positive_int() {
        assert_eq!(parse_positive_int("revisionID", "1").unwrap(), 1);
        assert!(parse_positive_int("revisionID", "0").is_err());
        assert!(parse_positive_int("revisionID", "one").is_err());
    }

    #[test]
    fn test_date_kinds() {
        assert_eq!(XmlDate::parse("created", "2003").unwrap().kind(), DateKind::GYear);
        assert_eq!(XmlDate::parse("created", "2003-02").unwrap().kind(), DateKind::GYearMonth);
        assert_eq!(XmlDate::parse("created", "2003-02-15").unwrap().kind(), DateKind::Date);
        assert_eq!(XmlDate::parse("created", "2003-02-15Z").unwrap().kind(), DateKind::Date);
        assert_eq!(
            XmlDate::parse("created", "2003-02-15T12:30:00Z").unwrap().kind(),
            DateKind::DateTime
        );
        assert_eq!(
            XmlDate::parse("created", "2003-02-15T12:30:00").unwrap().kind(),
            DateKind::DateTime
        );
    }

    #[test]
    fn test_invalid_dates() {
        assert!(XmlDate::parse("created", "2003-13").is_err());
        assert!(XmlDate::parse("created", "2003-02-30").is_err());
        assert!(XmlDate::parse("created", "soon").is_err());
        assert!(XmlDate::parse("created", "03").is_err());
    }

    #[test]
    fn test_tokens() {
        assert!(require_token("network", "SIPRNet", &["NIPRNet", "SIPRNet"]).is_ok());
        let err = require_token("network", "Internet", &["NIPRNet"]).unwrap_err();
        assert_eq!(err.to_string(), "Internet is not a valid value for the network attribute.");
    }
}
