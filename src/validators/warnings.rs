//! Non-fatal validation findings

use serde::Serialize;
use std::fmt;

/// A non-fatal finding recorded on a successfully constructed component
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ValidationWarning {
    text: String,
    locator: String,
}

impl ValidationWarning {
    /// Create a warning for the element at `locator`
    pub fn new(text: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            locator: locator.into(),
        }
    }

    /// Warning text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Locator path, e.g. `/ddms:organization/ddms:subOrganization`
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Re-root this warning under a parent element
    pub fn under(&self, parent_qualified_name: &str) -> Self {
        Self {
            text: self.text.clone(),
            locator: format!("/{}{}", parent_qualified_name, self.locator),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.locator, self.text)
    }
}
