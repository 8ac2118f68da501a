//! Header layout: the names that surround the generated enumeration.
//!
//! [`Layout::default`] reproduces the accessibility role header exactly.
//! Other layouts are loaded from JSON with [`load_layout_from_str`]; any
//! field left out keeps its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or validating a layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// JSON deserialization failed.
    #[error("invalid layout JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field value cannot be emitted into a header.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The name of the field that failed validation.
        field: String,
        /// A human-readable explanation of why the field value is invalid.
        reason: String,
    },
}

/// Names used when scanning the IDL and rendering the header.
///
/// # Example
/// ```
/// let layout = rolegen_core::Layout {
///     namespaces: vec!["app".into(), "roles".into()],
///     ..Default::default()
/// };
/// assert!(layout.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    /// Constant prefix matched in the IDL and stripped from emitted names.
    pub prefix: String,
    /// Plural noun used in the provenance comment (`Roles are defined in ...`).
    pub subject: String,
    /// Authoritative source named in the provenance comment.
    pub defined_in: String,
    /// Include guard macro.
    pub guard: String,
    /// Enclosing namespaces, outermost first.
    pub namespaces: Vec<String>,
    /// Name of the generated enum.
    pub enum_name: String,
    /// Sentinel enumerator aliasing the last entry.
    pub sentinel: String,
    /// Flattened typedef name exported into the enclosing namespace.
    pub alias: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            prefix: "ROLE_".into(),
            subject: "Roles".into(),
            defined_in: "accessible/interfaces/nsIAccessibleRole.idl".into(),
            guard: "_role_h_".into(),
            namespaces: vec!["mozilla".into(), "a11y".into(), "roles".into()],
            enum_name: "Role".into(),
            sentinel: "LAST_ROLE".into(),
            alias: "role".into(),
        }
    }
}

impl Layout {
    /// Check that every field can be emitted verbatim.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.prefix.is_empty() {
            return Err(invalid("prefix", "must not be empty"));
        }
        if !self
            .prefix
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            return Err(invalid(
                "prefix",
                format!("'{}' may only contain ASCII letters, digits and '_'", self.prefix),
            ));
        }

        check_comment_text("subject", &self.subject)?;
        check_comment_text("defined_in", &self.defined_in)?;

        check_identifier("guard", &self.guard)?;
        check_identifier("enum_name", &self.enum_name)?;
        check_identifier("sentinel", &self.sentinel)?;
        check_identifier("alias", &self.alias)?;

        if self.namespaces.is_empty() {
            return Err(invalid("namespaces", "at least one namespace is required"));
        }
        for (i, ns) in self.namespaces.iter().enumerate() {
            check_identifier(&format!("namespaces[{i}]"), ns)?;
        }

        Ok(())
    }

    /// `outer::...::inner::Enum`, as used by the typedef.
    pub fn qualified_enum(&self) -> String {
        let mut path = self.namespaces.join("::");
        path.push_str("::");
        path.push_str(&self.enum_name);
        path
    }
}

/// Parse and validate a layout from a JSON string.
pub fn load_layout_from_str(s: &str) -> Result<Layout, LayoutError> {
    let layout: Layout = serde_json::from_str(s)?;
    layout.validate()?;
    Ok(layout)
}

fn invalid(field: &str, reason: impl Into<String>) -> LayoutError {
    LayoutError::InvalidField {
        field: field.into(),
        reason: reason.into(),
    }
}

fn check_identifier(field: &str, value: &str) -> Result<(), LayoutError> {
    let mut bytes = value.bytes();
    let valid = match bytes.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == b'_')
                && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(invalid(field, format!("'{value}' is not a C++ identifier")))
    }
}

// Lands inside a `/* ... */` comment on a single line.
fn check_comment_text(field: &str, value: &str) -> Result<(), LayoutError> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    if value.contains("*/") || value.contains('\n') || value.contains('\r') {
        return Err(invalid(field, "must not contain '*/' or line breaks"));
    }
    Ok(())
}
