//! Book text fields
//!
//! Title and author are required and trimmed; subtitle and review are
//! optional and a blank value means "absent".

use std::fmt;

use crate::error::{BookError, BookResult};

/// Non-blank, trimmed text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredText(String);

impl RequiredText {
    /// `field` names the input in the validation message
    pub fn new(field: &str, value: impl AsRef<str>) -> BookResult<Self> {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return Err(BookError::Validation(format!("{} cannot be empty", capitalize(field))));
        }
        Ok(Self(value.to_string()))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequiredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim optional text, mapping blank to `None`
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert_eq!(
            RequiredText::new("title", "  Atomic Habits ").unwrap().as_str(),
            "Atomic Habits"
        );
        let err = RequiredText::new("title", "   ").unwrap_err();
        assert!(matches!(err, BookError::Validation(ref m) if m == "Title cannot be empty"));
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(Some(" An Easy Way ")), Some("An Easy Way".to_string()));
    }
}
