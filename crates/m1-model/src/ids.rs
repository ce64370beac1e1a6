#![deny(unsafe_code)]

use std::fmt;

use crate::error::ModelError;

/// A patient identifier extracted from a list export.
///
/// Identity for set operations is the canonical string form: surrounding
/// whitespace is stripped on construction, and all-numeric ids may be
/// zero-padded to a layout-declared width so `"42"` and `"0042"` compare
/// equal under a 4-wide id rule.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct PatientId(String);

impl PatientId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidPatientId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Build the canonical form of a raw id token.
    ///
    /// `pad` is the zero-pad width declared by the layout's id field, if any.
    /// Padding applies only to all-numeric tokens; alphanumeric ids are kept
    /// as trimmed.
    pub fn canonical(value: &str, pad: Option<usize>) -> Result<Self, ModelError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidPatientId(value.to_string()));
        }
        let canonical = match pad {
            Some(width)
                if trimmed.len() < width && trimmed.bytes().all(|b| b.is_ascii_digit()) =>
            {
                format!("{trimmed:0>width$}")
            }
            _ => trimmed.to_string(),
        };
        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
