use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::PatientId;

/// A normalized field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    /// A date-kind field that matched none of the accepted patterns. Kept
    /// opaque and flagged instead of dropped; semantic parsing of free text
    /// is deferred.
    Unparsed(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) | Self::Unparsed(value) => Some(value),
            Self::Date(_) => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn is_unparsed(&self) -> bool {
        matches!(self, Self::Unparsed(_))
    }

    /// Interchange rendering: dates as ISO `YYYY-MM-DD`, everything else
    /// verbatim.
    pub fn render(&self) -> String {
        match self {
            Self::Text(value) | Self::Unparsed(value) => value.clone(),
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// One normalized patient entry extracted from a line.
///
/// Identity is the patient id; all other fields are optional and
/// layout-dependent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    patient_id: PatientId,
    /// 1-based source line number.
    line: usize,
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(patient_id: PatientId, line: usize) -> Self {
        Self {
            patient_id,
            line,
            fields: BTreeMap::new(),
        }
    }

    pub fn patient_id(&self) -> &PatientId {
        &self.patient_id
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }
}
