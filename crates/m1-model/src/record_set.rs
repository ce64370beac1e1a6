//! Ordered record collections and id-keyed set operations.
//!
//! A [`RecordSet`] preserves export order and keeps duplicate patient ids
//! (a list may legitimately mention a patient once per visit). Set
//! operations key strictly on patient id and never merge metadata across
//! operands; result ordering follows first-seen order in the left operand.

use std::collections::BTreeSet;

use crate::ids::PatientId;
use crate::layout::Layout;
use crate::record::Record;

/// The ordered records parsed from one input file.
#[derive(Debug, Clone)]
pub struct RecordSet {
    source: String,
    layout: Option<Layout>,
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(source: impl Into<String>, layout: Option<Layout>) -> Self {
        Self {
            source: source.into(),
            layout,
            records: Vec::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The layout the records were parsed under. `None` only for an empty
    /// set from a file with no non-blank lines and no layout override.
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// All patient ids in export order, duplicates preserved.
    pub fn extract_ids(&self) -> Vec<&PatientId> {
        self.records.iter().map(Record::patient_id).collect()
    }

    /// All normalized records in export order.
    pub fn extract_all(&self) -> &[Record] {
        &self.records
    }

    fn id_set(&self) -> BTreeSet<&PatientId> {
        self.records.iter().map(Record::patient_id).collect()
    }

    /// Ids in first-seen order, deduplicated.
    fn distinct_ids(&self) -> Vec<&PatientId> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for record in &self.records {
            if seen.insert(record.patient_id()) {
                out.push(record.patient_id());
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ids present in `a` or `b`: first-seen order of `a`, then ids unique to `b`.
pub fn union(a: &RecordSet, b: &RecordSet) -> Vec<PatientId> {
    let a_ids = a.id_set();
    let mut out: Vec<PatientId> = a.distinct_ids().into_iter().cloned().collect();
    for id in b.distinct_ids() {
        if !a_ids.contains(id) {
            out.push(id.clone());
        }
    }
    out
}

/// Ids present in both `a` and `b`, ordered by first appearance in `a`.
pub fn intersect(a: &RecordSet, b: &RecordSet) -> Vec<PatientId> {
    let b_ids = b.id_set();
    a.distinct_ids()
        .into_iter()
        .filter(|id| b_ids.contains(id))
        .cloned()
        .collect()
}

/// Ids present in `a` but not `b`, ordered by first appearance in `a`.
pub fn difference(a: &RecordSet, b: &RecordSet) -> Vec<PatientId> {
    let b_ids = b.id_set();
    a.distinct_ids()
        .into_iter()
        .filter(|id| !b_ids.contains(id))
        .cloned()
        .collect()
}
