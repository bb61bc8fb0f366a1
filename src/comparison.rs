use tracing::debug;

use crate::{
    core::{
        Record,
        MISSING_VALUE,
    },
    schema::HeaderSchema,
};

/// A record split into pinned columns (header order, `N/A` filled in) and
/// the remaining attributes in the record's own order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributePartition {
    pub pinned: Vec<(String, String)>,
    pub extra: Vec<(String, String)>,
}

/// Records currently shown side by side, left to right in insertion order.
/// Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonList {
    header: HeaderSchema,
    entries: Vec<Record>,
}

impl ComparisonList {
    pub fn new(header: HeaderSchema) -> Self {
        let mut list = Self::default();
        list.reset(header);
        list
    }

    pub fn reset(&mut self, header: HeaderSchema) {
        self.entries.clear();
        self.header = header;
    }

    /// Search results replace whatever was being compared before.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = Record>) {
        self.entries.clear();
        self.entries.extend(records);
    }

    /// Out-of-range indices are ignored: the card was already gone.
    pub fn remove(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
        } else {
            debug!(index, len = self.entries.len(), "Ignoring removal of missing comparison entry");
        }
    }

    pub fn attributes_for(&self, record: &Record) -> AttributePartition {
        let pinned = self
            .header
            .names()
            .iter()
            .map(|name| {
                let value = record.get(name).unwrap_or(MISSING_VALUE);
                (name.clone(), value.to_string())
            })
            .collect();

        let extra = record
            .iter()
            .filter(|(name, _)| !self.header.contains(name))
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        AttributePartition { pinned, extra }
    }

    /// Index and partition of every entry, in display order.
    pub fn cards(&self) -> impl Iterator<Item = (usize, AttributePartition)> + '_ {
        self.entries.iter().enumerate().map(|(index, record)| (index, self.attributes_for(record)))
    }

    pub fn header(&self) -> &HeaderSchema {
        &self.header
    }

    pub fn entries(&self) -> &[Record] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
