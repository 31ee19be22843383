//! Running table of decoded fields for one read pass.

use crate::error::ReadError;
use crate::field::{LengthSource, Position};
use crate::reader::FieldEntry;
use crate::value::Value;
use std::collections::HashMap;

/// Values decoded so far, in declaration order, plus the end of the last decoded field.
///
/// Each call to [`Reader::read`](crate::Reader::read) owns a fresh context, and so does
/// every nested block: a block's subfields cannot see the parent's names.
#[derive(Debug, Default)]
pub struct ResolutionContext {
    entries: Vec<FieldEntry>,
    by_name: HashMap<String, usize>,
    cursor: u64,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.by_name.get(name).map(|&i| &self.entries[i].value)
    }

    /// Offset just past the most recently decoded field (0 before any).
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn insert(&mut self, entry: FieldEntry) {
        self.cursor = entry.range.end();
        self.by_name.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
    }

    /// Value of `name` as a non-negative integer.
    pub fn resolve_u64(&self, name: &str) -> Result<u64, ReadError> {
        let value = self
            .get(name)
            .ok_or_else(|| ReadError::UnresolvedReference(name.to_string()))?;
        value.as_length().ok_or_else(|| ReadError::NonIntegerLength {
            name: name.to_string(),
            found: value.describe(),
        })
    }

    pub fn resolve_length(&self, length: &LengthSource) -> Result<u64, ReadError> {
        match length {
            LengthSource::Literal(n) => Ok(*n),
            LengthSource::Field(name) => self.resolve_u64(name),
        }
    }

    pub fn resolve_start(&self, position: &Position) -> Result<u64, ReadError> {
        match position {
            Position::Absolute(offset) => Ok(*offset),
            Position::ValueOf(name) => self.resolve_u64(name),
            Position::Next => Ok(self.cursor),
        }
    }

    pub(crate) fn into_entries(self) -> Vec<FieldEntry> {
        self.entries
    }
}
