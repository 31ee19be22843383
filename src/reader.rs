//! The reader: applies a field list to a byte source.
//!
//! Fields are resolved strictly in declaration order, in a single pass:
//!
//! 1. resolve the start ([`Position`](crate::Position)) and size, looking referenced names
//!    up in the pass's [`ResolutionContext`];
//! 2. slice the source and decode (nested blocks run their transform, then recurse with a
//!    fresh reader over the subfields);
//! 3. record the occupied range in the *parent's* coordinates, whatever the transform did;
//! 4. make the value visible to later fields.
//!
//! There is no reordering or dependency sort: a field can only refer to fields declared
//! before it in the same list, and anything else is an [`ReadError::UnresolvedReference`].
//! Overlapping fields are allowed.
//!
//! In strict mode (the default) the first failure aborts the read. In lenient mode the
//! failure is recorded in [`ReadResult::errors`], the field gets no value, and the pass
//! moves on; fields that reference a failed one then fail with `UnresolvedReference`.

use crate::context::ResolutionContext;
use crate::error::ReadError;
use crate::field::{check_unique_names, Field};
use crate::gaps::{compute_gaps, ByteRange};
use crate::source::{Binary, ByteSource, Endianness};
use crate::value::Value;
use tracing::{debug, warn};

/// Options controlling a read. Nested blocks inherit their parent's options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOpts {
    /// Report byte ranges no field claimed.
    pub include_gaps: bool,
    /// Abort on the first field error instead of recording it and continuing.
    pub strict: bool,
}

impl Default for ReaderOpts {
    fn default() -> Self {
        ReaderOpts {
            include_gaps: false,
            strict: true,
        }
    }
}

impl ReaderOpts {
    pub fn with_gaps(mut self) -> Self {
        self.include_gaps = true;
        self
    }

    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }
}

/// One decoded field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    pub name: String,
    /// Type label, see [`Field::kind_label`].
    pub kind: String,
    /// Bytes the field occupies in its source.
    pub range: ByteRange,
    pub value: Value,
}

/// A field that failed in lenient mode.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFailure {
    pub name: String,
    /// Position in the declaration order.
    pub index: usize,
    pub error: ReadError,
}

/// Output of one read pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadResult {
    entries: Vec<FieldEntry>,
    gaps: Option<Vec<ByteRange>>,
    errors: Vec<FieldFailure>,
    source_len: u64,
}

impl ReadResult {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entry(name).map(|e| &e.value)
    }

    pub fn entry(&self, name: &str) -> Option<&FieldEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Look up a dotted path through nested blocks, e.g. `"body.header.count"`.
    pub fn path(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut value = self.get(parts.next()?)?;
        for part in parts {
            value = value.as_block()?.get(part)?;
        }
        Some(value)
    }

    /// Decoded fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ranges claimed by decoded fields, in declaration order.
    pub fn occupied(&self) -> Vec<ByteRange> {
        self.entries.iter().map(|e| e.range).collect()
    }

    /// Unclaimed ranges, if the read was asked for them.
    pub fn gaps(&self) -> Option<&[ByteRange]> {
        self.gaps.as_deref()
    }

    /// Raw bytes of each gap, read from the source this result was produced from.
    pub fn gap_bytes<'s>(&self, source: &'s ByteSource<'_>) -> Result<Vec<(ByteRange, &'s [u8])>, ReadError> {
        self.gaps()
            .unwrap_or_default()
            .iter()
            .map(|g| Ok((*g, source.slice(g.start, g.length)?)))
            .collect()
    }

    /// Failures recorded in lenient mode (always empty for a strict read).
    pub fn errors(&self) -> &[FieldFailure] {
        &self.errors
    }

    /// True if no field failed here or in any nested block.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
            && self
                .entries
                .iter()
                .all(|e| e.value.as_block().map_or(true, ReadResult::is_complete))
    }

    /// Length of the source this result was read from.
    pub fn source_len(&self) -> u64 {
        self.source_len
    }
}

/// A validated field list plus options.
#[derive(Debug, Clone)]
pub struct Reader {
    fields: Vec<Field>,
    opts: ReaderOpts,
}

impl Reader {
    /// Fails with [`ReadError::DuplicateFieldName`] before any byte is read.
    pub fn new(fields: Vec<Field>, opts: ReaderOpts) -> Result<Self, ReadError> {
        check_unique_names(&fields)?;
        Ok(Reader { fields, opts })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn opts(&self) -> ReaderOpts {
        self.opts
    }

    pub fn read(&self, source: &ByteSource<'_>) -> Result<ReadResult, ReadError> {
        read_fields(&self.fields, source, &self.opts)
    }

    pub fn read_slice(&self, bytes: &[u8], endianness: Endianness) -> Result<ReadResult, ReadError> {
        self.read(&ByteSource::new(bytes, endianness))
    }

    pub fn read_binary<B: Binary + ?Sized>(&self, binary: &B) -> Result<ReadResult, ReadError> {
        self.read(&ByteSource::from_binary(binary))
    }
}

/// Single sequential pass over `fields`. Nested blocks call back in here with their own
/// source, so every level gets a fresh [`ResolutionContext`].
#[tracing::instrument(level = "debug", skip_all, fields(source = %source.label(), fields = fields.len()))]
pub(crate) fn read_fields(
    fields: &[Field],
    source: &ByteSource<'_>,
    opts: &ReaderOpts,
) -> Result<ReadResult, ReadError> {
    let mut ctx = ResolutionContext::new();
    let mut errors = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        match field.resolve_and_decode(&ctx, source, opts) {
            Ok((value, range)) => {
                debug!(field = field.name(), start = range.start, length = range.length, "decoded");
                ctx.insert(FieldEntry {
                    name: field.name().to_string(),
                    kind: field.kind_label(),
                    range,
                    value,
                });
            }
            Err(e) if opts.strict => return Err(e.in_field(field.name(), index)),
            Err(e) => {
                warn!(field = field.name(), index, error = %e, next_at = ctx.cursor(), "field failed, continuing");
                errors.push(FieldFailure {
                    name: field.name().to_string(),
                    index,
                    error: e,
                });
            }
        }
    }

    let entries = ctx.into_entries();
    let gaps = opts.include_gaps.then(|| {
        let occupied: Vec<ByteRange> = entries.iter().map(|e| e.range).collect();
        compute_gaps(&occupied, source.len())
    });
    Ok(ReadResult {
        entries,
        gaps,
        errors,
        source_len: source.len(),
    })
}
