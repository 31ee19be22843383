//! Errors raised while declaring layouts and reading bytes.

/// Everything that can go wrong while building a field list or decoding a source.
///
/// Per-field failures surfaced by a strict [`Reader`](crate::Reader) are wrapped in
/// [`ReadError::Field`], which carries the failing field's name and its index in the
/// declaration order. A failure inside a nested block nests the wrapper once per level;
/// [`ReadError::root`] strips them all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("Out of bounds: {length} bytes at {start:#x} exceed source of {available} bytes")]
    OutOfBounds { start: u64, length: u64, available: u64 },
    #[error("Invalid width: {0} bits (expected 8, 16, 32 or 64)")]
    InvalidWidth(u32),
    #[error("Unresolved reference: {0}")]
    UnresolvedReference(String),
    #[error("Non-integer length: field {name} holds {found}")]
    NonIntegerLength { name: String, found: String },
    #[error("Duplicate field name: {0}")]
    DuplicateFieldName(String),
    #[error("Literal mismatch: expected {expected:02x?}, found {found:02x?}")]
    LiteralMismatch { expected: Vec<u8>, found: Vec<u8> },
    #[error("field {name} (#{index}): {source}")]
    Field {
        name: String,
        index: usize,
        source: Box<ReadError>,
    },
}

impl ReadError {
    /// Innermost error, with every field wrapper removed.
    pub fn root(&self) -> &ReadError {
        match self {
            ReadError::Field { source, .. } => source.root(),
            other => other,
        }
    }

    /// Names of the fields the error passed through, outermost first.
    pub fn field_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut cur = self;
        while let ReadError::Field { name, source, .. } = cur {
            path.push(name.as_str());
            cur = source;
        }
        path
    }

    pub(crate) fn in_field(self, name: &str, index: usize) -> Self {
        ReadError::Field {
            name: name.to_string(),
            index,
            source: Box::new(self),
        }
    }
}
