//! Field declarations: what to read, where, and how big it is.
//!
//! A layout is an ordered `Vec<Field>`. Each [`Field`] variant carries a name, a
//! [`Position`] and whatever its kind needs to work out a size. Sizes and positions may
//! refer to fields declared *earlier* in the same list by name; see
//! [`Reader`](crate::Reader) for how those references are resolved.
//!
//! Constructors validate what can be checked without bytes: integer widths and name
//! uniqueness within a block. Those errors never reach the per-field recovery path.

use crate::error::ReadError;
use crate::source::int_size;
use crate::transform::Transform;
use std::collections::HashSet;

/// Where a field starts within its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    /// Fixed byte offset.
    Absolute(u64),
    /// Offset held in an earlier field (a pointer).
    ValueOf(String),
    /// Right after the previously decoded field in the same list.
    Next,
}

/// Byte count (or element count) of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LengthSource {
    Literal(u64),
    /// Value of an earlier field, which must be a non-negative integer.
    Field(String),
}

impl From<u64> for LengthSource {
    fn from(n: u64) -> Self {
        LengthSource::Literal(n)
    }
}

impl From<&str> for LengthSource {
    fn from(name: &str) -> Self {
        LengthSource::Field(name.to_string())
    }
}

impl From<String> for LengthSource {
    fn from(name: String) -> Self {
        LengthSource::Field(name)
    }
}

/// Fixed-width integer (8, 16, 32 or 64 bits).
///
/// An optional [`Transform`] runs over the integer's raw bytes before they are decoded,
/// so an obfuscated scalar can be read in place.
#[derive(Debug, Clone)]
pub struct IntField {
    pub(crate) name: String,
    pub(crate) position: Position,
    pub(crate) width_bits: u32,
    pub(crate) signed: bool,
    pub(crate) transform: Option<Transform>,
}

impl IntField {
    pub fn new(width_bits: u32, signed: bool, name: impl Into<String>, start: u64) -> Result<Self, ReadError> {
        int_size(width_bits)?;
        Ok(IntField {
            name: name.into(),
            position: Position::Absolute(start),
            width_bits,
            signed,
            transform: None,
        })
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    pub fn width_bits(&self) -> u32 {
        self.width_bits
    }

    pub fn signed(&self) -> bool {
        self.signed
    }

    pub fn size(&self) -> u64 {
        u64::from(self.width_bits / 8)
    }
}

/// A region holding its own field list, decoded recursively.
///
/// The region's bytes run through the optional [`Transform`] first; subfield offsets are
/// relative to the start of the transformed buffer. An empty subfield list claims the
/// bytes without decoding anything.
#[derive(Debug, Clone)]
pub struct NestedBlockField {
    pub(crate) name: String,
    pub(crate) position: Position,
    pub(crate) length: LengthSource,
    pub(crate) subfields: Vec<Field>,
    pub(crate) transform: Option<Transform>,
}

impl NestedBlockField {
    pub fn new(
        start: u64,
        length: impl Into<LengthSource>,
        name: impl Into<String>,
        subfields: Vec<Field>,
    ) -> Result<Self, ReadError> {
        check_unique_names(&subfields)?;
        Ok(NestedBlockField {
            name: name.into(),
            position: Position::Absolute(start),
            length: length.into(),
            subfields,
            transform: None,
        })
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn length(&self) -> &LengthSource {
        &self.length
    }

    pub fn subfields(&self) -> &[Field] {
        &self.subfields
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }
}

/// Run of integers of one width, with a literal or referenced element count.
///
/// A transform applies to the whole run at once, not element by element.
#[derive(Debug, Clone)]
pub struct ArrayField {
    pub(crate) name: String,
    pub(crate) position: Position,
    pub(crate) element_bits: u32,
    pub(crate) signed: bool,
    pub(crate) count: LengthSource,
    pub(crate) transform: Option<Transform>,
}

impl ArrayField {
    pub fn new(
        element_bits: u32,
        signed: bool,
        count: impl Into<LengthSource>,
        name: impl Into<String>,
        start: u64,
    ) -> Result<Self, ReadError> {
        int_size(element_bits)?;
        Ok(ArrayField {
            name: name.into(),
            position: Position::Absolute(start),
            element_bits,
            signed,
            count: count.into(),
            transform: None,
        })
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    pub fn element_size(&self) -> u64 {
        u64::from(self.element_bits / 8)
    }

    pub fn count(&self) -> &LengthSource {
        &self.count
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringKind {
    /// Exactly this many bytes.
    Fixed(LengthSource),
    /// Up to and including a NUL terminator, scanning at most `max` bytes.
    CString { max: Option<u64> },
}

/// Text or opaque bytes. For a C string with a transform, the terminator is looked for in
/// the transformed bytes.
#[derive(Debug, Clone)]
pub struct StringField {
    pub(crate) name: String,
    pub(crate) position: Position,
    pub(crate) kind: StringKind,
    pub(crate) transform: Option<Transform>,
}

impl StringField {
    pub fn fixed(length: impl Into<LengthSource>, name: impl Into<String>, start: u64) -> Self {
        StringField {
            name: name.into(),
            position: Position::Absolute(start),
            kind: StringKind::Fixed(length.into()),
            transform: None,
        }
    }

    pub fn cstring(name: impl Into<String>, start: u64, max: Option<u64>) -> Self {
        StringField {
            name: name.into(),
            position: Position::Absolute(start),
            kind: StringKind::CString { max },
            transform: None,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    pub fn kind(&self) -> &StringKind {
        &self.kind
    }
}

/// Bytes that must match exactly, such as a magic number.
#[derive(Debug, Clone)]
pub struct LiteralField {
    pub(crate) name: String,
    pub(crate) position: Position,
    pub(crate) expected: Vec<u8>,
}

impl LiteralField {
    pub fn new(expected: impl Into<Vec<u8>>, name: impl Into<String>, start: u64) -> Self {
        LiteralField {
            name: name.into(),
            position: Position::Absolute(start),
            expected: expected.into(),
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn expected(&self) -> &[u8] {
        &self.expected
    }
}

/// One declared field of a layout.
#[derive(Debug, Clone)]
pub enum Field {
    Int(IntField),
    Block(NestedBlockField),
    Array(ArrayField),
    String(StringField),
    Literal(LiteralField),
}

impl Field {
    pub fn name(&self) -> &str {
        match self {
            Field::Int(f) => &f.name,
            Field::Block(f) => &f.name,
            Field::Array(f) => &f.name,
            Field::String(f) => &f.name,
            Field::Literal(f) => &f.name,
        }
    }

    pub fn position(&self) -> &Position {
        match self {
            Field::Int(f) => &f.position,
            Field::Block(f) => &f.position,
            Field::Array(f) => &f.position,
            Field::String(f) => &f.position,
            Field::Literal(f) => &f.position,
        }
    }

    /// Short type label: `u32`, `i8`, `block`, `u16[]`, `string`, `cstring`, `literal`.
    pub fn kind_label(&self) -> String {
        match self {
            Field::Int(f) => int_label(f.width_bits, f.signed),
            Field::Block(_) => "block".to_string(),
            Field::Array(f) => format!("{}[]", int_label(f.element_bits, f.signed)),
            Field::String(f) => match f.kind {
                StringKind::Fixed(_) => "string".to_string(),
                StringKind::CString { .. } => "cstring".to_string(),
            },
            Field::Literal(_) => "literal".to_string(),
        }
    }
}

fn int_label(width_bits: u32, signed: bool) -> String {
    format!("{}{}", if signed { "i" } else { "u" }, width_bits)
}

impl From<IntField> for Field {
    fn from(f: IntField) -> Self {
        Field::Int(f)
    }
}

impl From<NestedBlockField> for Field {
    fn from(f: NestedBlockField) -> Self {
        Field::Block(f)
    }
}

impl From<ArrayField> for Field {
    fn from(f: ArrayField) -> Self {
        Field::Array(f)
    }
}

impl From<StringField> for Field {
    fn from(f: StringField) -> Self {
        Field::String(f)
    }
}

impl From<LiteralField> for Field {
    fn from(f: LiteralField) -> Self {
        Field::Literal(f)
    }
}

/// Fail with [`ReadError::DuplicateFieldName`] if two fields in one list share a name.
///
/// Nested blocks are separate namespaces: a subfield may reuse a name from the parent.
pub fn check_unique_names(fields: &[Field]) -> Result<(), ReadError> {
    let mut seen = HashSet::new();
    for f in fields {
        if !seen.insert(f.name()) {
            return Err(ReadError::DuplicateFieldName(f.name().to_string()));
        }
    }
    Ok(())
}
