//! # binspect: declarative layouts for partially-known binary formats
//!
//! Declare the fields you believe a file contains, point a [`Reader`] at the bytes, and
//! get back every decoded value together with the byte ranges nobody claimed yet. Built
//! for reverse-engineering: layouts can be speculative, fields may overlap, and a lenient
//! read keeps going past fields that don't fit.
//!
//! ## Field kinds
//!
//! - Integers: `u8`, `u16`, `u32`, `u64`, `i8`, `i16`, `i32`, `i64` ([`IntField`])
//! - Nested blocks with their own field list and an optional byte [`Transform`]
//!   (XOR, NOT, reversal, or any closure) run before decoding ([`NestedBlockField`])
//! - Integer arrays, fixed-length and NUL-terminated strings, magic literals
//!
//! Integers, arrays and strings take a transform as well, for obfuscated scalars.
//!
//! Positions are absolute offsets, the value of an earlier field (`@ *ptr`), or "right
//! after the previous field". Lengths are literals or the value of an earlier field.
//!
//! ## Example layout
//!
//! ```text
//! u32 f_size @ 0x04;
//! u32 book_size @ 0x08;
//! block body @ 0x11 [book_size] | xor(0x73) {
//!     u8 kind;
//!     cstring title;
//! }
//! ```
//!
//! ## Usage
//!
//! ```
//! use binspect::{parse, Endianness, Reader, ReaderOpts};
//!
//! let fields = parse("u8 n @ 0; block body @ 1 [n] { u16 x; }").unwrap();
//! let reader = Reader::new(fields, ReaderOpts::default().with_gaps()).unwrap();
//! let result = reader.read_slice(&[2, 0x34, 0x12, 0xff], Endianness::Little).unwrap();
//! assert_eq!(result.path("body.x").and_then(|v| v.as_u64()), Some(0x1234));
//! assert_eq!(result.gaps().unwrap().len(), 1);
//! ```

pub mod context;
mod decode;
pub mod dump;
pub mod error;
pub mod field;
pub mod gaps;
pub mod parser;
pub mod reader;
pub mod source;
pub mod transform;
pub mod value;

pub use context::ResolutionContext;
pub use error::ReadError;
pub use field::{
    ArrayField, Field, IntField, LengthSource, LiteralField, NestedBlockField, Position, StringField,
    StringKind,
};
pub use gaps::{compute_gaps, merge_ranges, ByteRange};
pub use parser::{parse, ParseError};
pub use reader::{FieldEntry, FieldFailure, ReadResult, Reader, ReaderOpts};
pub use source::{Binary, BinaryFile, ByteSource, Endianness};
pub use transform::Transform;
pub use value::Value;
