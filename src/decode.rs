//! Per-kind decode rules.

use crate::context::ResolutionContext;
use crate::error::ReadError;
use crate::field::{ArrayField, Field, LiteralField, NestedBlockField, StringField, StringKind};
use crate::gaps::ByteRange;
use crate::reader::{read_fields, ReaderOpts};
use crate::source::ByteSource;
use crate::transform::Transform;
use crate::value::Value;
use std::borrow::Cow;
use tracing::trace;

impl Field {
    /// Resolve this field's start and size against `ctx`, then decode it from `source`.
    ///
    /// Returns the value and the range it occupies in `source`'s coordinates.
    pub fn resolve_and_decode(
        &self,
        ctx: &ResolutionContext,
        source: &ByteSource<'_>,
        opts: &ReaderOpts,
    ) -> Result<(Value, ByteRange), ReadError> {
        let start = ctx.resolve_start(self.position())?;
        match self {
            Field::Int(f) => {
                let raw = source.slice(start, f.size())?;
                let bytes = apply_transform(&f.name, f.transform.as_ref(), raw);
                let value = ByteSource::new(&bytes, source.endianness()).decode_int(0, f.width_bits, f.signed)?;
                Ok((value, ByteRange::new(start, f.size())))
            }
            Field::Block(f) => decode_block(f, start, ctx, source, opts),
            Field::Array(f) => decode_array(f, start, ctx, source),
            Field::String(f) => decode_string(f, start, ctx, source),
            Field::Literal(f) => decode_literal(f, start, source),
        }
    }
}

fn decode_block(
    f: &NestedBlockField,
    start: u64,
    ctx: &ResolutionContext,
    source: &ByteSource<'_>,
    opts: &ReaderOpts,
) -> Result<(Value, ByteRange), ReadError> {
    let length = ctx.resolve_length(&f.length)?;
    let raw = source.slice(start, length)?;
    let label = format!("{}/{}", source.label(), f.name);
    let child = match apply_transform(&f.name, f.transform.as_ref(), raw) {
        Cow::Owned(bytes) => ByteSource::owned(bytes, source.endianness()),
        Cow::Borrowed(bytes) => ByteSource::new(bytes, source.endianness()),
    }
    .with_label(label);
    let nested = read_fields(&f.subfields, &child, opts)?;
    Ok((Value::Block(nested), ByteRange::new(start, length)))
}

/// Bytes a field decodes from: `raw` itself, or the transform's output.
fn apply_transform<'r>(name: &str, transform: Option<&Transform>, raw: &'r [u8]) -> Cow<'r, [u8]> {
    match transform {
        Some(t) => {
            trace!(field = name, transform = t.name(), len = raw.len(), "applying transform");
            Cow::Owned(t.apply(raw))
        }
        None => Cow::Borrowed(raw),
    }
}

fn decode_array(
    f: &ArrayField,
    start: u64,
    ctx: &ResolutionContext,
    source: &ByteSource<'_>,
) -> Result<(Value, ByteRange), ReadError> {
    let count = ctx.resolve_length(&f.count)?;
    let elem = f.element_size();
    let total = count.checked_mul(elem).ok_or(ReadError::OutOfBounds {
        start,
        length: u64::MAX,
        available: source.len(),
    })?;
    // Bounds-check the whole run up front so a huge count fails before allocating.
    let raw = source.slice(start, total)?;
    let bytes = apply_transform(&f.name, f.transform.as_ref(), raw);
    let view = ByteSource::new(&bytes, source.endianness());
    let items = (0..count)
        .map(|i| view.decode_int(i * elem, f.element_bits, f.signed))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((Value::Array(items), ByteRange::new(start, total)))
}

fn decode_string(
    f: &StringField,
    start: u64,
    ctx: &ResolutionContext,
    source: &ByteSource<'_>,
) -> Result<(Value, ByteRange), ReadError> {
    match &f.kind {
        StringKind::Fixed(length) => {
            let length = ctx.resolve_length(length)?;
            let raw = source.slice(start, length)?;
            let bytes = apply_transform(&f.name, f.transform.as_ref(), raw);
            Ok((Value::Bytes(bytes.into_owned()), ByteRange::new(start, length)))
        }
        StringKind::CString { max } => {
            source.slice(start, 0)?;
            let available = source.len() - start;
            let window_len = max.map_or(available, |m| m.min(available));
            let raw = source.slice(start, window_len)?;
            let window = apply_transform(&f.name, f.transform.as_ref(), raw);
            match window.iter().position(|&b| b == 0) {
                Some(nul) => {
                    let text = window[..nul].to_vec();
                    let claimed = (nul as u64 + 1).min(window_len);
                    Ok((Value::Bytes(text), ByteRange::new(start, claimed)))
                }
                None => Ok((Value::Bytes(window.into_owned()), ByteRange::new(start, window_len))),
            }
        }
    }
}

fn decode_literal(
    f: &LiteralField,
    start: u64,
    source: &ByteSource<'_>,
) -> Result<(Value, ByteRange), ReadError> {
    let length = f.expected.len() as u64;
    let found = source.slice(start, length)?;
    if found != f.expected.as_slice() {
        return Err(ReadError::LiteralMismatch {
            expected: f.expected.clone(),
            found: found.to_vec(),
        });
    }
    Ok((Value::Bytes(found.to_vec()), ByteRange::new(start, length)))
}
