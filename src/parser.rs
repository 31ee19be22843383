//! Parse layout source text into a field list using PEST.
//!
//! See `layout.pest` for the grammar. Every field is built through the same validating
//! constructors as hand-written layouts, so bad widths and duplicate names come back as
//! [`ParseError::Layout`].

use crate::error::ReadError;
use crate::field::*;
use crate::transform::Transform;
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "layout.pest"]
struct LayoutParser;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Parse error: {0}")]
    Syntax(String),
    #[error("Invalid layout: {0}")]
    Invalid(String),
    #[error("Invalid layout: {0}")]
    Layout(#[from] ReadError),
}

/// Parse layout source into an ordered field list.
pub fn parse(source: &str) -> Result<Vec<Field>, ParseError> {
    let pairs = LayoutParser::parse(Rule::layout, source).map_err(|e| ParseError::Syntax(e.to_string()))?;
    let layout = pairs
        .into_iter()
        .next()
        .ok_or_else(|| ParseError::Syntax("Empty parse".to_string()))?;
    build_fields(layout.into_inner())
}

fn build_fields(pairs: Pairs<Rule>) -> Result<Vec<Field>, ParseError> {
    let mut fields = Vec::new();
    for pair in pairs {
        let field: Field = match pair.as_rule() {
            Rule::int_field => build_int(pair)?.into(),
            Rule::array_field => build_array(pair)?.into(),
            Rule::block_field => build_block(pair)?.into(),
            Rule::string_field => build_string(pair)?.into(),
            Rule::cstring_field => build_cstring(pair)?.into(),
            Rule::magic_field => build_magic(pair)?.into(),
            _ => continue,
        };
        fields.push(field);
    }
    check_unique_names(&fields)?;
    Ok(fields)
}

fn build_int(pair: Pair<Rule>) -> Result<IntField, ParseError> {
    let mut ty = None;
    let mut name = None;
    let mut position = Position::Next;
    let mut transform = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::int_type => ty = Some(parse_int_type(inner.as_str())?),
            Rule::ident => name = Some(inner.as_str()),
            Rule::position => position = build_position(inner)?,
            Rule::transforms => transform = Some(build_transforms(inner)?),
            _ => {}
        }
    }
    let (bits, signed) = ty.ok_or_else(|| invalid("int field: missing type"))?;
    let name = name.ok_or_else(|| invalid("int field: missing name"))?;
    let field = IntField::new(bits, signed, name, 0)?.with_position(position);
    Ok(match transform {
        Some(t) => field.with_transform(t),
        None => field,
    })
}

fn build_array(pair: Pair<Rule>) -> Result<ArrayField, ParseError> {
    let mut ty = None;
    let mut count = None;
    let mut name = None;
    let mut position = Position::Next;
    let mut transform = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::int_type => ty = Some(parse_int_type(inner.as_str())?),
            Rule::length => count = Some(build_length(inner)?),
            Rule::ident => name = Some(inner.as_str()),
            Rule::position => position = build_position(inner)?,
            Rule::transforms => transform = Some(build_transforms(inner)?),
            _ => {}
        }
    }
    let (bits, signed) = ty.ok_or_else(|| invalid("array field: missing element type"))?;
    let count = count.ok_or_else(|| invalid("array field: missing count"))?;
    let name = name.ok_or_else(|| invalid("array field: missing name"))?;
    let field = ArrayField::new(bits, signed, count, name, 0)?.with_position(position);
    Ok(match transform {
        Some(t) => field.with_transform(t),
        None => field,
    })
}

fn build_block(pair: Pair<Rule>) -> Result<NestedBlockField, ParseError> {
    let mut name = None;
    let mut position = Position::Next;
    let mut length = None;
    let mut transform: Option<Transform> = None;
    let mut subfields = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => name = Some(inner.as_str()),
            Rule::position => position = build_position(inner)?,
            Rule::length => length = Some(build_length(inner)?),
            Rule::transforms => transform = Some(build_transforms(inner)?),
            Rule::block_body => subfields = build_fields(inner.into_inner())?,
            _ => {}
        }
    }
    let name = name.ok_or_else(|| invalid("block: missing name"))?;
    let length = length.ok_or_else(|| invalid("block: missing length"))?;
    let mut block = NestedBlockField::new(0, length, name, subfields)?.with_position(position);
    if let Some(t) = transform {
        block = block.with_transform(t);
    }
    Ok(block)
}

fn build_string(pair: Pair<Rule>) -> Result<StringField, ParseError> {
    let mut name = None;
    let mut position = Position::Next;
    let mut length = None;
    let mut transform = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => name = Some(inner.as_str()),
            Rule::position => position = build_position(inner)?,
            Rule::length => length = Some(build_length(inner)?),
            Rule::transforms => transform = Some(build_transforms(inner)?),
            _ => {}
        }
    }
    let name = name.ok_or_else(|| invalid("string: missing name"))?;
    let length = length.ok_or_else(|| invalid("string: missing length"))?;
    Ok(with_string_transform(
        StringField::fixed(length, name, 0).with_position(position),
        transform,
    ))
}

fn build_cstring(pair: Pair<Rule>) -> Result<StringField, ParseError> {
    let mut name = None;
    let mut position = Position::Next;
    let mut max = None;
    let mut transform = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => name = Some(inner.as_str()),
            Rule::position => position = build_position(inner)?,
            Rule::length => match build_length(inner)? {
                LengthSource::Literal(n) => max = Some(n),
                LengthSource::Field(f) => {
                    return Err(invalid(&format!("cstring: max length must be a number, got {}", f)))
                }
            },
            Rule::transforms => transform = Some(build_transforms(inner)?),
            _ => {}
        }
    }
    let name = name.ok_or_else(|| invalid("cstring: missing name"))?;
    Ok(with_string_transform(
        StringField::cstring(name, 0, max).with_position(position),
        transform,
    ))
}

fn with_string_transform(field: StringField, transform: Option<Transform>) -> StringField {
    match transform {
        Some(t) => field.with_transform(t),
        None => field,
    }
}

fn build_magic(pair: Pair<Rule>) -> Result<LiteralField, ParseError> {
    let mut name = None;
    let mut position = Position::Next;
    let mut expected = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => name = Some(inner.as_str()),
            Rule::position => position = build_position(inner)?,
            Rule::string_lit => expected = Some(parse_string_lit(inner)?),
            Rule::hex_number => expected = Some(parse_hex_bytes(inner.as_str())?),
            _ => {}
        }
    }
    let name = name.ok_or_else(|| invalid("magic: missing name"))?;
    let expected = expected.ok_or_else(|| invalid("magic: missing value"))?;
    Ok(LiteralField::new(expected, name, 0).with_position(position))
}

fn build_position(pair: Pair<Rule>) -> Result<Position, ParseError> {
    let inner = pair.into_inner().next().ok_or_else(|| invalid("position: empty"))?;
    match inner.as_rule() {
        Rule::deref => {
            let target = inner.into_inner().next().ok_or_else(|| invalid("position: missing field name"))?;
            Ok(Position::ValueOf(target.as_str().to_string()))
        }
        Rule::hex_number | Rule::dec_number => Ok(Position::Absolute(parse_number(inner.as_str())?)),
        other => Err(invalid(&format!("position: unexpected {:?}", other))),
    }
}

fn build_length(pair: Pair<Rule>) -> Result<LengthSource, ParseError> {
    let inner = pair.into_inner().next().ok_or_else(|| invalid("length: empty"))?;
    match inner.as_rule() {
        Rule::ident => Ok(LengthSource::Field(inner.as_str().to_string())),
        Rule::hex_number | Rule::dec_number => Ok(LengthSource::Literal(parse_number(inner.as_str())?)),
        other => Err(invalid(&format!("length: unexpected {:?}", other))),
    }
}

fn build_transforms(pair: Pair<Rule>) -> Result<Transform, ParseError> {
    let mut chain: Option<Transform> = None;
    for inner in pair.into_inner() {
        let t = match inner.as_rule() {
            Rule::xor_transform => {
                let key = inner.into_inner().next().ok_or_else(|| invalid("xor: missing key"))?;
                match key.as_rule() {
                    Rule::string_lit => Transform::xor_key(&parse_string_lit(key)?),
                    _ => {
                        let k = parse_number(key.as_str())?;
                        let k = u8::try_from(k).map_err(|_| invalid(&format!("xor: key {} does not fit in a byte", k)))?;
                        Transform::xor(k)
                    }
                }
            }
            Rule::reverse_transform => Transform::reverse(),
            Rule::not_transform => Transform::not(),
            _ => continue,
        };
        chain = Some(match chain {
            Some(prev) => prev.then(t),
            None => t,
        });
    }
    chain.ok_or_else(|| invalid("empty transform chain"))
}

/// `u8` → (8, false), `i32` → (32, true). Width is validated by the field constructor.
fn parse_int_type(s: &str) -> Result<(u32, bool), ParseError> {
    let signed = s.starts_with('i');
    let bits = s[1..]
        .parse::<u32>()
        .map_err(|_| invalid(&format!("integer width out of range: {}", s)))?;
    Ok((bits, signed))
}

fn parse_number(s: &str) -> Result<u64, ParseError> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        s.parse::<u64>()
    };
    parsed.map_err(|_| invalid(&format!("number out of range: {}", s)))
}

/// `0x4d5a` → `[0x4d, 0x5a]`, in the order written.
fn parse_hex_bytes(s: &str) -> Result<Vec<u8>, ParseError> {
    let hex = &s[2..];
    if hex.len() % 2 != 0 {
        return Err(invalid("hex literal must have even length"));
    }
    hex.as_bytes()
        .chunks(2)
        .map(|pair| {
            let digits = std::str::from_utf8(pair).map_err(|_| invalid("invalid hex"))?;
            u8::from_str_radix(digits, 16).map_err(|_| invalid("invalid hex"))
        })
        .collect()
}

fn parse_string_lit(pair: Pair<Rule>) -> Result<Vec<u8>, ParseError> {
    let inner = pair.into_inner().next().map(|p| p.as_str()).unwrap_or("");
    let mut out = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        match chars.next() {
            Some('n') => out.push(b'\n'),
            Some('t') => out.push(b'\t'),
            Some('r') => out.push(b'\r'),
            Some('0') => out.push(0),
            Some('\\') => out.push(b'\\'),
            Some('"') => out.push(b'"'),
            Some('x') => {
                let digits: String = chars.by_ref().take(2).collect();
                let b = u8::from_str_radix(&digits, 16).map_err(|_| invalid("invalid \\x escape"))?;
                out.push(b);
            }
            other => return Err(invalid(&format!("invalid escape: \\{}", other.unwrap_or(' ')))),
        }
    }
    Ok(out)
}

fn invalid(msg: &str) -> ParseError {
    ParseError::Invalid(msg.to_string())
}
