//! Decoded field values.

use crate::reader::ReadResult;
use std::fmt;

/// A single decoded value (scalar or compound).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Unsigned(u64),
    Signed(i64),
    /// Elements of an array field, each an integer.
    Array(Vec<Value>),
    /// Raw bytes of a string or literal field.
    Bytes(Vec<u8>),
    /// Result of decoding a nested block.
    Block(ReadResult),
}

impl Value {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Unsigned(x) => Some(*x),
            Value::Signed(x) => u64::try_from(*x).ok(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Signed(x) => Some(*x),
            Value::Unsigned(x) => i64::try_from(*x).ok(),
            _ => None,
        }
    }

    /// Interpret as a byte count or offset: any integer that is not negative.
    pub fn as_length(&self) -> Option<u64> {
        self.as_u64()
    }

    pub fn as_block(&self) -> Option<&ReadResult> {
        match self {
            Value::Block(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Bytes decoded as UTF-8, lossily, with trailing NULs trimmed.
    pub fn as_text(&self) -> Option<String> {
        let b = self.as_bytes()?;
        let end = b.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1);
        Some(String::from_utf8_lossy(&b[..end]).into_owned())
    }

    /// Short description of the value's shape, for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Value::Unsigned(x) => x.to_string(),
            Value::Signed(x) => x.to_string(),
            Value::Array(v) => format!("an array of {} elements", v.len()),
            Value::Bytes(b) => format!("{} bytes", b.len()),
            Value::Block(_) => "a nested block".to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unsigned(x) => write!(f, "{} ({:#x})", x, x),
            Value::Signed(x) if *x < 0 => write!(f, "{}", x),
            Value::Signed(x) => write!(f, "{} ({:#x})", x, x),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match v {
                        Value::Unsigned(x) => write!(f, "{}", x)?,
                        Value::Signed(x) => write!(f, "{}", x)?,
                        other => write!(f, "{}", other)?,
                    }
                }
                write!(f, "]")
            }
            Value::Bytes(b) => write!(f, "\"{}\"", b.escape_ascii()),
            Value::Block(r) => write!(f, "{{{} fields}}", r.len()),
        }
    }
}

impl From<u64> for Value {
    fn from(x: u64) -> Self {
        Value::Unsigned(x)
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Signed(x)
    }
}
