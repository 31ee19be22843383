//! Byte transforms applied to a nested block before its subfields are decoded.
//!
//! A transform is any total, deterministic `&[u8] -> Vec<u8>` function; the reader never
//! looks inside it. The built-ins cover the usual light obfuscation found in game and
//! firmware files (single-byte XOR, repeating-key XOR, bitwise NOT, byte reversal).

use std::fmt;
use std::sync::Arc;

type TransformFn = dyn Fn(&[u8]) -> Vec<u8> + Send + Sync;

/// Named, shareable byte transform.
#[derive(Clone)]
pub struct Transform {
    name: String,
    func: Arc<TransformFn>,
}

impl Transform {
    pub fn new(name: impl Into<String>, func: impl Fn(&[u8]) -> Vec<u8> + Send + Sync + 'static) -> Self {
        Transform {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// XOR every byte with `key`.
    pub fn xor(key: u8) -> Self {
        Transform::new(format!("xor({:#04x})", key), move |bytes| {
            bytes.iter().map(|b| b ^ key).collect()
        })
    }

    /// XOR with a repeating multi-byte key. An empty key leaves the bytes unchanged.
    pub fn xor_key(key: &[u8]) -> Self {
        let key = key.to_vec();
        let name = format!("xor(\"{}\")", key.escape_ascii());
        Transform::new(name, move |bytes| {
            if key.is_empty() {
                return bytes.to_vec();
            }
            bytes
                .iter()
                .zip(key.iter().cycle())
                .map(|(b, k)| b ^ k)
                .collect()
        })
    }

    pub fn not() -> Self {
        Transform::new("not", |bytes| bytes.iter().map(|b| !b).collect())
    }

    pub fn reverse() -> Self {
        Transform::new("reverse", |bytes| bytes.iter().rev().copied().collect())
    }

    /// Run `self`, then feed its output to `next`.
    pub fn then(self, next: Transform) -> Self {
        let name = format!("{} | {}", self.name, next.name);
        let (first, second) = (self.func, next.func);
        Transform {
            name,
            func: Arc::new(move |bytes: &[u8]| second(&first(bytes))),
        }
    }

    pub fn apply(&self, bytes: &[u8]) -> Vec<u8> {
        (self.func)(bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transform").field(&self.name).finish()
    }
}
