//! Attribute values and the object codec
//!
//! Member attributes are opaque to the descriptor: each value is framed
//! as a length-prefixed blob whose contents are the bincode encoding of
//! an [`AttributeValue`].
//!
//! Payloads from peers are scanned for list nesting depth before they
//! are deserialized, since deserialization recurses once per level.

use crate::error::{CodecError, CodecResult};
use bytes::Buf;
use serde::{Deserialize, Serialize};

// bincode variant tags, in declaration order
const TAG_NULL: u32 = 0;
const TAG_BOOL: u32 = 1;
const TAG_INT: u32 = 2;
const TAG_FLOAT: u32 = 3;
const TAG_STRING: u32 = 4;
const TAG_BYTES: u32 = 5;
const TAG_LIST: u32 = 6;

/// Polymorphic value stored in a member's attribute map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Short type name, used in log output
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Null => "null",
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Int(_) => "int",
            AttributeValue::Float(_) => "float",
            AttributeValue::String(_) => "string",
            AttributeValue::Bytes(_) => "bytes",
            AttributeValue::List(_) => "list",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Int(i64::from(value))
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(value: Vec<u8>) -> Self {
        AttributeValue::Bytes(value)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(value: Vec<AttributeValue>) -> Self {
        AttributeValue::List(value)
    }
}

/// Encode one value into its object payload
pub fn encode_value(value: &AttributeValue) -> CodecResult<Vec<u8>> {
    Ok(bincode::serialize(value)?)
}

/// Decode one value from its object payload, rejecting lists nested
/// deeper than `max_depth`
pub fn decode_value(bytes: &[u8], max_depth: usize) -> CodecResult<AttributeValue> {
    check_depth(bytes, max_depth)?;
    Ok(bincode::deserialize(bytes)?)
}

/// Walk the payload without recursion and fail once list nesting passes
/// `max_depth`. Structural damage is left for bincode to report.
fn check_depth(mut buf: &[u8], max_depth: usize) -> CodecResult<()> {
    // values still to read in each enclosing list
    let mut enclosing: Vec<u64> = Vec::new();
    let mut pending: u64 = 1;

    loop {
        if pending == 0 {
            match enclosing.pop() {
                Some(outer) => {
                    pending = outer;
                    continue;
                }
                None => return Ok(()),
            }
        }
        pending -= 1;

        if buf.remaining() < 4 {
            return Ok(());
        }
        match buf.get_u32_le() {
            TAG_NULL => {}
            TAG_BOOL => skip(&mut buf, 1),
            TAG_INT | TAG_FLOAT => skip(&mut buf, 8),
            TAG_STRING | TAG_BYTES => {
                if buf.remaining() < 8 {
                    return Ok(());
                }
                let len = buf.get_u64_le();
                skip(&mut buf, usize::try_from(len).unwrap_or(usize::MAX));
            }
            TAG_LIST => {
                if buf.remaining() < 8 {
                    return Ok(());
                }
                let count = buf.get_u64_le();
                let depth = enclosing.len() + 1;
                if depth > max_depth {
                    return Err(CodecError::LimitExceeded {
                        what: "value nesting",
                        len: depth,
                        limit: max_depth,
                    });
                }
                enclosing.push(pending);
                pending = count;
            }
            _ => return Ok(()),
        }
    }
}

fn skip(buf: &mut &[u8], len: usize) {
    let len = len.min(buf.remaining());
    buf.advance(len);
}
