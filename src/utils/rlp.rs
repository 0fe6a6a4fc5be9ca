//! Recursive length-prefixed codec (RLP) for nested byte-string trees.
//!
//! Every wire structure in this crate (headers, contract envelopes,
//! transactions, call arguments) is an [`Item`] tree serialized here.
//! Length framing is delegated to `alloy_rlp::Header`, which already rejects
//! non-canonical single bytes and non-minimal long-form lengths.
//!
//! Integers are minimal big-endian byte strings; zero is the empty string.

use crate::error::{Error, Result};
use alloy_rlp::{Header, EMPTY_STRING_CODE};

/// Nesting limit applied while decoding untrusted input.
pub const MAX_DEPTH: usize = 64;

/// A node of the recursive codec: a byte string or a list of nodes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Item {
    Bytes(Vec<u8>),
    List(Vec<Item>),
}

impl core::fmt::Debug for Item {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Item::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            Item::List(items) => f.debug_list().entries(items).finish(),
        }
    }
}

impl Item {
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Item::Bytes(b.into())
    }

    pub fn list(items: Vec<Item>) -> Self {
        Item::List(items)
    }

    /// Minimal big-endian integer node.
    pub fn uint(v: u64) -> Self {
        Item::Bytes(encode_uint(v))
    }

    /// Length of this node once encoded.
    pub fn length(&self) -> usize {
        match self {
            Item::Bytes(b) if b.len() == 1 && b[0] < EMPTY_STRING_CODE => 1,
            Item::Bytes(b) => alloy_rlp::length_of_length(b.len()) + b.len(),
            Item::List(items) => {
                let payload = payload_length(items);
                alloy_rlp::length_of_length(payload) + payload
            }
        }
    }

    /// Serialize this node.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.length());
        self.encode_into(&mut out);
        out
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            Item::Bytes(b) if b.len() == 1 && b[0] < EMPTY_STRING_CODE => out.push(b[0]),
            Item::Bytes(b) => {
                Header { list: false, payload_length: b.len() }.encode(out);
                out.extend_from_slice(b);
            }
            Item::List(items) => {
                Header { list: true, payload_length: payload_length(items) }.encode(out);
                for item in items {
                    item.encode_into(out);
                }
            }
        }
    }

    /// Parse exactly one node; trailing bytes are an error.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut buf = bytes;
        let item = decode_item(&mut buf, 0)?;
        if !buf.is_empty() {
            return Err(Error::Decode(format!("{} trailing bytes after item", buf.len())));
        }
        Ok(item)
    }

    pub fn as_bytes(&self) -> Result<&[u8]> {
        match self {
            Item::Bytes(b) => Ok(b),
            Item::List(_) => Err(Error::Decode("expected byte string, found list".into())),
        }
    }

    pub fn as_list(&self) -> Result<&[Item]> {
        match self {
            Item::List(items) => Ok(items),
            Item::Bytes(_) => Err(Error::Decode("expected list, found byte string".into())),
        }
    }

    pub fn into_list(self) -> Result<Vec<Item>> {
        match self {
            Item::List(items) => Ok(items),
            Item::Bytes(_) => Err(Error::Decode("expected list, found byte string".into())),
        }
    }

    /// A list of exactly `n` entries.
    pub fn expect_list(&self, n: usize) -> Result<&[Item]> {
        let items = self.as_list()?;
        if items.len() != n {
            return Err(Error::Decode(format!("expected list of {n} items, got {}", items.len())));
        }
        Ok(items)
    }

    pub fn as_uint(&self) -> Result<u64> {
        decode_uint(self.as_bytes()?)
    }

    /// Byte string decoded as UTF-8 text.
    pub fn as_str(&self) -> Result<&str> {
        core::str::from_utf8(self.as_bytes()?).map_err(|e| Error::Decode(format!("invalid utf-8: {e}")))
    }
}

impl From<Vec<u8>> for Item {
    fn from(b: Vec<u8>) -> Self {
        Item::Bytes(b)
    }
}

impl From<&[u8]> for Item {
    fn from(b: &[u8]) -> Self {
        Item::Bytes(b.to_vec())
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Item::Bytes(s.as_bytes().to_vec())
    }
}

impl From<Vec<Item>> for Item {
    fn from(items: Vec<Item>) -> Self {
        Item::List(items)
    }
}

/// Minimal big-endian bytes of `v`; `0` is the empty string.
pub fn encode_uint(v: u64) -> Vec<u8> {
    let be = v.to_be_bytes();
    let skip = be.iter().take_while(|b| **b == 0).count();
    be[skip..].to_vec()
}

/// Inverse of [`encode_uint`]. Leading zero bytes are rejected.
pub fn decode_uint(bytes: &[u8]) -> Result<u64> {
    if bytes.len() > 8 {
        return Err(Error::ValueRange(format!("integer of {} bytes exceeds 64 bits", bytes.len())));
    }
    if bytes.first() == Some(&0) {
        return Err(Error::Decode("non-canonical integer with leading zero".into()));
    }
    Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

// --------------------------- internals ----------------------------------

fn payload_length(items: &[Item]) -> usize {
    items.iter().map(Item::length).sum()
}

fn decode_item(buf: &mut &[u8], depth: usize) -> Result<Item> {
    if depth > MAX_DEPTH {
        return Err(Error::Decode(format!("nesting deeper than {MAX_DEPTH}")));
    }
    let header = Header::decode(buf)?;
    // Header::decode guarantees the payload is available.
    let (payload, rest) = buf.split_at(header.payload_length);
    *buf = rest;
    if !header.list {
        return Ok(Item::Bytes(payload.to_vec()));
    }
    let mut inner = payload;
    let mut items = Vec::new();
    while !inner.is_empty() {
        items.push(decode_item(&mut inner, depth + 1)?);
    }
    Ok(Item::List(items))
}
