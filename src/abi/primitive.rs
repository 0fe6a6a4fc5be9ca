//! Fixed-width scalar codec.
//!
//! Every scalar has a fixed encoded width. Numbers are little-endian; floats
//! are IEEE-754. Values cross the API boundary as text so that callers can
//! pass CLI input and JSON strings straight through.

use crate::address::ADDRESS_LEN;
use crate::error::{Error, Result};
use core::fmt;
use core::str::FromStr;

/// Closed set of scalar types. The discriminant is the wire type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PrimitiveType {
    Uint8 = 0,
    Uint16 = 1,
    Uint32 = 2,
    Uint64 = 3,
    Int8 = 4,
    Int16 = 5,
    Int32 = 6,
    Int64 = 7,
    Float32 = 8,
    Float64 = 9,
    Address = 10,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 11] = [
        PrimitiveType::Uint8,
        PrimitiveType::Uint16,
        PrimitiveType::Uint32,
        PrimitiveType::Uint64,
        PrimitiveType::Int8,
        PrimitiveType::Int16,
        PrimitiveType::Int32,
        PrimitiveType::Int64,
        PrimitiveType::Float32,
        PrimitiveType::Float64,
        PrimitiveType::Address,
    ];

    /// Encoded width in bytes.
    pub const fn width(self) -> usize {
        use PrimitiveType::*;
        match self {
            Uint8 | Int8 => 1,
            Uint16 | Int16 => 2,
            Uint32 | Int32 | Float32 => 4,
            Uint64 | Int64 | Float64 => 8,
            Address => ADDRESS_LEN,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u64) -> Result<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| Error::UnknownType(format!("type code {code}")))
    }

    /// Lowercase name used in JSON type strings.
    pub const fn name(self) -> &'static str {
        use PrimitiveType::*;
        match self {
            Uint8 => "uint8",
            Uint16 => "uint16",
            Uint32 => "uint32",
            Uint64 => "uint64",
            Int8 => "int8",
            Int16 => "int16",
            Int32 => "int32",
            Int64 => "int64",
            Float32 => "float32",
            Float64 => "float64",
            Address => "address",
        }
    }

    /// Encode one textual value into exactly [`width`](Self::width) bytes.
    pub fn encode(self, value: &str) -> Result<Vec<u8>> {
        use PrimitiveType::*;
        let v = value.trim();
        let out = match self {
            Uint8 => parse_num::<u8>(self, v)?.to_le_bytes().to_vec(),
            Uint16 => parse_num::<u16>(self, v)?.to_le_bytes().to_vec(),
            Uint32 => parse_num::<u32>(self, v)?.to_le_bytes().to_vec(),
            Uint64 => parse_num::<u64>(self, v)?.to_le_bytes().to_vec(),
            Int8 => parse_num::<i8>(self, v)?.to_le_bytes().to_vec(),
            Int16 => parse_num::<i16>(self, v)?.to_le_bytes().to_vec(),
            Int32 => parse_num::<i32>(self, v)?.to_le_bytes().to_vec(),
            Int64 => parse_num::<i64>(self, v)?.to_le_bytes().to_vec(),
            Float32 => parse_num::<f32>(self, v)?.to_le_bytes().to_vec(),
            Float64 => parse_num::<f64>(self, v)?.to_le_bytes().to_vec(),
            Address => crate::address::Address::decode(v)?.to_vec(),
        };
        Ok(out)
    }

    /// Decode exactly [`width`](Self::width) bytes back into text.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        use PrimitiveType::*;
        if bytes.len() != self.width() {
            return Err(Error::Decode(format!(
                "{} expects {} bytes, got {}",
                self.name(),
                self.width(),
                bytes.len()
            )));
        }
        let text = match self {
            Uint8 => u8::from_le_bytes(le(bytes)?).to_string(),
            Uint16 => u16::from_le_bytes(le(bytes)?).to_string(),
            Uint32 => u32::from_le_bytes(le(bytes)?).to_string(),
            Uint64 => u64::from_le_bytes(le(bytes)?).to_string(),
            Int8 => i8::from_le_bytes(le(bytes)?).to_string(),
            Int16 => i16::from_le_bytes(le(bytes)?).to_string(),
            Int32 => i32::from_le_bytes(le(bytes)?).to_string(),
            Int64 => i64::from_le_bytes(le(bytes)?).to_string(),
            Float32 => f32::from_le_bytes(le(bytes)?).to_string(),
            Float64 => f64::from_le_bytes(le(bytes)?).to_string(),
            Address => crate::address::Address::from_bytes(bytes)?.encode(),
        };
        Ok(text)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimitiveType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == t)
            .ok_or_else(|| Error::UnknownType(s.to_string()))
    }
}

fn parse_num<T: FromStr>(ty: PrimitiveType, v: &str) -> Result<T>
where
    T::Err: fmt::Display,
{
    v.parse::<T>().map_err(|e| Error::ValueRange(format!("{ty} '{v}': {e}")))
}

fn le<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    crate::utils::bytes::to_array(bytes)
}
