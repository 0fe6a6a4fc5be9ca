//! Typed parameters and the argument values they encode.

use crate::abi::primitive::PrimitiveType;
use crate::abi::HeaderLayout;
use crate::error::{Error, Result};
use crate::utils::rlp::Item;
use serde::{Deserialize, Serialize};

/// A call argument in text form: one scalar, or a homogeneous array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    Scalar(String),
    Array(Vec<String>),
}

impl Argument {
    /// Elements of an array argument. A bracketed scalar such as `"[1, 2]"` is
    /// split on commas; any other scalar is a one-element array.
    pub fn to_elements(&self) -> Vec<String> {
        match self {
            Argument::Array(v) => v.clone(),
            Argument::Scalar(s) => split_bracketed(s),
        }
    }
}

impl From<&str> for Argument {
    fn from(s: &str) -> Self {
        Argument::Scalar(s.to_string())
    }
}

impl From<String> for Argument {
    fn from(s: String) -> Self {
        Argument::Scalar(s)
    }
}

impl From<Vec<String>> for Argument {
    fn from(v: Vec<String>) -> Self {
        Argument::Array(v)
    }
}

impl From<Vec<&str>> for Argument {
    fn from(v: Vec<&str>) -> Self {
        Argument::Array(v.into_iter().map(str::to_string).collect())
    }
}

impl core::fmt::Display for Argument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Argument::Scalar(s) => f.write_str(s),
            Argument::Array(v) => write!(f, "[{}]", v.join(",")),
        }
    }
}

fn split_bracketed(s: &str) -> Vec<String> {
    let t = s.trim();
    match t.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        Some(inner) if inner.trim().is_empty() => Vec::new(),
        Some(inner) => inner.split(',').map(|p| p.trim().to_string()).collect(),
        None => vec![t.to_string()],
    }
}

/// Named, typed field of a function or event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: String,
    pub is_array: bool,
    pub ty: PrimitiveType,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: PrimitiveType) -> Self {
        Self { name: name.into(), is_array: false, ty }
    }

    pub fn array(name: impl Into<String>, ty: PrimitiveType) -> Self {
        Self { name: name.into(), is_array: true, ty }
    }

    /// Encode an argument. Arrays concatenate fixed-width elements.
    pub fn encode(&self, arg: &Argument) -> Result<Vec<u8>> {
        if self.is_array {
            let elems = arg.to_elements();
            let mut out = Vec::with_capacity(elems.len() * self.ty.width());
            for e in &elems {
                out.extend_from_slice(&self.ty.encode(e)?);
            }
            return Ok(out);
        }
        match arg {
            Argument::Scalar(s) => self.ty.encode(s),
            Argument::Array(_) => {
                Err(Error::ValueRange(format!("parameter '{}' is a scalar {}, got an array", self.name, self.ty)))
            }
        }
    }

    /// Decode bytes produced by [`encode`](Self::encode).
    pub fn decode(&self, bytes: &[u8]) -> Result<Argument> {
        if !self.is_array {
            return self.ty.decode(bytes).map(Argument::Scalar);
        }
        let width = self.ty.width();
        if bytes.len() % width != 0 {
            return Err(Error::Decode(format!(
                "array '{}' of {} needs a multiple of {width} bytes, got {}",
                self.name,
                self.ty,
                bytes.len()
            )));
        }
        bytes
            .chunks(width)
            .map(|c| self.ty.decode(c))
            .collect::<Result<Vec<_>>>()
            .map(Argument::Array)
    }

    /// Wire form: `[name, is_array, type_code]`, plus a zero size slot in the legacy layout.
    pub fn to_item(&self, layout: HeaderLayout) -> Item {
        let mut fields = vec![
            Item::from(self.name.as_str()),
            Item::uint(u64::from(self.is_array)),
            Item::uint(u64::from(self.ty.code())),
        ];
        if layout == HeaderLayout::Legacy {
            fields.push(Item::uint(0));
        }
        Item::list(fields)
    }

    /// Accepts both the 3-field and the legacy 4-field form.
    pub fn from_item(item: &Item) -> Result<Self> {
        let fields = item.as_list()?;
        if fields.len() != 3 && fields.len() != 4 {
            return Err(Error::Decode(format!("parameter needs 3 or 4 fields, got {}", fields.len())));
        }
        let is_array = match fields[1].as_uint()? {
            0 => false,
            1 => true,
            n => return Err(Error::Decode(format!("array flag must be 0 or 1, got {n}"))),
        };
        Ok(Self {
            name: fields[0].as_str()?.to_string(),
            is_array,
            ty: PrimitiveType::from_code(fields[2].as_uint()?)?,
        })
    }

    /// JSON type string, e.g. `uint64[]`.
    pub fn type_string(&self) -> String {
        format_type(self.ty, self.is_array)
    }
}

/// Format a combined JSON type string.
pub fn format_type(ty: PrimitiveType, is_array: bool) -> String {
    if is_array {
        format!("{}[]", ty.name())
    } else {
        ty.name().to_string()
    }
}

/// Parse a combined JSON type string into `(type, is_array)`.
pub fn parse_type(s: &str) -> Result<(PrimitiveType, bool)> {
    let t = s.trim();
    match t.strip_suffix("[]") {
        Some(inner) => Ok((inner.parse()?, true)),
        None => Ok((t.parse()?, false)),
    }
}
