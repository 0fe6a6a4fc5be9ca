//! JSON view of a [`Header`]:
//!
//! ```json
//! {
//!   "version": 1,
//!   "functions": [
//!     {"name": "transfer", "parameters": [{"name": "to", "type": "address"}, {"name": "amount", "type": "uint64"}]}
//!   ],
//!   "events": [
//!     {"name": "Transfer", "parameters": [{"name": "amounts", "type": "uint64[]"}]}
//!   ]
//! }
//! ```
//!
//! The `type` string carries both the primitive name and array-ness. Older
//! documents with a separate `is_array` flag (and a `size` field) are accepted.

use crate::abi::function::{Event, Function};
use crate::abi::header::Header;
use crate::abi::param::{parse_type, Parameter};
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderJson {
    pub version: u64,
    #[serde(default)]
    pub functions: Vec<FunctionJson>,
    #[serde(default)]
    pub events: Vec<FunctionJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionJson {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterJson {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
    #[serde(default, skip_serializing)]
    pub is_array: bool,
}

impl From<&Parameter> for ParameterJson {
    fn from(p: &Parameter) -> Self {
        Self { name: p.name.clone(), typ: p.type_string(), is_array: false }
    }
}

impl TryFrom<&ParameterJson> for Parameter {
    type Error = Error;
    fn try_from(j: &ParameterJson) -> Result<Self> {
        let (ty, array) = parse_type(&j.typ)?;
        Ok(Parameter { name: j.name.clone(), is_array: array || j.is_array, ty })
    }
}

impl From<&Function> for FunctionJson {
    fn from(f: &Function) -> Self {
        Self { name: f.name().to_string(), parameters: f.parameters().iter().map(ParameterJson::from).collect() }
    }
}

impl TryFrom<&FunctionJson> for Function {
    type Error = Error;
    fn try_from(j: &FunctionJson) -> Result<Self> {
        let params = j.parameters.iter().map(Parameter::try_from).collect::<Result<Vec<_>>>()?;
        Ok(Function::new(j.name.clone(), params))
    }
}

impl From<&Header> for HeaderJson {
    fn from(h: &Header) -> Self {
        Self {
            version: h.version(),
            functions: h.functions().iter().map(FunctionJson::from).collect(),
            events: h.events().iter().map(|e| FunctionJson::from(e.as_function())).collect(),
        }
    }
}

impl TryFrom<HeaderJson> for Header {
    type Error = Error;
    fn try_from(j: HeaderJson) -> Result<Self> {
        let functions = j.functions.iter().map(Function::try_from).collect::<Result<Vec<_>>>()?;
        let events =
            j.events.iter().map(|e| Function::try_from(e).map(Event::from)).collect::<Result<Vec<_>>>()?;
        Header::new(j.version, functions, events)
    }
}

impl Serialize for Header {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        HeaderJson::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Header {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let j = HeaderJson::deserialize(deserializer)?;
        Header::try_from(j).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::primitive::PrimitiveType;
    use serde_json::json;

    #[test]
    fn parse_combined_type_strings() {
        let h: Header = serde_json::from_value(json!({
            "version": 1,
            "functions": [
                {"name": "get_values", "parameters": [{"name": "values", "type": "uint64[]"}]},
                {"name": "init", "parameters": [{"name": "owner", "type": "address"}]}
            ],
            "events": [{"name": "Ready", "parameters": [{"name": "owner", "type": "address"}]}]
        }))
        .unwrap();
        let p = &h.function("get_values").unwrap().parameters()[0];
        assert!(p.is_array);
        assert_eq!(p.ty, PrimitiveType::Uint64);
        assert_eq!(h.events().len(), 1);
    }

    #[test]
    fn legacy_flag_is_honoured() {
        let h: Header = serde_json::from_value(json!({
            "version": 1,
            "functions": [{"name": "f", "parameters": [{"name": "xs", "is_array": true, "type": "uint8", "size": 0}]}]
        }))
        .unwrap();
        assert!(h.function("f").unwrap().parameters()[0].is_array);
        assert!(h.events().is_empty());
    }

    #[test]
    fn output_uses_combined_type() {
        let h = Header::new(
            3,
            vec![Function::new("f", vec![Parameter::array("xs", PrimitiveType::Int16)])],
            vec![],
        )
        .unwrap();
        let v = serde_json::to_value(&h).unwrap();
        assert_eq!(
            v,
            json!({
                "version": 3,
                "functions": [{"name": "f", "parameters": [{"name": "xs", "type": "int16[]"}]}],
                "events": []
            })
        );
        let back: Header = serde_json::from_value(v).unwrap();
        assert_eq!(back, h);
    }

    #[test]
    fn bad_documents() {
        let unknown = json!({"version": 1, "functions": [{"name": "f", "parameters": [{"name": "x", "type": "string"}]}]});
        assert!(serde_json::from_value::<Header>(unknown).is_err());
        let dup = json!({"version": 1, "functions": [{"name": "f"}, {"name": "f"}]});
        assert!(serde_json::from_value::<Header>(dup).is_err());
        assert!(matches!(Header::from_json_str("{"), Err(Error::Json(_))));
    }
}
