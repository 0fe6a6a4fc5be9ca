//! Contract interface header: a versioned set of functions and events.

use crate::abi::function::{Event, Function};
use crate::abi::param::Argument;
use crate::abi::HeaderLayout;
use crate::error::{Error, Result};
use crate::utils::rlp::Item;
use std::collections::BTreeSet;

/// A function or event call decoded against a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCall {
    pub name: String,
    pub values: Vec<(String, Argument)>,
}

#[derive(Debug, Clone)]
pub struct Header {
    version: u64,
    functions: Vec<Function>,
    events: Vec<Event>,
}

impl Header {
    /// Build a header; function names and event names must each be unique.
    pub fn new(version: u64, functions: Vec<Function>, events: Vec<Event>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for f in &functions {
            if !seen.insert(f.name()) {
                return Err(Error::Abi(format!("duplicate function name: {}", f.name())));
            }
        }
        let mut seen = BTreeSet::new();
        for e in &events {
            if !seen.insert(e.name()) {
                return Err(Error::Abi(format!("duplicate event name: {}", e.name())));
            }
        }
        Ok(Self { version, functions, events })
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Lookup a function by name.
    pub fn function(&self, name: &str) -> Result<&Function> {
        self.functions
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| Error::NotFound(format!("function '{name}'")))
    }

    /// Lookup an event by name.
    pub fn event(&self, name: &str) -> Result<&Event> {
        self.events
            .iter()
            .find(|e| e.name() == name)
            .ok_or_else(|| Error::NotFound(format!("event '{name}'")))
    }

    pub fn function_by_id(&self, id: &[u8]) -> Result<&Function> {
        self.functions
            .iter()
            .find(|f| f.method_id() == id)
            .ok_or_else(|| Error::NotFound(format!("function with id {}", hex::encode(id))))
    }

    pub fn event_by_id(&self, id: &[u8]) -> Result<&Event> {
        self.events
            .iter()
            .find(|e| e.method_id() == id)
            .ok_or_else(|| Error::NotFound(format!("event with id {}", hex::encode(id))))
    }

    /// Serialize in the default method-id layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes_with(HeaderLayout::MethodId)
    }

    /// `[version, [functions...], [events...]]` in the requested canonical order.
    pub fn to_bytes_with(&self, layout: HeaderLayout) -> Vec<u8> {
        let mut functions: Vec<&Function> = self.functions.iter().collect();
        let mut events: Vec<&Function> = self.events.iter().map(Event::as_function).collect();
        sort_for(layout, &mut functions);
        sort_for(layout, &mut events);
        Item::list(vec![
            Item::uint(self.version),
            Item::list(functions.iter().map(|f| f.to_item(layout)).collect()),
            Item::list(events.iter().map(|e| e.to_item(layout)).collect()),
        ])
        .encode()
    }

    /// Parse either layout.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let item = Item::decode(bytes)?;
        let fields = item.expect_list(3)?;
        let version = fields[0].as_uint()?;
        let functions = fields[1].as_list()?.iter().map(Function::from_item).collect::<Result<Vec<_>>>()?;
        let events = fields[2].as_list()?.iter().map(Event::from_item).collect::<Result<Vec<_>>>()?;
        Self::new(version, functions, events)
    }

    /// Decode a function call payload into named values.
    pub fn decode_call(&self, id: &[u8], args: &[u8]) -> Result<DecodedCall> {
        let f = self.function_by_id(id)?;
        Ok(DecodedCall { name: f.name().to_string(), values: f.decode_named(args)? })
    }

    /// Decode an emitted event's argument bytes into named values.
    pub fn decode_event(&self, id: &[u8], args: &[u8]) -> Result<DecodedCall> {
        let e = self.event_by_id(id)?;
        Ok(DecodedCall { name: e.name().to_string(), values: e.decode_named(args)? })
    }

    /// Parse from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize pretty JSON.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn sort_for(layout: HeaderLayout, entries: &mut [&Function]) {
    match layout {
        HeaderLayout::MethodId => entries.sort_by(|a, b| {
            a.method_id().cmp(&b.method_id()).then_with(|| a.name().cmp(b.name()))
        }),
        HeaderLayout::Legacy => entries.sort_by(|a, b| a.name().as_bytes().cmp(b.name().as_bytes())),
    }
}

fn sorted_by_name<'a>(entries: impl Iterator<Item = &'a Function>) -> Vec<&'a Function> {
    let mut v: Vec<&Function> = entries.collect();
    v.sort_by(|a, b| a.name().cmp(b.name()));
    v
}

/// Order-insensitive comparison.
impl PartialEq for Header {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && sorted_by_name(self.functions.iter()) == sorted_by_name(other.functions.iter())
            && sorted_by_name(self.events.iter().map(Event::as_function))
                == sorted_by_name(other.events.iter().map(Event::as_function))
    }
}

impl Eq for Header {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::param::Parameter;
    use crate::abi::primitive::PrimitiveType;

    fn small() -> Header {
        Header::new(
            1,
            vec![
                Function::new("init", vec![Parameter::new("owner", PrimitiveType::Address)]),
                Function::new("get_values", vec![Parameter::array("values", PrimitiveType::Uint64)]),
            ],
            vec![Event::new("Ready", vec![Parameter::new("owner", PrimitiveType::Address)])],
        )
        .unwrap()
    }

    #[test]
    fn method_id_layout_vector() {
        assert_eq!(
            hex::encode(small().to_bytes()),
            "f83b01e7d68a6765745f76616c756573cac98676616c7565730103cf84696e6974c9c8856f776e6572800ad1d0855265616479c9c8856f776e6572800a"
        );
    }

    #[test]
    fn roundtrip_both_layouts() {
        let h = small();
        assert_eq!(Header::from_bytes(&h.to_bytes()).unwrap(), h);
        assert_eq!(Header::from_bytes(&h.to_bytes_with(HeaderLayout::Legacy)).unwrap(), h);
    }

    #[test]
    fn equality_ignores_order() {
        let h = small();
        let mut fs = h.functions().to_vec();
        fs.reverse();
        let swapped = Header::new(1, fs, h.events().to_vec()).unwrap();
        assert_eq!(swapped, h);
        let other_version = Header::new(2, h.functions().to_vec(), h.events().to_vec()).unwrap();
        assert_ne!(other_version, h);
    }

    #[test]
    fn duplicates_rejected() {
        let f = Function::new("a", vec![]);
        assert!(matches!(Header::new(1, vec![f.clone(), f], vec![]), Err(Error::Abi(_))));
        let e = Event::new("E", vec![]);
        assert!(matches!(Header::new(1, vec![], vec![e.clone(), e]), Err(Error::Abi(_))));
    }

    #[test]
    fn lookups() {
        let h = small();
        assert_eq!(h.function("init").unwrap().name(), "init");
        assert!(matches!(h.function("nope"), Err(Error::NotFound(_))));
        assert!(matches!(h.event("nope"), Err(Error::NotFound(_))));
        assert_eq!(hex::encode(h.function("init").unwrap().method_id()), "44d6441f");
        let id = h.function("get_values").unwrap().method_id();
        assert_eq!(h.function_by_id(&id).unwrap().name(), "get_values");
    }

    #[test]
    fn decode_event_payload() {
        let h = small();
        let ready = h.event("Ready").unwrap();
        let owner = "LDH4MEPOJX3EGN3BLBTLEYXVHYCN3AVA7IOE772F3XGI6VNZHAP6GX5R";
        let args = ready.encode_args(&[owner.into()]).unwrap();
        let decoded = h.decode_event(&ready.method_id(), &args).unwrap();
        assert_eq!(decoded.name, "Ready");
        assert_eq!(decoded.values, vec![("owner".to_string(), Argument::from(owner))]);
        assert!(matches!(h.decode_event(&[0, 0, 0, 0], &args), Err(Error::NotFound(_))));
    }

    #[test]
    fn decode_call_payload() {
        let h = small();
        let f = h.function("get_values").unwrap();
        let inv = f.encode(&["[1,2]".into()]).unwrap();
        let decoded = h.decode_call(&inv.method_id, inv.args.as_ref().unwrap()).unwrap();
        assert_eq!(decoded.values[0].1, Argument::from(vec!["1", "2"]));
    }

    #[test]
    fn malformed_bytes() {
        assert!(matches!(Header::from_bytes(&[0xc0]), Err(Error::Decode(_))));
        assert!(Header::from_bytes(&[0x01]).is_err());
    }
}
