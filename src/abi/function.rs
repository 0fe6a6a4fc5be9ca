//! Function and event descriptors, and the invocation triple they produce.

use crate::abi::param::{Argument, Parameter};
use crate::abi::HeaderLayout;
use crate::error::{Error, Result};
use crate::utils::hash::{method_id, METHOD_ID_LEN};
use crate::utils::rlp::Item;

/// 4-byte call selector.
pub type MethodId = [u8; METHOD_ID_LEN];

/// Method id meaning "no function invoked" (pure code deployment).
pub const ZERO_METHOD_ID: MethodId = [0u8; METHOD_ID_LEN];

/// `(method_id, encoded_args, serialized_contract)`, the payload of a call or deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub method_id: MethodId,
    pub args: Option<Vec<u8>>,
    pub contract: Option<Vec<u8>>,
}

impl Invocation {
    /// Three payload slots, empty ones as `None`.
    pub fn into_payload(self) -> Vec<Option<Vec<u8>>> {
        vec![Some(self.method_id.to_vec()), self.args, self.contract]
    }

    /// Reverse of [`into_payload`](Self::into_payload).
    pub fn from_payload(payload: &[Option<Vec<u8>>]) -> Result<Self> {
        if payload.len() != 3 {
            return Err(Error::Decode(format!("invocation payload needs 3 slots, got {}", payload.len())));
        }
        let method_id = match &payload[0] {
            Some(b) => crate::utils::bytes::to_array(b)?,
            None => ZERO_METHOD_ID,
        };
        Ok(Self { method_id, args: payload[1].clone(), contract: payload[2].clone() })
    }
}

impl From<Invocation> for Vec<Option<Vec<u8>>> {
    fn from(inv: Invocation) -> Self {
        inv.into_payload()
    }
}

/// Named ordered parameter list with a cached method id.
#[derive(Debug, Clone)]
pub struct Function {
    name: String,
    parameters: Vec<Parameter>,
    method_id: MethodId,
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.parameters == other.parameters
    }
}

impl Eq for Function {}

impl Function {
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        let name = name.into();
        let method_id = method_id(&name);
        Self { name, parameters, method_id }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn method_id(&self) -> MethodId {
        self.method_id
    }

    /// RLP list of each parameter's encoding, in declaration order.
    pub fn encode_args(&self, args: &[Argument]) -> Result<Vec<u8>> {
        if args.len() != self.parameters.len() {
            return Err(Error::ArgumentCount { expected: self.parameters.len(), got: args.len() });
        }
        let items = self
            .parameters
            .iter()
            .zip(args)
            .map(|(p, a)| p.encode(a).map(Item::Bytes))
            .collect::<Result<Vec<_>>>()?;
        Ok(Item::list(items).encode())
    }

    /// `(method_id, encoded_args, None)`.
    pub fn encode(&self, args: &[Argument]) -> Result<Invocation> {
        Ok(Invocation { method_id: self.method_id, args: Some(self.encode_args(args)?), contract: None })
    }

    /// Decode arguments after checking the method id.
    pub fn decode(&self, id: &[u8], args: &[u8]) -> Result<Vec<Argument>> {
        if id != self.method_id {
            return Err(Error::NameMismatch {
                name: self.name.clone(),
                expected: hex::encode(self.method_id),
                got: hex::encode(id),
            });
        }
        self.decode_args(args)
    }

    /// Decode an RLP argument list positionally.
    pub fn decode_args(&self, args: &[u8]) -> Result<Vec<Argument>> {
        let items = Item::decode(args)?.into_list()?;
        if items.len() != self.parameters.len() {
            return Err(Error::ArgumentCount { expected: self.parameters.len(), got: items.len() });
        }
        self.parameters
            .iter()
            .zip(&items)
            .map(|(p, item)| p.decode(item.as_bytes()?))
            .collect()
    }

    /// Decoded arguments paired with their parameter names.
    pub fn decode_named(&self, args: &[u8]) -> Result<Vec<(String, Argument)>> {
        let values = self.decode_args(args)?;
        Ok(self.parameters.iter().map(|p| p.name.clone()).zip(values).collect())
    }

    pub fn to_item(&self, layout: HeaderLayout) -> Item {
        Item::list(vec![
            Item::from(self.name.as_str()),
            Item::list(self.parameters.iter().map(|p| p.to_item(layout)).collect()),
        ])
    }

    pub fn from_item(item: &Item) -> Result<Self> {
        let fields = item.expect_list(2)?;
        let parameters = fields[1].as_list()?.iter().map(Parameter::from_item).collect::<Result<Vec<_>>>()?;
        Ok(Self::new(fields[0].as_str()?, parameters))
    }
}

/// Event descriptor; same shape and wire form as a [`Function`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event(Function);

impl Event {
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Event(Function::new(name, parameters))
    }

    pub fn as_function(&self) -> &Function {
        &self.0
    }

    pub fn from_item(item: &Item) -> Result<Self> {
        Function::from_item(item).map(Event)
    }
}

impl core::ops::Deref for Event {
    type Target = Function;
    fn deref(&self) -> &Function {
        &self.0
    }
}

impl From<Function> for Event {
    fn from(f: Function) -> Self {
        Event(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::primitive::PrimitiveType;

    fn transfer() -> Function {
        Function::new(
            "transfer",
            vec![Parameter::new("to", PrimitiveType::Address), Parameter::new("amount", PrimitiveType::Uint64)],
        )
    }

    #[test]
    fn method_id_is_cached_and_stable() {
        let f = transfer();
        assert_eq!(hex::encode(f.method_id()), "84a15da1");
        assert_eq!(f.method_id(), transfer().method_id());
    }

    #[test]
    fn encode_call() {
        let f = transfer();
        let args: Vec<Argument> =
            vec!["LADSUJQLIKT4WBBLGLJ6Q36DEBJ6KFBQIIABD6B3ZWF7NIE4RIZURI53".into(), "1000".into()];
        let inv = f.encode(&args).unwrap();
        assert_eq!(inv.method_id, f.method_id());
        assert_eq!(
            hex::encode(inv.args.as_ref().unwrap()),
            "eda358072a260b42a7cb042b32d3e86fc32053e51430420011f83bcd8bf6a09c8a3348a3bb88e803000000000000"
        );
        assert_eq!(inv.contract, None);
        assert_eq!(f.decode(&inv.method_id, inv.args.as_ref().unwrap()).unwrap(), args);
    }

    #[test]
    fn argument_count_is_checked() {
        let f = transfer();
        assert!(matches!(f.encode(&["1".into()]), Err(Error::ArgumentCount { expected: 2, got: 1 })));
        let one = Item::list(vec![Item::bytes(vec![1u8; 8])]).encode();
        assert!(matches!(f.decode_args(&one), Err(Error::ArgumentCount { expected: 2, got: 1 })));
    }

    #[test]
    fn wrong_method_id_is_a_name_mismatch() {
        let f = transfer();
        let other = Function::new("mint", vec![]);
        let inv = other.encode(&[]).unwrap();
        assert!(matches!(
            f.decode(&inv.method_id, inv.args.as_ref().unwrap()),
            Err(Error::NameMismatch { .. })
        ));
    }

    #[test]
    fn no_args_is_empty_list() {
        let f = Function::new("pause", vec![]);
        let inv = f.encode(&[]).unwrap();
        assert_eq!(inv.args, Some(vec![0xc0]));
        assert_eq!(f.decode_args(&[0xc0]).unwrap(), Vec::<Argument>::new());
    }

    #[test]
    fn payload_slots() {
        let inv = Function::new("pause", vec![]).encode(&[]).unwrap();
        let payload = inv.clone().into_payload();
        assert_eq!(payload.len(), 3);
        assert_eq!(payload[2], None);
        assert_eq!(Invocation::from_payload(&payload).unwrap(), inv);
        assert!(Invocation::from_payload(&payload[..2]).is_err());
    }

    #[test]
    fn named_decode() {
        let f = transfer();
        let inv = f.encode(&["LADSUJQLIKT4WBBLGLJ6Q36DEBJ6KFBQIIABD6B3ZWF7NIE4RIZURI53".into(), "5".into()]).unwrap();
        let named = f.decode_named(inv.args.as_ref().unwrap()).unwrap();
        assert_eq!(named[1], ("amount".to_string(), Argument::from("5")));
    }

    #[test]
    fn event_shares_function_shape() {
        let e = Event::new("Transfer", vec![Parameter::new("from", PrimitiveType::Address)]);
        assert_eq!(hex::encode(e.method_id()), "223c39e2");
        let item = e.to_item(HeaderLayout::MethodId);
        assert_eq!(Event::from_item(&item).unwrap(), e);
    }
}
