//! Header-aware **contract client** bound to a deployed address.
//!
//! Provides:
//! - Local argument checking and call encoding through the contract's [`Header`]
//! - Read-only calls via `chain.Call`
//! - Invoke transactions (build → sign → send)
//! - Filtering of receipt events emitted by this contract

use crate::abi::{Argument, Header, Invocation};
use crate::error::Result;
use crate::rpc::{ChainClient, Transport};
use crate::tx::build::{build_invoke, GasParams};
use crate::tx::send::sign_and_send;
use crate::tx::Transaction;
use crate::types::{CallResponse, TxEvent};
use crate::wallet::{Account, Signer};
use tracing::debug;

/// Options for an invoke (write) transaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvokeOptions {
    /// Taken from `chain.GetAccount` when `None`.
    pub nonce: Option<u64>,
    pub gas: GasParams,
}

/// Contract client bound to a specific **address** and its header.
#[derive(Debug, Clone)]
pub struct ContractClient<'c, T> {
    chain: &'c ChainClient<T>,
    address: Account,
    header: Header,
}

impl<'c, T: Transport> ContractClient<'c, T> {
    pub fn new(chain: &'c ChainClient<T>, address: Account, header: Header) -> Self {
        Self { chain, address, header }
    }

    /// Client for the contract at `address`, using the header the node reports.
    pub async fn at(chain: &'c ChainClient<T>, address: Account) -> Result<Self> {
        let res = chain.get_contract(&address).await?;
        Ok(Self::new(chain, address, res.header))
    }

    pub fn address(&self) -> &Account {
        &self.address
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    // ------------------------------ Encoding ---------------------------------

    /// Invocation triple for `method(args)`.
    pub fn encode_call(&self, method: &str, args: &[Argument]) -> Result<Invocation> {
        self.header.function(method)?.encode(args)
    }

    // ------------------------------ Read-only --------------------------------

    /// Read-only call. Arguments are checked against the header before the
    /// request leaves the process.
    pub async fn call(&self, method: &str, args: &[Argument], height: Option<u64>) -> Result<CallResponse> {
        self.encode_call(method, args)?;
        self.chain.call(&self.address, method, args, height).await
    }

    // ------------------------------ Send/write -------------------------------

    /// Unsigned invoke transaction from `from`.
    pub fn build_tx(
        &self,
        from: Account,
        nonce: u64,
        method: &str,
        args: &[Argument],
        gas: GasParams,
    ) -> Result<Transaction> {
        build_invoke(from, nonce, &self.address, self.header.function(method)?, args, gas)
    }

    /// Encode, sign with `signer`, and broadcast. Returns the transaction hash.
    pub async fn invoke<S: Signer + ?Sized>(
        &self,
        signer: &S,
        method: &str,
        args: &[Argument],
        opts: InvokeOptions,
    ) -> Result<String> {
        let from = Account::from_public_key(signer.public_key());
        let nonce = match opts.nonce {
            Some(n) => n,
            None => self.chain.next_nonce(&from).await?,
        };
        let mut tx = self.build_tx(from, nonce, method, args, opts.gas)?;
        debug!(contract = %self.address, method, nonce, "invoking contract");
        sign_and_send(self.chain, &mut tx, signer).await
    }

    // ------------------------------ Events -----------------------------------

    /// Events emitted by this contract, optionally restricted to one declared event.
    pub fn events<'e>(&self, events: &'e [TxEvent], name: Option<&str>) -> Result<Vec<&'e TxEvent>> {
        if let Some(n) = name {
            self.header.event(n)?;
        }
        let me = self.address.to_string();
        Ok(events.iter().filter(|e| e.contract == me && name.map_or(true, |n| e.name == n)).collect())
    }
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;
    use crate::abi::{Event, Function, Parameter, PrimitiveType};
    use crate::error::Error;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    struct Recorder {
        answers: Mutex<Vec<Value>>,
        seen: Mutex<Vec<(String, Value)>>,
    }

    impl Recorder {
        fn new(answers: Vec<Value>) -> Self {
            Self { answers: Mutex::new(answers), seen: Mutex::new(vec![]) }
        }
    }

    impl Transport for Recorder {
        async fn request(&self, method: &str, params: Value) -> Result<Value> {
            self.seen.lock().unwrap().push((method.to_string(), params));
            let mut q = self.answers.lock().unwrap();
            if q.is_empty() {
                return Err(Error::Network("no answer".into()));
            }
            Ok(q.remove(0))
        }
    }

    fn token_header() -> Header {
        Header::new(
            1,
            vec![
                Function::new("mint", vec![Parameter::new("amount", PrimitiveType::Uint64)]),
                Function::new("get_balance", vec![Parameter::new("owner", PrimitiveType::Address)]),
            ],
            vec![Event::new("Mint", vec![Parameter::new("amount", PrimitiveType::Uint64)])],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn read_only_call_checks_arguments_locally() {
        let chain = ChainClient::new(Recorder::new(vec![json!({"result": "5", "code": 0})]));
        let owner = Account::from_seed(&[4u8; 32]);
        let token = ContractClient::new(&chain, owner.create(0), token_header());

        assert!(matches!(token.call("get_balance", &[], None).await, Err(Error::ArgumentCount { .. })));
        assert!(matches!(token.call("burn", &[], None).await, Err(Error::NotFound(_))));
        assert!(chain.transport().seen.lock().unwrap().is_empty());

        let res = token.call("get_balance", &[owner.to_string().into()], Some(9)).await.unwrap();
        assert_eq!(res.result, "5");
        let seen = chain.transport().seen.lock().unwrap();
        assert_eq!(seen[0].0, "chain.Call");
        assert_eq!(seen[0].1["height"], 9);
    }

    #[tokio::test]
    async fn invoke_fetches_nonce_and_broadcasts() {
        let chain = ChainClient::new(Recorder::new(vec![
            json!({"account": {"nonce": "12"}}),
            json!({"code": 0, "hash": "beef"}),
        ]));
        let signer = Account::from_seed(&[4u8; 32]);
        let token = ContractClient::new(&chain, signer.create(0), token_header());
        let hash = token.invoke(&signer, "mint", &["100".into()], InvokeOptions::default()).await.unwrap();
        assert_eq!(hash, "beef");

        let seen = chain.transport().seen.lock().unwrap();
        assert_eq!(seen[0].0, "chain.GetAccount");
        assert_eq!(seen[1].0, "chain.Broadcast");
        let raw = seen[1].1["rawTx"].as_str().unwrap();
        let bytes = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, raw).unwrap();
        let tx = Transaction::from_bytes(&bytes).unwrap();
        assert_eq!(tx.nonce, 12);
        assert_eq!(tx.to.as_ref(), Some(token.address()));
        assert!(tx.is_signed());
    }

    #[tokio::test]
    async fn at_uses_reported_header() {
        let chain = ChainClient::new(Recorder::new(vec![json!({
            "header": {"version": 1, "functions": [{"name": "mint", "parameters": [{"name": "amount", "type": "uint64"}]}]},
            "code": ""
        })]));
        let c = ContractClient::at(&chain, Account::from_seed(&[5u8; 32])).await.unwrap();
        assert!(c.header().function("mint").is_ok());
    }

    #[test]
    fn event_filtering() {
        let chain = ChainClient::new(Recorder::new(vec![]));
        let token = ContractClient::new(&chain, Account::from_seed(&[6u8; 32]), token_header());
        let me = token.address().to_string();
        let events = vec![
            TxEvent { name: "Mint".into(), contract: me.clone(), attributes: vec![] },
            TxEvent { name: "Mint".into(), contract: "LOTHER".into(), attributes: vec![] },
            TxEvent { name: "Other".into(), contract: me, attributes: vec![] },
        ];
        assert_eq!(token.events(&events, None).unwrap().len(), 2);
        assert_eq!(token.events(&events, Some("Mint")).unwrap().len(), 1);
        assert!(matches!(token.events(&events, Some("Burn")), Err(Error::NotFound(_))));
    }
}
