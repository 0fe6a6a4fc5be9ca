// Contract deployment vectors.
// ----------------------------
// Envelope bytes, the init invocation and a full signed deploy transaction,
// plus the address the deployed contract will live at.
//
// They are fast and require no node.

use liquid_sdk::abi::{Argument, Event, Function, Header, Invocation, Parameter, PrimitiveType};
use liquid_sdk::contracts::Contract;
use liquid_sdk::tx::{build_deploy, GasParams, Transaction};
use liquid_sdk::wallet::Account;
use liquid_sdk::Error;

const SEED: &str = "b66311a8a3401fe772615c610bb6d4add13d373289f6841ed3dc87ac2ec0b16d";
const OWNER: &str = "LDH4MEPOJX3EGN3BLBTLEYXVHYCN3AVA7IOE772F3XGI6VNZHAP6GX5R";
const ENVELOPE: &str = "f848b83df83b01e7d68a6765745f76616c756573cac98676616c7565730103cf84696e6974c9c8856f776e6572800ad1d0855265616479c9c8856f776e6572800a880061736d01000000";

fn contract() -> Result<Contract, Box<dyn std::error::Error>> {
    let header = Header::new(
        1,
        vec![
            Function::new("get_values", vec![Parameter::array("values", PrimitiveType::Uint64)]),
            Function::new("init", vec![Parameter::new("owner", PrimitiveType::Address)]),
        ],
        vec![Event::new("Ready", vec![Parameter::new("owner", PrimitiveType::Address)])],
    )?;
    Ok(Contract::new(header, hex::decode("0061736d01000000")?))
}

fn creator() -> Result<Account, Box<dyn std::error::Error>> {
    let seed: [u8; 32] = hex::decode(SEED)?.try_into().map_err(|_| "seed must be 32 bytes")?;
    Ok(Account::from_seed(&seed))
}

#[test]
fn envelope_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let c = contract()?;
    assert_eq!(hex::encode(c.to_bytes()), ENVELOPE);
    let back = Contract::from_bytes(&hex::decode(ENVELOPE)?)?;
    assert_eq!(back, c);
    assert_eq!(back.code, hex::decode("0061736d01000000")?);
    Ok(())
}

#[test]
fn deploy_payload_slots() -> Result<(), Box<dyn std::error::Error>> {
    let c = contract()?;
    let inv = c.encode(Some(&[Argument::from(OWNER)][..]))?;
    assert_eq!(hex::encode(inv.method_id), "44d6441f");

    let payload = inv.clone().into_payload();
    assert_eq!(payload.len(), 3);
    assert_eq!(Invocation::from_payload(&payload)?, inv);

    let bare = c.encode(None)?.into_payload();
    assert_eq!(bare[0].as_deref(), Some(&[0u8, 0, 0, 0][..]));
    assert_eq!(bare[1], None);
    Ok(())
}

#[test]
fn signed_deploy_transaction() -> Result<(), Box<dyn std::error::Error>> {
    let owner = creator()?;
    let c = contract()?;
    let mut tx = build_deploy(owner.clone(), 0, &c, Some(&[Argument::from(OWNER)][..]), GasParams::default())?;
    tx.sign()?;
    assert!(tx.to.is_none());

    let back = Transaction::from_bytes(&tx.to_bytes(true))?;
    assert_eq!(back, tx);
    let envelope = back.payload[2].as_deref().ok_or("missing envelope")?;
    assert_eq!(Contract::from_bytes(envelope)?, c);

    assert_eq!(
        Contract::deploy_address(&owner, tx.nonce).to_string(),
        "LB36YY2JHKXFXSESE75QIB5KWTOPFJ5G4267PJWLPY4WDLHGCBRRJWLS"
    );
    Ok(())
}

#[test]
fn init_arguments_are_checked() -> Result<(), Box<dyn std::error::Error>> {
    let c = contract()?;
    assert!(matches!(c.encode(Some(&[][..])), Err(Error::ArgumentCount { expected: 1, got: 0 })));
    assert!(matches!(c.encode(Some(&[Argument::from("LNOPE")][..])), Err(Error::Address(_))));
    Ok(())
}
