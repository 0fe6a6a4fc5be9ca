// Contract header vectors.
// ------------------------
// A token header as produced by the node's own tooling (legacy layout:
// entries sorted by name, parameters with a trailing size slot) and the
// same header in the method-id layout this crate writes by default.
//
// They are fast and require no node.

use liquid_sdk::abi::{Argument, Header, HeaderLayout, PrimitiveType};
use liquid_sdk::Error;

const LEGACY: &str = "f8a801f864d28b6765745f62616c616e6365c5c480800a80cc8a69735f70617573696e67c0cb846d696e74c5c480800380c7857061757365c0d0897365745f6f776e6572c5c480800a80d4887472616e73666572cac480800a80c480800380c987756e7061757365c0f83fd8844d696e74d2c682746f800a80ca86616d6f756e74800380e5885472616e73666572dbc88466726f6d800a80c682746f800a80ca86616d6f756e74800380";
const METHOD_ID: &str = "f89e01f85fcf897365745f6f776e6572c4c380800ac987756e7061757365c0c7857061757365c0d2887472616e73666572c8c380800ac3808003ca846d696e74c4c3808003d18b6765745f62616c616e6365c4c380800acc8a69735f70617573696e67c0f83ae2885472616e73666572d8c78466726f6d800ac582746f800ac986616d6f756e748003d6844d696e74d0c582746f800ac986616d6f756e748003";

#[test]
fn legacy_fixture_decodes() -> Result<(), Box<dyn std::error::Error>> {
    let header = Header::from_bytes(&hex::decode(LEGACY)?)?;
    assert_eq!(header.version(), 1);
    assert_eq!(header.functions().len(), 7);
    assert_eq!(header.events().len(), 2);

    let transfer = header.function("transfer")?;
    let types: Vec<PrimitiveType> = transfer.parameters().iter().map(|p| p.ty).collect();
    assert_eq!(types, vec![PrimitiveType::Address, PrimitiveType::Uint64]);

    let mint = header.event("Mint")?;
    assert_eq!(mint.parameters()[0].name, "to");
    assert_eq!(mint.parameters()[1].name, "amount");
    Ok(())
}

#[test]
fn both_layouts_reproduce_exactly() -> Result<(), Box<dyn std::error::Error>> {
    let header = Header::from_bytes(&hex::decode(LEGACY)?)?;
    assert_eq!(hex::encode(header.to_bytes_with(HeaderLayout::Legacy)), LEGACY);
    assert_eq!(hex::encode(header.to_bytes()), METHOD_ID);
    assert_eq!(Header::from_bytes(&hex::decode(METHOD_ID)?)?, header);
    Ok(())
}

#[test]
fn json_view_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let header = Header::from_bytes(&hex::decode(LEGACY)?)?;
    let json = header.to_pretty_json()?;
    assert!(json.contains("\"get_balance\""));
    let back = Header::from_json_str(&json)?;
    assert_eq!(back, header);
    Ok(())
}

#[test]
fn call_payload_through_header() -> Result<(), Box<dyn std::error::Error>> {
    let header = Header::from_bytes(&hex::decode(METHOD_ID)?)?;
    let mint = header.function("mint")?;
    let inv = mint.encode(&[Argument::from("1000")])?;
    assert_eq!(inv.method_id, mint.method_id());
    let decoded = header.decode_call(&inv.method_id, inv.args.as_deref().unwrap_or_default())?;
    assert_eq!(decoded.name, "mint");
    assert_eq!(decoded.values[0].1, Argument::from("1000"));

    assert!(matches!(mint.encode(&[]), Err(Error::ArgumentCount { expected: 1, got: 0 })));
    assert!(matches!(mint.encode(&[Argument::from("-1")]), Err(Error::ValueRange(_))));
    Ok(())
}
