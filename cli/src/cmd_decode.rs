//! `flashdecode decode` and `flashdecode selectors`.

use anyhow::{Context, Result};
use flashdecode_core::types::selector_hex;
use flashdecode_evm::{selector, CallDecoder};

pub fn run(decoder: &CallDecoder, calldata: &str, as_json: bool) -> Result<()> {
    let call = decoder
        .decode_hex(calldata)
        .context("decode call-data")?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&call)?);
    } else {
        println!("Method:    {}", call.method);
        println!("Selector:  {}", call.selector_hex());
        println!("Params:");
        for (name, value) in &call.params {
            println!("  {}: {}", name, value);
        }
    }
    Ok(())
}

pub fn selectors(decoder: &CallDecoder) -> Result<()> {
    let entries = decoder.table().entries();
    println!("{} registered selectors:", entries.len());
    for (sel, descriptor) in entries {
        let signature = descriptor.signature();
        let hashed = if selector::compute(&signature) == sel {
            "keccak"
        } else {
            "alias"
        };
        println!("  {}  {:6}  {}", selector_hex(&sel), hashed, signature);
    }
    Ok(())
}
