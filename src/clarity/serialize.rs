//! Clarity consensus serialization
//!
//! Only the value types the argument translator can produce are covered.

use num_traits::ToPrimitive;
use thiserror::Error;

use super::ClarityValue;
use super::c32::{C32Error, decode_address};

const TYPE_UINT: u8 = 0x01;
const TYPE_TRUE: u8 = 0x03;
const TYPE_FALSE: u8 = 0x04;
const TYPE_CONTRACT_PRINCIPAL: u8 = 0x06;
const TYPE_NONE: u8 = 0x09;
const TYPE_SOME: u8 = 0x0a;
const TYPE_TUPLE: u8 = 0x0c;

/// Longest contract or tuple field name Clarity accepts.
pub const MAX_NAME_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("uint {0} does not fit in 128 bits")]
    UIntOverflow(String),

    #[error("invalid principal address `{address}`: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: C32Error,
    },

    #[error("name `{0}` must be 1 to {MAX_NAME_LEN} bytes")]
    InvalidName(String),
}

/// Serialize a value into its consensus byte encoding.
pub fn serialize(value: &ClarityValue) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    write_value(&mut out, value)?;
    Ok(out)
}

/// Serialize a value into the `0x`-prefixed hex form accepted by Stacks tooling.
pub fn to_hex(value: &ClarityValue) -> Result<String, EncodeError> {
    Ok(format!("0x{}", hex::encode(serialize(value)?)))
}

fn write_value(out: &mut Vec<u8>, value: &ClarityValue) -> Result<(), EncodeError> {
    match value {
        ClarityValue::UInt(n) => {
            let n = n
                .to_u128()
                .ok_or_else(|| EncodeError::UIntOverflow(n.to_string()))?;
            out.push(TYPE_UINT);
            out.extend_from_slice(&n.to_be_bytes());
        }
        ClarityValue::Bool(true) => out.push(TYPE_TRUE),
        ClarityValue::Bool(false) => out.push(TYPE_FALSE),
        ClarityValue::Optional(None) => out.push(TYPE_NONE),
        ClarityValue::Optional(Some(inner)) => {
            out.push(TYPE_SOME);
            write_value(out, inner)?;
        }
        ClarityValue::ContractPrincipal {
            address,
            contract_name,
        } => {
            let principal =
                decode_address(address).map_err(|source| EncodeError::InvalidAddress {
                    address: address.clone(),
                    source,
                })?;
            out.push(TYPE_CONTRACT_PRINCIPAL);
            out.push(principal.version);
            out.extend_from_slice(&principal.hash160);
            write_name(out, contract_name)?;
        }
        ClarityValue::Tuple(fields) => {
            // consensus order is by field name, whatever order we hold them in
            let mut sorted: Vec<_> = fields.iter().collect();
            sorted.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));

            out.push(TYPE_TUPLE);
            out.extend_from_slice(&(sorted.len() as u32).to_be_bytes());
            for (name, field) in sorted {
                write_name(out, name)?;
                write_value(out, field)?;
            }
        }
    }
    Ok(())
}

fn write_name(out: &mut Vec<u8>, name: &str) -> Result<(), EncodeError> {
    let bytes = name.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_NAME_LEN {
        return Err(EncodeError::InvalidName(name.to_string()));
    }
    out.push(bytes.len() as u8);
    out.extend_from_slice(bytes);
    Ok(())
}
