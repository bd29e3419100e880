use std::fmt;

use num_bigint::BigUint;

/// A typed Clarity value, as passed to a contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClarityValue {
    ContractPrincipal {
        address: String,
        contract_name: String,
    },
    UInt(BigUint),
    Optional(Option<Box<ClarityValue>>),
    Bool(bool),
    /// Fields in the order they were received. Access is by name.
    Tuple(Vec<(String, ClarityValue)>),
}

impl ClarityValue {
    pub fn contract_principal(address: impl Into<String>, contract_name: impl Into<String>) -> Self {
        ClarityValue::ContractPrincipal {
            address: address.into(),
            contract_name: contract_name.into(),
        }
    }

    pub fn some(inner: ClarityValue) -> Self {
        ClarityValue::Optional(Some(Box::new(inner)))
    }

    /// Looks up a tuple field by name. `None` for non-tuples.
    pub fn field(&self, name: &str) -> Option<&ClarityValue> {
        match self {
            ClarityValue::Tuple(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }
}

/// Clarity literal syntax, e.g. `(some u100)` or `'SP000.pool`.
impl fmt::Display for ClarityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClarityValue::ContractPrincipal {
                address,
                contract_name,
            } => write!(f, "'{address}.{contract_name}"),
            ClarityValue::UInt(n) => write!(f, "u{n}"),
            ClarityValue::Optional(None) => f.write_str("none"),
            ClarityValue::Optional(Some(inner)) => write!(f, "(some {inner})"),
            ClarityValue::Bool(b) => write!(f, "{b}"),
            ClarityValue::Tuple(fields) => {
                f.write_str("(tuple")?;
                for (name, value) in fields {
                    write!(f, " ({name} {value})")?;
                }
                f.write_str(")")
            }
        }
    }
}
