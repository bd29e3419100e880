use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{Location, Segment, TranslationError};
use super::magnitude::{json_type_name, parse_magnitude};
use crate::clarity::ClarityValue;

/// A loosely-typed contract argument as returned by the quoting service.
///
/// The service tags arguments with `type` and short names (`contract`,
/// `uint`, `some`); the canonical names are accepted as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentDescriptor {
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ArgumentDescriptor {
    pub fn new(kind: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            kind: kind.into(),
            value,
        }
    }
}

/// The closed set of argument kinds the translator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    ContractPrincipal,
    UnsignedInteger,
    Optional,
    True,
    False,
    Tuple,
}

impl ArgumentKind {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "contract-principal" | "contract" => Some(ArgumentKind::ContractPrincipal),
            "unsigned-integer" | "uint" => Some(ArgumentKind::UnsignedInteger),
            "optional" | "some" => Some(ArgumentKind::Optional),
            "true" => Some(ArgumentKind::True),
            "false" => Some(ArgumentKind::False),
            "tuple" => Some(ArgumentKind::Tuple),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArgumentKind::ContractPrincipal => "contract-principal",
            ArgumentKind::UnsignedInteger => "unsigned-integer",
            ArgumentKind::Optional => "optional",
            ArgumentKind::True => "true",
            ArgumentKind::False => "false",
            ArgumentKind::Tuple => "tuple",
        }
    }
}

/// Translate one argument descriptor into a typed Clarity value.
///
/// Pure and total over the six supported kinds; anything else fails with
/// [`TranslationError::UnsupportedArgumentKind`].
pub fn translate_argument(descriptor: &ArgumentDescriptor) -> Result<ClarityValue, TranslationError> {
    translate(&descriptor.kind, descriptor.value.as_ref())
}

/// Translate a whole argument list, keeping its order.
///
/// The first failure aborts the translation and records the argument index.
pub fn translate_arguments(
    descriptors: &[ArgumentDescriptor],
) -> Result<Vec<ClarityValue>, TranslationError> {
    descriptors
        .iter()
        .enumerate()
        .map(|(index, descriptor)| {
            translate_argument(descriptor).map_err(|e| e.within(Segment::Argument(index)))
        })
        .collect()
}

fn translate(kind: &str, value: Option<&Value>) -> Result<ClarityValue, TranslationError> {
    let Some(parsed) = ArgumentKind::parse(kind) else {
        return Err(TranslationError::UnsupportedArgumentKind {
            kind: kind.to_string(),
            location: Location::default(),
        });
    };

    match parsed {
        ArgumentKind::ContractPrincipal => translate_principal(value),
        ArgumentKind::UnsignedInteger => match value {
            Some(value) => parse_magnitude(value)
                .map(ClarityValue::UInt)
                .map_err(|reason| TranslationError::InvalidMagnitude {
                    value: value.to_string(),
                    reason,
                    location: Location::default(),
                }),
            None => Err(TranslationError::InvalidMagnitude {
                value: "null".to_string(),
                reason: "magnitude is missing".to_string(),
                location: Location::default(),
            }),
        },
        ArgumentKind::Optional => {
            let (inner_kind, inner_value) =
                nested_descriptor(parsed, value).map_err(|e| e.within(Segment::Optional))?;
            translate(inner_kind, inner_value)
                .map(ClarityValue::some)
                .map_err(|e| e.within(Segment::Optional))
        }
        ArgumentKind::True => Ok(ClarityValue::Bool(true)),
        ArgumentKind::False => Ok(ClarityValue::Bool(false)),
        ArgumentKind::Tuple => {
            let Some(Value::Object(fields)) = value else {
                return Err(malformed(parsed, value, "expected an object of fields"));
            };

            fields
                .iter()
                .map(|(name, field)| {
                    let (field_kind, field_value) = nested_descriptor(parsed, Some(field))
                        .map_err(|e| e.within(Segment::TupleField(name.clone())))?;
                    translate(field_kind, field_value)
                        .map(|v| (name.clone(), v))
                        .map_err(|e| e.within(Segment::TupleField(name.clone())))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(ClarityValue::Tuple)
        }
    }
}

fn translate_principal(value: Option<&Value>) -> Result<ClarityValue, TranslationError> {
    let reject = |value: String| TranslationError::MalformedPrincipal {
        value,
        location: Location::default(),
    };

    let Some(Value::String(principal)) = value else {
        return Err(reject(value.map(Value::to_string).unwrap_or_default()));
    };

    match principal.split_once('.') {
        Some((address, contract_name)) if !address.is_empty() && !contract_name.is_empty() => {
            Ok(ClarityValue::contract_principal(address, contract_name))
        }
        _ => Err(reject(principal.clone())),
    }
}

/// Reads the `{kind|type, value}` pair of a descriptor nested in a JSON value.
fn nested_descriptor(
    outer: ArgumentKind,
    value: Option<&Value>,
) -> Result<(&str, Option<&Value>), TranslationError> {
    let Some(Value::Object(object)) = value else {
        return Err(malformed(outer, value, "expected a nested argument"));
    };

    let kind = object
        .get("kind")
        .or_else(|| object.get("type"))
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(outer, value, "nested argument has no kind"))?;

    Ok((kind, object.get("value").filter(|v| !v.is_null())))
}

fn malformed(kind: ArgumentKind, value: Option<&Value>, reason: &str) -> TranslationError {
    let found = value.map(json_type_name).unwrap_or("nothing");
    TranslationError::MalformedArgument {
        kind: kind.as_str().to_string(),
        reason: format!("{reason}, found {found}"),
        location: Location::default(),
    }
}
