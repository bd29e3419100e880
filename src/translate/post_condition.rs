use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{Location, Segment, TranslationError};
use super::magnitude::parse_magnitude;

/// A post-condition as returned by the quoting service.
///
/// `amount` is left as raw JSON so that magnitudes beyond 64 bits survive
/// until they are parsed exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostConditionDescriptor {
    #[serde(alias = "type")]
    pub kind: String,
    pub address: String,
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
}

/// The canonical post-condition handed to the transaction builder.
///
/// Serializes with the tag under `type`, which is what the builder reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedPostCondition {
    #[serde(rename = "type")]
    pub kind: String,
    pub address: String,
    pub condition: String,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostConditionKind {
    FungibleAsset,
    NativeAsset,
}

impl PostConditionKind {
    /// NFT post-conditions are deliberately not recognised.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "fungible-asset" | "ft-postcondition" => Some(PostConditionKind::FungibleAsset),
            "native-asset" | "stx-postcondition" => Some(PostConditionKind::NativeAsset),
            _ => None,
        }
    }
}

/// Normalize one post-condition descriptor.
///
/// `condition` is copied through unchecked; the transaction builder owns
/// the set of valid comparison codes.
pub fn normalize_post_condition(
    descriptor: &PostConditionDescriptor,
) -> Result<NormalizedPostCondition, TranslationError> {
    let kind = PostConditionKind::parse(&descriptor.kind).ok_or_else(|| {
        TranslationError::UnsupportedPostConditionKind {
            kind: descriptor.kind.clone(),
            location: Location::default(),
        }
    })?;

    let amount = render_amount(descriptor)?;

    let asset = match kind {
        PostConditionKind::FungibleAsset => match &descriptor.asset {
            Some(asset) => Some(asset.clone()),
            None => {
                return Err(TranslationError::MalformedPostCondition {
                    kind: descriptor.kind.clone(),
                    reason: "missing asset identifier".to_string(),
                    location: Location::default(),
                });
            }
        },
        PostConditionKind::NativeAsset => None,
    };

    Ok(NormalizedPostCondition {
        kind: descriptor.kind.clone(),
        address: descriptor.address.clone(),
        condition: descriptor.condition.clone(),
        amount,
        asset,
    })
}

/// Normalize a list of post-conditions, recording the index of a failure.
pub fn normalize_post_conditions(
    descriptors: &[PostConditionDescriptor],
) -> Result<Vec<NormalizedPostCondition>, TranslationError> {
    descriptors
        .iter()
        .enumerate()
        .map(|(index, descriptor)| {
            normalize_post_condition(descriptor).map_err(|e| e.within(Segment::PostCondition(index)))
        })
        .collect()
}

fn render_amount(descriptor: &PostConditionDescriptor) -> Result<String, TranslationError> {
    let Some(amount) = &descriptor.amount else {
        return Err(TranslationError::MalformedPostCondition {
            kind: descriptor.kind.clone(),
            reason: "missing amount".to_string(),
            location: Location::default(),
        });
    };

    parse_magnitude(amount)
        .map(|n| n.to_string())
        .map_err(|reason| TranslationError::InvalidMagnitude {
            value: amount.to_string(),
            reason,
            location: Location::default(),
        })
}
