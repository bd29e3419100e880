//! Conversion of the quoting service's loosely-typed call description into
//! typed contract-call arguments and canonical post-conditions.
//!
//! Everything here is synchronous and side-effect free.

pub mod argument;
pub mod error;
pub mod magnitude;
pub mod post_condition;

pub use argument::{ArgumentDescriptor, ArgumentKind, translate_argument, translate_arguments};
pub use error::{Location, Segment, TranslationError};
pub use post_condition::{
    NormalizedPostCondition, PostConditionDescriptor, PostConditionKind, normalize_post_condition,
    normalize_post_conditions,
};
