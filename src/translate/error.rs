use std::fmt;

use thiserror::Error;

/// One step on the way from the top-level list down to the failing value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Argument(usize),
    PostCondition(usize),
    Optional,
    TupleField(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Argument(index) => write!(f, "argument {index}"),
            Segment::PostCondition(index) => write!(f, "post-condition {index}"),
            Segment::Optional => f.write_str("inside optional"),
            Segment::TupleField(name) => write!(f, "tuple field `{name}`"),
        }
    }
}

/// Where a translation error happened, outermost segment first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location(Vec<Segment>);

impl Location {
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }

        f.write_str(" (")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{segment}")?;
        }
        f.write_str(")")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// The argument `kind` tag is not one of the supported kinds.
    #[error("Unsupported argument kind `{kind}`{location}")]
    UnsupportedArgumentKind { kind: String, location: Location },

    /// A contract principal that is not of the form `address.contract-name`.
    #[error("Malformed contract principal {value:?}{location}")]
    MalformedPrincipal { value: String, location: Location },

    /// A magnitude that is negative, fractional or not a number at all.
    #[error("Invalid magnitude {value}: {reason}{location}")]
    InvalidMagnitude {
        value: String,
        reason: String,
        location: Location,
    },

    /// An `optional` or `tuple` argument whose payload has the wrong shape.
    #[error("Malformed `{kind}` argument: {reason}{location}")]
    MalformedArgument {
        kind: String,
        reason: String,
        location: Location,
    },

    /// The post-condition `kind` tag is not one this layer handles.
    #[error("Unsupported post-condition kind `{kind}`{location}")]
    UnsupportedPostConditionKind { kind: String, location: Location },

    /// A supported post-condition that is missing a required field.
    #[error("Malformed `{kind}` post-condition: {reason}{location}")]
    MalformedPostCondition {
        kind: String,
        reason: String,
        location: Location,
    },
}

impl TranslationError {
    pub fn location(&self) -> &Location {
        match self {
            TranslationError::UnsupportedArgumentKind { location, .. }
            | TranslationError::MalformedPrincipal { location, .. }
            | TranslationError::InvalidMagnitude { location, .. }
            | TranslationError::MalformedArgument { location, .. }
            | TranslationError::UnsupportedPostConditionKind { location, .. }
            | TranslationError::MalformedPostCondition { location, .. } => location,
        }
    }

    /// Records that the failure happened inside `segment`, keeping the variant.
    pub(crate) fn within(mut self, segment: Segment) -> Self {
        match &mut self {
            TranslationError::UnsupportedArgumentKind { location, .. }
            | TranslationError::MalformedPrincipal { location, .. }
            | TranslationError::InvalidMagnitude { location, .. }
            | TranslationError::MalformedArgument { location, .. }
            | TranslationError::UnsupportedPostConditionKind { location, .. }
            | TranslationError::MalformedPostCondition { location, .. } => {
                location.0.insert(0, segment)
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_location_should_work() {
        let err = TranslationError::UnsupportedArgumentKind {
            kind: "bogus".to_string(),
            location: Location::default(),
        };
        assert_eq!(err.to_string(), "Unsupported argument kind `bogus`");
    }

    #[test]
    fn test_within_prepends_outer_segments() {
        let err = TranslationError::MalformedPrincipal {
            value: "nodot".to_string(),
            location: Location::default(),
        }
        .within(Segment::TupleField("pool".to_string()))
        .within(Segment::Optional)
        .within(Segment::Argument(2));

        assert!(matches!(err, TranslationError::MalformedPrincipal { .. }));
        assert_eq!(
            err.location().segments(),
            &[
                Segment::Argument(2),
                Segment::Optional,
                Segment::TupleField("pool".to_string()),
            ]
        );
        assert_eq!(
            err.to_string(),
            "Malformed contract principal \"nodot\" (argument 2 > inside optional > tuple field `pool`)"
        );
    }
}
