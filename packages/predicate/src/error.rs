use keypath_core::PathError;

/// Errors raised while turning a dynamic value into a predicate shorthand.
///
/// Malformed shorthands are a caller bug; they are reported once, at
/// construction, never while the predicate runs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PredicateError {
    #[error("a {found} value is not a predicate shorthand")]
    UnsupportedShorthand { found: &'static str },

    #[error("invalid shorthand path: {0}")]
    Path(#[from] PathError),
}
