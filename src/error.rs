//! Error types for dictionary construction and matching.

/// Errors reported by the dictionary front ends.
///
/// All of them are synchronous precondition failures raised at the entry
/// point that violated them; nothing is retried and a failed call leaves
/// the dictionary exactly as it was. Out-of-range access to the internal
/// node table is a programmer error and panics instead of surfacing here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Keys must contain at least one character.
    #[error("key must not be empty")]
    EmptyKey,

    /// In case-insensitive mode, a key contained a character whose
    /// lowercase form is more than one character long. Such keys would
    /// break the start-offset derivation of string-keyed matches.
    #[error("case folding changes the length of key {key:?}")]
    LengthChangingKey {
        /// The offending key, as passed in.
        key: String,
    },

    /// The dictionary was already built; insertion, rebuilding and
    /// replacement are rejected.
    #[error("dictionary is already built")]
    AlreadyBuilt,

    /// Matching requires a built dictionary.
    #[error("dictionary is not built yet")]
    NotBuilt,
}

/// Result type using the dictionary [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
