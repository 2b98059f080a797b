//! Error types for the SSZ core.

use std::io;

use thiserror::Error;

/// Errors surfaced by encoding, decoding and accessor operations.
#[derive(Debug, Error)]
pub enum SszError {
    /// The operation is not valid for the type's size classification.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// The bytes do not hold a valid encoding for the requested scope.
    #[error("malformed encoding: {0}")]
    Malformed(#[from] MalformedEncoding),

    /// A name-keyed lookup referenced an undeclared field.
    #[error("field '{field}' not found in {container}")]
    MissingField {
        container: &'static str,
        field: String,
    },

    /// An index-keyed lookup fell outside `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// Construction of a value was rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The underlying stream failed for a reason other than running dry.
    #[error("stream error: {0}")]
    Io(#[source] io::Error),
}

impl SszError {
    /// The error returned when a fixed byte length is requested from a
    /// variable-size type.
    pub fn variable_size<T: ?Sized>() -> Self {
        SszError::InvalidOperation(format!(
            "{} is variable-size and has no fixed byte length",
            short_type_name::<T>()
        ))
    }

    /// Returns the malformed-encoding cause, if this is one.
    pub fn as_malformed(&self) -> Option<&MalformedEncoding> {
        match self {
            SszError::Malformed(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, SszError::Malformed(_))
    }

    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, SszError::InvalidOperation(_))
    }
}

impl From<io::Error> for SszError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => SszError::Malformed(MalformedEncoding::UnexpectedEof),
            _ => SszError::Io(e),
        }
    }
}

/// The specific reason a byte sequence failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedEncoding {
    #[error("needed {needed} bytes, only {available} available")]
    InsufficientBytes { needed: usize, available: usize },

    #[error("stream ended unexpectedly")]
    UnexpectedEof,

    #[error("{consumed} of {scope} bytes consumed, trailing bytes remain")]
    TrailingBytes { consumed: usize, scope: usize },

    #[error("input of {len} bytes exceeds the limit of {max}")]
    InputTooLarge { len: usize, max: usize },

    /// An offset points back into the fixed-size portion.
    #[error("offset {0} points into the fixed portion")]
    OffsetIntoFixedPortion(usize),

    /// The first offset does not start right after the fixed-size portion.
    #[error("first offset {0} skips variable bytes")]
    OffsetSkipsVariableBytes(usize),

    #[error("offset {0} is smaller than the previous offset")]
    OffsetsAreDecreasing(usize),

    #[error("offset {0} is beyond the end of the scope")]
    OffsetOutOfBounds(usize),

    /// A sequence scope cannot be split into whole elements or offsets.
    #[error("sequence of {len} bytes is not a whole number of {element_len}-byte items")]
    InvalidSequenceLength { len: usize, element_len: usize },

    #[error("expected {expected} elements, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("{len} elements exceed the limit of {limit}")]
    LengthExceedsLimit { len: usize, limit: usize },

    #[error("fixed-size item with zero length")]
    ZeroLengthItem,

    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Errors raised while constructing a value through the validation layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{container} is missing field '{field}'")]
    MissingField {
        container: &'static str,
        field: &'static str,
    },

    #[error("{container} has no field named '{field}'")]
    UnknownField {
        container: &'static str,
        field: String,
    },

    #[error("field '{field}' of {container} was set more than once")]
    DuplicateField {
        container: &'static str,
        field: String,
    },

    #[error("field '{field}' of {container} expects {expected}, got {actual}")]
    WrongType {
        container: &'static str,
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{collection} requires exactly {expected} elements, got {actual}")]
    LengthMismatch {
        collection: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{collection} holds at most {limit} elements, got {actual}")]
    LengthExceedsLimit {
        collection: &'static str,
        limit: usize,
        actual: usize,
    },

    #[error("{collection} cannot have zero length")]
    ZeroLength { collection: &'static str },
}

/// Result type for SSZ operations.
pub type SszResult<T> = std::result::Result<T, SszError>;

/// The last path segment of a type name, generics included.
///
/// `lean_ssz_testkit::types::Uint64` becomes `Uint64`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
