//! Error types for format compilation, bit access, packing and unpacking.

use std::string::FromUtf8Error;

use thiserror::Error;

use crate::field::FieldKind;

/// Errors produced when compiling a format string into a [crate::format::CompiledFormat].
///
/// `offset` is the character offset in the format string, or the field index
/// for descriptors checked outside of a format string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A character that is neither a kind tag nor a byte order marker.
    #[error("unknown field kind {tag:?} at offset {offset}")]
    UnknownKind { tag: char, offset: usize },
    /// A kind tag without any digits after it.
    #[error("missing bit width after {tag:?} at offset {offset}")]
    MissingWidth { tag: char, offset: usize },
    /// A field declared with zero bits.
    #[error("zero bit width for {tag:?} at offset {offset}")]
    ZeroWidth { tag: char, offset: usize },
    /// Width digits do not fit in `usize`.
    #[error("bit width at offset {offset} is too large")]
    WidthOverflow { offset: usize },
    /// Float fields must be 16, 32 or 64 bits.
    #[error("float fields must be 16, 32 or 64 bits wide, got {0}")]
    InvalidFloatWidth(usize),
    /// Integer-like fields are limited to 128 bits.
    #[error("{kind} fields are limited to 128 bits, got {bits}")]
    WidthTooLarge { kind: FieldKind, bits: usize },
    /// A `>` or `<` marker with no field after it.
    #[error("byte order marker at offset {offset} is not followed by a field")]
    DanglingByteOrder { offset: usize },
    /// A byteswap group string contains something other than a decimal digit.
    #[error("invalid byteswap group {0:?}")]
    InvalidGroup(char),
}

/// Errors produced when a buffer or a blob is too small for the requested bits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeError {
    /// Requested bit range is beyond the end of the buffer.
    #[error("access of {requested} bits at bit {position} exceeds buffer of {available} bits")]
    OutOfBounds {
        position: usize,
        requested: usize,
        available: usize,
    },
    /// More bits than fit in one integer were requested in a single access.
    #[error("{requested} bits requested, at most {max} fit in one integer")]
    TooManyBits { requested: usize, max: usize },
    /// Buffer is shorter than the format's total bit length.
    #[error("buffer holds {available} bits, format needs {needed}")]
    BufferTooShort { needed: usize, available: usize },
    /// Raw or text value is shorter than its field.
    #[error("value of {available} bits is shorter than its {needed}-bit field")]
    BlobTooShort { needed: usize, available: usize },
    /// Byteswap groups cover more bytes than the buffer has.
    #[error("byteswap groups cover {groups} bytes, buffer has {available}")]
    GroupsExceedBuffer { groups: usize, available: usize },
}

/// Errors returned by the pack, unpack and byteswap operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Size(#[from] SizeError),
    /// Number of values differs from the number of non-padding fields.
    #[error("format takes {expected} values, got {found}")]
    Arity { expected: usize, found: usize },
    /// Value at `index` cannot be stored in a field of `kind`.
    #[error("value {index} cannot be packed into a {kind} field")]
    TypeMismatch { index: usize, kind: FieldKind },
    /// Text field at `index` does not hold valid UTF-8.
    #[error("text field {index} is not valid UTF-8")]
    Decode {
        index: usize,
        #[source]
        source: FromUtf8Error,
    },
}
