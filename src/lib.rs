//! # bitstruct
//!
//! Pack and unpack values into bit fields described by compact format strings,
//! like C struct bitfields with explicit widths and per-field byte order.
//!
//! A format is a sequence of tokens, each an optional byte order marker (`>` big,
//! `<` little, sticky) followed by a kind tag and a width in bits:
//!
//! | tag | kind |
//! |-----|------|
//! | `u` | unsigned integer (up to 128 bits) |
//! | `s` | signed integer (up to 128 bits) |
//! | `f` | float, 16, 32 or 64 bits |
//! | `b` | boolean |
//! | `r` | raw bytes |
//! | `p` | padding |
//! | `t` | UTF-8 text |
//!
//! ## Example
//!
//! ```
//! use bitstruct::{pack, unpack, values, Value};
//!
//! let packed = pack(">u19<s5>f64r3p4", &values![1u8, -2, 1.0, b"\x80"]).unwrap();
//! assert_eq!(packed, b"\x00\x00\x2f\x3f\xf0\x00\x00\x00\x00\x00\x00\x80");
//!
//! let unpacked = unpack(">u19<s5>f64r3p4", &packed).unwrap();
//! assert_eq!(unpacked[1], Value::Signed(-2));
//! ```
//!
//! Compile once with [CompiledFormat::compile] to pack and unpack many buffers
//! with the same layout.

pub mod bits;
pub mod byteswap;
pub mod codec;
pub mod engine;
pub mod errors;
pub mod field;
pub mod format;
#[cfg(feature = "serde")]
pub mod serde;
pub mod value;

pub use byteswap::{byteswap, byteswap_groups};
pub use engine::{PackOptions, pack, pack_into, unpack, unpack_from};
pub use errors::{Error, FormatError, SizeError};
pub use field::{ByteOrder, FieldDescriptor, FieldKind};
pub use format::{CompiledFormat, calculate_size};
pub use value::Value;

/// Compiles `format` into a reusable [CompiledFormat].
pub fn compile(format: &str) -> Result<CompiledFormat, FormatError> {
    CompiledFormat::compile(format)
}
