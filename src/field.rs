//! Field descriptors produced by the format compiler.

use std::fmt;

use crate::errors::FormatError;

/// Kind of a single field, one per format tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldKind {
    /// `u`: unsigned integer.
    Unsigned,
    /// `s`: two's complement signed integer.
    Signed,
    /// `f`: IEEE 754 binary16, binary32 or binary64.
    Float,
    /// `b`: boolean.
    Bool,
    /// `r`: raw bytes.
    Raw,
    /// `p`: padding, consumes and produces no value.
    Pad,
    /// `t`: UTF-8 text.
    Text,
}

impl FieldKind {
    /// Maps a format tag character to its kind.
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'u' => Some(FieldKind::Unsigned),
            's' => Some(FieldKind::Signed),
            'f' => Some(FieldKind::Float),
            'b' => Some(FieldKind::Bool),
            'r' => Some(FieldKind::Raw),
            'p' => Some(FieldKind::Pad),
            't' => Some(FieldKind::Text),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            FieldKind::Unsigned => 'u',
            FieldKind::Signed => 's',
            FieldKind::Float => 'f',
            FieldKind::Bool => 'b',
            FieldKind::Raw => 'r',
            FieldKind::Pad => 'p',
            FieldKind::Text => 't',
        }
    }

    /// Largest width the kind can be declared with, if bounded.
    pub fn max_bits(self) -> Option<usize> {
        match self {
            FieldKind::Unsigned | FieldKind::Signed | FieldKind::Bool => Some(128),
            FieldKind::Float => Some(64),
            FieldKind::Raw | FieldKind::Pad | FieldKind::Text => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Unsigned => "unsigned",
            FieldKind::Signed => "signed",
            FieldKind::Float => "float",
            FieldKind::Bool => "bool",
            FieldKind::Raw => "raw",
            FieldKind::Pad => "padding",
            FieldKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// Order in which a field's bits are placed in the stream.
///
/// Big-endian fields are written most significant bit first. Little-endian
/// fields are written as the bit-reversal of their big-endian pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    #[default]
    Big,
    Little,
}

impl ByteOrder {
    pub fn marker(self) -> char {
        match self {
            ByteOrder::Big => '>',
            ByteOrder::Little => '<',
        }
    }
}

/// A single compiled format token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDescriptor {
    pub kind: FieldKind,
    /// Width of the field in bits, always at least 1.
    pub bits: usize,
    pub byte_order: ByteOrder,
}

impl FieldDescriptor {
    pub fn new(kind: FieldKind, bits: usize) -> Self {
        FieldDescriptor {
            kind,
            bits,
            byte_order: ByteOrder::default(),
        }
    }

    pub fn new_with_byte_order(kind: FieldKind, bits: usize, byte_order: ByteOrder) -> Self {
        FieldDescriptor {
            kind,
            bits,
            byte_order,
        }
    }

    /// Checks the width against the kind: at least one bit, 16/32/64 for floats
    /// and at most [FieldKind::max_bits]. `offset` is reported in the error.
    pub fn check(&self, offset: usize) -> Result<(), FormatError> {
        let tag = self.kind.tag();

        if self.bits == 0 {
            return Err(FormatError::ZeroWidth { tag, offset });
        }

        match self.kind {
            FieldKind::Float if !matches!(self.bits, 16 | 32 | 64) => {
                Err(FormatError::InvalidFloatWidth(self.bits))
            }
            kind => match kind.max_bits() {
                Some(max) if self.bits > max => Err(FormatError::WidthTooLarge {
                    kind,
                    bits: self.bits,
                }),
                _ => Ok(()),
            },
        }
    }

    /// Whether the field takes a value from the value sequence.
    pub fn has_value(&self) -> bool {
        self.kind != FieldKind::Pad
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.tag(), self.bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for tag in ['u', 's', 'f', 'b', 'r', 'p', 't'] {
            assert_eq!(FieldKind::from_tag(tag).unwrap().tag(), tag);
        }
        assert_eq!(FieldKind::from_tag('x'), None);
    }

    #[test]
    fn test_padding_has_no_value() {
        assert!(!FieldDescriptor::new(FieldKind::Pad, 3).has_value());
        assert!(FieldDescriptor::new(FieldKind::Raw, 3).has_value());
    }

    #[test]
    fn test_check_widths() {
        assert!(FieldDescriptor::new(FieldKind::Unsigned, 128).check(0).is_ok());
        assert_eq!(
            FieldDescriptor::new(FieldKind::Unsigned, 200).check(3).unwrap_err(),
            FormatError::WidthTooLarge {
                kind: FieldKind::Unsigned,
                bits: 200
            }
        );
        assert_eq!(
            FieldDescriptor::new(FieldKind::Signed, 0).check(3).unwrap_err(),
            FormatError::ZeroWidth { tag: 's', offset: 3 }
        );
        assert_eq!(
            FieldDescriptor::new(FieldKind::Float, 24).check(0).unwrap_err(),
            FormatError::InvalidFloatWidth(24)
        );
    }

    #[test]
    fn test_default_byte_order_is_big() {
        assert_eq!(FieldDescriptor::new(FieldKind::Unsigned, 8).byte_order, ByteOrder::Big);
    }
}
