//! Format compiler: turns a format string such as `">u19<s5>f64r3p4"` into a
//! [CompiledFormat].
//!
//! Each token is an optional byte order marker (`>` big, `<` little) followed by
//! a kind tag and a decimal width in bits. Markers are sticky and apply to every
//! following field until the next marker.

use std::{fmt, str::FromStr};

use log::debug;

use crate::{
    errors::FormatError,
    field::{ByteOrder, FieldDescriptor, FieldKind},
};

/// An immutable, compiled format: field descriptors in token order plus total bit length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CompiledFormat {
    fields: Vec<FieldDescriptor>,
    total_bits: usize,
}

impl CompiledFormat {
    /// Compiles a format string. Fails on unknown tags, missing or zero widths,
    /// illegal float widths and byte order markers with no field after them.
    pub fn compile(format: &str) -> Result<Self, FormatError> {
        let mut fields = Vec::new();
        let mut total_bits = 0usize;
        let mut byte_order = ByteOrder::Big;
        let mut pending_marker: Option<usize> = None;
        let mut chars = format.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            if c.is_ascii_whitespace() {
                continue;
            }

            match c {
                '>' => {
                    byte_order = ByteOrder::Big;
                    pending_marker = Some(offset);
                    continue;
                }
                '<' => {
                    byte_order = ByteOrder::Little;
                    pending_marker = Some(offset);
                    continue;
                }
                _ => {}
            }

            let kind =
                FieldKind::from_tag(c).ok_or(FormatError::UnknownKind { tag: c, offset })?;

            let mut bits: Option<usize> = None;
            while let Some(&(_, d)) = chars.peek() {
                let Some(digit) = d.to_digit(10) else {
                    break;
                };
                chars.next();

                bits = bits
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|b| b.checked_add(digit as usize))
                    .map(Some)
                    .ok_or(FormatError::WidthOverflow { offset })?;
            }

            let bits = bits.ok_or(FormatError::MissingWidth { tag: c, offset })?;
            let field = FieldDescriptor::new_with_byte_order(kind, bits, byte_order);
            field.check(offset)?;

            total_bits = total_bits
                .checked_add(bits)
                .ok_or(FormatError::WidthOverflow { offset })?;
            fields.push(field);
            pending_marker = None;
        }

        if let Some(offset) = pending_marker {
            return Err(FormatError::DanglingByteOrder { offset });
        }

        let compiled = Self { fields, total_bits };
        debug!(
            "compiled {:?} into {} fields, {} bits",
            format,
            compiled.fields.len(),
            compiled.total_bits
        );

        Ok(compiled)
    }

    /// Builds a format from descriptors directly, applying the same width checks as [Self::compile].
    pub fn from_fields(fields: Vec<FieldDescriptor>) -> Result<Self, FormatError> {
        let mut total_bits = 0usize;

        for (i, field) in fields.iter().enumerate() {
            field.check(i)?;
            total_bits = total_bits
                .checked_add(field.bits)
                .ok_or(FormatError::WidthOverflow { offset: i })?;
        }

        Ok(Self { fields, total_bits })
    }

    /// Field descriptors in format order, padding included.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Sum of all field widths, padding included.
    pub fn total_bits(&self) -> usize {
        self.total_bits
    }

    /// Number of bytes needed to hold [Self::total_bits].
    pub fn byte_len(&self) -> usize {
        self.total_bits.div_ceil(8)
    }

    /// Number of values pack takes and unpack produces.
    pub fn value_count(&self) -> usize {
        self.fields.iter().filter(|f| f.has_value()).count()
    }
}

impl FromStr for CompiledFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

/// Canonical format string. A marker is emitted only where the byte order
/// changes, starting from big-endian.
impl fmt::Display for CompiledFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current = ByteOrder::Big;

        for field in &self.fields {
            if field.byte_order != current {
                write!(f, "{}", field.byte_order.marker())?;
                current = field.byte_order;
            }
            write!(f, "{}", field)?;
        }

        Ok(())
    }
}

/// Total bit length of `format`, padding included.
pub fn calculate_size(format: &str) -> Result<usize, FormatError> {
    Ok(CompiledFormat::compile(format)?.total_bits())
}
