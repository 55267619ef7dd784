//! Pack and unpack engines: walk a [CompiledFormat] field by field, binding
//! each non-padding field to the next value of the value sequence.

use log::debug;

use crate::{
    bits::BitCursor,
    codec,
    errors::{Error, SizeError},
    format::CompiledFormat,
    value::Value,
};

/// Options for [CompiledFormat::pack_into].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackOptions {
    /// Write zeros into padding fields. When false, padding bits of the target
    /// buffer are left as they are.
    pub fill_padding: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        PackOptions { fill_padding: true }
    }
}

impl CompiledFormat {
    /// Packs `values` into a new zero-filled buffer of [CompiledFormat::byte_len] bytes.
    pub fn pack(&self, values: &[Value]) -> Result<Vec<u8>, Error> {
        let mut data = vec![0u8; self.byte_len()];
        self.pack_into(&mut data, 0, values, PackOptions::default())?;

        Ok(data)
    }

    /// Packs `values` into `data` starting at bit `offset_bits`. Bits outside the
    /// packed range are not modified. On error `data` may be partially written.
    pub fn pack_into(
        &self,
        data: &mut [u8],
        offset_bits: usize,
        values: &[Value],
        options: PackOptions,
    ) -> Result<(), Error> {
        self.check_arity(values.len())?;
        self.check_len(data.len(), offset_bits)?;

        debug!(
            "packing {} values into {} bits at bit {}",
            values.len(),
            self.total_bits(),
            offset_bits
        );

        let mut cursor = BitCursor::with_offset(data, offset_bits);
        let mut values = values.iter().enumerate();

        for field in self.fields() {
            if !field.has_value() {
                codec::pad(&mut cursor, field, options.fill_padding)?;
                continue;
            }

            // Arity was checked above, so every value field has a value.
            let Some((index, value)) = values.next() else {
                break;
            };
            codec::encode(&mut cursor, field, value, index)?;
        }

        Ok(())
    }

    /// Unpacks one value per non-padding field from the start of `data`.
    pub fn unpack(&self, data: &[u8]) -> Result<Vec<Value>, Error> {
        self.unpack_from(data, 0)
    }

    /// Unpacks one value per non-padding field starting at bit `offset_bits`.
    /// Bits after the last field are ignored.
    pub fn unpack_from(&self, data: &[u8], offset_bits: usize) -> Result<Vec<Value>, Error> {
        self.check_len(data.len(), offset_bits)?;

        debug!(
            "unpacking {} bits from {} bytes at bit {}",
            self.total_bits(),
            data.len(),
            offset_bits
        );

        let mut cursor = BitCursor::with_offset(data, offset_bits);
        let mut values = Vec::with_capacity(self.value_count());

        for field in self.fields() {
            if let Some(value) = codec::decode(&mut cursor, field, values.len())? {
                values.push(value);
            }
        }

        Ok(values)
    }

    fn check_arity(&self, found: usize) -> Result<(), Error> {
        let expected = self.value_count();
        if found != expected {
            return Err(Error::Arity { expected, found });
        }

        Ok(())
    }

    fn check_len(&self, len: usize, offset_bits: usize) -> Result<(), SizeError> {
        let available = len.saturating_mul(8);
        let needed = offset_bits.saturating_add(self.total_bits());
        if available < needed {
            return Err(SizeError::BufferTooShort { needed, available });
        }

        Ok(())
    }
}

/// Packs `values` according to `format`.
///
/// ```
/// use bitstruct::{pack, values};
///
/// let packed = pack("u1u1s6u7u9", &values![0u8, 0u8, -2, 65u8, 22u8]).unwrap();
/// assert_eq!(packed, b"\x3e\x82\x16");
/// ```
pub fn pack(format: &str, values: &[Value]) -> Result<Vec<u8>, Error> {
    CompiledFormat::compile(format)?.pack(values)
}

/// Packs `values` according to `format` into `data` starting at bit `offset_bits`.
pub fn pack_into(
    format: &str,
    data: &mut [u8],
    offset_bits: usize,
    values: &[Value],
    options: PackOptions,
) -> Result<(), Error> {
    CompiledFormat::compile(format)?.pack_into(data, offset_bits, values, options)
}

/// Unpacks `data` according to `format`.
pub fn unpack(format: &str, data: &[u8]) -> Result<Vec<Value>, Error> {
    CompiledFormat::compile(format)?.unpack(data)
}

/// Unpacks `data` according to `format` starting at bit `offset_bits`.
pub fn unpack_from(format: &str, data: &[u8], offset_bits: usize) -> Result<Vec<Value>, Error> {
    CompiledFormat::compile(format)?.unpack_from(data, offset_bits)
}
