//! Per-kind encoding and decoding of values on a [BitCursor].
//!
//! Descriptors are width-checked before any bit is touched, so hand-built
//! descriptors fail with [crate::FormatError] instead of a bad access.
//! Padding goes through [pad], which either clears or skips its bits.

use half::f16;
use log::trace;

use crate::{
    bits::{BitCursor, mask, reverse_bits_n, reverse_blob_bits, sign_extend},
    errors::{Error, SizeError},
    field::{ByteOrder, FieldDescriptor, FieldKind},
    value::Value,
};

/// Encodes `value` into `field` at the cursor. `index` is the value's position
/// in the value sequence and is only used for error reporting.
pub fn encode<B>(
    cursor: &mut BitCursor<B>,
    field: &FieldDescriptor,
    value: &Value,
    index: usize,
) -> Result<(), Error>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    let mismatch = || Error::TypeMismatch {
        index,
        kind: field.kind,
    };
    field.check(index)?;
    let n = field.bits;

    trace!("encode {:?} as {} at bit {}", value, field, cursor.position());

    match field.kind {
        FieldKind::Unsigned | FieldKind::Signed => {
            let bits = value.as_bits().ok_or_else(mismatch)?;
            write_int(cursor, bits & mask(n), field)?;
        }
        FieldKind::Bool => {
            let bit = value.as_bool().ok_or_else(mismatch)?;
            write_int(cursor, bit as u128, field)?;
        }
        FieldKind::Float => {
            let v = value.as_f64().ok_or_else(mismatch)?;
            let bits = match n {
                16 => f16::from_f64(v).to_bits() as u128,
                32 => (v as f32).to_bits() as u128,
                _ => v.to_bits() as u128,
            };
            write_int(cursor, bits, field)?;
        }
        FieldKind::Raw => {
            let bytes = value.as_bytes().ok_or_else(mismatch)?;
            write_blob(cursor, bytes, field)?;
        }
        FieldKind::Text => {
            let Value::Text(text) = value else {
                return Err(mismatch());
            };
            write_blob(cursor, text.as_bytes(), field)?;
        }
        FieldKind::Pad => pad(cursor, field, true)?,
    }

    Ok(())
}

/// Moves the cursor over a padding field, zeroing its bits when `fill` is set
/// and leaving them untouched otherwise.
pub fn pad<B>(
    cursor: &mut BitCursor<B>,
    field: &FieldDescriptor,
    fill: bool,
) -> Result<(), SizeError>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    if fill {
        cursor.write_zeros(field.bits)
    } else {
        cursor.skip(field.bits)
    }
}

/// Decodes the value of `field` at the cursor. Padding fields decode to `None`.
pub fn decode<B>(
    cursor: &mut BitCursor<B>,
    field: &FieldDescriptor,
    index: usize,
) -> Result<Option<Value>, Error>
where
    B: AsRef<[u8]>,
{
    field.check(index)?;
    let n = field.bits;
    let position = cursor.position();

    let value = match field.kind {
        FieldKind::Pad => {
            cursor.skip(n)?;
            return Ok(None);
        }
        FieldKind::Unsigned => Value::Unsigned(read_int(cursor, field)?),
        FieldKind::Signed => Value::Signed(sign_extend(read_int(cursor, field)?, n)),
        FieldKind::Bool => Value::Bool(read_int(cursor, field)? != 0),
        FieldKind::Float => {
            let bits = read_int(cursor, field)?;
            Value::Float(match n {
                16 => f16::from_bits(bits as u16).to_f64(),
                32 => f32::from_bits(bits as u32) as f64,
                _ => f64::from_bits(bits as u64),
            })
        }
        FieldKind::Raw => Value::Raw(read_blob(cursor, field)?),
        FieldKind::Text => {
            let bytes = read_blob(cursor, field)?;
            let text = String::from_utf8(bytes).map_err(|source| Error::Decode { index, source })?;
            Value::Text(text)
        }
    };

    trace!("decoded {} at bit {} as {:?}", field, position, value);

    Ok(Some(value))
}

fn write_int<B>(
    cursor: &mut BitCursor<B>,
    bits: u128,
    field: &FieldDescriptor,
) -> Result<(), SizeError>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    let bits = match field.byte_order {
        ByteOrder::Big => bits,
        ByteOrder::Little => reverse_bits_n(bits, field.bits),
    };

    cursor.write_bits(bits, field.bits)
}

fn read_int<B>(cursor: &mut BitCursor<B>, field: &FieldDescriptor) -> Result<u128, SizeError>
where
    B: AsRef<[u8]>,
{
    let bits = cursor.read_bits(field.bits)?;

    Ok(match field.byte_order {
        ByteOrder::Big => bits,
        ByteOrder::Little => reverse_bits_n(bits, field.bits),
    })
}

fn write_blob<B>(
    cursor: &mut BitCursor<B>,
    bytes: &[u8],
    field: &FieldDescriptor,
) -> Result<(), SizeError>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    if bytes.len() * 8 < field.bits {
        return Err(SizeError::BlobTooShort {
            needed: field.bits,
            available: bytes.len() * 8,
        });
    }

    match field.byte_order {
        ByteOrder::Big => cursor.write_bytes(bytes, field.bits),
        ByteOrder::Little => {
            let reversed = reverse_blob_bits(bytes, field.bits);
            cursor.write_bytes(&reversed, field.bits)
        }
    }
}

fn read_blob<B>(cursor: &mut BitCursor<B>, field: &FieldDescriptor) -> Result<Vec<u8>, SizeError>
where
    B: AsRef<[u8]>,
{
    let bytes = cursor.read_bytes(field.bits)?;

    Ok(match field.byte_order {
        ByteOrder::Big => bytes,
        ByteOrder::Little => reverse_blob_bits(&bytes, field.bits),
    })
}
