//! Bit-granular cursor over a byte slice.
//!
//! Bits are addressed in MSB-first order: bit 0 is the high bit of the first byte.

use crate::errors::SizeError;

/// Widest value [BitCursor::read_bits] and [BitCursor::write_bits] handle.
pub const MAX_INT_BITS: usize = 128;

/// Sequential bit reader/writer over a borrowed buffer.
///
/// `B` is `&[u8]` for reading and `&mut [u8]` for writing.
#[derive(Debug)]
pub struct BitCursor<B> {
    data: B,
    bit_pos: usize,
}

impl<B: AsRef<[u8]>> BitCursor<B> {
    pub fn new(data: B) -> Self {
        Self { data, bit_pos: 0 }
    }

    pub fn with_offset(data: B, bit_pos: usize) -> Self {
        Self { data, bit_pos }
    }

    pub fn position(&self) -> usize {
        self.bit_pos
    }

    pub fn bit_len(&self) -> usize {
        self.data.as_ref().len() * 8
    }

    pub fn remaining(&self) -> usize {
        self.bit_len().saturating_sub(self.bit_pos)
    }

    fn check(&self, n: usize) -> Result<(), SizeError> {
        if self
            .bit_pos
            .checked_add(n)
            .map_or(true, |end| end > self.bit_len())
        {
            return Err(SizeError::OutOfBounds {
                position: self.bit_pos,
                requested: n,
                available: self.bit_len(),
            });
        }

        Ok(())
    }

    fn bit_at(&self, pos: usize) -> u8 {
        (self.data.as_ref()[pos / 8] >> (7 - pos % 8)) & 1
    }

    /// Advances the cursor by `n` bits without touching the buffer.
    pub fn skip(&mut self, n: usize) -> Result<(), SizeError> {
        self.check(n)?;
        self.bit_pos += n;
        Ok(())
    }

    /// Reads `n` bits (at most [MAX_INT_BITS]) as an unsigned value. MSB-first.
    pub fn read_bits(&mut self, n: usize) -> Result<u128, SizeError> {
        check_int_width(n)?;
        self.check(n)?;

        let mut value = 0u128;
        for _ in 0..n {
            value = (value << 1) | self.bit_at(self.bit_pos) as u128;
            self.bit_pos += 1;
        }

        Ok(value)
    }

    /// Reads `n` bits into a left-aligned byte vector of `ceil(n / 8)` bytes.
    /// Unused low bits of the final byte are zero.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, SizeError> {
        self.check(n)?;

        let mut out = vec![0u8; n.div_ceil(8)];
        for i in 0..n {
            out[i / 8] |= self.bit_at(self.bit_pos) << (7 - i % 8);
            self.bit_pos += 1;
        }

        Ok(out)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> BitCursor<B> {
    fn set_bit_at(&mut self, pos: usize, bit: u8) {
        let byte = &mut self.data.as_mut()[pos / 8];
        let shift = 7 - pos % 8;
        if bit == 1 {
            *byte |= 1 << shift;
        } else {
            *byte &= !(1 << shift);
        }
    }

    /// Writes the low `n` bits (at most [MAX_INT_BITS]) of `value`. MSB-first.
    pub fn write_bits(&mut self, value: u128, n: usize) -> Result<(), SizeError> {
        check_int_width(n)?;
        self.check(n)?;

        for i in (0..n).rev() {
            let bit = ((value >> i) & 1) as u8;
            self.set_bit_at(self.bit_pos, bit);
            self.bit_pos += 1;
        }

        Ok(())
    }

    /// Writes the first `n` bits of `bytes`, MSB-first. `bytes` must hold at least `n` bits.
    pub fn write_bytes(&mut self, bytes: &[u8], n: usize) -> Result<(), SizeError> {
        if bytes.len() * 8 < n {
            return Err(SizeError::BlobTooShort {
                needed: n,
                available: bytes.len() * 8,
            });
        }
        self.check(n)?;

        for i in 0..n {
            let bit = (bytes[i / 8] >> (7 - i % 8)) & 1;
            self.set_bit_at(self.bit_pos, bit);
            self.bit_pos += 1;
        }

        Ok(())
    }

    /// Clears `n` bits.
    pub fn write_zeros(&mut self, n: usize) -> Result<(), SizeError> {
        self.check(n)?;

        for _ in 0..n {
            self.set_bit_at(self.bit_pos, 0);
            self.bit_pos += 1;
        }

        Ok(())
    }
}

fn check_int_width(n: usize) -> Result<(), SizeError> {
    if n > MAX_INT_BITS {
        return Err(SizeError::TooManyBits {
            requested: n,
            max: MAX_INT_BITS,
        });
    }

    Ok(())
}

/// All-ones mask over the low `bits` bits.
pub fn mask(bits: usize) -> u128 {
    if bits >= MAX_INT_BITS {
        u128::MAX
    } else {
        (1u128 << bits) - 1
    }
}

/// Sign-extends the low `bits` of `value` to a full `i128`. Zero bits extend to 0.
pub fn sign_extend(value: u128, bits: usize) -> i128 {
    if bits == 0 {
        return 0;
    }
    let shift = MAX_INT_BITS - bits.min(MAX_INT_BITS);
    ((value << shift) as i128) >> shift
}

/// Reverses the low `n` bits of `x` (LSB becomes MSB of the result).
pub fn reverse_bits_n(mut x: u128, n: usize) -> u128 {
    let mut r = 0u128;
    for _ in 0..n {
        r = (r << 1) | (x & 1);
        x >>= 1;
    }

    r
}

/// Reverses the first `n` bits of a left-aligned blob.
pub fn reverse_blob_bits(bytes: &[u8], n: usize) -> Vec<u8> {
    let mut out = vec![0u8; n.div_ceil(8)];
    for i in 0..n {
        let src = n - 1 - i;
        let bit = (bytes[src / 8] >> (7 - src % 8)) & 1;
        out[i / 8] |= bit << (7 - i % 8);
    }

    out
}
