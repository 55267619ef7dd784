//! Group-wise byte reversal, for buffers whose struct byte order differs from
//! the field order bitstruct packs in.

use log::debug;

use crate::errors::{Error, FormatError, SizeError};

/// Reverses consecutive byte groups of `data`. Each character of `groups` is a
/// single decimal digit giving the size of the next group.
///
/// ```
/// let swapped = bitstruct::byteswap("12142", b"\x01\x02\x03\x04\x05\x06\x07\x08\x09\x0a").unwrap();
/// assert_eq!(swapped, b"\x01\x03\x02\x04\x08\x07\x06\x05\x0a\x09");
/// ```
pub fn byteswap(groups: &str, data: &[u8]) -> Result<Vec<u8>, Error> {
    let sizes = groups
        .chars()
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as usize)
                .ok_or(FormatError::InvalidGroup(c))
        })
        .collect::<Result<Vec<usize>, FormatError>>()?;

    Ok(byteswap_groups(&sizes, data)?)
}

/// Reverses consecutive byte groups of the given sizes. Bytes after the last
/// group are copied unchanged.
pub fn byteswap_groups(groups: &[usize], data: &[u8]) -> Result<Vec<u8>, SizeError> {
    let covered = groups
        .iter()
        .try_fold(0usize, |acc, &size| acc.checked_add(size))
        .unwrap_or(usize::MAX);

    if covered > data.len() {
        return Err(SizeError::GroupsExceedBuffer {
            groups: covered,
            available: data.len(),
        });
    }

    debug!("byteswapping {} of {} bytes in {} groups", covered, data.len(), groups.len());

    let mut out = data.to_vec();
    let mut start = 0;
    for &size in groups {
        out[start..start + size].reverse();
        start += size;
    }

    Ok(out)
}
