//! Block-level helpers shared by the CMAC engine.

use crate::error::KeyDivError;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// First byte of the `10*` padding.
pub const FIRST_PAD: u8 = 0x80;

/// Byte-wise XOR of two equal-length slices.
pub fn xor(a: &[u8], b: &[u8]) -> Result<Vec<u8>, KeyDivError> {
    if a.len() != b.len() {
        return Err(KeyDivError::XorLengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x ^ y).collect())
}

/// `a` read as a big-endian integer, shifted left by one bit and truncated to
/// `a.len()` bytes.
pub fn shift_left(a: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; a.len()];
    shift_left_into(a, &mut out);
    out
}

/// `a || 0x80`, zero-filled up to [`BLOCK_SIZE`] when shorter.
pub fn pad(a: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(BLOCK_SIZE.max(a.len() + 1));
    out.extend_from_slice(a);
    out.push(FIRST_PAD);
    if out.len() < BLOCK_SIZE {
        out.resize(BLOCK_SIZE, 0);
    }
    out
}

pub(crate) fn shift_left_into(src: &[u8], dst: &mut [u8]) {
    let mut carry = 0u8;
    for (out, byte) in dst.iter_mut().zip(src).rev() {
        *out = (byte << 1) | carry;
        carry = byte >> 7;
    }
}

pub(crate) fn xor_in_place(dst: &mut [u8; BLOCK_SIZE], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

/// Padded final block for a tail shorter than a block.
pub(crate) fn pad_block(tail: &[u8]) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    block[..tail.len()].copy_from_slice(tail);
    block[tail.len()] = FIRST_PAD;
    block
}
