//! AN10922 AES key diversification.

use tracing::debug;

use crate::block::BLOCK_SIZE;
use crate::cmac::Cmac;
use crate::error::KeyDivError;

/// Diversification constant for AES-128 master keys.
pub const C128: u8 = 0x01;
/// Diversification constants for AES-192 master keys.
pub const C192_1: u8 = 0x11;
pub const C192_2: u8 = 0x12;
/// Diversification constants for AES-256 master keys.
pub const C256_1: u8 = 0x41;
pub const C256_2: u8 = 0x42;

/// Derive a key of the same length as `master` from diversification `data`.
///
/// - 16 bytes: `CMAC(0x01 || data)`.
/// - 24 bytes: `A = CMAC(0x11 || data)`, `B = CMAC(0x12 || data)`, output
///   `A[..8] || (A[8..] ^ B[..8]) || B[8..]`.
/// - 32 bytes: `CMAC(0x41 || data) || CMAC(0x42 || data)`.
///
/// ```
/// let key = keydiv::diversify(&[0u8; 16], b"\x30\x42\xf5foo").unwrap();
/// assert_eq!(key.len(), 16);
/// ```
pub fn diversify(master: &[u8], data: &[u8]) -> Result<Vec<u8>, KeyDivError> {
    let len = master.len();
    if !matches!(len, 16 | 24 | 32) {
        return Err(KeyDivError::WrongKeyLen(len));
    }

    let mut cmac = Cmac::new(master)?;
    let out = match len {
        16 => tagged(&mut cmac, C128, data)?.to_vec(),
        24 => {
            let a = tagged(&mut cmac, C192_1, data)?;
            let b = tagged(&mut cmac, C192_2, data)?;
            let mut out = Vec::with_capacity(24);
            out.extend_from_slice(&a[..8]);
            out.extend(a[8..].iter().zip(&b[..8]).map(|(x, y)| x ^ y));
            out.extend_from_slice(&b[8..]);
            out
        }
        _ => {
            let mut out = tagged(&mut cmac, C256_1, data)?.to_vec();
            out.extend_from_slice(&tagged(&mut cmac, C256_2, data)?);
            out
        }
    };
    debug!(key_len = len, data_len = data.len(), "key_diversified");
    Ok(out)
}

fn tagged(cmac: &mut Cmac, constant: u8, data: &[u8]) -> Result<[u8; BLOCK_SIZE], KeyDivError> {
    cmac.reset();
    cmac.write(&[constant])?;
    cmac.write(data)?;
    Ok(cmac.finalize())
}
