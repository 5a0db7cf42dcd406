use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::KeyDivError;

/// Fresh random AES master key of `len` bytes (16, 24 or 32) from the OS
/// CSPRNG. The buffer is wiped on drop.
pub fn generate_master_key(len: usize) -> Result<Zeroizing<Vec<u8>>, KeyDivError> {
    if !matches!(len, 16 | 24 | 32) {
        return Err(KeyDivError::UnsupportedKeySize(len));
    }
    let mut key = Zeroizing::new(vec![0u8; len]);
    OsRng.fill_bytes(key.as_mut_slice());
    Ok(key)
}
