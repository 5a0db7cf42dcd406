//! Streaming AES-CMAC (RFC 4493), generalised to AES-192 and AES-256.

use std::fmt;

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};
use subtle::ConstantTimeEq;
use tracing::trace;
use zeroize::Zeroize;

use crate::block::{pad_block, shift_left_into, xor_in_place, BLOCK_SIZE};
use crate::error::KeyDivError;

/// Low byte of the subkey-generation constant `Rb` (`0x00..0087`).
const RB: u8 = 0x87;

/// AES key schedule for any of the accepted key sizes.
#[derive(Clone)]
enum BlockCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl BlockCipher {
    fn new(key: &[u8]) -> Result<Self, KeyDivError> {
        let unsupported = |_| KeyDivError::UnsupportedKeySize(key.len());
        match key.len() {
            16 => Aes128::new_from_slice(key)
                .map(Self::Aes128)
                .map_err(unsupported),
            24 => Aes192::new_from_slice(key)
                .map(Self::Aes192)
                .map_err(unsupported),
            32 => Aes256::new_from_slice(key)
                .map(Self::Aes256)
                .map_err(unsupported),
            other => Err(KeyDivError::UnsupportedKeySize(other)),
        }
    }

    fn key_len(&self) -> usize {
        match self {
            Self::Aes128(_) => 16,
            Self::Aes192(_) => 24,
            Self::Aes256(_) => 32,
        }
    }

    fn encrypt(&self, block: &mut [u8; BLOCK_SIZE]) {
        let block = GenericArray::from_mut_slice(block.as_mut_slice());
        match self {
            Self::Aes128(cipher) => cipher.encrypt_block(block),
            Self::Aes192(cipher) => cipher.encrypt_block(block),
            Self::Aes256(cipher) => cipher.encrypt_block(block),
        }
    }
}

/// Streaming CMAC state.
///
/// `write` absorbs data, `sum` appends the tag to a caller-supplied prefix.
/// After `sum` the engine refuses further writes until `reset`, which keeps
/// the key and starts a fresh message.
///
/// ```
/// use keydiv::Cmac;
///
/// let key = [0u8; 16];
/// let mut cmac = Cmac::new(&key).unwrap();
/// cmac.write(b"test ").unwrap();
/// cmac.write(b"string").unwrap();
/// let tag = cmac.sum(&[]);
///
/// assert_eq!(tag, Cmac::mac(&key, b"test string").unwrap());
/// ```
#[derive(Clone)]
pub struct Cmac {
    cipher: BlockCipher,
    k1: [u8; BLOCK_SIZE],
    k2: [u8; BLOCK_SIZE],
    /// Running CBC chaining value.
    x: [u8; BLOCK_SIZE],
    /// Unprocessed bytes; never more than one block once `write` returns.
    pending: Vec<u8>,
    finished: bool,
}

impl Cmac {
    /// Create an engine keyed with a 16, 24 or 32 byte AES key.
    pub fn new(key: &[u8]) -> Result<Self, KeyDivError> {
        let cipher = BlockCipher::new(key)?;
        let (k1, k2) = subkeys(&cipher);
        Ok(Self {
            cipher,
            k1,
            k2,
            x: [0u8; BLOCK_SIZE],
            pending: Vec::with_capacity(2 * BLOCK_SIZE),
            finished: false,
        })
    }

    /// One-shot tag of `data` under `key`.
    pub fn mac(key: &[u8], data: &[u8]) -> Result<[u8; BLOCK_SIZE], KeyDivError> {
        let mut cmac = Self::new(key)?;
        cmac.write(data)?;
        Ok(cmac.finalize())
    }

    /// Recompute the tag of `data` and compare it with `tag` in constant time.
    pub fn verify(key: &[u8], data: &[u8], tag: &[u8]) -> Result<bool, KeyDivError> {
        let expected = Self::mac(key, data)?;
        Ok(expected.as_slice().ct_eq(tag).into())
    }

    /// Absorb `data`. Fails with [`KeyDivError::AlreadyFinished`] after `sum`.
    ///
    /// All full blocks except the last are encrypted immediately; at least one
    /// byte stays pending so the final block can take its subkey at `sum`.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, KeyDivError> {
        if self.finished {
            return Err(KeyDivError::AlreadyFinished);
        }
        self.pending.extend_from_slice(data);

        let mut consumed = 0;
        while self.pending.len() - consumed > BLOCK_SIZE {
            xor_in_place(&mut self.x, &self.pending[consumed..consumed + BLOCK_SIZE]);
            self.cipher.encrypt(&mut self.x);
            consumed += BLOCK_SIZE;
        }
        self.pending.drain(..consumed);
        Ok(data.len())
    }

    /// Finish the message and return `prefix || tag`.
    ///
    /// Calling `sum` again before `reset` returns the same tag.
    pub fn sum(&mut self, prefix: &[u8]) -> Vec<u8> {
        let tag = self.finalize();
        let mut out = Vec::with_capacity(prefix.len() + BLOCK_SIZE);
        out.extend_from_slice(prefix);
        out.extend_from_slice(&tag);
        out
    }

    /// Finish the message and return the bare tag.
    pub fn finalize(&mut self) -> [u8; BLOCK_SIZE] {
        let mut x = self.x;
        let mut tail = self.pending.as_slice();
        while tail.len() > BLOCK_SIZE {
            xor_in_place(&mut x, &tail[..BLOCK_SIZE]);
            self.cipher.encrypt(&mut x);
            tail = &tail[BLOCK_SIZE..];
        }

        let mut last = if tail.len() == BLOCK_SIZE {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(tail);
            xor_in_place(&mut block, &self.k1);
            block
        } else {
            let mut block = pad_block(tail);
            xor_in_place(&mut block, &self.k2);
            block
        };

        xor_in_place(&mut x, &last);
        self.cipher.encrypt(&mut x);
        last.zeroize();
        self.finished = true;
        x
    }

    /// Start a new message under the same key.
    pub fn reset(&mut self) {
        let (k1, k2) = subkeys(&self.cipher);
        self.k1 = k1;
        self.k2 = k2;
        self.x.zeroize();
        self.pending.zeroize();
        self.finished = false;
        trace!(key_len = self.cipher.key_len(), "cmac_reset");
    }

    /// Tag length in bytes.
    pub fn size(&self) -> usize {
        BLOCK_SIZE
    }

    pub fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    pub fn key_len(&self) -> usize {
        self.cipher.key_len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[cfg(test)]
    pub(crate) fn subkeys(&self) -> ([u8; BLOCK_SIZE], [u8; BLOCK_SIZE]) {
        (self.k1, self.k2)
    }

    #[cfg(test)]
    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl fmt::Debug for Cmac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cmac")
            .field("key_len", &self.cipher.key_len())
            .field("pending", &self.pending.len())
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl Drop for Cmac {
    fn drop(&mut self) {
        self.k1.zeroize();
        self.k2.zeroize();
        self.x.zeroize();
        self.pending.zeroize();
    }
}

fn subkeys(cipher: &BlockCipher) -> ([u8; BLOCK_SIZE], [u8; BLOCK_SIZE]) {
    let mut l = [0u8; BLOCK_SIZE];
    cipher.encrypt(&mut l);
    let k1 = double(&l);
    let k2 = double(&k1);
    l.zeroize();
    (k1, k2)
}

/// Multiply by `x` in GF(2^128): shift left, fold the carry back with `Rb`.
fn double(block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
    let mut out = [0u8; BLOCK_SIZE];
    shift_left_into(block, &mut out);
    if block[0] & 0x80 != 0 {
        out[BLOCK_SIZE - 1] ^= RB;
    }
    out
}
