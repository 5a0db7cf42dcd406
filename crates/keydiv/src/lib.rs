//! # AES-CMAC and AN10922 key diversification
//!
//! - [`Cmac`]: streaming CMAC per RFC 4493 over AES-128, AES-192 or AES-256.
//!   The engine holds back the final block until [`Cmac::sum`] so it can
//!   apply subkey `K1` (complete block) or `K2` (padded block).
//! - [`diversify`]: NXP AN10922 derivation of a per-card key from a master
//!   key and diversification data, using one CMAC (AES-128) or two
//!   (AES-192/256).
//! - [`generate_master_key`]: random master keys from the OS CSPRNG.
//! - [`block`]: the XOR, shift and padding primitives the engine is built on.
//!
//! Operations are synchronous and allocation-light. Key material and tags are
//! never logged; `Cmac` state is zeroized on drop.
//!
//! ```
//! use keydiv::{diversify, Cmac};
//!
//! let master = [0u8; 16];
//! let card_key = diversify(&master, b"\x30\x42\xf5foo").unwrap();
//! let tag = Cmac::mac(&card_key, b"challenge").unwrap();
//! assert!(Cmac::verify(&card_key, b"challenge", &tag).unwrap());
//! ```

pub mod block;
mod cmac;
mod diversify;
mod error;
mod keygen;

pub use crate::block::{BLOCK_SIZE, FIRST_PAD};
pub use crate::cmac::Cmac;
pub use crate::diversify::{diversify, C128, C192_1, C192_2, C256_1, C256_2};
pub use crate::error::KeyDivError;
pub use crate::keygen::generate_master_key;
