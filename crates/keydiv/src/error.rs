use thiserror::Error;

/// Errors returned by the CMAC engine and the key diversifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyDivError {
    #[error("unsupported AES key size: {0} bytes (expected 16, 24 or 32)")]
    UnsupportedKeySize(usize),

    #[error("cannot write after sum(); call reset() first")]
    AlreadyFinished,

    #[error("wrong master key length: {0} bytes (expected 16, 24 or 32)")]
    WrongKeyLen(usize),

    #[error("xor operands differ in length: {left} vs {right}")]
    XorLengthMismatch { left: usize, right: usize },
}
