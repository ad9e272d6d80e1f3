//! Error types for container codec operations.

use thiserror::Error;

/// Main error type for the container codecs.
///
/// Header and validity failures abort the current operation before any
/// payload output is written; cipher-primitive failures propagate as
/// [`CodecError::CipherFailure`] rather than being logged and swallowed.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid magic: got {found:#06X}, expected {expected:#06X}")]
    InvalidMagic { found: u16, expected: u16 },

    #[error("invalid header: got {found:?}, expected {expected:?}")]
    InvalidHeader { found: String, expected: String },

    #[error("invalid container flags: got {found:#06X}, expected {expected:#06X}")]
    InvalidFlags { found: u16, expected: u16 },

    #[error("malformed hex payload: {0}")]
    InvalidHexEncoding(String),

    #[error("key too short: IV window needs {needed} bytes, key has {available}")]
    KeyTooShort { needed: usize, available: usize },

    #[error("cipher operation failed: {0}")]
    CipherFailure(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
