//! Key and IV derivation for the container codecs.
//!
//! Key material is fixed per format. Most formats carry their key as a
//! literal byte string; the RTON format derives its key from a digest and
//! its IV from a window of the key bytes. Derived values are computed
//! once at startup and never mutated afterwards, so derivation failures
//! surface before any file is touched.

use crate::error::CodecError;

/// ASCII seed the RTON key is derived from.
pub const RTON_KEY_SEED: &[u8] = b"com_popcap_pvz2_magento_product_2013_05_05";

/// Length of the IV window taken from the RTON key bytes.
pub const RTON_IV_LEN: usize = 24;

/// Byte offset of the IV window inside the RTON key bytes.
pub const RTON_IV_OFFSET: usize = 4;

/// Derive a cipher key by hashing an ASCII seed.
///
/// The usable key is the *lowercase hex string* of the MD5 digest,
/// re-encoded as ASCII bytes - not the raw digest. This double-encoding
/// is a quirk of the legacy format and is preserved bit-for-bit for
/// interoperability (see `hashed_key_is_hex_text_of_digest` in the
/// tests).
pub fn hashed_key(seed: &[u8]) -> Vec<u8> {
    let digest = md5::compute(seed);
    format!("{digest:x}").into_bytes()
}

/// Extract `length` bytes starting at `offset` from a key's byte
/// sequence, for use as an initialization vector.
///
/// The window bounds are codec constants, so an out-of-range window is a
/// configuration error and should be caught at process start.
pub fn init_vector(key: &[u8], length: usize, offset: usize) -> Result<Vec<u8>, CodecError> {
    if offset + length > key.len() {
        return Err(CodecError::KeyTooShort {
            needed: offset + length,
            available: key.len(),
        });
    }

    Ok(key[offset..offset + length].to_vec())
}

/// Derived key material for the RTON codec.
///
/// Construct once at startup and share freely: the fields are plain
/// read-only bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtonKeys {
    pub key: [u8; 32],
    pub iv: [u8; RTON_IV_LEN],
}

impl RtonKeys {
    /// Derive the key and IV from the built-in seed.
    pub fn derive() -> Result<Self, CodecError> {
        Self::derive_from_seed(RTON_KEY_SEED)
    }

    /// Derive key material from an arbitrary seed. Split out so tests can
    /// exercise the derivation path with known inputs.
    pub fn derive_from_seed(seed: &[u8]) -> Result<Self, CodecError> {
        let key_bytes = hashed_key(seed);
        let iv_bytes = init_vector(&key_bytes, RTON_IV_LEN, RTON_IV_OFFSET)?;

        // MD5 hex text is always 32 bytes, so these cannot fail once the
        // IV window check has passed.
        let key = key_bytes
            .try_into()
            .map_err(|v: Vec<u8>| CodecError::KeyTooShort {
                needed: 32,
                available: v.len(),
            })?;
        let iv = iv_bytes
            .try_into()
            .map_err(|v: Vec<u8>| CodecError::KeyTooShort {
                needed: RTON_IV_LEN,
                available: v.len(),
            })?;

        Ok(Self { key, iv })
    }
}
