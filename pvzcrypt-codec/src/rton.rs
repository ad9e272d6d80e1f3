//! Encrypted RTON container.
//!
//! Layout: a 2-byte little-endian magic (`0x0010`) followed by the whole
//! payload encrypted with Rijndael (192-bit block) in CBC mode with
//! PKCS#7 padding. The key is derived from an MD5 digest and the IV is a
//! 24-byte window of the key bytes; see [`crate::keys`].

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt};
use cipher::block_padding::Pkcs7;
use cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use pvzcrypt_secure::modes::{RijndaelCbcDec, RijndaelCbcEnc};

use crate::codec::Codec;
use crate::error::CodecError;
use crate::keys::RtonKeys;

/// Magic number identifying an encrypted RTON file.
pub const RTON_MAGIC: u16 = 0x10;

/// Whole-buffer block-cipher codec for encrypted RTON files.
pub struct Rton {
    keys: RtonKeys,
}

impl Rton {
    /// Build the codec from key material derived at startup.
    pub fn new(keys: RtonKeys) -> Self {
        Self { keys }
    }

    /// Encrypt `data` and wrap it in the RTON envelope.
    pub fn encrypt(&self, data: &[u8]) -> Vec<u8> {
        let ciphertext = RijndaelCbcEnc::new((&self.keys.key).into(), (&self.keys.iv).into())
            .encrypt_padded_vec_mut::<Pkcs7>(data);

        tracing::debug!(
            plain_len = data.len(),
            cipher_len = ciphertext.len(),
            "encrypted rton payload"
        );

        let mut out = Vec::with_capacity(2 + ciphertext.len());
        out.extend_from_slice(&RTON_MAGIC.to_le_bytes());
        out.extend_from_slice(&ciphertext);
        out
    }

    /// Validate the magic and decrypt the remainder.
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut cursor = data;
        let magic = cursor.read_u16::<LittleEndian>()?;

        if magic != RTON_MAGIC {
            return Err(CodecError::InvalidMagic {
                found: magic,
                expected: RTON_MAGIC,
            });
        }

        RijndaelCbcDec::new((&self.keys.key).into(), (&self.keys.iv).into())
            .decrypt_padded_vec_mut::<Pkcs7>(cursor)
            .map_err(|e| CodecError::CipherFailure(format!("rton payload unpad failed: {e}")))
    }

    /// Stream adapter: read everything from `input`, encrypt, write the
    /// container to `output`.
    pub fn encrypt_stream<R: Read, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<(), CodecError> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;
        output.write_all(&self.encrypt(&data))?;
        Ok(())
    }

    /// Stream adapter: decode a whole container from `input` into
    /// `output`. Nothing is written on failure.
    pub fn decrypt_stream<R: Read, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<(), CodecError> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;
        output.write_all(&self.decrypt(&data)?)?;
        Ok(())
    }
}

impl Codec for Rton {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(self.encrypt(data))
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.decrypt(data)
    }
}
