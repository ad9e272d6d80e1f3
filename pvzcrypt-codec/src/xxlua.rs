//! Tagged XXTEA Lua containers.
//!
//! Layout: the 5-byte ASCII tag `XXTEA`, then the whole payload run
//! through XXTEA as one variable-size block with a literal 16-byte key.

use std::io::{Read, Write};

use pvzcrypt_secure::xxtea;

use crate::codec::Codec;
use crate::error::CodecError;

/// ASCII tag identifying an encrypted Lua script.
pub const XXLUA_TAG: [u8; 5] = *b"XXTEA";

const XXLUA_KEY: [u8; 16] = *b"7ec34b808tk94hf1";

/// Whole-buffer tagged-block codec for Lua scripts.
pub struct XxLua;

impl XxLua {
    /// Encrypt `data` and prepend the tag.
    pub fn encrypt(&self, data: &[u8]) -> Vec<u8> {
        let ciphertext = xxtea::encrypt_data(data, &XXLUA_KEY);

        let mut out = Vec::with_capacity(XXLUA_TAG.len() + ciphertext.len());
        out.extend_from_slice(&XXLUA_TAG);
        out.extend_from_slice(&ciphertext);
        out
    }

    /// Validate the tag and decrypt the remainder.
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut reader = data;
        let mut tag = [0u8; XXLUA_TAG.len()];
        reader.read_exact(&mut tag)?;

        if tag != XXLUA_TAG {
            return Err(CodecError::InvalidHeader {
                found: String::from_utf8_lossy(&tag).into_owned(),
                expected: String::from_utf8_lossy(&XXLUA_TAG).into_owned(),
            });
        }

        xxtea::decrypt_data(reader, &XXLUA_KEY)
            .map_err(|e| CodecError::CipherFailure(format!("xxtea decrypt failed: {e}")))
    }

    /// Stream adapter over [`XxLua::encrypt`].
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

    /// Stream adapter over [`XxLua::decrypt`]. Nothing is written on
    /// failure.
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

impl Codec for XxLua {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(self.encrypt(data))
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.decrypt(data)
    }
}
