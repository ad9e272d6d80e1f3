//! TalkWeb hex-text payloads.
//!
//! No binary envelope: the whole container is the uppercase hex rendering
//! of a DES-CBC/PKCS#7 ciphertext under a literal 8-byte key and IV. The
//! format travels both as whole files (`twpay.xml`) and as embedded
//! request bodies, so the string transform is the fundamental entry point
//! and the stream functions are adapters over it.
//!
//! A downstream Base64 step sometimes appends junk after a `-`; decode
//! discards everything from the first sentinel onward before validating
//! the hex text.

use std::io::{Read, Write};

use cipher::block_padding::Pkcs7;
use cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use pvzcrypt_secure::modes::{DesCbcDec, DesCbcEnc};

use crate::codec::Codec;
use crate::error::CodecError;

const TW_KEY: [u8; 8] = *b"TwPay001";
const TW_IV: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

/// Everything from this character onward is junk from an unrelated
/// encoding step.
pub const JUNK_SENTINEL: char = '-';

/// Whether `s` is a well-formed TalkWeb hex payload: a whole number of
/// DES blocks (16 hex chars each), uppercase hex digits only.
pub fn is_valid_hex(s: &str) -> bool {
    s.len() % 16 == 0
        && s.chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
}

/// Hex-text codec for TalkWeb files and embedded payloads.
pub struct TwSecurity;

impl TwSecurity {
    /// Encrypt raw bytes and render the ciphertext as uppercase hex.
    pub fn encrypt_bytes(&self, data: &[u8]) -> String {
        let ciphertext =
            DesCbcEnc::new((&TW_KEY).into(), (&TW_IV).into()).encrypt_padded_vec_mut::<Pkcs7>(data);
        hex::encode_upper(ciphertext)
    }

    /// Strip any junk suffix, validate the hex text, then decrypt.
    ///
    /// Validation failures return [`CodecError::InvalidHexEncoding`]
    /// without attempting decryption.
    pub fn decrypt_bytes(&self, text: &str) -> Result<Vec<u8>, CodecError> {
        let payload = match text.find(JUNK_SENTINEL) {
            Some(idx) => &text[..idx],
            None => text,
        };

        if !is_valid_hex(payload) {
            return Err(CodecError::InvalidHexEncoding(format!(
                "expected uppercase hex with length a multiple of 16, got {} chars",
                payload.len()
            )));
        }

        let ciphertext = hex::decode(payload)
            .map_err(|e| CodecError::InvalidHexEncoding(e.to_string()))?;

        DesCbcDec::new((&TW_KEY).into(), (&TW_IV).into())
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|e| CodecError::CipherFailure(format!("talkweb payload unpad failed: {e}")))
    }

    /// String transform for embedded JSON bodies: encrypts or decrypts
    /// `data` as UTF-8 text.
    pub fn cipher_text(&self, data: &str, for_encryption: bool) -> Result<String, CodecError> {
        if for_encryption {
            Ok(self.encrypt_bytes(data.as_bytes()))
        } else {
            let plain = self.decrypt_bytes(data)?;
            String::from_utf8(plain)
                .map_err(|e| CodecError::CipherFailure(format!("plaintext is not UTF-8: {e}")))
        }
    }

    /// Stream adapter: encrypt everything readable from `input` and write
    /// the hex text to `output`.
    pub fn encrypt_stream<R: Read, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<(), CodecError> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;
        output.write_all(self.encrypt_bytes(&data).as_bytes())?;
        Ok(())
    }

    /// Stream adapter: read hex text from `input` and write the decrypted
    /// bytes to `output`. Nothing is written on failure.
    pub fn decrypt_stream<R: Read, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<(), CodecError> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        output.write_all(&self.decrypt_bytes(&text)?)?;
        Ok(())
    }
}

impl Codec for TwSecurity {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(self.encrypt_bytes(data).into_bytes())
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let text = std::str::from_utf8(data)
            .map_err(|e| CodecError::InvalidHexEncoding(format!("payload is not UTF-8: {e}")))?;
        self.decrypt_bytes(text)
    }
}
