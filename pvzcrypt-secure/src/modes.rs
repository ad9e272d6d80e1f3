//! CBC mode aliases for the container ciphers.
//!
//! Both legacy formats pad with PKCS#7, supplied at the call site via
//! `cipher::block_padding::Pkcs7`.

/// Rijndael-192-block in CBC mode (RTON containers).
pub type RijndaelCbcEnc = cbc::Encryptor<crate::rijndael::Rijndael>;
pub type RijndaelCbcDec = cbc::Decryptor<crate::rijndael::Rijndael>;

/// DES in CBC mode (TalkWeb hex-text payloads).
pub type DesCbcEnc = cbc::Encryptor<des::Des>;
pub type DesCbcDec = cbc::Decryptor<des::Des>;
