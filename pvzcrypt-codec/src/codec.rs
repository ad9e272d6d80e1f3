//! The shared codec contract.
//!
//! Each container format exposes the same encode/decode shape over
//! in-memory buffers; the stream helpers here lift that contract onto
//! `Read`/`Write` pairs for formats that do not need their own streaming
//! logic (the partial-cipher format keeps its own, see [`crate::cdat`]).

use std::io::{Read, Write};

use crate::error::CodecError;

/// Progress callback: `(bytes_processed, total_bytes)`, invoked at coarse
/// chunk boundaries only - never per byte, and not guaranteed to fire for
/// every chunk size.
pub type ProgressFn<'a> = &'a mut dyn FnMut(u64, u64);

/// A container codec: symmetric envelope encode/decode with key material
/// fixed per format.
///
/// For every codec and well-formed input, `decode(encode(x)) == x`.
pub trait Codec {
    /// Wrap `data` in the container envelope, ciphering the format's
    /// payload range.
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Validate the container envelope and recover the original payload.
    ///
    /// Header mismatches fail before any cryptographic work; cipher
    /// failures (e.g. bad padding) surface as
    /// [`CodecError::CipherFailure`].
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError>;
}

/// Encode everything readable from `input` and write the container to
/// `output`. Nothing is written if encoding fails.
pub fn encode_stream<C, R, W>(codec: &C, input: &mut R, output: &mut W) -> Result<(), CodecError>
where
    C: Codec + ?Sized,
    R: Read,
    W: Write,
{
    let mut data = Vec::new();
    input.read_to_end(&mut data)?;

    let encoded = codec.encode(&data)?;
    output.write_all(&encoded)?;
    Ok(())
}

/// Decode a whole container from `input` and write the recovered payload
/// to `output`. Nothing is written if validation or decryption fails.
pub fn decode_stream<C, R, W>(codec: &C, input: &mut R, output: &mut W) -> Result<(), CodecError>
where
    C: Codec + ?Sized,
    R: Read,
    W: Write,
{
    let mut data = Vec::new();
    input.read_to_end(&mut data)?;

    let decoded = codec.decode(&data)?;
    output.write_all(&decoded)?;
    Ok(())
}
