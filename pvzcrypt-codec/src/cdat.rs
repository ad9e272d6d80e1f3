//! Ciphered resource container (CDAT).
//!
//! Layout: 9-byte ASCII tag `CRYPT_RES`, u16 flags (`0x000A`), u64
//! little-endian original length, then the payload. Only the first 256
//! payload bytes are XOR-ciphered, and only when at least 256 payload
//! bytes exist; everything after the ciphered prefix is copied verbatim.
//! The format was designed for large images, where ciphering the header
//! region alone is enough to break naive viewers.
//!
//! The XOR keystream is self-inverse, so encode and decode share the
//! same prefix transform.

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use binrw::{BinRead, BinWrite};
use pvzcrypt_secure::xor;

use crate::codec::{Codec, ProgressFn};
use crate::error::CodecError;

/// ASCII tag identifying a CDAT file.
pub const CDAT_TAG: [u8; 9] = *b"CRYPT_RES";

/// Fixed flags value following the tag.
pub const CDAT_FLAGS: u16 = 0x0A;

/// Number of payload bytes subject to the XOR keystream.
pub const CIPHERED_PREFIX: usize = 256;

/// XOR key, repeated cyclically over the ciphered prefix.
const CDAT_KEY: &[u8] = b"AS23DSREPLKL335KO4439032N8345NF";

/// Passthrough copy chunk size; also the progress-callback granularity.
const COPY_CHUNK: usize = 64 * 1024;

/// CDAT container header.
#[derive(Debug, Clone, BinRead, BinWrite)]
#[brw(little)]
pub struct CdatHeader {
    pub tag: [u8; 9],
    pub flags: u16,
    pub plain_len: u64,
}

impl CdatHeader {
    /// Size of the serialized header in bytes.
    pub const SIZE: usize = 19;

    pub fn new(plain_len: u64) -> Self {
        Self {
            tag: CDAT_TAG,
            flags: CDAT_FLAGS,
            plain_len,
        }
    }

    /// Parse a header from the start of `buffer`.
    pub fn parse(buffer: &[u8]) -> Result<Self, CodecError> {
        let mut cursor = Cursor::new(buffer);
        Self::read(&mut cursor).map_err(|e| {
            CodecError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("failed to read CDAT header: {e}"),
            ))
        })
    }

    /// Reject foreign input: tag first, then flags, each with the
    /// observed and expected values attached.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.tag != CDAT_TAG {
            return Err(CodecError::InvalidHeader {
                found: String::from_utf8_lossy(&self.tag).into_owned(),
                expected: String::from_utf8_lossy(&CDAT_TAG).into_owned(),
            });
        }

        if self.flags != CDAT_FLAGS {
            return Err(CodecError::InvalidFlags {
                found: self.flags,
                expected: CDAT_FLAGS,
            });
        }

        Ok(())
    }

    /// Serialize through a cursor so writers only need `Write`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut cursor = Cursor::new(Vec::with_capacity(Self::SIZE));
        self.write(&mut cursor).map_err(|e| {
            CodecError::Io(std::io::Error::other(format!(
                "failed to write CDAT header: {e}"
            )))
        })?;
        Ok(cursor.into_inner())
    }
}

/// Partial-cipher codec for CDAT resource files.
pub struct Cdat;

impl Cdat {
    /// Cipher the bounded prefix (when the payload is long enough) and
    /// copy the rest through, reporting progress per chunk.
    fn transform_payload<R: Read, W: Write>(
        input: &mut R,
        output: &mut W,
        payload_len: u64,
        mut progress: Option<ProgressFn<'_>>,
    ) -> Result<(), CodecError> {
        let mut processed: u64 = 0;

        if payload_len >= CIPHERED_PREFIX as u64 {
            let mut prefix = [0u8; CIPHERED_PREFIX];
            input.read_exact(&mut prefix)?;
            xor::apply_keystream(&mut prefix, CDAT_KEY);
            output.write_all(&prefix)?;

            processed = CIPHERED_PREFIX as u64;
            if let Some(cb) = progress.as_mut() {
                cb(processed, payload_len);
            }
        }

        let mut chunk = vec![0u8; COPY_CHUNK];
        loop {
            let n = input.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            output.write_all(&chunk[..n])?;

            processed += n as u64;
            if let Some(cb) = progress.as_mut() {
                cb(processed, payload_len);
            }
        }

        Ok(())
    }

    /// Write the CDAT envelope around everything readable from `input`.
    ///
    /// `input` must be seekable: the header records the payload length
    /// up front, before any payload byte is copied.
    pub fn encrypt_stream<R: Read + Seek, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
        progress: Option<ProgressFn<'_>>,
    ) -> Result<(), CodecError> {
        let input_len = input.seek(SeekFrom::End(0))?;
        input.rewind()?;

        tracing::debug!(input_len, "writing cdat header");
        output.write_all(&CdatHeader::new(input_len).to_bytes()?)?;

        Self::transform_payload(input, output, input_len, progress)
    }

    /// Validate the CDAT envelope and recover the payload.
    ///
    /// The ciphering threshold is measured on the bytes remaining after
    /// the header, which for well-formed files equals the recorded
    /// original length.
    pub fn decrypt_stream<R: Read + Seek, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
        progress: Option<ProgressFn<'_>>,
    ) -> Result<(), CodecError> {
        let mut header_buf = [0u8; CdatHeader::SIZE];
        input.read_exact(&mut header_buf)?;

        let header = CdatHeader::parse(&header_buf)?;
        header.validate()?;

        let total_len = input.seek(SeekFrom::End(0))?;
        input.seek(SeekFrom::Start(CdatHeader::SIZE as u64))?;
        let remaining = total_len - CdatHeader::SIZE as u64;

        if remaining != header.plain_len {
            tracing::debug!(
                recorded = header.plain_len,
                remaining,
                "cdat length field does not match payload size"
            );
        }

        Self::transform_payload(input, output, remaining, progress)
    }
}

impl Codec for Cdat {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(CdatHeader::SIZE + data.len());
        self.encrypt_stream(&mut Cursor::new(data), &mut out, None)?;
        Ok(out)
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.decrypt_stream(&mut Cursor::new(data), &mut out, None)?;
        Ok(out)
    }
}
