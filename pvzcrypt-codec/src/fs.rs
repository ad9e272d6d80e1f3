//! File adapters over the buffer codecs.
//!
//! The codecs themselves never touch paths; these helpers open files,
//! run a codec, and replace the output atomically: the result is written
//! to a temporary sibling and renamed into place only after the whole
//! operation succeeded, so a failed decode never leaves a corrupt
//! container behind.

use std::ffi::OsString;
use std::path::Path;

use crate::codec::Codec;
use crate::error::CodecError;

fn transform_file<F>(input: &Path, output: &Path, transform: F) -> Result<(), CodecError>
where
    F: FnOnce(&[u8]) -> Result<Vec<u8>, CodecError>,
{
    let data = std::fs::read(input)?;
    let result = transform(&data)?;

    let mut tmp_name = output.as_os_str().to_os_string();
    tmp_name.push(OsString::from(".tmp"));
    let tmp_path = Path::new(&tmp_name);

    std::fs::write(tmp_path, &result)?;
    if let Err(e) = std::fs::rename(tmp_path, output) {
        let _ = std::fs::remove_file(tmp_path);
        return Err(e.into());
    }

    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        in_len = data.len(),
        out_len = result.len(),
        "transformed file"
    );
    Ok(())
}

/// Encode the file at `input` and write the container to `output`.
pub fn encode_file<C: Codec + ?Sized>(
    codec: &C,
    input: &Path,
    output: &Path,
) -> Result<(), CodecError> {
    transform_file(input, output, |data| codec.encode(data))
}

/// Decode the container at `input` and write the payload to `output`.
pub fn decode_file<C: Codec + ?Sized>(
    codec: &C,
    input: &Path,
    output: &Path,
) -> Result<(), CodecError> {
    transform_file(input, output, |data| codec.decode(data))
}
