//! Whole-buffer XXTEA (corrected block TEA).
//!
//! Operates on the full input as one variable-size block, using the
//! conventional byte-level wrapping: the data is packed into
//! little-endian u32 words with the original byte length appended as a
//! trailing word, and that word is validated when decrypting. This is
//! the convention the shipped Lua containers were written with, so it is
//! preserved bit-for-bit.

use byteorder::{ByteOrder, LE};
use thiserror::Error;

const DELTA: u32 = 0x9E37_79B9;

#[derive(Debug, Error)]
pub enum XxteaError {
    #[error("ciphertext length {0} is not a multiple of 4")]
    UnalignedCiphertext(usize),
    #[error("ciphertext too short: {0} bytes")]
    TruncatedCiphertext(usize),
    #[error("embedded length {length} is implausible for {words} data words")]
    CorruptLength { length: u32, words: usize },
}

#[inline(always)]
fn mx(sum: u32, y: u32, z: u32, p: usize, e: usize, key: &[u32; 4]) -> u32 {
    ((z >> 5 ^ y << 2).wrapping_add(y >> 3 ^ z << 4))
        ^ ((sum ^ y).wrapping_add(key[(p & 3) ^ e] ^ z))
}

fn key_words(key: &[u8; 16]) -> [u32; 4] {
    let mut k = [0u32; 4];
    LE::read_u32_into(key, &mut k);
    k
}

fn mix_words(v: &mut [u32], key: &[u32; 4]) {
    let n = v.len() - 1;
    if n < 1 {
        return;
    }

    let rounds = 6 + 52 / (n + 1);
    let mut sum = 0u32;
    let mut z = v[n];

    for _ in 0..rounds {
        sum = sum.wrapping_add(DELTA);
        let e = (sum >> 2 & 3) as usize;
        for p in 0..n {
            let y = v[p + 1];
            v[p] = v[p].wrapping_add(mx(sum, y, z, p, e, key));
            z = v[p];
        }
        let y = v[0];
        v[n] = v[n].wrapping_add(mx(sum, y, z, n, e, key));
        z = v[n];
    }
}

fn unmix_words(v: &mut [u32], key: &[u32; 4]) {
    let n = v.len() - 1;
    if n < 1 {
        return;
    }

    let rounds = 6 + 52 / (n + 1);
    let mut sum = (rounds as u32).wrapping_mul(DELTA);
    let mut y = v[0];

    while sum != 0 {
        let e = (sum >> 2 & 3) as usize;
        for p in (1..=n).rev() {
            let z = v[p - 1];
            v[p] = v[p].wrapping_sub(mx(sum, y, z, p, e, key));
            y = v[p];
        }
        let z = v[n];
        v[0] = v[0].wrapping_sub(mx(sum, y, z, 0, e, key));
        y = v[0];
        sum = sum.wrapping_sub(DELTA);
    }
}

/// Encrypt `data` as one logical block. Empty input stays empty.
pub fn encrypt_data(data: &[u8], key: &[u8; 16]) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }

    let words = data.len().div_ceil(4);
    let mut v = vec![0u32; words + 1];
    for (i, word) in v.iter_mut().take(words).enumerate() {
        let end = usize::min(4 * i + 4, data.len());
        let mut buf = [0u8; 4];
        buf[..end - 4 * i].copy_from_slice(&data[4 * i..end]);
        *word = LE::read_u32(&buf);
    }
    v[words] = data.len() as u32;

    mix_words(&mut v, &key_words(key));

    let mut out = vec![0u8; 4 * v.len()];
    LE::write_u32_into(&v, &mut out);
    out
}

/// Decrypt a buffer produced by [`encrypt_data`]. Empty input stays empty.
pub fn decrypt_data(data: &[u8], key: &[u8; 16]) -> Result<Vec<u8>, XxteaError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    if data.len() % 4 != 0 {
        return Err(XxteaError::UnalignedCiphertext(data.len()));
    }
    if data.len() < 8 {
        return Err(XxteaError::TruncatedCiphertext(data.len()));
    }

    let mut v = vec![0u32; data.len() / 4];
    LE::read_u32_into(data, &mut v);

    unmix_words(&mut v, &key_words(key));

    let words = v.len() - 1;
    let length = v[words];
    // The trailing word must describe a byte count that fits the data words.
    if (length as usize) > 4 * words || (length as u64) < 4 * (words as u64 - 1) {
        return Err(XxteaError::CorruptLength { length, words });
    }

    let mut out = vec![0u8; 4 * words];
    LE::write_u32_into(&v[..words], &mut out);
    out.truncate(length as usize);
    Ok(out)
}
