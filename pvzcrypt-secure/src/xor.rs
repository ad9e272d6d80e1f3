//! Repeating-key XOR keystream.
//!
//! Self-inverse: applying the keystream twice restores the input, so the
//! partial-cipher container uses one code path for both directions.

/// XOR `data` in place with `key` repeated cyclically from offset zero.
pub fn apply_keystream(data: &mut [u8], key: &[u8]) {
    debug_assert!(!key.is_empty());

    for (i, byte) in data.iter_mut().enumerate() {
        *byte ^= key[i % key.len()];
    }
}
