//! Cipher primitives for PopCap asset containers.
//!
//! This crate carries the raw transforms the container layer builds on:
//! a Rijndael variant with a 192-bit block (the `aes` crates fix the block
//! at 128 bits, so the RTON primitive has to live here), whole-buffer
//! XXTEA, and a repeating-key XOR keystream. Block ciphers implement the
//! RustCrypto `cipher` traits so the standard `cbc` mode wrappers apply.

pub mod modes;
pub mod rijndael;
pub mod xor;
pub mod xxtea;

pub use rijndael::Rijndael;
pub use xxtea::XxteaError;

#[cfg(test)]
mod tests;
