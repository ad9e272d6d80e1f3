//! Container codecs for PopCap game-asset formats.
//!
//! Four independent envelope formats share one shape: validate or write a
//! small binary header, run a fixed-key cipher primitive over the
//! appropriate byte range, and copy everything else through untouched.
//!
//! - [`rton`]: encrypted RTON data (u16 magic, whole-buffer
//!   Rijndael-192-block CBC with a digest-derived key).
//! - [`cdat`]: ciphered resource data (ASCII tag + flags + original
//!   length, XOR keystream over the first 256 payload bytes only).
//! - [`twsec`]: TalkWeb payloads (DES-CBC rendered as uppercase hex text,
//!   junk-suffix tolerant on decode).
//! - [`xxlua`]: Lua scripts (5-byte ASCII tag, whole-buffer XXTEA).
//!
//! All codecs work over in-memory buffers through the [`Codec`] trait;
//! stream and file adapters are thin layers on top. Key material is fixed
//! per format and derived once at startup ([`keys`]).

pub mod cdat;
pub mod codec;
pub mod error;
pub mod fs;
pub mod keys;
pub mod rton;
pub mod twsec;
pub mod xxlua;

pub use cdat::Cdat;
pub use codec::Codec;
pub use error::CodecError;
pub use keys::RtonKeys;
pub use rton::Rton;
pub use twsec::TwSecurity;
pub use xxlua::XxLua;
