//! Shared low-level helpers: recursive codec, hashing, hex and base32 text.

pub mod base32;
pub mod bytes;
pub mod hash;
pub mod rlp;
