//! Hash helpers.
//!
//! Everything on the wire that needs a digest uses blake2b with a 32-byte
//! output: method ids, signature hashes, transaction ids and derived
//! (contract) account keys.
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Width of a method id in bytes.
pub const METHOD_ID_LEN: usize = 4;

/// blake2b-256 digest.
#[inline]
pub fn blake2b_256<B: AsRef<[u8]>>(bytes: B) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(bytes.as_ref());
    hasher.finalize().into()
}

/// First four bytes of blake2b-256 of a function or event name.
pub fn method_id(name: &str) -> [u8; METHOD_ID_LEN] {
    let h = blake2b_256(name.as_bytes());
    [h[0], h[1], h[2], h[3]]
}
