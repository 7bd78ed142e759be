//! Fixed-size byte types shared by every `evmcore-*` crate: addresses,
//! hashes, unsigned integers, byte strings and the bloom filter.
//!
//! RLP/Keccak/signature-recovery themselves are out of scope; this crate
//! only supplies the value types they operate on.

pub mod bloom;
pub mod bytes;
pub mod eth_hash;
pub mod eth_uint;

pub use bloom::Bloom;
pub use bytes::Bytes;
pub use eth_hash::{Address, Hash, H128, H256, H384, H512};
pub use eth_uint::{U128, U256, U512};
