pub use primitive_types::{H128, H160, H256, H384, H512};

/// 20-byte account address.
pub type Address = H160;
/// Keccak-256 digest, used for block/tx/uncle hashes and trie roots.
pub type Hash = H256;
