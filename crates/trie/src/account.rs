use crate::node_codec::HASHED_NULL_NODE;
use primitive_types::{H256, U256};
use rlp_derive::{RlpDecodable, RlpEncodable};

/// keccak256(""), the `code_hash` of an account with no code.
pub const KECCAK_EMPTY: H256 = H256(hex_literal::hex!(
    "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a47"
));

/// The trie-encoded shape of an account: `{ nonce, balance, storage_root, code_hash }`.
#[derive(Clone, Debug, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct Account {
    pub nonce: u64,
    pub balance: U256,
    pub storage_root: H256,
    pub code_hash: H256,
}

impl Default for Account {
    fn default() -> Self {
        Self { nonce: 0, balance: U256::zero(), storage_root: HASHED_NULL_NODE, code_hash: KECCAK_EMPTY }
    }
}

impl Account {
    /// An account is empty (EIP-161) when it has no balance, no nonce and no code.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balance.is_zero() && self.nonce == 0 && (self.code_hash == KECCAK_EMPTY || self.code_hash.is_zero())
    }
}
