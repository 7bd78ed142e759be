use crate::constants::{EMPTY_OMMER_ROOT_HASH, EMPTY_ROOT_HASH};
use evmcore_primitives::{Address, Bloom, Hash, U256};
use rlp_derive::{RlpDecodable, RlpEncodable};

/// A block header, formally `H` in the yellow-paper sense: the part of a
/// block that is hashed and that the state-transition function consumes
/// and produces. Field order is the canonical RLP field order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, RlpEncodable, RlpDecodable)]
#[cfg_attr(feature = "with-codec", derive(parity_scale_codec::Encode, parity_scale_codec::Decode))]
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Header {
    /// Keccak256 hash of the parent block's header.
    pub prevhash: Hash,
    /// Keccak256 hash of the RLP-encoded uncle list.
    pub uncles_hash: Hash,
    /// Address that receives the block reward and transaction fees.
    pub coinbase: Address,
    /// Root of the state trie after this block's transactions apply.
    pub state_root: Hash,
    /// Root of the trie built over this block's transaction list.
    pub tx_list_root: Hash,
    /// Root of the trie built over this block's receipt list.
    pub receipts_root: Hash,
    /// Bloom filter over every log emitted while producing this block.
    pub bloom: Bloom,
    /// Proof-of-work difficulty target.
    pub difficulty: U256,
    /// Block height; the genesis block is number zero.
    pub number: u64,
    /// Gas expenditure limit for this block.
    pub gas_limit: u64,
    /// Total gas used by this block's transactions.
    pub gas_used: u64,
    /// Unix timestamp at block creation.
    pub timestamp: u64,
    /// Arbitrary data, at most 32 bytes.
    pub extra_data: evmcore_primitives::Bytes,
    /// Proof-of-work mix digest. Only meaningful under `ConsensusAlgo::PoW`.
    pub mix_hash: Hash,
    /// Proof-of-work nonce. Only meaningful under `ConsensusAlgo::PoW`.
    pub nonce: u64,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            prevhash: Hash::zero(),
            uncles_hash: EMPTY_OMMER_ROOT_HASH,
            coinbase: Address::zero(),
            state_root: EMPTY_ROOT_HASH,
            tx_list_root: EMPTY_ROOT_HASH,
            receipts_root: EMPTY_ROOT_HASH,
            bloom: Bloom::zero(),
            difficulty: U256::zero(),
            number: 0,
            gas_limit: 0,
            gas_used: 0,
            timestamp: 0,
            extra_data: evmcore_primitives::Bytes::new(),
            mix_hash: Hash::zero(),
            nonce: 0,
        }
    }
}

impl Header {
    /// Keccak256 of the canonical RLP encoding; the hash every component
    /// refers to as `hash(header)`.
    #[must_use]
    pub fn hash(&self) -> Hash {
        use tiny_keccak::{Hasher, Keccak};
        let encoded = rlp::encode(self);
        let mut keccak = Keccak::v256();
        let mut output = [0u8; 32];
        keccak.update(&encoded);
        keccak.finalize(&mut output);
        Hash::from(output)
    }
}
