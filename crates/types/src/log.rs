use evmcore_primitives::{Address, Bytes, Hash};
use rlp_derive::{RlpDecodable, RlpEncodable};

/// An event emitted by a transaction's execution. Contributes its address
/// and topics to the enclosing receipt's and block's bloom filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, RlpEncodable, RlpDecodable)]
#[cfg_attr(feature = "with-codec", derive(parity_scale_codec::Encode, parity_scale_codec::Decode))]
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Log {
    /// The contract account that emitted the log.
    pub address: Address,
    /// Up to 4 indexed topics (the first is the event signature hash, by convention).
    pub topics: Vec<Hash>,
    /// Non-indexed event payload.
    pub data: Bytes,
}

#[cfg(test)]
mod tests {
    use super::Log;
    use evmcore_primitives::Address;

    #[test]
    fn round_trips_through_rlp() {
        let log = Log { address: Address::repeat_byte(1), topics: vec![], data: vec![1, 2, 3].into() };
        let encoded = rlp::encode(&log);
        let decoded: Log = rlp::decode(&encoded).unwrap();
        assert_eq!(log, decoded);
    }
}
