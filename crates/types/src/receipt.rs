use crate::log::Log;
use evmcore_primitives::{Bloom, Hash};
use rlp_derive::{RlpDecodable, RlpEncodable};

/// The per-transaction execution receipt. Pre-Metropolis, `state_root`
/// carries the intermediate state root committed right after the producing
/// transaction; post-Metropolis it is the zero hash (state roots are no
/// longer recorded per-transaction).
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
#[cfg_attr(feature = "with-codec", derive(parity_scale_codec::Encode, parity_scale_codec::Decode))]
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Receipt {
    /// Intermediate state root (pre-Metropolis) or the zero hash (post-Metropolis).
    pub state_root: Hash,
    /// Gas used by this transaction plus every transaction before it in the block.
    pub cumulative_gas_used: u64,
    /// OR of this transaction's logs' contributions.
    pub bloom: Bloom,
    /// Logs emitted by this transaction, in emission order.
    pub logs: Vec<Log>,
}
