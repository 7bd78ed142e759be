/// The closed dispatch over consensus verifiers (`spec.md` §4.3, §9
/// "Dispatch over consensus algorithm"): the source keys this by string,
/// re-architected here as a closed variant resolved once at configuration
/// load rather than looked up per header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-codec", derive(parity_scale_codec::Encode, parity_scale_codec::Decode, scale_info::TypeInfo))]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize, serde(rename_all = "lowercase")))]
pub enum ConsensusAlgo {
    /// Proof-of-work verified directly on the header (Ethash-style).
    PoW,
    /// Verified by calling a fixed system contract with the header's
    /// signing hash and extra data; a non-empty return means success.
    SystemContract,
}
