use evmcore_primitives::{Hash, U256};

/// Header and uncle validation failures (`spec.md` §7). Each variant
/// carries the offending field's expected and actual values, per that
/// section's "diagnostic triage" requirement — the semantic kinds named
/// there (`InvalidHeader{sub-kind}`) are realized as concrete, typed
/// variants rather than a generic sub-kind tag. Root-mismatch failures
/// belong to `BlockError` (`evmcore-processor`), the component that
/// actually recomputes and compares roots.
#[derive(Debug, thiserror::Error)]
pub enum ConsensusError {
    #[error("prevhash mismatch: expected {expected:?}, found {found:?}")]
    InvalidPrevhash { expected: Hash, found: Hash },
    #[error("block number mismatch: expected {expected}, found {found}")]
    InvalidNumber { expected: u64, found: u64 },
    #[error("gas limit {found} invalid given parent gas limit {parent}")]
    InvalidGasLimit { parent: u64, found: u64 },
    #[error("difficulty mismatch: expected {expected}, found {found}")]
    InvalidDifficulty { expected: U256, found: U256 },
    #[error("gas_used {found} exceeds gas_limit {limit}")]
    InvalidGasUsed { limit: u64, found: u64 },
    #[error("timestamp {found} not strictly after parent timestamp {parent}")]
    InvalidTimestamp { parent: u64, found: u64 },
    #[error("invalid uncles: {0}")]
    InvalidUncles(String),
    #[error("consensus verifier failed")]
    ConsensusVerifierFailed,
}
