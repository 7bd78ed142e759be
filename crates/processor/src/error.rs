use evmcore_consensus::ConsensusError;
use evmcore_primitives::{Bloom, Hash, U256};
use evmcore_state::WorldStateError;

/// Transaction-Validator and Transaction-Processor failures (`spec.md`
/// §4.4, §4.6, §7). Generic over the backing [`evmcore_state::AccountStore`]'s
/// own error type so this crate never has to pick a concrete store.
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError<E: std::error::Error + Send + Sync + 'static> {
    /// No sender could be resolved and the chain is not yet Metropolis,
    /// so there is no system-account substitute (`spec.md` §4.4 step 1).
    #[error("transaction has no recoverable sender")]
    UnsignedTransaction,
    #[error("invalid nonce: expected {expected}, found {found}")]
    InvalidNonce { expected: u64, found: u64 },
    #[error("start gas {provided} is below the intrinsic requirement of {required}")]
    InsufficientStartGas { required: u64, provided: u64 },
    #[error("sender balance {available} is below the required {required}")]
    InsufficientBalance { required: U256, available: U256 },
    #[error("block gas budget exceeded: {used} used + {requested} requested > limit {limit}")]
    BlockGasLimitReached { used: u64, requested: u64, limit: u64 },
    #[error(transparent)]
    State(#[from] WorldStateError<E>),
}

/// Block-Processor failures (`spec.md` §4.7-4.8, §7): wraps consensus and
/// per-transaction failures, and the three root/bloom mismatches a
/// `BlockMode::Validate` run can surface.
#[derive(Debug, thiserror::Error)]
pub enum BlockError<E: std::error::Error + Send + Sync + 'static> {
    #[error(transparent)]
    Consensus(#[from] ConsensusError),
    #[error("transaction {index} rejected: {source}")]
    Transaction {
        index: u64,
        #[source]
        source: ProcessorError<E>,
    },
    #[error(transparent)]
    State(#[from] WorldStateError<E>),
    #[error("header declares gas_used {declared}, execution produced {actual}")]
    GasUsedMismatch { declared: u64, actual: u64 },
    #[error("header declares state_root {declared:?}, execution produced {actual:?}")]
    StateRootMismatch { declared: Hash, actual: Hash },
    #[error("header declares tx_list_root {declared:?}, execution produced {actual:?}")]
    TxListRootMismatch { declared: Hash, actual: Hash },
    #[error("header declares receipts_root {declared:?}, execution produced {actual:?}")]
    ReceiptsRootMismatch { declared: Hash, actual: Hash },
    #[error("header declares bloom {declared:?}, execution produced {actual:?}")]
    BloomMismatch { declared: Bloom, actual: Bloom },
}
