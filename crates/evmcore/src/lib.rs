//! `evmcore`: the public façade over the block state-transition core.
//!
//! Given a [`WorldState`] `S` and a candidate [`Block`] `B`, [`apply_block`]
//! produces the successor state and a receipt per transaction, or rejects
//! `B` with a [`BlockError`] that names which check failed and why
//! (`spec.md` §1-2). [`validate_block`] is the read-only variant a
//! consensus client runs before accepting a block it did not itself
//! produce; [`calc_gaslimit`] and [`calc_difficulty`] are the pure
//! Header-Arithmetic a miner or sanity-checker needs on their own.
//!
//! The VM, the state/trie backend, RLP/Keccak/signature recovery, P2P,
//! mining, fork choice, the mempool and JSON-RPC are all out of scope
//! (`spec.md` §1): this crate only wires together the pieces that decide
//! *whether* a block is a valid state transition, not how one is mined,
//! gossiped or served.

pub use evmcore_chainspec::{ChainConfig, ConsensusAlgo, Hardfork};
pub use evmcore_consensus::{calc_difficulty, calc_gaslimit, AcceptAllVerifier, ConsensusError, ConsensusVerifier};
pub use evmcore_primitives::{Address, Bloom, Bytes, Hash, U256};
pub use evmcore_processor::{
    apply_block, apply_transaction, intrinsic_gas, validate_block, validate_transaction, BlockError, BlockMode,
    ProcessorError, TransactionOutcome,
};
pub use evmcore_state::{AccountStore, Snapshot, WorldState, WorldStateError, BLOCKHASH_LOOKBACK};
pub use evmcore_trie::{ordered_trie_root, Account, StateTrie};
pub use evmcore_types::{Block, Header, Log, Receipt, RecoveryId, Signature, Transaction, Uncle};
pub use evmcore_vm::{Environment, Message, SimpleTransferVm, VmExecutor};

#[cfg(feature = "revm-backend")]
pub use evmcore_vm::RevmVm;
