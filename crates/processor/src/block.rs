use crate::{error::BlockError, transaction::apply_transaction};
use evmcore_chainspec::ChainConfig;
use evmcore_consensus::{validate_header, validate_uncles, ConsensusVerifier};
use evmcore_primitives::bloom::accrue_log;
use evmcore_primitives::{Address, Hash, U256};
use evmcore_state::{AccountStore, WorldState};
use evmcore_trie::ordered_trie_root;
use evmcore_types::{Block, Receipt};
use evmcore_vm::VmExecutor;

/// Whether `apply_block` is checking a candidate block's declared
/// roots/bloom/`gas_used` against what execution actually produced, or
/// assembling them from scratch for a block under construction
/// (`spec.md` §4.7's "two callers").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockMode {
    Validate,
    Create,
}

/// Block-Processor (`spec.md` §4.7): runs the Header- and Uncle-Validator,
/// initializes the per-block scratch in `state`, replays every transaction
/// through [`apply_transaction`], applies block and uncle rewards, then
/// builds (or checks) the transaction-list root, receipts root and bloom.
///
/// `senders` must be parallel to `block.transactions`: the result of
/// signature recovery over each transaction, an out-of-scope primitive
/// (`spec.md` §1) the caller performs ahead of time. `verifier` is the
/// consensus check `spec.md` §4.3 calls "the configured consensus
/// algorithm"; both it and `senders` sit outside `spec.md` §9's elided
/// `apply_block(state, block, vm, mode)` signature because the core
/// cannot discharge either obligation itself without reimplementing an
/// out-of-scope primitive (see `DESIGN.md`).
#[allow(clippy::missing_errors_doc, clippy::too_many_arguments)]
pub fn apply_block<S, V>(
    state: &mut WorldState<S>,
    block: &Block,
    senders: &[Option<Address>],
    cfg: &ChainConfig,
    vm: &mut V,
    verifier: &mut dyn ConsensusVerifier,
    mode: BlockMode,
) -> Result<Vec<Receipt>, BlockError<S::Error>>
where
    S: AccountStore + Clone,
    V: VmExecutor,
{
    assert_eq!(senders.len(), block.transactions.len(), "senders must be parallel to block.transactions");

    let header = &block.header;
    let parent = state.prev_headers.get(0).cloned();
    let parent_uncle_count = parent.as_ref().map_or(0, |p| state.recent_uncles.get(&p.number).map_or(0, Vec::len));
    validate_header(header, parent.as_ref(), parent_uncle_count, cfg, verifier)?;
    validate_uncles(state, block, cfg, verifier)?;

    initialize(state, block, cfg)?;

    let mut receipts = Vec::with_capacity(block.transactions.len());
    for (index, (tx, sender)) in block.transactions.iter().zip(senders.iter().copied()).enumerate() {
        state.txindex = index as u64;
        let outcome = apply_transaction(state, tx, sender, cfg, vm)
            .map_err(|source| BlockError::Transaction { index: index as u64, source })?;

        let mut bloom = evmcore_primitives::Bloom::zero();
        for log in &outcome.logs {
            accrue_log(&mut bloom, &log.address, &log.topics);
        }
        state.bloom.accrue_bloom(&bloom);

        receipts.push(Receipt {
            state_root: outcome.state_root.unwrap_or_else(Hash::zero),
            cumulative_gas_used: state.gas_used,
            bloom,
            logs: outcome.logs,
        });
    }

    finalize(state, block, cfg)?;
    let final_root = state.commit(cfg)?;

    let tx_list_root = ordered_trie_root(block.transactions.iter().map(rlp::encode));
    let receipts_root = ordered_trie_root(receipts.iter().map(rlp::encode));

    if mode == BlockMode::Validate {
        if header.gas_used != state.gas_used {
            return Err(BlockError::GasUsedMismatch { declared: header.gas_used, actual: state.gas_used });
        }
        if header.state_root != final_root {
            return Err(BlockError::StateRootMismatch { declared: header.state_root, actual: final_root });
        }
        if header.tx_list_root != tx_list_root {
            return Err(BlockError::TxListRootMismatch { declared: header.tx_list_root, actual: tx_list_root });
        }
        if header.receipts_root != receipts_root {
            return Err(BlockError::ReceiptsRootMismatch { declared: header.receipts_root, actual: receipts_root });
        }
        if header.bloom != state.bloom {
            return Err(BlockError::BloomMismatch { declared: header.bloom, actual: state.bloom });
        }
        // Only a block whose declared roots have just been confirmed
        // correct is safe to extend the ancestor chain with. In
        // `BlockMode::Create`, `header`'s roots are placeholders the
        // caller overwrites with this function's return value before
        // advancing `prev_headers` itself.
        state.prev_headers.push_front(header.clone());
    }

    Ok(receipts)
}

/// Read-only variant of [`apply_block`]: clones `state` (cheap relative to
/// replaying a block, and the only way to honor an immutable `state` while
/// still running every check `apply_block` runs) and discards the clone's
/// mutations, returning only whether the block would have been accepted.
#[allow(clippy::missing_errors_doc)]
pub fn validate_block<S, V>(
    state: &WorldState<S>,
    block: &Block,
    senders: &[Option<Address>],
    cfg: &ChainConfig,
    vm: &mut V,
    verifier: &mut dyn ConsensusVerifier,
) -> Result<(), BlockError<S::Error>>
where
    S: AccountStore + Clone,
    V: VmExecutor,
{
    let mut scratch = state.clone();
    apply_block(&mut scratch, block, senders, cfg, vm, verifier, BlockMode::Validate)?;
    Ok(())
}

/// `spec.md` §4.7 step 1: seed the per-block scratch from the header, push
/// the parent into the ancestor ring, and (Metropolis activation block
/// only) install the system-contract getters (`SPEC_FULL.md` §4).
fn initialize<S: AccountStore + Clone>(
    state: &mut WorldState<S>,
    block: &Block,
    cfg: &ChainConfig,
) -> Result<(), evmcore_state::WorldStateError<S::Error>> {
    let header = &block.header;
    state.block_number = header.number;
    state.timestamp = header.timestamp;
    state.gas_limit = header.gas_limit;
    state.block_difficulty = header.difficulty;
    state.block_coinbase = header.coinbase;
    state.gas_used = 0;
    state.bloom = evmcore_primitives::Bloom::zero();
    state.txindex = 0;

    if cfg.is_metropolis_activation_block(header.number) {
        state.set_code(&cfg.metropolis_stateroot_store, &cfg.metropolis_getter_code)?;
        state.set_code(&cfg.metropolis_blockhash_store, &cfg.metropolis_getter_code)?;
    }

    if cfg.is_metropolis(header.number) {
        if let Some(parent) = state.prev_headers.get(0).cloned() {
            let slot = Hash::from_low_u64_be(parent.number % cfg.metropolis_wraparound);
            let block_hash_value = U256::from_big_endian(parent.hash().as_bytes());
            let state_root_value = U256::from_big_endian(parent.state_root.as_bytes());
            state.set_storage_at(&cfg.metropolis_blockhash_store, slot, block_hash_value)?;
            state.set_storage_at(&cfg.metropolis_stateroot_store, slot, state_root_value)?;
        }
    }

    Ok(())
}

/// `spec.md` §4.7 step 4: block and uncle rewards, `recent_uncles`
/// bookkeeping, and aging out entries past the uncle-eligibility window.
fn finalize<S: AccountStore + Clone>(
    state: &mut WorldState<S>,
    block: &Block,
    cfg: &ChainConfig,
) -> Result<(), evmcore_state::WorldStateError<S::Error>> {
    let header = &block.header;

    let nephew_total = cfg.nephew_reward.checked_mul(U256::from(block.uncles.len())).unwrap_or_else(U256::max_value);
    let coinbase_total = cfg.block_reward.checked_add(nephew_total).unwrap_or_else(U256::max_value);
    state.add_balance(&header.coinbase, coinbase_total)?;

    for uncle in &block.uncles {
        let depth = header.number - uncle.number;
        if depth < cfg.uncle_depth_penalty_factor {
            let numerator = cfg.uncle_depth_penalty_factor - depth;
            let uncle_reward = cfg
                .block_reward
                .checked_mul(U256::from(numerator))
                .unwrap_or_else(U256::max_value)
                / U256::from(cfg.uncle_depth_penalty_factor);
            state.add_balance(&uncle.coinbase, uncle_reward)?;
        }
    }

    if !block.uncles.is_empty() {
        state.recent_uncles.insert(header.number, block.uncles.iter().map(evmcore_types::Header::hash).collect());
    }
    state.age_out_uncles(cfg.max_uncle_depth);

    Ok(())
}
