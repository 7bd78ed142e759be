use crate::{error::ProcessorError, gas::intrinsic_gas};
use evmcore_chainspec::ChainConfig;
use evmcore_primitives::Address;
use evmcore_state::{AccountStore, WorldState};
use evmcore_types::Transaction;

/// Transaction-Validator (`spec.md` §4.4): every check a transaction must
/// pass before the processor may touch state on its behalf. Read-only;
/// returns the transaction's resolved sender on success.
///
/// `sender` is the result of signature recovery over `tx`, an out-of-scope
/// primitive (`spec.md` §1) the caller performs before invoking this
/// function. Post-Homestead, a signature with a high-order `s` (EIP-2) is
/// treated the same as an unrecoverable one: the source rejects both as
/// "not a validly signed transaction", and `spec.md` §7 names a single
/// `UnsignedTransaction` kind for that family. Post-Metropolis, an unset
/// `sender` is not an error at all: the transaction is a meta-transaction
/// and its sender is substituted with `cfg.metropolis_entry_point`
/// (`spec.md:97`).
#[allow(clippy::missing_errors_doc)]
pub fn validate_transaction<S: AccountStore + Clone>(
    state: &WorldState<S>,
    tx: &Transaction,
    sender: Option<Address>,
    cfg: &ChainConfig,
) -> Result<Address, ProcessorError<S::Error>> {
    let post_homestead = cfg.is_homestead(state.block_number);
    let post_metropolis = cfg.is_metropolis(state.block_number);

    let sender = match sender {
        Some(sender) => sender,
        None if post_metropolis => cfg.metropolis_entry_point,
        None => return Err(ProcessorError::UnsignedTransaction),
    };
    if post_homestead && !tx.signature.is_low_s() {
        return Err(ProcessorError::UnsignedTransaction);
    }

    let expected_nonce = state.nonce(&sender)?;
    if tx.nonce != expected_nonce {
        return Err(ProcessorError::InvalidNonce { expected: expected_nonce, found: tx.nonce });
    }

    let required_gas = intrinsic_gas(tx, post_homestead);
    if tx.startgas < required_gas {
        return Err(ProcessorError::InsufficientStartGas { required: required_gas, provided: tx.startgas });
    }

    let balance = state.balance(&sender)?;
    let upfront_cost = tx
        .gasprice
        .checked_mul(tx.startgas.into())
        .unwrap_or_else(evmcore_primitives::U256::max_value)
        .checked_add(tx.value)
        .unwrap_or_else(evmcore_primitives::U256::max_value);
    if balance < upfront_cost {
        return Err(ProcessorError::InsufficientBalance { required: upfront_cost, available: balance });
    }

    if state.gas_used.saturating_add(tx.startgas) > state.gas_limit {
        return Err(ProcessorError::BlockGasLimitReached {
            used: state.gas_used,
            requested: tx.startgas,
            limit: state.gas_limit,
        });
    }

    Ok(sender)
}

#[cfg(test)]
mod tests {
    use super::validate_transaction;
    use crate::error::ProcessorError;
    use evmcore_chainspec::ChainConfig;
    use evmcore_primitives::{Address, U256};
    use evmcore_state::WorldState;
    use evmcore_trie::StateTrie;
    use evmcore_types::{RecoveryId, Signature, Transaction};

    fn tx(nonce: u64) -> Transaction {
        Transaction {
            nonce,
            gasprice: U256::from(1),
            startgas: 21_000,
            to: Some(Address::repeat_byte(9)),
            value: U256::from(10),
            data: Default::default(),
            signature: Signature { v: RecoveryId::new(27), r: U256::from(1), s: U256::from(1) },
        }
    }

    #[test]
    fn rejects_unrecoverable_sender() {
        let cfg = ChainConfig::mainnet();
        let state: WorldState<StateTrie> = WorldState::new(StateTrie::default(), 8);
        let err = validate_transaction(&state, &tx(0), None, &cfg).unwrap_err();
        assert!(matches!(err, ProcessorError::UnsignedTransaction));
    }

    #[test]
    fn post_metropolis_unrecoverable_sender_is_substituted_with_entry_point() {
        let cfg = ChainConfig::mainnet();
        let mut state: WorldState<StateTrie> = WorldState::new(StateTrie::default(), 8);
        state.block_number = cfg.metropolis_fork_blknum;
        state.gas_limit = 10_000_000;
        state.add_balance(&cfg.metropolis_entry_point, U256::from(1_000_000)).unwrap();
        assert_eq!(validate_transaction(&state, &tx(0), None, &cfg).unwrap(), cfg.metropolis_entry_point);
    }

    #[test]
    fn rejects_wrong_nonce() {
        let cfg = ChainConfig::mainnet();
        let mut state: WorldState<StateTrie> = WorldState::new(StateTrie::default(), 8);
        let sender = Address::repeat_byte(1);
        state.add_balance(&sender, U256::from(1_000_000)).unwrap();
        state.gas_limit = 10_000_000;
        let err = validate_transaction(&state, &tx(3), Some(sender), &cfg).unwrap_err();
        assert!(matches!(err, ProcessorError::InvalidNonce { expected: 0, found: 3 }));
    }

    #[test]
    fn accepts_a_well_formed_transaction() {
        let cfg = ChainConfig::mainnet();
        let mut state: WorldState<StateTrie> = WorldState::new(StateTrie::default(), 8);
        let sender = Address::repeat_byte(1);
        state.add_balance(&sender, U256::from(1_000_000)).unwrap();
        state.gas_limit = 10_000_000;
        assert_eq!(validate_transaction(&state, &tx(0), Some(sender), &cfg).unwrap(), sender);
    }
}
