use crate::{error::ProcessorError, gas::intrinsic_gas, validator::validate_transaction};
use evmcore_chainspec::ChainConfig;
use evmcore_primitives::{Address, Bytes, Hash, U256};
use evmcore_state::{AccountStore, WorldState};
use evmcore_types::{Log, Transaction};
use evmcore_vm::{Environment, Message, VmExecutor};

/// What a single `apply_transaction` run produced, everything the block
/// processor needs to assemble this transaction's [`evmcore_types::Receipt`]
/// (`spec.md` §4.8).
#[derive(Debug, Clone)]
pub struct TransactionOutcome {
    pub success: bool,
    pub output: Bytes,
    pub logs: Vec<Log>,
    /// Gas charged against the block's budget: `startgas` on failure,
    /// `startgas - gas_left - refund` on success (`spec.md` §4.6 step 5).
    pub gas_used: u64,
    /// The intermediate state root committed right after this transaction,
    /// pre-Metropolis only (`spec.md` §4.6 step 7).
    pub state_root: Option<Hash>,
}

/// Transaction-Processor (`spec.md` §4.6): validates, debits upfront cost,
/// dispatches to the VM, settles gas and refunds, finalizes suicides, and
/// (pre-Metropolis) commits an intermediate root. The only function in this
/// crate that mutates `state` on a transaction's behalf.
#[allow(clippy::missing_errors_doc)]
pub fn apply_transaction<S, V>(
    state: &mut WorldState<S>,
    tx: &Transaction,
    sender: Option<Address>,
    cfg: &ChainConfig,
    vm: &mut V,
) -> Result<TransactionOutcome, ProcessorError<S::Error>>
where
    S: AccountStore + Clone,
    V: VmExecutor,
{
    state.clear_tx_scratch();

    let sender = validate_transaction(state, tx, sender, cfg)?;
    let post_homestead = cfg.is_homestead(state.block_number);

    state.increment_nonce(&sender)?;
    let upfront = tx.gasprice.checked_mul(tx.startgas.into()).unwrap_or_else(U256::max_value);
    state.sub_balance(&sender, upfront)?;

    let intrinsic = intrinsic_gas(tx, post_homestead);
    let message_gas = tx.startgas - intrinsic;
    let msg = Message { from: sender, to: tx.to, value: tx.value, gas: message_gas, data: tx.data.clone(), code_address: tx.to };

    let mut env = Environment::new(state, tx, sender, cfg);
    let (success, gas_left, output) = if tx.is_contract_creation() {
        vm.create_contract(&mut env, &msg)
    } else {
        vm.apply_msg(&mut env, &msg)
    };

    let coinbase = state.block_coinbase;
    let pay = |gas: u64| tx.gasprice.checked_mul(gas.into()).unwrap_or_else(U256::max_value);

    let gas_used = if success {
        let spent = tx.startgas - gas_left;
        let refund_ceiling = spent / 2;
        let refund = (state.refunds + u64::try_from(state.suicides.len()).unwrap_or(u64::MAX) * cfg.gsuiciderefund)
            .min(refund_ceiling);
        let gas_left = gas_left + refund;
        let spent = spent - refund;

        state.add_balance(&sender, pay(gas_left))?;
        state.add_balance(&coinbase, pay(spent))?;

        for suicided in state.suicides.clone() {
            state.remove_account(&suicided)?;
        }
        spent
    } else {
        state.add_balance(&coinbase, pay(tx.startgas))?;
        tx.startgas
    };
    state.gas_used += gas_used;

    let logs = std::mem::take(&mut state.logs);
    state.suicides.clear();
    state.refunds = 0;

    let state_root = if cfg.is_metropolis(state.block_number) { None } else { Some(state.commit(cfg)?) };

    Ok(TransactionOutcome { success, output, logs, gas_used, state_root })
}

#[cfg(test)]
mod tests {
    use super::apply_transaction;
    use evmcore_chainspec::ChainConfig;
    use evmcore_primitives::{Address, U256};
    use evmcore_state::WorldState;
    use evmcore_trie::StateTrie;
    use evmcore_types::{RecoveryId, Signature, Transaction};
    use evmcore_vm::SimpleTransferVm;

    #[test]
    fn successful_transfer_debits_sender_and_credits_recipient_and_coinbase() {
        let cfg = ChainConfig::mainnet();
        let mut state: WorldState<StateTrie> = WorldState::new(StateTrie::default(), 8);
        let sender = Address::repeat_byte(1);
        let recipient = Address::repeat_byte(2);
        state.block_coinbase = Address::repeat_byte(3);
        state.gas_limit = 10_000_000;
        state.add_balance(&sender, U256::from(1_000_000)).unwrap();

        let tx = Transaction {
            nonce: 0,
            gasprice: U256::from(1),
            startgas: 21_000,
            to: Some(recipient),
            value: U256::from(100),
            data: Default::default(),
            signature: Signature { v: RecoveryId::new(27), r: U256::from(1), s: U256::from(1) },
        };

        let mut vm = SimpleTransferVm;
        let outcome = apply_transaction(&mut state, &tx, Some(sender), &cfg, &mut vm).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.gas_used, 21_000);
        assert_eq!(state.balance(&recipient).unwrap(), U256::from(100));
        assert_eq!(state.balance(&state.block_coinbase).unwrap(), U256::from(21_000));
        assert_eq!(state.nonce(&sender).unwrap(), 1);
        assert!(outcome.state_root.is_some());
    }

    #[test]
    fn failed_dispatch_still_charges_full_startgas_to_coinbase() {
        let cfg = ChainConfig::mainnet();
        let mut state: WorldState<StateTrie> = WorldState::new(StateTrie::default(), 8);
        let sender = Address::repeat_byte(1);
        let contract = Address::repeat_byte(4);
        state.block_coinbase = Address::repeat_byte(3);
        state.gas_limit = 10_000_000;
        state.add_balance(&sender, U256::from(1_000_000)).unwrap();
        state.set_code(&contract, &[0x60, 0x00]).unwrap();

        let tx = Transaction {
            nonce: 0,
            gasprice: U256::from(1),
            startgas: 21_000,
            to: Some(contract),
            value: U256::zero(),
            data: Default::default(),
            signature: Signature { v: RecoveryId::new(27), r: U256::from(1), s: U256::from(1) },
        };

        let mut vm = SimpleTransferVm;
        let outcome = apply_transaction(&mut state, &tx, Some(sender), &cfg, &mut vm).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.gas_used, 21_000);
        assert_eq!(state.balance(&state.block_coinbase).unwrap(), U256::from(21_000));
    }
}
