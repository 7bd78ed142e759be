//! A `revm`-backed [`VmExecutor`], grounded on
//! `chains/ethereum/executor/src/rust_evm.rs`'s `revm::Database` adapter
//! over `StateDB<RPC>`: the same glue code, retargeted at the owned,
//! trie-backed [`WorldState`] this core works against instead of an
//! RPC-prefetch cache. Gated behind the `revm-backend` feature since the
//! core itself treats the interpreter as out of scope (`spec.md` §1).

use crate::{environment::Environment, message::Message, vm::VmExecutor};
use evmcore_primitives::{Bytes, Hash};
use evmcore_state::AccountStore;

/// Adapts a borrowed [`Environment`] to `revm::Database`, the same shape
/// `rust_evm.rs` implements for `StateDB<RPC>`.
pub struct RevmAdapter<'env, 'a, S: AccountStore> {
    env: &'env mut Environment<'a, S>,
}

#[derive(Debug, thiserror::Error)]
pub enum RevmAdapterError<E: std::error::Error + Send + Sync + 'static> {
    #[error("state error: {0}")]
    State(#[from] evmcore_state::WorldStateError<E>),
}

impl<'env, 'a, S> revm::Database for RevmAdapter<'env, 'a, S>
where
    S: AccountStore + Clone,
{
    type Error = RevmAdapterError<S::Error>;

    fn basic(
        &mut self,
        address: revm::primitives::Address,
    ) -> Result<Option<revm::primitives::AccountInfo>, Self::Error> {
        let address = evmcore_primitives::Address::from(address.into_array());
        if !self.env.account_exists(&address)? {
            return Ok(None);
        }
        let balance = self.env.balance(&address)?;
        let nonce = self.env.nonce(&address)?;
        let code_hash = self.env.code_hash(&address)?;
        let code = self.env.code(&address)?;
        let code = if code.is_empty() {
            None
        } else {
            Some(revm::primitives::Bytecode::new_raw(revm::primitives::Bytes::copy_from_slice(code.as_ref())))
        };
        Ok(Some(revm::primitives::AccountInfo {
            balance: revm::primitives::U256::from_limbs(balance.0),
            nonce,
            code_hash: revm::primitives::B256::from(code_hash.0),
            code,
        }))
    }

    fn code_by_hash(
        &mut self,
        code_hash: revm::primitives::B256,
    ) -> Result<revm::primitives::Bytecode, Self::Error> {
        let _ = Hash::from(code_hash.0);
        tracing::warn!(target: "evmcore_vm", "code_by_hash lookups by hash alone are not supported by WorldState");
        Ok(revm::primitives::Bytecode::new())
    }

    fn storage(
        &mut self,
        address: revm::primitives::Address,
        index: revm::primitives::U256,
    ) -> Result<revm::primitives::U256, Self::Error> {
        let address = evmcore_primitives::Address::from(address.into_array());
        let slot = Hash::from(index.to_be_bytes());
        let value = self.env.storage_at(&address, &slot)?;
        Ok(revm::primitives::U256::from_be_bytes(value.to_big_endian()))
    }

    fn block_hash(&mut self, number: revm::primitives::U256) -> Result<revm::primitives::B256, Self::Error> {
        let Ok(number) = u64::try_from(number) else {
            return Ok(revm::primitives::B256::ZERO);
        };
        let current = self.env.number();
        let n = current.saturating_sub(number).saturating_sub(1);
        Ok(revm::primitives::B256::from(self.env.block_hash(n).0))
    }
}

/// The real bytecode interpreter, wired in exactly as `rust_evm.rs` wires
/// `revm` into `StateDB<RPC>`: the only change is the underlying store.
#[derive(Debug, Default, Clone, Copy)]
pub struct RevmVm {
    pub chain_id: u64,
}

impl VmExecutor for RevmVm {
    fn apply_msg<S>(&mut self, env: &mut Environment<'_, S>, msg: &Message) -> (bool, u64, Bytes)
    where
        S: AccountStore + Clone,
    {
        self.run(env, msg, false)
    }

    fn create_contract<S>(&mut self, env: &mut Environment<'_, S>, msg: &Message) -> (bool, u64, Bytes)
    where
        S: AccountStore + Clone,
    {
        self.run(env, msg, true)
    }
}

impl RevmVm {
    fn run<S>(&mut self, env: &mut Environment<'_, S>, msg: &Message, is_create: bool) -> (bool, u64, Bytes)
    where
        S: AccountStore + Clone,
    {
        let mut revm_env = revm::primitives::Env::default();
        revm_env.cfg.chain_id = self.chain_id;
        revm_env.cfg.disable_base_fee = true;
        revm_env.block.number = revm::primitives::U256::from(env.number());
        revm_env.block.coinbase = revm::primitives::Address::from(env.coinbase().0);
        revm_env.block.timestamp = revm::primitives::U256::from(env.timestamp());
        revm_env.block.difficulty = revm::primitives::U256::from_limbs(env.difficulty().0);
        revm_env.block.gas_limit = revm::primitives::U256::from(env.gas_limit());

        revm_env.tx.caller = revm::primitives::Address::from(msg.from.0);
        revm_env.tx.value = revm::primitives::U256::from_limbs(msg.value.0);
        revm_env.tx.gas_limit = msg.gas;
        revm_env.tx.data = revm::primitives::Bytes::copy_from_slice(msg.data.as_ref());
        revm_env.tx.transact_to = if is_create {
            revm::primitives::TransactTo::Create(revm::primitives::CreateScheme::Create)
        } else {
            let to = msg.to.expect("apply_msg requires a destination");
            revm::primitives::TransactTo::Call(revm::primitives::Address::from(to.0))
        };

        let mut adapter = RevmAdapter { env };
        let transact_result = revm::evm_inner::<RevmAdapter<'_, '_, S>, false>(
            &mut revm_env,
            &mut adapter,
            &mut revm::inspectors::NoOpInspector,
        )
        .transact();

        let Ok(result) = transact_result else {
            return (false, 0, Bytes::new());
        };
        match result.result {
            revm::primitives::ExecutionResult::Success { gas_used, output, .. } => {
                let gas_left = msg.gas.saturating_sub(gas_used);
                let bytes = match output {
                    revm::primitives::Output::Call(b) | revm::primitives::Output::Create(b, _) => b,
                };
                (true, gas_left, Bytes::from(bytes.to_vec()))
            }
            revm::primitives::ExecutionResult::Revert { gas_used, output } => {
                (false, msg.gas.saturating_sub(gas_used), Bytes::from(output.to_vec()))
            }
            revm::primitives::ExecutionResult::Halt { .. } => (false, 0, Bytes::new()),
        }
    }
}
