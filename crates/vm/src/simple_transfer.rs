use crate::{environment::Environment, message::Message, vm::VmExecutor};
use evmcore_primitives::Bytes;
use evmcore_state::AccountStore;

/// The minimal `VmExecutor` that satisfies every scenario in `spec.md`
/// §8: plain value transfers between accounts that carry no code. Any
/// message whose recipient has code, or any contract-creation message,
/// fails rather than being interpreted — this is intentionally not a real
/// EVM (that interpreter is out of scope per `spec.md` §1); it exists so
/// the transaction/block processors can be exercised without pulling in
/// `revm`. See [`crate::revm_backend::RevmVm`] (`revm-backend` feature)
/// for a real bytecode interpreter.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleTransferVm;

impl VmExecutor for SimpleTransferVm {
    fn apply_msg<S>(&mut self, env: &mut Environment<'_, S>, msg: &Message) -> (bool, u64, Bytes)
    where
        S: AccountStore + Clone,
    {
        let to = match msg.to {
            Some(to) => to,
            None => return (false, 0, Bytes::new()),
        };
        let has_code = !env.code(&to).map(|code| code.is_empty()).unwrap_or(true);
        if has_code {
            tracing::warn!(target: "evmcore_vm", %to, "SimpleTransferVm cannot execute contract code");
            return (false, 0, Bytes::new());
        }
        if env.call(msg).is_err() {
            return (false, 0, Bytes::new());
        }
        (true, msg.gas, Bytes::new())
    }

    fn create_contract<S>(&mut self, _env: &mut Environment<'_, S>, _msg: &Message) -> (bool, u64, Bytes)
    where
        S: AccountStore + Clone,
    {
        (false, 0, Bytes::new())
    }
}
