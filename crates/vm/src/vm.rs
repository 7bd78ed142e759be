use crate::{environment::Environment, message::Message};
use evmcore_primitives::Bytes;
use evmcore_state::AccountStore;

/// The out-of-scope bytecode interpreter, modeled as the black box
/// `spec.md` §1 describes: given an [`Environment`] and a [`Message`] it
/// returns `(success, gas_remaining, output)`. `apply_msg` runs an
/// existing account's code (a `CALL`); `create_contract` runs init code
/// and, on success, installs the returned bytes as the new account's code
/// (a `CREATE`).
pub trait VmExecutor {
    fn apply_msg<S>(&mut self, env: &mut Environment<'_, S>, msg: &Message) -> (bool, u64, Bytes)
    where
        S: AccountStore + Clone;

    fn create_contract<S>(&mut self, env: &mut Environment<'_, S>, msg: &Message) -> (bool, u64, Bytes)
    where
        S: AccountStore + Clone;
}
