use crate::message::Message;
use evmcore_chainspec::ChainConfig;
use evmcore_primitives::{Address, Bytes, Hash, U256};
use evmcore_state::{AccountStore, Snapshot, WorldState, WorldStateError};
use evmcore_types::{Log, Transaction};

/// The capability bundle the VM sees during message/contract execution
/// (`spec.md` §4.5). Holds no independent state: every accessor is a thin
/// view onto the live [`WorldState`] plus the transaction in flight. Its
/// lifetime is strictly nested within one call to `apply_transaction`
/// (`spec.md` §9, "no ownership cycle is required").
pub struct Environment<'a, S: AccountStore> {
    state: &'a mut WorldState<S>,
    tx: &'a Transaction,
    sender: Address,
    cfg: &'a ChainConfig,
}

impl<'a, S: AccountStore + Clone> Environment<'a, S> {
    pub fn new(state: &'a mut WorldState<S>, tx: &'a Transaction, sender: Address, cfg: &'a ChainConfig) -> Self {
        Self { state, tx, sender, cfg }
    }

    pub fn balance(&self, address: &Address) -> Result<U256, WorldStateError<S::Error>> {
        self.state.balance(address)
    }

    pub fn add_balance(&mut self, address: &Address, amount: U256) -> Result<(), WorldStateError<S::Error>> {
        self.state.add_balance(address, amount)
    }

    pub fn sub_balance(&mut self, address: &Address, amount: U256) -> Result<(), WorldStateError<S::Error>> {
        self.state.sub_balance(address, amount)
    }

    pub fn nonce(&self, address: &Address) -> Result<u64, WorldStateError<S::Error>> {
        self.state.nonce(address)
    }

    pub fn increment_nonce(&mut self, address: &Address) -> Result<(), WorldStateError<S::Error>> {
        self.state.increment_nonce(address)
    }

    pub fn code(&self, address: &Address) -> Result<Bytes, WorldStateError<S::Error>> {
        self.state.code(address)
    }

    pub fn code_hash(&self, address: &Address) -> Result<Hash, WorldStateError<S::Error>> {
        self.state.code_hash(address)
    }

    pub fn set_code(&mut self, address: &Address, code: &[u8]) -> Result<(), WorldStateError<S::Error>> {
        self.state.set_code(address, code)
    }

    pub fn storage_at(&self, address: &Address, slot: &Hash) -> Result<U256, WorldStateError<S::Error>> {
        self.state.storage_at(address, slot)
    }

    pub fn set_storage_at(
        &mut self,
        address: &Address,
        slot: Hash,
        value: U256,
    ) -> Result<(), WorldStateError<S::Error>> {
        self.state.set_storage_at(address, slot, value)
    }

    pub fn account_exists(&self, address: &Address) -> Result<bool, WorldStateError<S::Error>> {
        self.state.account_exists(address)
    }

    pub fn snapshot(&mut self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn revert(&mut self, snapshot: Snapshot) {
        self.state.revert(snapshot);
    }

    pub fn discard(&mut self, snapshot: Snapshot) {
        self.state.discard(snapshot);
    }

    pub fn add_log(&mut self, log: Log) {
        self.state.add_log(log);
    }

    pub fn add_suicide(&mut self, address: Address) {
        self.state.add_suicide(address);
    }

    pub fn add_refund(&mut self, amount: u64) {
        self.state.add_refund(amount);
    }

    #[must_use]
    pub fn block_hash(&self, n: u64) -> Hash {
        self.state.block_hash(n)
    }

    #[must_use]
    pub const fn coinbase(&self) -> Address {
        self.state.block_coinbase
    }

    #[must_use]
    pub const fn number(&self) -> u64 {
        self.state.block_number
    }

    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.state.timestamp
    }

    #[must_use]
    pub const fn difficulty(&self) -> U256 {
        self.state.block_difficulty
    }

    #[must_use]
    pub const fn gas_limit(&self) -> u64 {
        self.state.gas_limit
    }

    #[must_use]
    pub const fn tx_origin(&self) -> Address {
        self.sender
    }

    #[must_use]
    pub const fn tx_gasprice(&self) -> U256 {
        self.tx.gasprice
    }

    #[must_use]
    pub fn post_homestead(&self) -> bool {
        self.cfg.is_homestead(self.state.block_number)
    }

    #[must_use]
    pub fn post_metropolis(&self) -> bool {
        self.cfg.is_metropolis(self.state.block_number)
    }

    /// A `CALL`-style trampoline: moves `msg.value` from `msg.from` to
    /// `msg.to` before the VM interprets the callee's code. The VM is
    /// responsible for the actual bytecode dispatch and for snapshotting
    /// around this call.
    pub fn call(&mut self, msg: &Message) -> Result<(), WorldStateError<S::Error>> {
        let to = msg.to.expect("call requires a destination");
        if !msg.value.is_zero() {
            self.sub_balance(&msg.from, msg.value)?;
            self.add_balance(&to, msg.value)?;
        }
        Ok(())
    }

    /// A `CREATE`-style trampoline: increments the creator's nonce,
    /// derives the deterministic contract address, and moves `msg.value`
    /// into it. Returns the new contract's address; the VM installs its
    /// code via `set_code` after running the init code.
    pub fn create(&mut self, msg: &Message) -> Result<Address, WorldStateError<S::Error>> {
        let nonce = self.nonce(&msg.from)?;
        let address = crate::message::contract_address(&msg.from, nonce);
        self.increment_nonce(&msg.from)?;
        if !msg.value.is_zero() {
            self.sub_balance(&msg.from, msg.value)?;
            self.add_balance(&address, msg.value)?;
        }
        Ok(address)
    }
}
