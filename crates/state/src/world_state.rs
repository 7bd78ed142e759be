use crate::{account_store::AccountStore, error::WorldStateError, prev_headers::PrevHeaders};
use evmcore_chainspec::ChainConfig;
use evmcore_primitives::{Address, Bloom, Bytes, Hash, U256};
use evmcore_trie::Account;
use evmcore_types::Log;
use std::collections::{BTreeMap, BTreeSet};

/// An opaque handle returned by [`WorldState::snapshot`]. Stack-disciplined
/// per `spec.md` §5: every snapshot must be reverted or discarded before
/// the call that took it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot(usize);

/// The block-number lookback window `BLOCKHASH` is defined over, per the
/// VM-Environment-Façade (`spec.md` §4.5): the nearest 256 ancestors.
pub const BLOCKHASH_LOOKBACK: u64 = 256;

/// `WorldState S` (`spec.md` §3): the accounts/storage/code store plus the
/// per-block and per-transaction scratch fields the block processor reads
/// and mutates while running `apply_block`. Owns the backing
/// [`AccountStore`] exclusively for the duration of that call.
#[derive(Clone)]
pub struct WorldState<S: AccountStore> {
    store: S,

    /// Index of the transaction currently (or most recently) processed.
    pub txindex: u64,
    /// Cumulative gas used so far this block.
    pub gas_used: u64,
    /// Cumulative bloom over every log emitted so far this block.
    pub bloom: Bloom,
    /// Logs emitted by the transaction in flight; cleared on entry to
    /// `apply_transaction` and harvested on exit.
    pub logs: Vec<Log>,
    /// Addresses the transaction in flight directed to suicide.
    pub suicides: BTreeSet<Address>,
    /// Gas refund accrued by the transaction in flight.
    pub refunds: u64,

    pub block_coinbase: Address,
    pub block_number: u64,
    pub timestamp: u64,
    pub gas_limit: u64,
    pub block_difficulty: U256,

    /// Ancestor headers, most recent first, bounded at construction.
    pub prev_headers: PrevHeaders,
    /// Uncle hashes already included, keyed by the block number that
    /// included them; bounded to the uncle-eligibility window by
    /// `age_out_uncles`.
    pub recent_uncles: BTreeMap<u64, Vec<Hash>>,

    /// Accounts touched since the last commit; consulted by
    /// `commit` for EIP-161 empty-account pruning post-Metropolis
    /// (`SPEC_FULL.md` §4's supplemented feature).
    touched: BTreeSet<Address>,

    snapshots: Vec<S>,
}

impl<S: AccountStore + Clone> WorldState<S> {
    #[must_use]
    pub fn new(store: S, ancestor_capacity: usize) -> Self {
        Self {
            store,
            txindex: 0,
            gas_used: 0,
            bloom: Bloom::zero(),
            logs: Vec::new(),
            suicides: BTreeSet::new(),
            refunds: 0,
            block_coinbase: Address::zero(),
            block_number: 0,
            timestamp: 0,
            gas_limit: 0,
            block_difficulty: U256::zero(),
            prev_headers: PrevHeaders::new(ancestor_capacity),
            recent_uncles: BTreeMap::new(),
            touched: BTreeSet::new(),
            snapshots: Vec::new(),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Current committed root of the account store.
    #[must_use]
    pub fn root(&self) -> Hash {
        self.store.root()
    }

    fn mark_touched(&mut self, address: Address) {
        self.touched.insert(address);
    }

    fn account_or_default(&self, address: &Address) -> Result<Account, WorldStateError<S::Error>> {
        Ok(self.store.get_account(address)?.unwrap_or_default())
    }

    #[must_use]
    pub fn account_exists(&self, address: &Address) -> Result<bool, WorldStateError<S::Error>> {
        Ok(self.store.get_account(address)?.is_some())
    }

    pub fn nonce(&self, address: &Address) -> Result<u64, WorldStateError<S::Error>> {
        Ok(self.account_or_default(address)?.nonce)
    }

    pub fn set_nonce(&mut self, address: &Address, nonce: u64) -> Result<(), WorldStateError<S::Error>> {
        let mut account = self.account_or_default(address)?;
        account.nonce = nonce;
        self.store.put_account(address, &account)?;
        self.mark_touched(*address);
        Ok(())
    }

    pub fn increment_nonce(&mut self, address: &Address) -> Result<(), WorldStateError<S::Error>> {
        let nonce = self.nonce(address)?;
        self.set_nonce(address, nonce + 1)
    }

    pub fn balance(&self, address: &Address) -> Result<U256, WorldStateError<S::Error>> {
        Ok(self.account_or_default(address)?.balance)
    }

    pub fn add_balance(&mut self, address: &Address, amount: U256) -> Result<(), WorldStateError<S::Error>> {
        let mut account = self.account_or_default(address)?;
        account.balance = account.balance.checked_add(amount).expect("balance overflow");
        self.store.put_account(address, &account)?;
        self.mark_touched(*address);
        Ok(())
    }

    /// `spec.md` §3: "balance ≥ 0 always; subtraction that would violate
    /// is a prior error, not a clamp". Callers (the transaction validator)
    /// are responsible for checking sufficiency first; this still returns
    /// an error instead of panicking so a misbehaving caller fails loudly.
    pub fn sub_balance(&mut self, address: &Address, amount: U256) -> Result<(), WorldStateError<S::Error>> {
        let mut account = self.account_or_default(address)?;
        if account.balance < amount {
            return Err(WorldStateError::BalanceUnderflow { address: *address });
        }
        account.balance -= amount;
        self.store.put_account(address, &account)?;
        self.mark_touched(*address);
        Ok(())
    }

    pub fn code(&self, address: &Address) -> Result<Bytes, WorldStateError<S::Error>> {
        let account = self.account_or_default(address)?;
        Ok(self.store.code(&account.code_hash).map(Bytes::from).unwrap_or_default())
    }

    pub fn code_hash(&self, address: &Address) -> Result<Hash, WorldStateError<S::Error>> {
        Ok(self.account_or_default(address)?.code_hash)
    }

    pub fn set_code(&mut self, address: &Address, code: &[u8]) -> Result<(), WorldStateError<S::Error>> {
        let mut account = self.account_or_default(address)?;
        account.code_hash = self.store.insert_code(code);
        self.store.put_account(address, &account)?;
        self.mark_touched(*address);
        Ok(())
    }

    pub fn storage_at(&self, address: &Address, slot: &Hash) -> Result<U256, WorldStateError<S::Error>> {
        let account = self.account_or_default(address)?;
        Ok(self.store.get_storage(address, account.storage_root, slot)?)
    }

    pub fn set_storage_at(
        &mut self,
        address: &Address,
        slot: Hash,
        value: U256,
    ) -> Result<(), WorldStateError<S::Error>> {
        let mut account = self.account_or_default(address)?;
        account.storage_root = self.store.set_storage(address, account.storage_root, slot, value)?;
        self.store.put_account(address, &account)?;
        self.mark_touched(*address);
        Ok(())
    }

    pub fn remove_account(&mut self, address: &Address) -> Result<(), WorldStateError<S::Error>> {
        self.store.remove_account(address)?;
        Ok(())
    }

    pub fn add_log(&mut self, log: Log) {
        self.logs.push(log);
    }

    pub fn add_suicide(&mut self, address: Address) {
        self.suicides.insert(address);
    }

    pub fn add_refund(&mut self, amount: u64) {
        self.refunds = self.refunds.saturating_add(amount);
    }

    /// Clears the per-transaction scratch (`spec.md` §4.6 step 1).
    pub fn clear_tx_scratch(&mut self) {
        self.logs.clear();
        self.suicides.clear();
        self.refunds = 0;
    }

    /// The hash of block `state.number - n - 1`, or the zero hash when
    /// that block is not within the last [`BLOCKHASH_LOOKBACK`] blocks
    /// (`spec.md` §4.5).
    #[must_use]
    pub fn block_hash(&self, n: u64) -> Hash {
        if n >= self.block_number {
            return Hash::zero();
        }
        let distance = self.block_number - n;
        if distance == 0 || distance > BLOCKHASH_LOOKBACK {
            return Hash::zero();
        }
        // prev_headers[0] is the parent (number - 1); index n lands on
        // number - n - 1.
        match self.prev_headers.get(n as usize) {
            Some(header) => header.hash(),
            None => Hash::zero(),
        }
    }

    /// Takes an opaque snapshot of the account store for the VM's nested
    /// call/create reentrancy (`spec.md` §5). Must be paired with
    /// `revert` or `discard`.
    pub fn snapshot(&mut self) -> Snapshot {
        self.snapshots.push(self.store.clone());
        Snapshot(self.snapshots.len() - 1)
    }

    /// Restores the store to the state at `snapshot`, discarding it and
    /// any later snapshots.
    pub fn revert(&mut self, snapshot: Snapshot) {
        let Snapshot(handle) = snapshot;
        self.store = self.snapshots[handle].clone();
        self.snapshots.truncate(handle);
    }

    /// Discards `snapshot` without restoring, keeping the mutations made
    /// since it was taken.
    pub fn discard(&mut self, snapshot: Snapshot) {
        let Snapshot(handle) = snapshot;
        self.snapshots.truncate(handle);
    }

    /// Removes `recent_uncles` entries older than the uncle-eligibility
    /// window (`spec.md` §4.7 step 4, "age out").
    pub fn age_out_uncles(&mut self, max_uncle_depth: u64) {
        if self.block_number > max_uncle_depth {
            self.recent_uncles.remove(&(self.block_number - max_uncle_depth));
        }
    }

    /// Prunes empty accounts touched since the last commit (EIP-161,
    /// `SPEC_FULL.md` §4 supplement), then returns the newly committed
    /// root. Pruning is gated on `cfg.is_metropolis`: this core's
    /// simplified three-era `Hardfork` enum collapses Spurious Dragon into
    /// Metropolis (see `DESIGN.md`).
    pub fn commit(&mut self, cfg: &ChainConfig) -> Result<Hash, WorldStateError<S::Error>> {
        if cfg.is_metropolis(self.block_number) {
            let touched = std::mem::take(&mut self.touched);
            for address in touched {
                if let Some(account) = self.store.get_account(&address)? {
                    if account.is_empty() {
                        self.store.remove_account(&address)?;
                    }
                }
            }
        } else {
            self.touched.clear();
        }
        Ok(self.store.root())
    }
}

#[cfg(test)]
mod tests {
    use super::WorldState;
    use evmcore_primitives::{Address, U256};
    use evmcore_trie::StateTrie;

    fn state() -> WorldState<StateTrie> {
        WorldState::new(StateTrie::default(), 8)
    }

    #[test]
    fn balance_round_trips_through_add_and_sub() {
        let mut state = state();
        let addr = Address::repeat_byte(1);
        state.add_balance(&addr, U256::from(100)).unwrap();
        assert_eq!(state.balance(&addr).unwrap(), U256::from(100));
        state.sub_balance(&addr, U256::from(40)).unwrap();
        assert_eq!(state.balance(&addr).unwrap(), U256::from(60));
    }

    #[test]
    fn sub_balance_below_zero_is_an_error_not_a_clamp() {
        let mut state = state();
        let addr = Address::repeat_byte(2);
        assert!(state.sub_balance(&addr, U256::from(1)).is_err());
    }

    #[test]
    fn nonce_increments_by_exactly_one() {
        let mut state = state();
        let addr = Address::repeat_byte(3);
        state.increment_nonce(&addr).unwrap();
        assert_eq!(state.nonce(&addr).unwrap(), 1);
    }

    #[test]
    fn snapshot_revert_undoes_mutations() {
        let mut state = state();
        let addr = Address::repeat_byte(4);
        state.add_balance(&addr, U256::from(10)).unwrap();
        let snap = state.snapshot();
        state.add_balance(&addr, U256::from(90)).unwrap();
        assert_eq!(state.balance(&addr).unwrap(), U256::from(100));
        state.revert(snap);
        assert_eq!(state.balance(&addr).unwrap(), U256::from(10));
    }

    #[test]
    fn block_hash_is_zero_outside_the_lookback_window() {
        let mut state = state();
        state.block_number = 10;
        assert_eq!(state.block_hash(10), evmcore_primitives::Hash::zero());
        assert_eq!(state.block_hash(9), evmcore_primitives::Hash::zero());
    }
}
