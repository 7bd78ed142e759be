use evmcore_primitives::{Address, Hash, U256};
use evmcore_trie::{Account, StateTrie};

/// The interface the block processor owns during `apply_block`: balance,
/// nonce, code and storage accessors, plus the committed root. `spec.md`
/// §1 treats the concrete trie/persistence layer as an external
/// collaborator; this trait is the boundary, so the core never depends on
/// `evmcore-trie` directly.
pub trait AccountStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn root(&self) -> Hash;
    fn get_account(&self, address: &Address) -> Result<Option<Account>, Self::Error>;
    fn put_account(&mut self, address: &Address, account: &Account) -> Result<(), Self::Error>;
    fn remove_account(&mut self, address: &Address) -> Result<(), Self::Error>;
    fn get_storage(&self, address: &Address, storage_root: Hash, slot: &Hash) -> Result<U256, Self::Error>;
    fn set_storage(
        &mut self,
        address: &Address,
        storage_root: Hash,
        slot: Hash,
        value: U256,
    ) -> Result<Hash, Self::Error>;
    fn insert_code(&mut self, code: &[u8]) -> Hash;
    fn code(&self, hash: &Hash) -> Option<Vec<u8>>;
}

impl AccountStore for StateTrie {
    type Error = evmcore_trie::layout::TrieError;

    fn root(&self) -> Hash {
        self.root()
    }

    fn get_account(&self, address: &Address) -> Result<Option<Account>, Self::Error> {
        self.get_account(address).map_err(|err| *err)
    }

    fn put_account(&mut self, address: &Address, account: &Account) -> Result<(), Self::Error> {
        self.put_account(address, account).map_err(|err| *err)
    }

    fn remove_account(&mut self, address: &Address) -> Result<(), Self::Error> {
        self.remove_account(address).map_err(|err| *err)
    }

    fn get_storage(&self, address: &Address, storage_root: Hash, slot: &Hash) -> Result<U256, Self::Error> {
        self.get_storage(address, storage_root, slot).map_err(|err| *err)
    }

    fn set_storage(
        &mut self,
        address: &Address,
        storage_root: Hash,
        slot: Hash,
        value: U256,
    ) -> Result<Hash, Self::Error> {
        self.set_storage(address, storage_root, slot, value).map_err(|err| *err)
    }

    fn insert_code(&mut self, code: &[u8]) -> Hash {
        self.insert_code(code)
    }

    fn code(&self, hash: &Hash) -> Option<Vec<u8>> {
        self.code(hash)
    }
}
