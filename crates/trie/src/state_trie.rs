use crate::{
    account::Account,
    account_db::{AccountDB, AccountDBMut},
    hasher::{Hasher, KeccakHasher},
    layout::{FatDB, FatDBMut, SecTrieDB, SecTrieDBMut, TrieError},
    node_codec::HASHED_NULL_NODE,
};
use hash_db::HashDB;
use memory_db::{HashKey, MemoryDB};
use primitive_types::{H160, H256, U256};
use rlp::NULL_RLP;
use trie_db::{Trie, TrieMut};

type Address = H160;
type Db = MemoryDB<KeccakHasher, HashKey<KeccakHasher>, Vec<u8>>;

#[must_use]
fn new_memory_db() -> (Db, H256) {
    (Db::from_null_node(&NULL_RLP, NULL_RLP.as_ref().into()), HASHED_NULL_NODE)
}

/// An in-memory, authenticated key-value store standing in for the
/// external trie/state backend (`spec.md` §1's out-of-scope "state
/// backend"). Accounts are keyed by address in one trie; each account's
/// storage lives in a second trie namespaced into the same backing
/// database via [`AccountDBMut`].
pub struct StateTrie {
    db: Db,
    root: H256,
}

impl Default for StateTrie {
    fn default() -> Self {
        let (db, root) = new_memory_db();
        Self { db, root }
    }
}

#[allow(clippy::missing_errors_doc)]
impl StateTrie {
    #[must_use]
    pub const fn root(&self) -> H256 {
        self.root
    }

    pub fn get_account(&self, address: &Address) -> crate::layout::Result<Option<Account>> {
        let trie = FatDB::new(&self.db, &self.root);
        let Some(bytes) = trie.get(address.as_bytes())? else {
            return Ok(None);
        };
        let account =
            rlp::decode::<Account>(bytes.as_ref()).map_err(|err| TrieError::DecoderError(self.root, err))?;
        Ok(Some(account))
    }

    pub fn contains_account(&self, address: &Address) -> crate::layout::Result<bool> {
        let trie = FatDB::new(&self.db, &self.root);
        trie.contains(address.as_bytes())
    }

    pub fn put_account(&mut self, address: &Address, account: &Account) -> crate::layout::Result<()> {
        let bytes = rlp::encode(account).freeze();
        let mut trie = FatDBMut::from_existing(&mut self.db, &mut self.root);
        trie.insert(address.as_bytes(), bytes.as_ref())?;
        Ok(())
    }

    pub fn remove_account(&mut self, address: &Address) -> crate::layout::Result<()> {
        let mut trie = FatDBMut::from_existing(&mut self.db, &mut self.root);
        trie.remove(address.as_bytes())?;
        Ok(())
    }

    pub fn get_storage(
        &self,
        address: &Address,
        storage_root: H256,
        slot: &H256,
    ) -> crate::layout::Result<U256> {
        let address_hash = KeccakHasher::hash(address.as_bytes());
        let account_db = AccountDB::from_hash(&self.db, address_hash);
        let trie = SecTrieDB::new(&account_db, &storage_root);
        let Some(bytes) = trie.get(slot.as_bytes())? else {
            return Ok(U256::zero());
        };
        rlp::decode::<U256>(bytes.as_ref()).map_err(|err| TrieError::DecoderError(storage_root, err))
    }

    pub fn set_storage(
        &mut self,
        address: &Address,
        storage_root: H256,
        slot: H256,
        value: U256,
    ) -> crate::layout::Result<H256> {
        let address_hash = KeccakHasher::hash(address.as_bytes());
        let mut new_root = storage_root;
        let mut account_db = AccountDBMut::from_hash(&mut self.db, address_hash);
        let mut trie = SecTrieDBMut::from_existing(&mut account_db, &mut new_root);
        if value.is_zero() {
            trie.remove(slot.as_bytes())?;
        } else {
            let encoded = rlp::encode(&value).freeze();
            trie.insert(slot.as_bytes(), encoded.as_ref())?;
        }
        Ok(new_root)
    }

    pub fn insert_code(&mut self, bytecode: &[u8]) -> H256 {
        if bytecode.is_empty() {
            return crate::account::KECCAK_EMPTY;
        }
        let hash = KeccakHasher::hash(bytecode);
        self.db.insert((hash.as_bytes(), None), bytecode);
        hash
    }

    #[must_use]
    pub fn code(&self, hash: &H256) -> Option<Vec<u8>> {
        if hash == &crate::account::KECCAK_EMPTY {
            return None;
        }
        HashDB::get(&self.db, hash, (&[][..], None))
    }
}
