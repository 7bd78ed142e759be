use crate::{hasher::KeccakHasher, node_codec::RlpNodeCodec};
use primitive_types::H256;
use rlp::DecoderError;
use trie_db::TrieLayout;

/// Trie layout using extension nodes, Keccak-256 hashing and RLP node encoding.
#[derive(Default, Clone)]
pub struct Layout;

impl TrieLayout for Layout {
    const USE_EXTENSION: bool = true;
    const ALLOW_EMPTY: bool = false;
    const MAX_INLINE_VALUE: Option<u32> = None;
    type Hash = KeccakHasher;
    type Codec = RlpNodeCodec<KeccakHasher>;
}

pub type TrieDB<'db, 'cache> = trie_db::TrieDB<'db, 'cache, Layout>;
pub type TrieDBMut<'db> = trie_db::TrieDBMut<'db, Layout>;
pub type TrieDBBuilder<'a, 'cache> = trie_db::TrieDBBuilder<'a, 'cache, Layout>;
pub type TrieDBMutBuilder<'db> = trie_db::TrieDBMutBuilder<'db, Layout>;
pub type SecTrieDB<'db, 'cache> = trie_db::SecTrieDB<'db, 'cache, Layout>;
pub type SecTrieDBMut<'db> = trie_db::SecTrieDBMut<'db, Layout>;
pub type FatDB<'db, 'cache> = trie_db::FatDB<'db, 'cache, Layout>;
pub type FatDBMut<'db> = trie_db::FatDBMut<'db, Layout>;

pub type TrieError = trie_db::TrieError<H256, DecoderError>;
pub type Result<T> = trie_db::Result<T, H256, DecoderError>;
