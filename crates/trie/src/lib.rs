//! The scratch Merkle trie used to build transaction and receipt roots
//! (`spec.md` §4.8), plus an in-memory authenticated account store that
//! stands in for the state backend the core treats as out of scope.

pub mod account;
pub mod account_db;
pub mod hasher;
pub mod layout;
pub mod node_codec;
pub mod ordered_root;
pub mod state_trie;
pub mod trie_stream;

pub use account::Account;
pub use hasher::KeccakHasher;
pub use ordered_root::ordered_trie_root;
pub use state_trie::StateTrie;
