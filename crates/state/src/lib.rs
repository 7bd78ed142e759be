//! `WorldState` (`spec.md` §3): the account/storage/code store plus the
//! per-block and per-transaction scratch the block processor owns for the
//! duration of `apply_block`. Grounded on `chains/ethereum/executor/src/state.rs`,
//! restructured from an RPC-prefetch cache into the authoritative in-memory
//! state the core owns directly.

pub mod account_store;
pub mod error;
pub mod prev_headers;
pub mod world_state;

pub use account_store::AccountStore;
pub use error::WorldStateError;
pub use evmcore_trie::Account;
pub use prev_headers::PrevHeaders;
pub use world_state::{Snapshot, WorldState, BLOCKHASH_LOOKBACK};
