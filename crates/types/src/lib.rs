//! Wire types consumed and produced by the state-transition function:
//! headers, transactions, receipts, logs and the block that bundles them.

pub mod block;
pub mod constants;
pub mod header;
pub mod log;
pub mod receipt;
pub mod signature;
pub mod transaction;

pub use block::{Block, Uncle};
pub use header::Header;
pub use log::Log;
pub use receipt::Receipt;
pub use signature::{RecoveryId, Signature};
pub use transaction::Transaction;
