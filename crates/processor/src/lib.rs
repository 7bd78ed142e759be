//! Transaction-Validator, Transaction-Processor, Block-Processor and
//! Receipt/Root-Builder (`spec.md` §4.4, §4.6-4.8): the pieces that
//! actually mutate a `WorldState` in response to a candidate block.

pub mod block;
pub mod error;
pub mod gas;
pub mod transaction;
pub mod validator;

pub use block::{apply_block, validate_block, BlockMode};
pub use error::{BlockError, ProcessorError};
pub use gas::intrinsic_gas;
pub use transaction::{apply_transaction, TransactionOutcome};
pub use validator::validate_transaction;
