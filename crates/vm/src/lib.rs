//! The VM-Environment-Façade (`spec.md` §4.5): the capability bundle the
//! out-of-scope bytecode interpreter is handed to read and mutate state
//! during message/contract execution.

pub mod environment;
pub mod message;
pub mod simple_transfer;
pub mod vm;

#[cfg(feature = "revm-backend")]
pub mod revm_backend;

pub use environment::Environment;
pub use message::{contract_address, Message};
pub use simple_transfer::SimpleTransferVm;
pub use vm::VmExecutor;

#[cfg(feature = "revm-backend")]
pub use revm_backend::RevmVm;
