use evmcore_primitives::Address;

/// Wraps the concrete [`crate::AccountStore::Error`] with the handful of
/// failures that are properties of the state machine itself rather than
/// of the backing store (`spec.md` §3's "balance ≥ 0 always; subtraction
/// that would violate is a prior error, not a clamp").
#[derive(Debug, thiserror::Error)]
pub enum WorldStateError<E: std::error::Error + Send + Sync + 'static> {
    #[error("account store error: {0}")]
    Store(#[from] E),
    #[error("balance underflow debiting {address:?}")]
    BalanceUnderflow { address: Address },
}
