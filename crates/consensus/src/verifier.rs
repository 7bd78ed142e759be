use evmcore_types::Header;

/// The closed `{PoW, SystemContract}` consensus dispatch (`spec.md` §9
/// "Dispatch over consensus algorithm"), modeled as a trait-object
/// boundary rather than this crate depending on `evmcore-vm`: a
/// `SystemContract` implementation calls into the VM façade from the
/// processor/façade layer that owns both, while this crate only ever
/// sees `&mut dyn ConsensusVerifier`. Grounded on the pluggable-verifier
/// shape of `chains/ethereum/executor/src/precompile/ecrecover.rs`.
pub trait ConsensusVerifier {
    /// `true` when `header` passes the configured consensus check (PoW
    /// validity, or a successful system-contract call per `spec.md` §4.3
    /// step 1).
    fn verify(&mut self, header: &Header) -> bool;
}

/// A verifier that accepts every header. Useful for the `BlockMode::Create`
/// path and for tests that only exercise state-transition arithmetic, not
/// PoW (`spec.md` never specifies PoW's bit-level algorithm; it is out of
/// scope per §1).
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllVerifier;

impl ConsensusVerifier for AcceptAllVerifier {
    fn verify(&mut self, _header: &Header) -> bool {
        true
    }
}
