use crate::{arithmetic::calc_difficulty, arithmetic::check_gaslimit, error::ConsensusError, verifier::ConsensusVerifier};
use evmcore_chainspec::ChainConfig;
use evmcore_types::Header;

/// Header-Validator (`spec.md` §4.3): consensus check, linkage to the
/// parent, timestamp monotonicity, gas bound, and fork-gated arithmetic
/// delegated to [`crate::arithmetic`].
///
/// `parent_uncle_count` is the number of uncles the parent block itself
/// included, needed only to recompute the parent-relative difficulty;
/// see [`calc_difficulty`]'s doc comment.
#[allow(clippy::missing_errors_doc)]
pub fn validate_header(
    header: &Header,
    parent: Option<&Header>,
    parent_uncle_count: usize,
    cfg: &ChainConfig,
    verifier: &mut dyn ConsensusVerifier,
) -> Result<(), ConsensusError> {
    if !verifier.verify(header) {
        return Err(ConsensusError::ConsensusVerifierFailed);
    }

    let Some(parent) = parent else {
        // Genesis has no parent to link against; only the consensus
        // check above applies.
        return Ok(());
    };

    let expected_prevhash = parent.hash();
    if header.prevhash != expected_prevhash {
        return Err(ConsensusError::InvalidPrevhash { expected: expected_prevhash, found: header.prevhash });
    }

    if header.number != parent.number + 1 {
        return Err(ConsensusError::InvalidNumber { expected: parent.number + 1, found: header.number });
    }

    if !check_gaslimit(parent, header.gas_limit, cfg) {
        return Err(ConsensusError::InvalidGasLimit { parent: parent.gas_limit, found: header.gas_limit });
    }

    let expected_difficulty = calc_difficulty(parent, parent_uncle_count, header.timestamp, cfg);
    if header.difficulty != expected_difficulty {
        return Err(ConsensusError::InvalidDifficulty { expected: expected_difficulty, found: header.difficulty });
    }

    // `spec.md` §9 flags that the source checks this header-declared bound
    // *and* the block processor separately recomputes `gas_used` from the
    // executed transactions; both checks are required, so this only does
    // the declared-value half.
    if header.gas_used > header.gas_limit {
        return Err(ConsensusError::InvalidGasUsed { limit: header.gas_limit, found: header.gas_used });
    }

    // Strict `>`, matching `spec.md` §4.3 verbatim (contrast with
    // `validate_uncles`'s `≥` for the analogous uncle/ancestor relation —
    // both are preserved per §9's "preserve both behaviors verbatim").
    if header.timestamp <= parent.timestamp {
        return Err(ConsensusError::InvalidTimestamp { parent: parent.timestamp, found: header.timestamp });
    }

    Ok(())
}
