use crate::{arithmetic::calc_difficulty, error::ConsensusError, verifier::ConsensusVerifier};
use evmcore_chainspec::ChainConfig;
use evmcore_primitives::Hash;
use evmcore_state::{AccountStore, WorldState};
use evmcore_types::{Block, Header};
use std::collections::BTreeSet;

/// Uncle-Validator (`spec.md` §4.2). Read-only over `state.prev_headers`
/// and `state.recent_uncles`; never mutates.
#[allow(clippy::missing_errors_doc)]
pub fn validate_uncles<S: AccountStore + Clone>(
    state: &WorldState<S>,
    block: &Block,
    cfg: &ChainConfig,
    verifier: &mut dyn ConsensusVerifier,
) -> Result<(), ConsensusError> {
    let header = &block.header;

    let uncles_hash = rlp_hash(&block.uncles);
    if uncles_hash != header.uncles_hash {
        return Err(ConsensusError::InvalidUncles(format!(
            "uncles_hash mismatch: expected {:?}, found {:?}",
            header.uncles_hash, uncles_hash
        )));
    }

    if block.uncles.len() > cfg.max_uncles {
        return Err(ConsensusError::InvalidUncles(format!(
            "too many uncles: {} > {}",
            block.uncles.len(),
            cfg.max_uncles
        )));
    }

    for uncle in &block.uncles {
        if uncle.number >= header.number {
            return Err(ConsensusError::InvalidUncles(format!(
                "uncle number {} not below block number {}",
                uncle.number, header.number
            )));
        }
    }

    // ancestor_chain = [B.header] + prev_headers[0..MAX_UNCLE_DEPTH+1], null-skipping.
    let max_lookback = (cfg.max_uncle_depth + 1) as usize;
    let mut ancestor_chain: Vec<Header> = Vec::with_capacity(max_lookback + 1);
    ancestor_chain.push(header.clone());
    for i in 0..max_lookback {
        match state.prev_headers.get(i) {
            Some(ancestor) => ancestor_chain.push(ancestor.clone()),
            None => break,
        }
    }

    // Inclusive lower bound: `state.block_number > blknum >=
    // state.block_number - MAX_UNCLE_DEPTH`. The boundary entry
    // (`number == lower`) is still present in `recent_uncles` at this
    // point (`age_out_uncles` only drops entries strictly older than
    // `max_uncle_depth`), so it must fold into the ineligible set too.
    let mut ineligible: BTreeSet<Hash> = ancestor_chain.iter().map(Header::hash).collect();
    let lower = header.number.saturating_sub(cfg.max_uncle_depth);
    for (&number, hashes) in &state.recent_uncles {
        if number >= lower && number < header.number {
            ineligible.extend(hashes.iter().copied());
        }
    }

    // An uncle's parent must be a sibling of an ancestor at least two
    // generations back: ancestor_chain[0] is this block, [1] the parent,
    // so eligible parents start at index 2.
    for uncle in &block.uncles {
        let Some((_, parent_header)) =
            ancestor_chain.iter().enumerate().skip(2).find(|(_, h)| h.hash() == uncle.prevhash)
        else {
            return Err(ConsensusError::InvalidUncles(format!(
                "uncle prevhash {:?} is not a sibling of any eligible ancestor",
                uncle.prevhash
            )));
        };

        let parent_uncle_count = state.recent_uncles.get(&parent_header.number).map_or(0, Vec::len);
        let expected_difficulty = calc_difficulty(parent_header, parent_uncle_count, uncle.timestamp, cfg);
        if uncle.difficulty != expected_difficulty {
            return Err(ConsensusError::InvalidUncles(format!(
                "uncle difficulty mismatch: expected {expected_difficulty}, found {}",
                uncle.difficulty
            )));
        }
        if uncle.number != parent_header.number + 1 {
            return Err(ConsensusError::InvalidUncles(format!(
                "uncle number {} does not follow parent number {}",
                uncle.number, parent_header.number
            )));
        }
        // `≥`, contrasting `validate_header`'s strict `>` for the
        // analogous parent/child relation — preserved verbatim per
        // `spec.md` §9.
        if uncle.timestamp < parent_header.timestamp {
            return Err(ConsensusError::InvalidUncles(format!(
                "uncle timestamp {} precedes parent timestamp {}",
                uncle.timestamp, parent_header.timestamp
            )));
        }
        if !verifier.verify(uncle) {
            return Err(ConsensusError::ConsensusVerifierFailed);
        }
        let uncle_hash = uncle.hash();
        if ineligible.contains(&uncle_hash) {
            return Err(ConsensusError::InvalidUncles(format!("duplicate or ineligible uncle {uncle_hash:?}")));
        }
        ineligible.insert(uncle_hash);
    }

    Ok(())
}

fn rlp_hash(uncles: &[Header]) -> Hash {
    use tiny_keccak::{Hasher, Keccak};
    let encoded = rlp::encode_list(uncles);
    let mut keccak = Keccak::v256();
    let mut output = [0u8; 32];
    keccak.update(&encoded);
    keccak.finalize(&mut output);
    Hash::from(output)
}

#[cfg(test)]
mod tests {
    use super::{rlp_hash, validate_uncles};
    use crate::{arithmetic::calc_difficulty, verifier::AcceptAllVerifier};
    use evmcore_chainspec::ChainConfig;
    use evmcore_state::WorldState;
    use evmcore_trie::StateTrie;
    use evmcore_types::{Block, Header};

    #[test]
    fn rejects_uncle_hash_mismatch() {
        let cfg = ChainConfig::mainnet();
        let state: WorldState<StateTrie> = WorldState::new(StateTrie::default(), 8);
        let mut header = Header { number: 5, ..Header::default() };
        header.uncles_hash = evmcore_primitives::Hash::zero();
        let block = Block::new(header, Vec::new(), vec![Header { number: 2, ..Header::default() }]);
        let err = validate_uncles(&state, &block, &cfg, &mut AcceptAllVerifier).unwrap_err();
        assert!(matches!(err, super::ConsensusError::InvalidUncles(_)));
    }

    #[test]
    fn empty_uncles_with_matching_hash_is_accepted() {
        let cfg = ChainConfig::mainnet();
        let state: WorldState<StateTrie> = WorldState::new(StateTrie::default(), 8);
        let header = Header { number: 5, ..Header::default() };
        let block = Block::new(header, Vec::new(), Vec::new());
        assert!(validate_uncles(&state, &block, &cfg, &mut AcceptAllVerifier).is_ok());
    }

    /// `recent_uncles` entries at exactly `header.number - max_uncle_depth`
    /// are still ineligible: the lower bound is inclusive, mirroring the
    /// source's `blknum >= state.block_number - MAX_UNCLE_DEPTH`.
    #[test]
    fn uncle_already_included_at_the_lower_window_boundary_is_rejected() {
        let cfg = ChainConfig::mainnet();
        let mut state: WorldState<StateTrie> = WorldState::new(StateTrie::default(), 16);

        let great_grandparent = Header { number: 7, timestamp: 7_000, ..Header::default() };
        let grandparent = Header {
            number: 8,
            timestamp: 7_015,
            prevhash: great_grandparent.hash(),
            difficulty: calc_difficulty(&great_grandparent, 0, 7_015, &cfg),
            ..Header::default()
        };
        let parent = Header {
            number: 9,
            timestamp: 7_030,
            prevhash: grandparent.hash(),
            difficulty: calc_difficulty(&grandparent, 0, 7_030, &cfg),
            ..Header::default()
        };
        state.prev_headers.push_front(great_grandparent.clone());
        state.prev_headers.push_front(grandparent);
        state.prev_headers.push_front(parent);

        let uncle = Header {
            number: great_grandparent.number + 1,
            timestamp: great_grandparent.timestamp + 5,
            prevhash: great_grandparent.hash(),
            difficulty: calc_difficulty(&great_grandparent, 0, great_grandparent.timestamp + 5, &cfg),
            ..Header::default()
        };
        // header.number(10) - max_uncle_depth(6) = 4: the inclusive lower
        // bound of the ineligibility window.
        state.recent_uncles.insert(4, vec![uncle.hash()]);

        let mut header = Header { number: 10, ..Header::default() };
        header.uncles_hash = rlp_hash(std::slice::from_ref(&uncle));
        let block = Block::new(header, Vec::new(), vec![uncle]);

        let err = validate_uncles(&state, &block, &cfg, &mut AcceptAllVerifier).unwrap_err();
        assert!(matches!(err, super::ConsensusError::InvalidUncles(_)));
    }
}
