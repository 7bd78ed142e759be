use evmcore_chainspec::ChainConfig;
use evmcore_primitives::U256;
use evmcore_types::Header;

/// Gas-limit recomputation (`spec.md` §4.1). Pure: no I/O, no borrow of
/// any state.
#[must_use]
pub fn calc_gaslimit(parent: &Header, cfg: &ChainConfig) -> u64 {
    let decay = parent.gas_limit / cfg.gaslimit_ema_factor;
    let contrib = u64::try_from(
        u128::from(parent.gas_used) * u128::from(cfg.blklim_factor_nom) / u128::from(cfg.blklim_factor_den)
            / u128::from(cfg.gaslimit_ema_factor),
    )
    .unwrap_or(u64::MAX);

    let candidate = parent.gas_limit.saturating_sub(decay).saturating_add(contrib);
    let gl = candidate.max(cfg.min_gas_limit);

    if gl < cfg.genesis_gas_limit {
        cfg.genesis_gas_limit.min(parent.gas_limit.saturating_add(decay))
    } else {
        gl
    }
}

/// Gas-limit validity check (`spec.md` §4.1).
#[must_use]
pub fn check_gaslimit(parent: &Header, candidate_gas_limit: u64, cfg: &ChainConfig) -> bool {
    let max_adjustment = parent.gas_limit / cfg.gaslimit_adjmax_factor;
    let delta = candidate_gas_limit.abs_diff(parent.gas_limit);
    delta <= max_adjustment && candidate_gas_limit >= cfg.min_gas_limit
}

/// Difficulty recomputation (`spec.md` §4.1), including the difficulty
/// bomb. `parent_uncle_count` is the number of uncles the parent block
/// itself included: `spec.md`'s language-neutral formula reads
/// `len(parent.uncles)`, but `Header` alone (the type this function's
/// pinned external signature is built on) does not carry that count, so
/// callers thread it through from `WorldState::recent_uncles` — see
/// `DESIGN.md`'s Open Question log.
#[must_use]
pub fn calc_difficulty(parent: &Header, parent_uncle_count: usize, timestamp: u64, cfg: &ChainConfig) -> U256 {
    let offset = parent.difficulty / cfg.block_diff_factor;
    let time_delta = timestamp.saturating_sub(parent.timestamp);

    let sign: i64 = if cfg.is_metropolis(parent.number + 1) {
        let term = i64::try_from(time_delta / cfg.metropolis_diff_adjustment_cutoff).unwrap_or(i64::MAX);
        (i64::try_from(parent_uncle_count).unwrap_or(i64::MAX) - term).max(-99)
    } else if cfg.is_homestead(parent.number + 1) {
        let term = i64::try_from(time_delta / cfg.homestead_diff_adjustment_cutoff).unwrap_or(i64::MAX);
        (1 - term).max(-99)
    } else if time_delta < cfg.diff_adjustment_cutoff {
        1
    } else {
        -1
    };

    let base = if sign >= 0 {
        parent.difficulty.saturating_add(offset * U256::from(sign as u64))
    } else {
        parent.difficulty.saturating_sub(offset * U256::from((-sign) as u64))
    };
    let floor = parent.difficulty.min(cfg.min_diff);
    let mut difficulty = base.max(floor);

    let period = (parent.number + 1) / cfg.expdiff_period;
    if period >= cfg.expdiff_free_periods {
        let bomb = U256::from(1u64) << ((period - cfg.expdiff_free_periods) as usize);
        difficulty = difficulty.saturating_add(bomb).max(cfg.min_diff);
    }

    difficulty
}

#[cfg(test)]
mod tests {
    use super::{calc_difficulty, calc_gaslimit, check_gaslimit};
    use evmcore_chainspec::ChainConfig;
    use evmcore_types::Header;

    #[test]
    fn gaslimit_output_is_accepted_by_its_own_check() {
        let cfg = ChainConfig::mainnet();
        let parent = Header { gas_limit: 8_000_000, gas_used: 7_000_000, ..Header::default() };
        let gl = calc_gaslimit(&parent, &cfg);
        assert!(check_gaslimit(&parent, gl, &cfg));
    }

    #[test]
    fn difficulty_bomb_adds_exponential_term_once_active() {
        let cfg = ChainConfig::mainnet();
        let bomb_start_number = cfg.expdiff_period * (cfg.expdiff_free_periods + 3) - 1;
        let parent =
            Header { number: bomb_start_number, difficulty: 1_000_000_000u64.into(), timestamp: 1000, ..Header::default() };
        let without_bomb_period = (parent.number + 1) / cfg.expdiff_period;
        assert!(without_bomb_period >= cfg.expdiff_free_periods);

        let d = calc_difficulty(&parent, 0, parent.timestamp + 5, &cfg);
        let ema_only = {
            let offset = parent.difficulty / cfg.block_diff_factor;
            parent.difficulty + offset
        };
        assert!(d > ema_only);
    }
}
