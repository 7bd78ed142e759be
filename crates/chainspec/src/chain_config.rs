use crate::{consensus_algo::ConsensusAlgo, hard_fork::Hardfork};
use evmcore_primitives::{Address, Bytes, U256};

/// The protocol parameter set `C` referenced throughout `spec.md` §4 and
/// enumerated closed in §6. Every field here is a named constant in the
/// source this core was distilled from; nothing is discovered at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "with-codec", derive(parity_scale_codec::Encode, parity_scale_codec::Decode, scale_info::TypeInfo))]
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ChainConfig {
    // --- fork activation ---
    pub homestead_fork_blknum: u64,
    pub metropolis_fork_blknum: u64,

    // --- Metropolis system contracts ---
    pub metropolis_stateroot_store: Address,
    pub metropolis_blockhash_store: Address,
    pub metropolis_getter_code: Bytes,
    pub metropolis_wraparound: u64,
    pub metropolis_entry_point: Address,

    // --- difficulty recomputation ---
    pub metropolis_diff_adjustment_cutoff: u64,
    pub homestead_diff_adjustment_cutoff: u64,
    pub diff_adjustment_cutoff: u64,
    pub block_diff_factor: U256,
    pub min_diff: U256,
    pub expdiff_period: u64,
    pub expdiff_free_periods: u64,

    // --- gas-limit recomputation ---
    pub gaslimit_ema_factor: u64,
    pub gaslimit_adjmax_factor: u64,
    pub blklim_factor_nom: u64,
    pub blklim_factor_den: u64,
    pub min_gas_limit: u64,
    pub genesis_gas_limit: u64,

    // --- rewards ---
    pub block_reward: U256,
    pub nephew_reward: U256,
    pub uncle_depth_penalty_factor: u64,

    // --- uncle bookkeeping ---
    pub max_uncle_depth: u64,
    pub max_uncles: usize,

    // --- gas refunds ---
    pub gsuiciderefund: u64,

    // --- consensus dispatch ---
    pub consensus_algo: ConsensusAlgo,
}

impl ChainConfig {
    /// Parameters matching the pre-Metropolis-era mainnet this core was
    /// distilled from, suitable as a starting point for tests and for
    /// callers that only need the default numeric constants.
    #[must_use]
    pub fn mainnet() -> Self {
        Self {
            homestead_fork_blknum: 1_150_000,
            metropolis_fork_blknum: 4_370_000,
            metropolis_stateroot_store: Address::repeat_byte(0),
            metropolis_blockhash_store: Address::repeat_byte(0),
            metropolis_getter_code: Bytes::new(),
            metropolis_wraparound: 256,
            metropolis_entry_point: Address::repeat_byte(0),
            metropolis_diff_adjustment_cutoff: 9,
            homestead_diff_adjustment_cutoff: 10,
            diff_adjustment_cutoff: 13,
            block_diff_factor: U256::from(2048),
            min_diff: U256::from(131_072),
            expdiff_period: 100_000,
            expdiff_free_periods: 2,
            gaslimit_ema_factor: 1024,
            gaslimit_adjmax_factor: 1024,
            blklim_factor_nom: 3,
            blklim_factor_den: 2,
            min_gas_limit: 5000,
            genesis_gas_limit: 4_712_388,
            block_reward: U256::from(5_000_000_000_000_000_000u64),
            nephew_reward: U256::from(5_000_000_000_000_000_000u64) / U256::from(32),
            uncle_depth_penalty_factor: 8,
            max_uncle_depth: 6,
            max_uncles: 2,
            gsuiciderefund: 24_000,
            consensus_algo: ConsensusAlgo::PoW,
        }
    }

    #[must_use]
    pub const fn is_homestead(&self, block_number: u64) -> bool {
        block_number >= self.homestead_fork_blknum
    }

    #[must_use]
    pub const fn is_metropolis(&self, block_number: u64) -> bool {
        block_number >= self.metropolis_fork_blknum
    }

    /// `true` at the exact block the Metropolis system contracts must be installed.
    #[must_use]
    pub const fn is_metropolis_activation_block(&self, block_number: u64) -> bool {
        block_number == self.metropolis_fork_blknum
    }

    #[must_use]
    pub const fn hardfork_at(&self, block_number: u64) -> Hardfork {
        if self.is_metropolis(block_number) {
            Hardfork::Metropolis
        } else if self.is_homestead(block_number) {
            Hardfork::Homestead
        } else {
            Hardfork::Frontier
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ChainConfig;

    #[test]
    fn fork_predicates_respect_thresholds() {
        let cfg = ChainConfig::mainnet();
        assert!(!cfg.is_homestead(0));
        assert!(cfg.is_homestead(cfg.homestead_fork_blknum));
        assert!(!cfg.is_metropolis(cfg.homestead_fork_blknum));
        assert!(cfg.is_metropolis(cfg.metropolis_fork_blknum));
    }
}
