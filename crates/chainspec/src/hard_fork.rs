/// The closed set of protocol eras this core knows about. Ordered so that
/// `a.enabled(b)` reads as "is `a`'s ruleset active once `b` has forked in".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "with-codec", derive(parity_scale_codec::Encode, parity_scale_codec::Decode, scale_info::TypeInfo))]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hardfork {
    Frontier,
    Homestead,
    Metropolis,
}

impl Hardfork {
    /// `true` when `self`'s rules are in force at a block where `other` is current.
    #[must_use]
    pub const fn enabled(self, other: Self) -> bool {
        self as u8 <= other as u8
    }
}

#[cfg(test)]
mod tests {
    use super::Hardfork;

    #[test]
    fn orders_frontier_before_homestead_before_metropolis() {
        assert!(Hardfork::Frontier.enabled(Hardfork::Metropolis));
        assert!(!Hardfork::Metropolis.enabled(Hardfork::Homestead));
        assert!(Hardfork::Homestead.enabled(Hardfork::Homestead));
    }
}
