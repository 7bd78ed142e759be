pub use ethbloom::{Bloom, BloomInput, BloomRef};

use crate::eth_hash::{Address, Hash};

/// Accumulates a log's address and topics into a 2048-bit bloom filter,
/// matching the contribution rule each receipt/block bloom is built from.
pub fn accrue_log(bloom: &mut Bloom, address: &Address, topics: &[Hash]) {
    bloom.accrue(BloomInput::Raw(address.as_bytes()));
    for topic in topics {
        bloom.accrue(BloomInput::Raw(topic.as_bytes()));
    }
}

#[cfg(test)]
mod tests {
    use super::{accrue_log, Bloom};
    use crate::eth_hash::{Address, Hash};

    #[test]
    fn accrue_sets_bits_for_address_and_topics() {
        let mut bloom = Bloom::default();
        let addr = Address::repeat_byte(0x11);
        let topic = Hash::repeat_byte(0x22);
        accrue_log(&mut bloom, &addr, &[topic]);
        assert!(bloom.contains_input(super::BloomInput::Raw(addr.as_bytes())));
        assert!(bloom.contains_input(super::BloomInput::Raw(topic.as_bytes())));
    }
}
