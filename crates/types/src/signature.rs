use evmcore_primitives::{H520, U256};

/// An ECDSA signature over a transaction's signing hash.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-codec", derive(parity_scale_codec::Encode, parity_scale_codec::Decode))]
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Signature {
    /// Recovery id; also encodes the chain id for EIP-155 transactions.
    pub v: RecoveryId,
    pub r: U256,
    pub s: U256,
}

impl Signature {
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_raw_signature(&self, output: &mut [u8; 65]) {
        self.r.to_big_endian(&mut output[0..32]);
        self.s.to_big_endian(&mut output[32..64]);
        output[64] = self.v.y_parity() as u8;
    }

    /// EIP-2 low-S check, required from Homestead onward.
    #[must_use]
    pub fn is_low_s(&self) -> bool {
        // secp256k1 group order, halved.
        const HALF_N: U256 = U256([
            0xDFE9_2F46_681B_20A0,
            0x5D57_6E73_57A4_501D,
            0xFFFF_FFFF_FFFF_FFFF,
            0x7FFF_FFFF_FFFF_FFFF,
        ]);
        self.s <= HALF_N
    }
}

impl From<Signature> for H520 {
    fn from(value: Signature) -> Self {
        let mut output = [0u8; 65];
        value.to_raw_signature(&mut output);
        Self(output)
    }
}

/// Encodes the y-parity of the signature and, for EIP-155 transactions, the chain id.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-codec", derive(parity_scale_codec::Encode, parity_scale_codec::Decode))]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecoveryId(pub u64);

impl RecoveryId {
    #[must_use]
    pub const fn new(v: u64) -> Self {
        Self(v)
    }

    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// 0 for even y, 1 for odd y; handles both legacy (27/28) and EIP-155 (`35 + 2*chain_id + parity`) encodings.
    #[must_use]
    pub const fn y_parity(self) -> u64 {
        let v = self.0;
        if v >= 35 {
            return (v - 35) & 1;
        }
        if v == 27 || v == 28 {
            return v - 27;
        }
        v & 1
    }

    #[must_use]
    pub const fn chain_id(self) -> Option<u64> {
        if self.0 >= 35 {
            Some((self.0 - 35) >> 1)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_eip155(self) -> bool {
        self.chain_id().is_some()
    }
}

impl rlp::Encodable for RecoveryId {
    fn rlp_append(&self, s: &mut rlp::RlpStream) {
        self.0.rlp_append(s);
    }
}

impl rlp::Decodable for RecoveryId {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        Ok(Self(rlp.as_val()?))
    }
}

#[cfg(test)]
mod tests {
    use super::RecoveryId;

    #[test]
    fn y_parity_handles_legacy_and_eip155() {
        assert_eq!(RecoveryId::new(27).y_parity(), 0);
        assert_eq!(RecoveryId::new(28).y_parity(), 1);
        assert_eq!(RecoveryId::new(37).y_parity(), 0);
        assert_eq!(RecoveryId::new(38).y_parity(), 1);
        assert_eq!(RecoveryId::new(37).chain_id(), Some(1));
    }
}
