use crate::signature::Signature;
use evmcore_primitives::{Address, Bytes, U256};
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

/// A transaction as it appears inside a block: the unsigned payload plus
/// its ECDSA signature. Unlike the RPC-facing `TypedTransaction` family,
/// this core only ever sees the one shape the state-transition function
/// cares about; EIP-1559/2930 fee markets are outside this spec's model.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "with-codec", derive(parity_scale_codec::Encode, parity_scale_codec::Decode))]
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Transaction {
    pub nonce: u64,
    pub gasprice: U256,
    pub startgas: u64,
    /// `None` models both contract creation and the original wire
    /// convention of an empty `to` string.
    pub to: Option<Address>,
    pub value: U256,
    pub data: Bytes,
    pub signature: Signature,
}

impl Transaction {
    /// `true` when this transaction creates a contract (`to` unset).
    #[must_use]
    pub const fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}

/// RLP field order: `(nonce, gasprice, startgas, to, value, data, v, r, s)`.
/// `to` encodes as the empty string for contract creation, preserving the
/// original wire convention of an empty (not absent) recipient.
impl Encodable for Transaction {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(9);
        s.append(&self.nonce);
        s.append(&self.gasprice);
        s.append(&self.startgas);
        match self.to {
            Some(addr) => {
                s.append(&addr);
            }
            None => {
                s.append_empty_data();
            }
        }
        s.append(&self.value);
        s.append(&self.data);
        s.append(&self.signature.v);
        s.append(&self.signature.r);
        s.append(&self.signature.s);
    }
}

impl Decodable for Transaction {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 9 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        let to_rlp = rlp.at(3)?;
        let to = if to_rlp.is_empty() { None } else { Some(to_rlp.as_val()?) };
        Ok(Self {
            nonce: rlp.val_at(0)?,
            gasprice: rlp.val_at(1)?,
            startgas: rlp.val_at(2)?,
            to,
            value: rlp.val_at(4)?,
            data: rlp.val_at(5)?,
            signature: Signature {
                v: rlp.val_at(6)?,
                r: rlp.val_at(7)?,
                s: rlp.val_at(8)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Transaction;
    use crate::signature::{RecoveryId, Signature};
    use evmcore_primitives::{Address, U256};

    fn sample(to: Option<Address>) -> Transaction {
        Transaction {
            nonce: 0,
            gasprice: U256::from(1),
            startgas: 21_000,
            to,
            value: U256::from(100),
            data: Vec::new().into(),
            signature: Signature { v: RecoveryId::new(27), r: U256::from(1), s: U256::from(2) },
        }
    }

    #[test]
    fn round_trips_call_through_rlp() {
        let tx = sample(Some(Address::repeat_byte(9)));
        let decoded: Transaction = rlp::decode(&rlp::encode(&tx)).unwrap();
        assert_eq!(tx, decoded);
    }

    #[test]
    fn round_trips_contract_creation_with_empty_to() {
        let tx = sample(None);
        let decoded: Transaction = rlp::decode(&rlp::encode(&tx)).unwrap();
        assert!(decoded.is_contract_creation());
        assert_eq!(tx, decoded);
    }
}
