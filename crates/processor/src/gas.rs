use evmcore_types::Transaction;

/// Base cost of any transaction, before its calldata and creation surcharge.
pub const G_TRANSACTION: u64 = 21_000;
/// Cost per zero byte of calldata.
pub const G_TXDATAZERO: u64 = 4;
/// Cost per non-zero byte of calldata.
pub const G_TXDATANONZERO: u64 = 68;
/// Post-Homestead surcharge for contract-creation transactions.
pub const G_TXCREATE: u64 = 32_000;

/// `spec.md` §4.4 step 3's "intrinsic gas": the minimum `startgas` a
/// transaction must carry before any of it reaches the VM. These byte
/// costs and the creation surcharge are fixed protocol constants, not
/// part of the closed `ChainConfig` enumerated in §6.
#[must_use]
pub fn intrinsic_gas(tx: &Transaction, post_homestead: bool) -> u64 {
    let mut gas = G_TRANSACTION;
    for &byte in tx.data.as_ref() {
        gas += if byte == 0 { G_TXDATAZERO } else { G_TXDATANONZERO };
    }
    if post_homestead && tx.is_contract_creation() {
        gas += G_TXCREATE;
    }
    gas
}

#[cfg(test)]
mod tests {
    use super::intrinsic_gas;
    use evmcore_primitives::{Address, U256};
    use evmcore_types::{RecoveryId, Signature, Transaction};

    fn tx(data: Vec<u8>, to: Option<Address>) -> Transaction {
        Transaction {
            nonce: 0,
            gasprice: U256::from(1),
            startgas: 21_000,
            to,
            value: U256::zero(),
            data: data.into(),
            signature: Signature { v: RecoveryId::new(27), r: U256::from(1), s: U256::from(1) },
        }
    }

    #[test]
    fn zero_and_nonzero_bytes_cost_differently() {
        let zero = intrinsic_gas(&tx(vec![0, 0, 0], Some(Address::zero())), false);
        let nonzero = intrinsic_gas(&tx(vec![1, 2, 3], Some(Address::zero())), false);
        assert_eq!(zero, 21_000 + 3 * 4);
        assert_eq!(nonzero, 21_000 + 3 * 68);
    }

    #[test]
    fn creation_surcharge_only_applies_post_homestead() {
        let creation = tx(Vec::new(), None);
        assert_eq!(intrinsic_gas(&creation, false), 21_000);
        assert_eq!(intrinsic_gas(&creation, true), 21_000 + 32_000);
    }
}
