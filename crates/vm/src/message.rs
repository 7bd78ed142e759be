use evmcore_primitives::{Address, Bytes, U256};
use tiny_keccak::{Hasher, Keccak};

/// The call/create request the VM-Environment-Façade hands to the
/// out-of-scope VM (`spec.md` §4.5, §4.6 step 5). `to == None` means
/// contract creation; `code_address` is the account whose code actually
/// runs, which can differ from `to` once `DELEGATECALL`-style dispatch is
/// layered on top (out of scope here, but the field is kept so the VM
/// trait doesn't need to change shape to add it later).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: Address,
    pub to: Option<Address>,
    pub value: U256,
    pub gas: u64,
    pub data: Bytes,
    pub code_address: Option<Address>,
}

impl Message {
    #[must_use]
    pub fn call(from: Address, to: Address, value: U256, gas: u64, data: Bytes) -> Self {
        Self { from, to: Some(to), value, gas, data, code_address: Some(to) }
    }

    #[must_use]
    pub fn create(from: Address, value: U256, gas: u64, init_code: Bytes) -> Self {
        Self { from, to: None, value, gas, data: init_code, code_address: None }
    }

    #[must_use]
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}

/// `keccak256(rlp([sender, nonce]))[12:]` — the deterministic contract
/// address a `CREATE` message is assigned, taken from
/// `original_source/ethereum/utils.py::mk_contract_address` since
/// `spec.md` needs the result but does not spell out the formula
/// (`SPEC_FULL.md` §4).
#[must_use]
pub fn contract_address(sender: &Address, nonce: u64) -> Address {
    let mut stream = rlp::RlpStream::new_list(2);
    stream.append(sender);
    stream.append(&nonce);
    let encoded = stream.out();

    let mut keccak = Keccak::v256();
    let mut digest = [0u8; 32];
    keccak.update(&encoded);
    keccak.finalize(&mut digest);

    Address::from_slice(&digest[12..])
}

#[cfg(test)]
mod tests {
    use super::contract_address;
    use evmcore_primitives::Address;

    #[test]
    fn contract_address_is_deterministic_and_nonce_sensitive() {
        let sender = Address::repeat_byte(0xAB);
        let a = contract_address(&sender, 0);
        let b = contract_address(&sender, 1);
        assert_ne!(a, b);
        assert_eq!(a, contract_address(&sender, 0));
    }
}
