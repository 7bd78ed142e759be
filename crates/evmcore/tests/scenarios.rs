//! End-to-end scenarios exercising the block state-transition core as a
//! whole, through the public `evmcore` façade only.

use evmcore::{
    apply_block, apply_transaction, calc_difficulty, AcceptAllVerifier, Address, Block, BlockError, BlockMode,
    ChainConfig, ConsensusError, Header, ProcessorError, RecoveryId, Signature, SimpleTransferVm, StateTrie,
    Transaction, Uncle, WorldState, U256,
};

fn low_s_signature() -> Signature {
    Signature { v: RecoveryId::new(27), r: U256::from(1), s: U256::from(1) }
}

fn one_eth() -> U256 {
    U256::from(10u64).pow(U256::from(18))
}

fn mainnet_state() -> WorldState<StateTrie> {
    let mut state = WorldState::new(StateTrie::default(), 16);
    state.gas_limit = 10_000_000;
    state.block_coinbase = Address::repeat_byte(0xC0);
    state
}

fn uncles_hash(uncles: &[Uncle]) -> evmcore::Hash {
    use tiny_keccak::{Hasher, Keccak};
    let encoded = rlp::encode_list(uncles);
    let mut keccak = Keccak::v256();
    let mut out = [0u8; 32];
    keccak.update(&encoded);
    keccak.finalize(&mut out);
    evmcore::Hash::from(out)
}

/// Scenario 1: a plain value transfer succeeds, debits the sender by value
/// plus gas, credits the recipient and the coinbase by the gas spent.
#[test]
fn value_transfer_moves_balance_and_pays_coinbase() {
    let cfg = ChainConfig::mainnet();
    let mut state = mainnet_state();
    let sender = Address::repeat_byte(0xA1);
    let recipient = Address::repeat_byte(0xB1);
    state.add_balance(&sender, one_eth()).unwrap();

    let tx = Transaction {
        nonce: 0,
        gasprice: U256::from(1),
        startgas: 21_000,
        to: Some(recipient),
        value: one_eth() / U256::from(10),
        data: Default::default(),
        signature: low_s_signature(),
    };

    let mut vm = SimpleTransferVm;
    let outcome = apply_transaction(&mut state, &tx, Some(sender), &cfg, &mut vm).unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.gas_used, 21_000);
    assert_eq!(state.balance(&sender).unwrap(), one_eth() - tx.value - U256::from(21_000));
    assert_eq!(state.balance(&recipient).unwrap(), tx.value);
    assert_eq!(state.balance(&state.block_coinbase).unwrap(), U256::from(21_000));
}

/// Scenario 2: a transaction whose nonce does not match the sender's
/// current nonce is rejected and touches no state.
#[test]
fn bad_nonce_is_rejected_and_state_is_unchanged() {
    let cfg = ChainConfig::mainnet();
    let mut state = mainnet_state();
    let sender = Address::repeat_byte(0xA2);
    let recipient = Address::repeat_byte(0xB2);
    state.add_balance(&sender, one_eth()).unwrap();

    let tx = Transaction {
        nonce: 1,
        gasprice: U256::from(1),
        startgas: 21_000,
        to: Some(recipient),
        value: one_eth() / U256::from(10),
        data: Default::default(),
        signature: low_s_signature(),
    };

    let mut vm = SimpleTransferVm;
    let err = apply_transaction(&mut state, &tx, Some(sender), &cfg, &mut vm).unwrap_err();
    assert!(matches!(err, ProcessorError::InvalidNonce { expected: 0, found: 1 }));
    assert_eq!(state.balance(&sender).unwrap(), one_eth());
    assert_eq!(state.nonce(&sender).unwrap(), 0);
}

/// Scenario 3: `startgas` below the intrinsic requirement is rejected
/// before the VM ever runs.
#[test]
fn undersized_startgas_is_rejected_before_execution() {
    let cfg = ChainConfig::mainnet();
    let mut state = mainnet_state();
    let sender = Address::repeat_byte(0xA3);
    let recipient = Address::repeat_byte(0xB3);
    state.add_balance(&sender, one_eth()).unwrap();

    let tx = Transaction {
        nonce: 0,
        gasprice: U256::from(1),
        startgas: 21_000,
        to: Some(recipient),
        value: U256::zero(),
        data: vec![1u8; 100].into(),
        signature: low_s_signature(),
    };

    let mut vm = SimpleTransferVm;
    let err = apply_transaction(&mut state, &tx, Some(sender), &cfg, &mut vm).unwrap_err();
    assert!(matches!(err, ProcessorError::InsufficientStartGas { .. }));
    assert_eq!(state.nonce(&sender).unwrap(), 0);
}

/// Scenario 4: once the parent's successor block crosses
/// `EXPDIFF_FREE_PERIODS + 3` difficulty-bomb periods, the bomb term adds
/// exactly `2^3` beyond the EMA-adjusted difficulty.
#[test]
fn difficulty_bomb_adds_exactly_two_cubed() {
    let cfg = ChainConfig::mainnet();
    let parent_number = cfg.expdiff_period * (cfg.expdiff_free_periods + 3) - 1;
    let parent = Header {
        number: parent_number,
        difficulty: U256::from(1_000_000_000u64),
        timestamp: 1_000_000,
        ..Header::default()
    };

    let difficulty = calc_difficulty(&parent, 0, parent.timestamp + 10, &cfg);
    let offset = parent.difficulty / cfg.block_diff_factor;
    let ema_only = parent.difficulty + offset;
    assert_eq!(difficulty - ema_only, U256::from(8));
}

/// Scenario 5: a block that includes one eligible uncle is accepted, pays
/// the depth-discounted uncle reward to the uncle's coinbase, and pays the
/// nephew reward (on top of the block reward) to the block's own coinbase.
#[test]
fn eligible_uncle_is_accepted_and_rewarded() {
    let cfg = ChainConfig::mainnet();
    let mut state = mainnet_state();

    let great_grandparent = Header { number: 2, timestamp: 2_000, gas_limit: 8_000_000, ..Header::default() };
    let grandparent = Header {
        number: 3,
        timestamp: 2_015,
        prevhash: great_grandparent.hash(),
        gas_limit: 8_000_000,
        difficulty: calc_difficulty(&great_grandparent, 0, 2_015, &cfg),
        ..Header::default()
    };
    let parent = Header {
        number: 4,
        timestamp: 2_030,
        prevhash: grandparent.hash(),
        gas_limit: 8_000_000,
        difficulty: calc_difficulty(&grandparent, 0, 2_030, &cfg),
        ..Header::default()
    };
    // `push_front` puts the most recent push at index 0, so push oldest
    // first: parent ends up at index 0, grandparent at 1, great-grandparent
    // at 2.
    state.prev_headers.push_front(great_grandparent.clone());
    state.prev_headers.push_front(grandparent.clone());
    state.prev_headers.push_front(parent.clone());

    let uncle_coinbase = Address::repeat_byte(0xD0);
    let uncle = Header {
        number: great_grandparent.number + 1,
        timestamp: great_grandparent.timestamp + 5,
        prevhash: great_grandparent.hash(),
        coinbase: uncle_coinbase,
        gas_limit: 8_000_000,
        difficulty: calc_difficulty(&great_grandparent, 0, great_grandparent.timestamp + 5, &cfg),
        ..Header::default()
    };

    let block_coinbase = Address::repeat_byte(0xFE);
    let mut header = Header {
        number: 5,
        timestamp: 2_045,
        prevhash: parent.hash(),
        coinbase: block_coinbase,
        gas_limit: 8_000_000,
        difficulty: calc_difficulty(&parent, 0, 2_045, &cfg),
        ..Header::default()
    };
    header.uncles_hash = uncles_hash(std::slice::from_ref(&uncle));

    let block = Block::new(header.clone(), Vec::new(), vec![uncle.clone()]);
    let mut vm = SimpleTransferVm;
    let mut verifier = AcceptAllVerifier;
    let receipts = apply_block(&mut state, &block, &[], &cfg, &mut vm, &mut verifier, BlockMode::Create).unwrap();
    assert!(receipts.is_empty());

    let depth = header.number - uncle.number;
    let expected_uncle_reward = cfg.block_reward * U256::from(cfg.uncle_depth_penalty_factor - depth)
        / U256::from(cfg.uncle_depth_penalty_factor);
    assert_eq!(state.balance(&uncle_coinbase).unwrap(), expected_uncle_reward);
    assert_eq!(state.balance(&block_coinbase).unwrap(), cfg.block_reward + cfg.nephew_reward);
}

/// Scenario 6: an uncle hash that already appears in `recent_uncles` for
/// an earlier block is rejected, even though it would otherwise be
/// eligible.
#[test]
fn duplicate_uncle_is_rejected() {
    let cfg = ChainConfig::mainnet();
    let mut state = mainnet_state();

    let great_grandparent = Header { number: 2, timestamp: 2_000, gas_limit: 8_000_000, ..Header::default() };
    let grandparent = Header {
        number: 3,
        timestamp: 2_015,
        prevhash: great_grandparent.hash(),
        gas_limit: 8_000_000,
        difficulty: calc_difficulty(&great_grandparent, 0, 2_015, &cfg),
        ..Header::default()
    };
    let parent = Header {
        number: 4,
        timestamp: 2_030,
        prevhash: grandparent.hash(),
        gas_limit: 8_000_000,
        difficulty: calc_difficulty(&grandparent, 0, 2_030, &cfg),
        ..Header::default()
    };
    state.prev_headers.push_front(great_grandparent.clone());
    state.prev_headers.push_front(grandparent.clone());
    state.prev_headers.push_front(parent.clone());

    // `recent_uncles[2]` already has one entry by the time
    // `validate_uncles` recomputes this uncle's expected difficulty, so
    // its `parent_uncle_count` is 1, not 0.
    let uncle = Header {
        number: great_grandparent.number + 1,
        timestamp: great_grandparent.timestamp + 5,
        prevhash: great_grandparent.hash(),
        gas_limit: 8_000_000,
        difficulty: calc_difficulty(&great_grandparent, 1, great_grandparent.timestamp + 5, &cfg),
        ..Header::default()
    };
    // Already recorded as included 3 blocks ago: ineligible regardless of
    // everything else about it checking out.
    state.recent_uncles.insert(2, vec![uncle.hash()]);

    let mut header = Header {
        number: 5,
        timestamp: 2_045,
        prevhash: parent.hash(),
        gas_limit: 8_000_000,
        difficulty: calc_difficulty(&parent, 0, 2_045, &cfg),
        ..Header::default()
    };
    header.uncles_hash = uncles_hash(std::slice::from_ref(&uncle));

    let block = Block::new(header, Vec::new(), vec![uncle]);
    let mut vm = SimpleTransferVm;
    let mut verifier = AcceptAllVerifier;
    let err = apply_block(&mut state, &block, &[], &cfg, &mut vm, &mut verifier, BlockMode::Create).unwrap_err();
    assert!(matches!(err, BlockError::Consensus(ConsensusError::InvalidUncles(_))));
}
