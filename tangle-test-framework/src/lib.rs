// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Helpers shared by the test suites: random ids and small tangle shapes
//! stored in a `MemoryTangle`.
//!
//! Every created transaction gets an arrival time strictly greater than the
//! previous one, so creation order is also recency order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tangle_db_exports::TangleDbConfig;
use tangle_db_worker::MemoryTangle;
use tangle_hash::Hash;
use tangle_models::{Address, Transaction, TransactionId};
use tracing_subscriber::filter::LevelFilter;

/// Minimum weight magnitude of the test tangles
pub const TEST_MIN_WEIGHT_MAGNITUDE: u8 = 1;

static ARRIVAL_CLOCK: AtomicU64 = AtomicU64::new(1_000);

/// Installs a DEBUG subscriber; later calls are ignored
pub fn init_tracing() {
    use tracing_subscriber::prelude::*;
    let tracing_layer = tracing_subscriber::fmt::layer()
        .with_test_writer()
        .with_filter(LevelFilter::DEBUG);
    let _ = tracing_subscriber::registry().with(tracing_layer).try_init();
}

/// Empty tangle (genesis only)
pub fn new_tangle() -> Arc<MemoryTangle> {
    Arc::new(MemoryTangle::new(TangleDbConfig {
        min_weight_magnitude: TEST_MIN_WEIGHT_MAGNITUDE,
    }))
}

/// Fresh id that no test will collide with
pub fn random_transaction_id() -> TransactionId {
    TransactionId::new(Hash::from_bytes(&rand::random::<[u8; 32]>()))
}

/// Solid single-transaction bundle approving `trunk` and `branch`
pub fn create_transaction(trunk: TransactionId, branch: TransactionId) -> Transaction {
    let id = random_transaction_id();
    let now = ARRIVAL_CLOCK.fetch_add(1, Ordering::Relaxed);
    Transaction {
        id,
        trunk,
        branch,
        bundle: *id.get_hash(),
        current_index: 0,
        last_index: 0,
        value: 0,
        address: Address::null(),
        solid: true,
        arrival_time: now,
        attachment_timestamp: now,
        weight_magnitude: TEST_MIN_WEIGHT_MAGNITUDE,
        placeholder: false,
    }
}

/// Creates and stores a transaction, returns its id
pub fn store_transaction(
    db: &MemoryTangle,
    trunk: TransactionId,
    branch: TransactionId,
) -> TransactionId {
    let tx = create_transaction(trunk, branch);
    let id = tx.id;
    db.store(tx).unwrap();
    id
}

/// `len` transactions, each approving the previous one (the first approves `from`).
/// Returned oldest first.
pub fn make_chain(db: &MemoryTangle, from: TransactionId, len: usize) -> Vec<TransactionId> {
    let mut ids = Vec::with_capacity(len);
    let mut previous = from;
    for _ in 0..len {
        previous = store_transaction(db, previous, previous);
        ids.push(previous);
    }
    ids
}

/// `count` transactions all approving `center`
pub fn make_star(db: &MemoryTangle, center: TransactionId, count: usize) -> Vec<TransactionId> {
    (0..count)
        .map(|_| store_transaction(db, center, center))
        .collect()
}

/// Bundle of `len` transactions, returned tail first. The last one approves
/// `trunk` and `branch`, every other one approves its successor and `branch`.
pub fn make_bundle(
    db: &MemoryTangle,
    trunk: TransactionId,
    branch: TransactionId,
    len: u32,
) -> Vec<TransactionId> {
    assert!(len > 0, "a bundle holds at least one transaction");
    let bundle = Hash::from_bytes(&rand::random::<[u8; 32]>());
    let mut ids = Vec::with_capacity(len as usize);
    let mut next = trunk;
    for index in (0..len).rev() {
        let mut tx = create_transaction(next, branch);
        tx.bundle = bundle;
        tx.current_index = index;
        tx.last_index = len - 1;
        next = tx.id;
        ids.push(tx.id);
        db.store(tx).unwrap();
    }
    ids.reverse();
    ids
}
