// Copyright (c) 2022 MASSA LABS <info@massa.net>

use super::tools::{assert_is_tip, make_random_tangle, selector_for, selector_with, tips_for};
use crate::{start_tip_selection, PermissiveLedgerValidator};
use assert_matches::assert_matches;
use serial_test::serial;
use std::sync::Arc;
use std::thread;
use tangle_db_exports::TangleDb;
use tangle_models::TransactionId;
use tangle_test_framework::{
    create_transaction, init_tracing, make_chain, make_star, new_tangle, random_transaction_id,
    store_transaction,
};
use tangle_tipselection_exports::test_exports::MockLedgerValidator;
use tangle_tipselection_exports::{EntryPointKind, TipSelConfig, TipSelError, TransactionsToApprove};

#[test]
#[serial]
fn test_genesis_only_tangle() {
    init_tracing();
    let db = new_tangle();
    let selector = selector_for(&db);
    let genesis = TransactionId::genesis();
    assert_eq!(
        selector.get_transactions_to_approve(None).unwrap(),
        TransactionsToApprove {
            trunk: genesis,
            branch: genesis
        }
    );
}

#[test]
#[serial]
fn test_chain_selects_last_transaction() {
    init_tracing();
    let db = new_tangle();
    let chain = make_chain(&db, TransactionId::genesis(), 10);
    let selector = selector_for(&db);
    for _ in 0..5 {
        let selected = selector.get_transactions_to_approve(None).unwrap();
        assert_eq!(selected.trunk, chain[9]);
        assert_eq!(selected.branch, chain[9]);
    }
}

#[test]
#[serial]
fn test_walks_end_on_tips() {
    let db = new_tangle();
    let chain = make_chain(&db, TransactionId::genesis(), 10);
    let leaves = make_star(&db, chain[9], 5);
    let selector = selector_for(&db);
    for _ in 0..20 {
        let selected = selector.get_transactions_to_approve(None).unwrap();
        assert!(leaves.contains(&selected.trunk));
        assert!(leaves.contains(&selected.branch));
    }
}

#[test]
#[serial]
fn test_genesis_entry_point() {
    let db = new_tangle();
    let chain = make_chain(&db, TransactionId::genesis(), 10);
    let cfg = TipSelConfig {
        entry_point: EntryPointKind::Genesis,
        ..TipSelConfig::test_default()
    };
    let selector = selector_with(&db, cfg, Arc::new(PermissiveLedgerValidator));
    let selected = selector.get_transactions_to_approve(None).unwrap();
    assert_eq!(selected.trunk, chain[9]);
    assert_eq!(selected.branch, chain[9]);
}

#[test]
#[serial]
fn test_reference_is_honored() {
    let db = new_tangle();
    let chain = make_chain(&db, TransactionId::genesis(), 10);
    let selector = selector_for(&db);
    let selected = selector.get_transactions_to_approve(Some(chain[7])).unwrap();
    assert_eq!(selected.trunk, chain[9]);
    assert_eq!(selected.branch, chain[9]);
}

#[test]
#[serial]
fn test_unreachable_reference_exhausts_attempts() {
    let db = new_tangle();
    make_chain(&db, TransactionId::genesis(), 10);
    let genesis = TransactionId::genesis();
    let outsider = store_transaction(&db, genesis, genesis);
    let selector = selector_for(&db);
    assert_matches!(
        selector.get_transactions_to_approve(Some(outsider)),
        Err(TipSelError::SelectionExhausted(id)) if id == outsider
    );
}

#[test]
#[serial]
fn test_unknown_reference_is_missing_data() {
    let db = new_tangle();
    make_chain(&db, TransactionId::genesis(), 3);
    let selector = selector_for(&db);
    let unknown = random_transaction_id();
    assert_matches!(
        selector.get_transactions_to_approve(Some(unknown)),
        Err(TipSelError::MissingData(id)) if id == unknown
    );
}

#[test]
#[serial]
fn test_inconsistent_tips_are_refused() {
    let db = new_tangle();
    make_chain(&db, TransactionId::genesis(), 10);
    let mut ledger = MockLedgerValidator::new();
    ledger
        .expect_update_diff()
        .returning(|approved, _, tip| {
            approved.insert(*tip);
            Ok(true)
        });
    ledger.expect_check_consistency().returning(|_| Ok(false));
    let selector = selector_with(&db, TipSelConfig::test_default(), Arc::new(ledger));
    assert_matches!(
        selector.get_transactions_to_approve(None),
        Err(TipSelError::TipsNotConsistent)
    );
}

#[test]
#[serial]
fn test_confidences() {
    let db = new_tangle();
    let genesis = TransactionId::genesis();
    let chain = make_chain(&db, genesis, 10);
    let outsider = store_transaction(&db, genesis, genesis);
    let selector = selector_for(&db);

    assert!(selector.get_confidences(&[]).unwrap().is_empty());
    assert_eq!(
        selector
            .get_confidences(&[chain[6], outsider, chain[9]])
            .unwrap(),
        vec![1.0, 0.0, 1.0]
    );
    assert_matches!(
        selector.get_confidences(&[random_transaction_id()]),
        Err(TipSelError::MissingData(_))
    );
}

#[test]
#[serial]
fn test_confidences_split_between_tips() {
    let db = new_tangle();
    let chain = make_chain(&db, TransactionId::genesis(), 10);
    let leaves = make_star(&db, chain[9], 4);
    let selector = selector_for(&db);
    let confidences = selector.get_confidences(&leaves).unwrap();
    assert_eq!(confidences.len(), leaves.len());
    assert!(confidences.iter().all(|c| (0.0..=1.0).contains(c)));
    // each walk ends on exactly one leaf
    let total: f64 = confidences.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
#[serial]
fn test_concurrent_requests() {
    let db = new_tangle();
    let chain = make_chain(&db, TransactionId::genesis(), 10);
    let leaves = make_star(&db, chain[9], 3);
    let selector = selector_for(&db);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let selector = selector.clone();
            let leaves = leaves.clone();
            thread::spawn(move || {
                for _ in 0..5 {
                    let selected = selector.get_transactions_to_approve(None).unwrap();
                    assert!(leaves.contains(&selected.trunk));
                    assert!(leaves.contains(&selected.branch));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_invalid_config_is_refused() {
    let db = new_tangle();
    let cfg = TipSelConfig {
        alpha: -1.0,
        ..TipSelConfig::test_default()
    };
    assert_matches!(
        start_tip_selection(cfg, db.clone(), tips_for(&db), Arc::new(PermissiveLedgerValidator))
            .err(),
        Some(TipSelError::InvalidConfig(_))
    );
}

#[test]
#[serial]
fn test_walks_reach_tips_beyond_future_set_cap() {
    // root <- branch_i <- leaf_i, ten times
    let db = new_tangle();
    let genesis = TransactionId::genesis();
    let root = store_transaction(&db, genesis, genesis);
    let leaves: Vec<TransactionId> = (0..10)
        .map(|_| {
            let branch = store_transaction(&db, root, root);
            store_transaction(&db, branch, branch)
        })
        .collect();
    let cfg = TipSelConfig {
        cw_threshold: 5,
        max_future_set_size: 5,
        max_subtangle_size: 75,
        ..TipSelConfig::test_default()
    };
    let selector = selector_with(&db, cfg, Arc::new(PermissiveLedgerValidator));
    for _ in 0..20 {
        let selected = selector.get_transactions_to_approve(None).unwrap();
        for id in [selected.trunk, selected.branch] {
            assert!(leaves.contains(&id));
            assert_is_tip(&db, &id);
        }
    }
}

#[test]
#[serial]
fn test_walks_end_on_tips_of_large_tangle() {
    let db = new_tangle();
    let ids = make_random_tangle(&db, 300, 10);
    assert!(ids.len() > TipSelConfig::test_default().max_future_set_size);
    for entry_point in [EntryPointKind::CumulativeWeightThreshold, EntryPointKind::Genesis] {
        let cfg = TipSelConfig {
            entry_point,
            ..TipSelConfig::test_default()
        };
        let selector = selector_with(&db, cfg, Arc::new(PermissiveLedgerValidator));
        for _ in 0..10 {
            let selected = selector.get_transactions_to_approve(None).unwrap();
            assert_is_tip(&db, &selected.trunk);
            assert_is_tip(&db, &selected.branch);
        }
    }
}

#[test]
#[serial]
fn test_requests_while_tangle_grows() {
    let db = new_tangle();
    let chain = make_chain(&db, TransactionId::genesis(), 10);
    let tips = tips_for(&db);
    let selector = start_tip_selection(
        TipSelConfig::test_default(),
        db.clone(),
        tips.clone(),
        Arc::new(PermissiveLedgerValidator),
    )
    .unwrap();

    let writer = {
        let db = db.clone();
        let tips = tips.clone();
        let mut previous = chain[9];
        thread::spawn(move || {
            for _ in 0..50 {
                let id = store_transaction(&db, previous, previous);
                tips.add_tip(id);
                tips.set_solid(&id);
                tips.remove_tip(&previous);

                let mut pending = create_transaction(previous, id);
                pending.solid = false;
                let pending_id = pending.id;
                db.store(pending).unwrap();
                tips.add_tip(pending_id);

                previous = id;
            }
        })
    };
    let readers: Vec<_> = (0..3)
        .map(|_| {
            let selector = selector.clone();
            let db = db.clone();
            thread::spawn(move || {
                for _ in 0..10 {
                    let selected = selector.get_transactions_to_approve(None).unwrap();
                    for id in [selected.trunk, selected.branch] {
                        assert!(db.transaction_exists(&id).unwrap());
                        assert!(db.load_transaction(&id).unwrap().solid);
                    }
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert!(tips.solid_size() >= 1);
    assert!(tips.non_solid_size() >= 1);
}
