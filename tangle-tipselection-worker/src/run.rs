// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::entry_point::{CumulativeWeightEntryPointSelector, GenesisEntryPointSelector};
use crate::rating::CumulativeWeightCalculator;
use crate::reference_checker::ReferenceCheckerImpl;
use crate::starting_tip::ConnectedComponentsStartingTipSelector;
use crate::tail_finder::TailFinderImpl;
use crate::tip_selector::TipSelectorImpl;
use crate::walker::WalkerAlpha;
use parking_lot::Mutex;
use std::sync::Arc;
use tangle_db_exports::TangleDb;
use tangle_tips::TipsCache;
use tangle_tipselection_exports::{
    EntryPointKind, EntryPointSelector, LedgerValidator, TipSelConfig, TipSelResult, TipSelector,
};
use tracing::info;

/// Assembles the tip selection engine over a tangle, its tip cache and a ledger validator.
///
/// # Arguments
/// * `cfg`: tip selection configuration, checked before anything is built
/// * `db`: read access to the tangle
/// * `tips`: tip cache fed by the node, sampled to find starting tips
/// * `ledger`: balance validation used during walks
///
/// # Returns
/// A controller that can be cloned and shared between threads
pub fn start_tip_selection(
    cfg: TipSelConfig,
    db: Arc<dyn TangleDb>,
    tips: Arc<TipsCache>,
    ledger: Arc<dyn LedgerValidator>,
) -> TipSelResult<Box<dyn TipSelector>> {
    cfg.check()?;

    let rating_calculator = Arc::new(CumulativeWeightCalculator::new(
        db.clone(),
        cfg.max_future_set_size,
        cfg.max_subtangle_size,
    ));
    let tail_finder = Arc::new(TailFinderImpl::new(db.clone()));
    let entry_point_selector: Arc<dyn EntryPointSelector> = match cfg.entry_point {
        EntryPointKind::Genesis => Arc::new(GenesisEntryPointSelector),
        EntryPointKind::CumulativeWeightThreshold => {
            let starting_tip_selector = Arc::new(ConnectedComponentsStartingTipSelector::new(
                db.clone(),
                tips,
                cfg.starting_tip_sample_size,
            ));
            Arc::new(CumulativeWeightEntryPointSelector::new(
                db.clone(),
                starting_tip_selector,
                rating_calculator.clone(),
                tail_finder.clone(),
                cfg.cw_threshold,
                cfg.max_subtangle_size,
                cfg.backtrack,
            ))
        }
    };
    let walker = Arc::new(WalkerAlpha::new(db.clone(), tail_finder, cfg.alpha));
    let reference_checker = Arc::new(ReferenceCheckerImpl::new(db.clone()));

    info!(
        "tip selection started with {:?} entry points and alpha {}",
        cfg.entry_point, cfg.alpha
    );
    Ok(Box::new(TipSelectorImpl {
        cfg,
        db,
        entry_point_selector,
        rating_calculator,
        walker,
        reference_checker,
        ledger,
        selection_lock: Arc::new(Mutex::new(())),
    }))
}
