// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::dag::{connected_components, find_recent_transactions};
use rand::seq::SliceRandom;
use std::sync::Arc;
use tangle_db_exports::TangleDb;
use tangle_models::TransactionId;
use tangle_tips::TipsCache;
use tangle_tipselection_exports::{StartingTipSelector, TipSelError, TipSelResult};
use tracing::debug;

/// Picks a random tip of the largest connected component of the recent tangle,
/// so that tips stranded on small or partitioned subgraphs are never chosen.
pub struct ConnectedComponentsStartingTipSelector {
    db: Arc<dyn TangleDb>,
    tips: Arc<TipsCache>,
    sample_size: usize,
}

impl ConnectedComponentsStartingTipSelector {
    /// `sample_size` transactions are explored, seeded from `sample_size / 4` solid tips
    pub fn new(db: Arc<dyn TangleDb>, tips: Arc<TipsCache>, sample_size: usize) -> Self {
        ConnectedComponentsStartingTipSelector {
            db,
            tips,
            sample_size,
        }
    }

    /// Random element of `tips` lying in the largest component of the
    /// recent sample grown from `tips`.
    pub fn choose_starting_tip(&self, tips: &[TransactionId]) -> TipSelResult<TransactionId> {
        let sample = find_recent_transactions(self.db.as_ref(), tips, self.sample_size)?;
        let components = connected_components(self.db.as_ref(), &sample)?;
        let largest = components.iter().max_by_key(|component| component.len());
        debug!(
            "starting tip: {} transactions sampled in {} components, largest has {}",
            sample.len(),
            components.len(),
            largest.map_or(0, |component| component.len())
        );
        let candidates: Vec<TransactionId> = match largest {
            Some(component) => tips
                .iter()
                .filter(|tip| component.contains(*tip))
                .copied()
                .collect(),
            None => Vec::new(),
        };
        candidates
            .choose(&mut rand::thread_rng())
            .copied()
            .ok_or(TipSelError::NoTipInLargestComponent)
    }
}

impl StartingTipSelector for ConnectedComponentsStartingTipSelector {
    fn get_starting_tip(&self) -> TipSelResult<TransactionId> {
        let seeds = self.tips.latest_solid_tips(self.sample_size / 4)?;
        self.choose_starting_tip(&seeds)
    }
}
