// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Node health figures computed from the recent tangle.

use crate::dag::find_recent_transactions;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tangle_db_exports::TangleDb;
use tangle_models::prehash::PreHashSet;
use tangle_models::{Transaction, TransactionId};
use tangle_tips::TipsCache;
use tangle_tipselection_exports::TipSelResult;

/// Most recently arrived transactions
pub struct RecentTransactionsGetter {
    db: Arc<dyn TangleDb>,
    tips: Arc<TipsCache>,
}

impl RecentTransactionsGetter {
    /// new getter
    pub fn new(db: Arc<dyn TangleDb>, tips: Arc<TipsCache>) -> Self {
        RecentTransactionsGetter { db, tips }
    }

    /// Up to `count` transactions, most recent first. The search starts
    /// from the `count` latest solid tips and explores at most
    /// `tips + 2 * count` transactions.
    pub fn get_recent_transactions(&self, count: usize) -> TipSelResult<Vec<Transaction>> {
        let seeds = self.tips.latest_solid_tips(count)?;
        let explored = find_recent_transactions(
            self.db.as_ref(),
            &seeds,
            seeds.len().saturating_add(count.saturating_mul(2)),
        )?;
        let mut transactions = Vec::with_capacity(explored.len());
        for id in explored.iter().filter(|id| !id.is_genesis()) {
            let tx = self.db.load_transaction(id)?;
            if !tx.placeholder {
                transactions.push(tx);
            }
        }
        transactions.sort_by(|a, b| b.arrival_time.cmp(&a.arrival_time));
        transactions.truncate(count);
        Ok(transactions)
    }
}

/// Lag between the announced attachment time and the local arrival time
pub struct LagCalculator {
    recent: RecentTransactionsGetter,
    sample_size: usize,
}

impl LagCalculator {
    /// lag over the `sample_size` most recent transactions
    pub fn new(recent: RecentTransactionsGetter, sample_size: usize) -> Self {
        LagCalculator {
            recent,
            sample_size,
        }
    }

    /// Median of `|attachment_timestamp - arrival_time|`, in seconds.
    /// `None` when no transaction arrived yet.
    pub fn median_arrival_lag(&self) -> TipSelResult<Option<u64>> {
        let mut lags: Vec<u64> = self
            .recent
            .get_recent_transactions(self.sample_size)?
            .iter()
            .map(|tx| tx.attachment_timestamp.abs_diff(tx.arrival_time))
            .collect();
        if lags.is_empty() {
            return Ok(None);
        }
        lags.sort_unstable();
        let middle = lags.len() / 2;
        Ok(Some(if lags.len() % 2 == 1 {
            lags[middle]
        } else {
            (lags[middle - 1] + lags[middle]) / 2
        }))
    }
}

/// Counts the ancestors of a transaction whose age lies in a time window
pub struct TimeWindowedApproveeCounter {
    db: Arc<dyn TangleDb>,
    min_age: u64,
    max_age: u64,
}

impl TimeWindowedApproveeCounter {
    /// window `[min_age, max_age]`
    pub fn new(db: Arc<dyn TangleDb>, min_age: Duration, max_age: Duration) -> Self {
        TimeWindowedApproveeCounter {
            db,
            min_age: min_age.as_secs(),
            max_age: max_age.as_secs(),
        }
    }

    /// Number of distinct transactions approved (directly or not) by `start`
    /// that arrived between `now - max_age` and `now - min_age`.
    ///
    /// The traversal does not go past transactions older than `max_age`.
    /// Ids in `processed` are skipped; every visited id is added to it.
    pub fn count(
        &self,
        now: u64,
        start: &TransactionId,
        processed: &mut PreHashSet<TransactionId>,
    ) -> TipSelResult<u64> {
        let mut count = 0;
        let mut queue = VecDeque::from([*start]);
        while let Some(current) = queue.pop_front() {
            for parent in self.db.load_transaction(&current)?.parents() {
                if parent.is_genesis() || !processed.insert(parent) {
                    continue;
                }
                let tx = self.db.load_transaction(&parent)?;
                if tx.placeholder {
                    continue;
                }
                let age = now.saturating_sub(tx.arrival_time);
                if age > self.max_age {
                    continue;
                }
                if age >= self.min_age {
                    count += 1;
                }
                queue.push_back(parent);
            }
        }
        Ok(count)
    }
}
