// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Periodic wipe of the tangle and of the tip cache, bounding the memory and
//! disk used by a node that keeps no snapshots.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tangle_db_exports::TangleDb;
use tangle_tips::TipsCache;
use tangle_tipselection_exports::{RecyclerConfig, RecyclerManager, TipSelError, TipSelResult};
use time::OffsetDateTime;
use tracing::{info, warn};

/// Milliseconds from `now` to the next Sunday 00:00 UTC, strictly after today
pub fn millis_until_next_sunday(now: OffsetDateTime) -> u64 {
    let today = now.date();
    let days_ahead = 7 - i64::from(today.weekday().number_days_from_sunday());
    let next_sunday = (today + time::Duration::days(days_ahead))
        .midnight()
        .assume_utc();
    u64::try_from((next_sunday - now).whole_milliseconds()).unwrap_or(0)
}

struct RecyclerWorker {
    cfg: RecyclerConfig,
    db: Arc<dyn TangleDb>,
    tips: Arc<TipsCache>,
    stop_receiver: Receiver<()>,
}

impl RecyclerWorker {
    fn spawn(
        cfg: RecyclerConfig,
        db: Arc<dyn TangleDb>,
        tips: Arc<TipsCache>,
        stop_receiver: Receiver<()>,
    ) -> JoinHandle<()> {
        thread::Builder::new()
            .name("database recycler".into())
            .spawn(|| {
                let this = RecyclerWorker {
                    cfg,
                    db,
                    tips,
                    stop_receiver,
                };
                this.run();
            })
            .expect("could not spawn database recycler thread")
    }

    /// Interruptibly wait until an instant or a stop signal
    ///
    /// # Return value
    /// Returns `true` if the instant was reached, otherwise `false` if there was an interruption.
    fn interruptible_wait_until(&self, deadline: Instant) -> bool {
        match self.stop_receiver.recv_deadline(deadline) {
            // message received => quit main loop
            Ok(()) => false,
            // timeout => continue main loop
            Err(RecvTimeoutError::Timeout) => true,
            // channel disconnected (sender dropped) => quit main loop
            Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    fn recycle(&self) {
        info!("recycling database");
        self.tips.clear();
        if let Err(err) = self.db.clear() {
            warn!("could not clear the tangle: {}", err);
        }
        tangle_trace!("recycler.recycled", {});
    }

    fn run(self) {
        let interval = Duration::from_millis(self.cfg.interval_ms);
        let first_delay = if self.cfg.align_to_sunday {
            Duration::from_millis(millis_until_next_sunday(OffsetDateTime::now_utc()))
        } else {
            interval
        };
        info!(
            "time until next recycling: {} ms, time between consecutive runs: {} ms",
            first_delay.as_millis(),
            interval.as_millis()
        );
        let mut next_run = Instant::now() + first_delay;
        loop {
            if !self.interruptible_wait_until(next_run) {
                break;
            }
            self.recycle();
            next_run += interval;
        }
    }
}

/// Implementation of the recycler manager
/// Allows stopping the recycler worker
pub struct RecyclerManagerImpl {
    worker: Option<(Sender<()>, JoinHandle<()>)>,
}

impl RecyclerManager for RecyclerManagerImpl {
    /// stops the worker
    fn stop(&mut self) {
        info!("stopping database recycler...");
        if let Some((stop_sender, join_handle)) = self.worker.take() {
            // the worker also stops when the sender is dropped
            let _ = stop_sender.send(());
            if let Err(err) = join_handle.join() {
                warn!("database recycler panicked: {:?}", err);
            }
        }
        info!("database recycler stopped");
    }
}

/// Launches the database recycler thread
pub fn start_recycler(
    cfg: RecyclerConfig,
    db: Arc<dyn TangleDb>,
    tips: Arc<TipsCache>,
) -> TipSelResult<Box<dyn RecyclerManager>> {
    if cfg.interval_ms == 0 {
        return Err(TipSelError::InvalidConfig(
            "recycler interval must not be zero".into(),
        ));
    }
    let (stop_sender, stop_receiver) = bounded(1);
    let join_handle = RecyclerWorker::spawn(cfg, db, tips, stop_receiver);
    Ok(Box::new(RecyclerManagerImpl {
        worker: Some((stop_sender, join_handle)),
    }))
}
