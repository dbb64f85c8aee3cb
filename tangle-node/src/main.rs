// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Tangle node: an in-memory tangle served by the tip selection engine.
//! Runs until interrupted, periodically reporting tip and lag statistics.

#![warn(unused_crate_dependencies)]

mod settings;

use crate::settings::{build_tangle_settings, Settings};
use anyhow::Context;
use crossbeam_channel::{bounded, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;
use tangle_db_exports::TangleDbConfig;
use tangle_db_worker::MemoryTangle;
use tangle_tips::TipsCache;
use tangle_tipselection_worker::{
    start_recycler, start_tip_selection, LagCalculator, PermissiveLedgerValidator,
    RecentTransactionsGetter,
};
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;

fn level_filter(level: usize) -> LevelFilter {
    match level {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn run(settings: Settings) -> anyhow::Result<()> {
    let db = Arc::new(MemoryTangle::new(TangleDbConfig {
        min_weight_magnitude: settings.tangle.min_weight_magnitude,
    }));
    let tips = Arc::new(TipsCache::new(settings.tangle.tips_capacity, db.clone()));

    let tip_selector = start_tip_selection(
        settings.tip_selection.clone(),
        db.clone(),
        tips.clone(),
        Arc::new(PermissiveLedgerValidator),
    )
    .context("could not start tip selection")?;
    let mut recycler_manager = start_recycler(settings.recycler.clone(), db.clone(), tips.clone())
        .context("could not start the database recycler")?;
    let lag_calculator = LagCalculator::new(
        RecentTransactionsGetter::new(db.clone(), tips.clone()),
        settings.stats.lag_sample_size,
    );

    let (stop_sender, stop_receiver) = bounded(1);
    ctrlc::set_handler(move || {
        let _ = stop_sender.try_send(());
    })
    .context("could not install the interrupt handler")?;
    info!("node started");

    let stats_interval = Duration::from_millis(settings.stats.interval_ms);
    loop {
        match stop_receiver.recv_timeout(stats_interval) {
            Ok(()) => {
                info!("interrupt signal received");
                break;
            }
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
        match lag_calculator.median_arrival_lag() {
            Ok(Some(lag)) => info!("median arrival lag: {} s", lag),
            Ok(None) => info!("median arrival lag: no recent transaction"),
            Err(err) => warn!("could not compute the arrival lag: {}", err),
        }
        info!(
            "tips: {} solid, {} non-solid, {} transactions stored",
            tips.solid_size(),
            tips.non_solid_size(),
            db.len()
        );
        match tip_selector.get_transactions_to_approve(None) {
            Ok(selected) => info!(
                "current tips to approve: trunk {}, branch {}",
                selected.trunk, selected.branch
            ),
            Err(err) => warn!("tip selection failed: {}", err),
        }
    }

    recycler_manager.stop();
    info!("node stopped");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let settings: Settings =
        build_tangle_settings("tangle-node", "TANGLE").context("could not load settings")?;

    use tracing_subscriber::prelude::*;
    let tracing_layer = tracing_subscriber::fmt::layer()
        .with_filter(level_filter(settings.logging.level));
    tracing_subscriber::registry().with(tracing_layer).init();

    run(settings)
}
