//! Periodic rate refresh.
//!
//! The poller fetches the rate for the current pair once at start, again
//! every `period`, and immediately whenever the pair published on the `watch`
//! channel changes. Each fetch runs in its own task and is never cancelled;
//! consumers discard results for pairs that are no longer current.

use crate::core::currency::{CurrencyRateProvider, RateKey};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

#[derive(Debug)]
pub struct RateUpdate {
    pub key: RateKey,
    pub result: Result<Option<f64>>,
}

#[derive(Debug)]
pub enum PollEvent {
    Fetching(RateKey),
    Fetched(RateUpdate),
}

pub fn spawn(
    provider: Arc<dyn CurrencyRateProvider>,
    period: Duration,
    mut keys: watch::Receiver<RateKey>,
    events: mpsc::UnboundedSender<PollEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(?period, "Rate poller started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                changed = keys.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    ticker.reset();
                }
            }
            if events.is_closed() {
                break;
            }
            let key = *keys.borrow_and_update();
            fetch(Arc::clone(&provider), key, events.clone());
        }
        info!("Rate poller stopped");
    })
}

fn fetch(
    provider: Arc<dyn CurrencyRateProvider>,
    key: RateKey,
    events: mpsc::UnboundedSender<PollEvent>,
) {
    debug!(%key, "Fetching rate");
    tokio::spawn(async move {
        if events.send(PollEvent::Fetching(key)).is_err() {
            return;
        }
        let result = provider.get_rate(key.from, key.to).await;
        if events
            .send(PollEvent::Fetched(RateUpdate { key, result }))
            .is_err()
        {
            debug!(%key, "Receiver gone, dropping rate");
        }
    });
}
