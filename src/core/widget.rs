//! State of the converter screen.
//!
//! The widget owns the amount, both currency selectors and the rate slot for
//! the current pair. Rate results arrive as [`RateUpdate`]s from the poller;
//! updates for a pair that is no longer selected are dropped.

use crate::core::catalog::Currency;
use crate::core::convert;
use crate::core::currency::RateKey;
use crate::core::poller::RateUpdate;
use crate::core::selector::CurrencySelector;
use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::{debug, warn};

pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch exchange rates";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Debug, Clone)]
struct RateSlot {
    key: RateKey,
    rate: Option<f64>,
    pending: bool,
    updated_at: Option<DateTime<Local>>,
}

impl RateSlot {
    fn pending(key: RateKey) -> Self {
        Self {
            key,
            rate: None,
            pending: true,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConverterWidget {
    amount: String,
    from: CurrencySelector,
    to: CurrencySelector,
    slot: RateSlot,
    notifications: Vec<Notification>,
}

impl ConverterWidget {
    pub fn new(amount: &str, from: &'static Currency, to: &'static Currency) -> Self {
        let from = CurrencySelector::new(from);
        let to = CurrencySelector::new(to);
        let key = RateKey::new(from.selected().code, to.selected().code);
        Self {
            amount: amount.to_string(),
            from,
            to,
            slot: RateSlot::pending(key),
            notifications: Vec::new(),
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn from(&self) -> &CurrencySelector {
        &self.from
    }

    pub fn to(&self) -> &CurrencySelector {
        &self.to
    }

    pub fn key(&self) -> RateKey {
        self.slot.key
    }

    pub fn rate(&self) -> Option<f64> {
        self.slot.rate
    }

    pub fn updated_at(&self) -> Option<DateTime<Local>> {
        self.slot.updated_at
    }

    /// True while the first fetch for the current pair has not resolved.
    pub fn is_loading(&self) -> bool {
        self.slot.pending && self.slot.rate.is_none()
    }

    pub fn set_amount(&mut self, amount: &str) {
        self.amount = amount.to_string();
    }

    pub fn search_from(&mut self, search: &str) -> bool {
        self.from.set_search(search);
        self.sync_key()
    }

    pub fn search_to(&mut self, search: &str) -> bool {
        self.to.set_search(search);
        self.sync_key()
    }

    pub fn select_from(&mut self, code: &str) -> Result<bool> {
        self.from.select(code)?;
        Ok(self.sync_key())
    }

    pub fn select_to(&mut self, code: &str) -> Result<bool> {
        self.to.select(code)?;
        Ok(self.sync_key())
    }

    /// Exchanges source and target currencies.
    pub fn swap(&mut self) -> bool {
        std::mem::swap(&mut self.from, &mut self.to);
        self.sync_key()
    }

    /// Marks a scheduled refresh as started for the current pair.
    pub fn begin_refresh(&mut self, key: RateKey) {
        if key == self.slot.key {
            self.slot.pending = true;
        }
    }

    /// Applies a fetch result. Returns false when the result was for a stale pair.
    pub fn apply(&mut self, update: RateUpdate) -> bool {
        if update.key != self.slot.key {
            debug!(stale = %update.key, current = %self.slot.key, "Dropping rate for stale pair");
            return false;
        }
        self.slot.pending = false;
        match update.result {
            // A table without the target reads as no rate, not as a failure.
            Ok(rate) => {
                debug!(key = %update.key, ?rate, "Rate updated");
                self.slot.rate = rate;
                self.slot.updated_at = Some(Local::now());
            }
            Err(e) => {
                warn!(key = %update.key, error = %e, "Rate fetch failed");
                self.notify(NotificationLevel::Error, FETCH_ERROR_MESSAGE);
            }
        }
        true
    }

    pub fn notify(&mut self, level: NotificationLevel, message: &str) {
        self.notifications.push(Notification {
            level,
            message: message.to_string(),
        });
    }

    /// Takes the pending notifications, leaving none behind.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn result_line(&self) -> String {
        convert::result_line(
            &self.amount,
            self.slot.key.from,
            self.slot.key.to,
            self.slot.rate,
            self.is_loading(),
        )
    }

    // A new pair discards the previous rate.
    fn sync_key(&mut self) -> bool {
        let key = RateKey::new(self.from.selected().code, self.to.selected().code);
        if key == self.slot.key {
            return false;
        }
        debug!(old = %self.slot.key, new = %key, "Currency pair changed");
        self.slot = RateSlot::pending(key);
        true
    }
}
