//! Currency conversion abstractions

use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Display;

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// `Ok(None)` when the source has no rate for `to`.
    async fn get_rate(&self, from: &str, to: &str) -> Result<Option<f64>>;
}

/// The currency pair a rate is fetched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RateKey {
    pub from: &'static str,
    pub to: &'static str,
}

impl RateKey {
    pub fn new(from: &'static str, to: &'static str) -> Self {
        Self { from, to }
    }
}

impl Display for RateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}
