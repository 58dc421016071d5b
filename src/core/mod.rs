//! Core converter logic

pub mod catalog;
pub mod config;
pub mod convert;
pub mod currency;
pub mod log;
pub mod poller;
pub mod selector;
pub mod widget;

// Re-export main types for cleaner imports
pub use catalog::Currency;
pub use currency::{CurrencyRateProvider, RateKey};
pub use widget::ConverterWidget;
