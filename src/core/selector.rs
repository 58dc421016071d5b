//! One side of the converter: a search string and the currency it selects.

use crate::core::catalog::{self, Currency};
use anyhow::{Result, bail};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CurrencySelector {
    search: String,
    selected: &'static Currency,
}

impl CurrencySelector {
    pub fn new(selected: &'static Currency) -> Self {
        Self {
            search: String::new(),
            selected,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn selected(&self) -> &'static Currency {
        self.selected
    }

    /// Entries shown in the dropdown for the current search.
    pub fn options(&self) -> Vec<&'static Currency> {
        catalog::filter(&self.search)
    }

    /// Updates the search string and selects the first match, if any.
    ///
    /// Returns true when the selection changed.
    pub fn set_search(&mut self, search: &str) -> bool {
        self.search = search.to_string();
        match catalog::filter(search).first() {
            Some(first) => self.replace(first),
            None => {
                debug!(search, "No currency matches, keeping {}", self.selected.code);
                false
            }
        }
    }

    /// Selects a currency by its code, as picked from the dropdown.
    pub fn select(&mut self, code: &str) -> Result<bool> {
        match catalog::find(code) {
            Some(currency) => Ok(self.replace(currency)),
            None => bail!("Unknown currency code: {}", code),
        }
    }

    fn replace(&mut self, currency: &'static Currency) -> bool {
        if self.selected == currency {
            return false;
        }
        debug!(from = self.selected.code, to = currency.code, "Selection changed");
        self.selected = currency;
        true
    }
}
