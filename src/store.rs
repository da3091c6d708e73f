use std::ops::Bound;
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use crate::error::RateError;
use crate::exchange_rate::{Conversion, Rate, RateTable};

/// Holds the currently published [`RateTable`], if any.
///
/// Tables are swapped whole behind an `Arc`, so readers always work on one
/// complete table even while a newer one is being published.
#[derive(Debug, Default)]
pub struct Store {
    current: RwLock<Option<Arc<RateTable>>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current table.
    pub fn publish(&self, table: RateTable) {
        debug!(
            "Publishing {} rates against {} as of {}",
            table.len(),
            table.base(),
            table.as_of()
        );
        let table = Arc::new(table);
        let old = std::mem::replace(&mut *self.current.write(), Some(table));
        // Released after the write guard.
        drop(old);
    }

    /// Immutable view of the current table.
    pub fn snapshot(&self) -> Option<Arc<RateTable>> {
        self.current.read().clone()
    }

    pub fn get_rate(&self, code: &str) -> Result<f64, RateError> {
        self.snapshot()
            .and_then(|table| table.get(code))
            .ok_or_else(|| RateError::NotFound(code.to_string()))
    }

    pub fn is_valid(&self, code: &str) -> bool {
        self.snapshot().is_some_and(|table| table.contains(code))
    }

    /// Iterates over the table current at the time of the call, in code order.
    pub fn enumerate(&self) -> Rates {
        Rates {
            table: self.snapshot(),
            last: None,
        }
    }

    /// Converts `amount` of `from` into `to` through the base currency.
    ///
    /// Both rates come from the same table. No rounding is applied.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Result<Conversion, RateError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(RateError::InvalidAmount(amount));
        }

        let table = self.snapshot();
        let rate = |code: &str| {
            table
                .as_ref()
                .and_then(|table| table.get(code))
                .ok_or_else(|| RateError::UnknownCurrency(code.to_string()))
        };
        let from_rate = rate(from)?;
        let to_rate = rate(to)?;

        // x / x is exactly 1.0 for any finite positive x, so identical
        // currencies return `amount` unchanged.
        Ok(Conversion {
            amount: amount * (to_rate / from_rate),
            currency: to.to_string(),
        })
    }
}

/// Iterator returned by [`Store::enumerate`]. Holds its own reference to
/// the table, so later publishes do not affect it.
pub struct Rates {
    table: Option<Arc<RateTable>>,
    last: Option<String>,
}

impl From<Arc<RateTable>> for Rates {
    fn from(table: Arc<RateTable>) -> Self {
        Self {
            table: Some(table),
            last: None,
        }
    }
}

impl Iterator for Rates {
    type Item = Rate;

    fn next(&mut self) -> Option<Rate> {
        let table = self.table.as_ref()?;
        let lower = match &self.last {
            Some(code) => Bound::Excluded(code.as_str()),
            None => Bound::Unbounded,
        };

        let (code, &value) = table
            .rates()
            .range::<str, _>((lower, Bound::Unbounded))
            .next()?;
        self.last = Some(code.clone());

        Some(Rate {
            code: code.clone(),
            value,
        })
    }
}
