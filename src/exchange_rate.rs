use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::error::DecodeError;
use crate::latest::Latest;

/// One fetched table of rates, each expressed as units of that currency
/// per one unit of `base`. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: String,
    as_of: DateTime<Utc>,
    rates: BTreeMap<String, f64>,
    disclaimer: String,
    license: String,
}

impl RateTable {
    /// Every rate must be finite and positive, and the base currency, when
    /// listed, must be exactly 1. An empty table is accepted.
    pub fn new(
        base: impl Into<String>,
        as_of: DateTime<Utc>,
        rates: BTreeMap<String, f64>,
    ) -> Result<Self, DecodeError> {
        let base = base.into();

        for (code, &rate) in &rates {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(DecodeError::InvalidRate {
                    code: code.clone(),
                    rate,
                });
            }
        }

        if let Some(&rate) = rates.get(&base) {
            if rate != 1.0 {
                return Err(DecodeError::BaseRate { base, rate });
            }
        }

        Ok(Self {
            base,
            as_of,
            rates,
            disclaimer: String::new(),
            license: String::new(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    pub fn disclaimer(&self) -> &str {
        &self.disclaimer
    }

    pub fn license(&self) -> &str {
        &self.license
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Entries in code order.
    pub fn iter(&self) -> impl Iterator<Item = Rate> + '_ {
        self.rates.iter().map(|(code, &value)| Rate {
            code: code.clone(),
            value,
        })
    }

    pub(crate) fn rates(&self) -> &BTreeMap<String, f64> {
        &self.rates
    }
}

impl TryFrom<Latest> for RateTable {
    type Error = DecodeError;

    fn try_from(latest: Latest) -> Result<Self, Self::Error> {
        let mut table = RateTable::new(latest.base, latest.timestamp, latest.rates)?;
        table.disclaimer = latest.disclaimer;
        table.license = latest.license;

        Ok(table)
    }
}

/// A single entry of a [`RateTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct Rate {
    pub code: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries
            .iter()
            .map(|(code, rate)| (code.to_string(), *rate))
            .collect()
    }

    #[test]
    fn test_new_table() {
        let table = RateTable::new(
            "USD",
            Utc::now(),
            rates(&[("USD", 1.0), ("EUR", 0.7919)]),
        )
        .unwrap();

        assert_eq!(table.base(), "USD");
        assert_eq!(table.get("EUR"), Some(0.7919));
        assert!(table.contains("USD"));
        assert!(!table.contains("GBP"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_iter_in_code_order() {
        let table = RateTable::new(
            "USD",
            Utc::now(),
            rates(&[("USD", 1.0), ("GBP", 0.6166), ("EUR", 0.7919)]),
        )
        .unwrap();

        let entries: Vec<Rate> = table.iter().collect();

        assert_eq!(
            entries,
            [
                Rate { code: "EUR".to_string(), value: 0.7919 },
                Rate { code: "GBP".to_string(), value: 0.6166 },
                Rate { code: "USD".to_string(), value: 1.0 },
            ]
        );
    }

    #[test]
    fn test_empty_table_is_valid() {
        let table = RateTable::new("USD", Utc::now(), BTreeMap::new()).unwrap();

        assert!(table.is_empty());
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        let err = RateTable::new("USD", Utc::now(), rates(&[("EUR", 0.0)])).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidRate { code, .. } if code == "EUR"));

        let err = RateTable::new("USD", Utc::now(), rates(&[("EUR", f64::NAN)])).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidRate { .. }));
    }

    #[test]
    fn test_rejects_base_rate_other_than_one() {
        let err = RateTable::new("USD", Utc::now(), rates(&[("USD", 1.01)])).unwrap_err();

        assert!(matches!(err, DecodeError::BaseRate { base, .. } if base == "USD"));
    }

    #[test]
    fn test_from_latest_keeps_metadata() {
        let latest = Latest {
            disclaimer: "Disclaimer".to_string(),
            license: "License".to_string(),
            timestamp: DateTime::from_timestamp(1449877801, 0).unwrap(),
            base: "USD".to_string(),
            rates: rates(&[("USD", 1.0)]),
        };

        let table = RateTable::try_from(latest).unwrap();

        assert_eq!(table.disclaimer(), "Disclaimer");
        assert_eq!(table.license(), "License");
        assert_eq!(table.as_of().timestamp(), 1449877801);
    }
}
