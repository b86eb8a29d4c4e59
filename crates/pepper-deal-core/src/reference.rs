//! Brand reference table built from the Pepper daily-deals archive.
//!
//! Archive rows carry raw text: brand names wrapped in stray quotes and
//! regular rates written like `"4X"`. Rows are normalised on load; values that
//! don't parse are kept as missing rather than rejected. The table only
//! supplies defaults for the outer surfaces; the profit engine never reads it.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Rate;

/// One raw archive row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandRateRecord {
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Reg Rate", default)]
    pub reg_rate: String,
    #[serde(rename = "Offer", default)]
    pub offer: String,
}

/// Historical defaults for one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandDefaults {
    pub brand: String,
    /// Highest promotional multiplier seen for the brand
    pub historical_max_offer: Option<Rate>,
    /// Highest regular "X" rate seen for the brand
    pub historical_max_regular_rate: Option<Rate>,
}

#[derive(Debug, Clone, Default)]
pub struct BrandRateTable {
    brands: BTreeMap<String, BrandDefaults>,
}

impl BrandRateTable {
    pub fn from_records<I: IntoIterator<Item = BrandRateRecord>>(records: I) -> Self {
        let mut brands: BTreeMap<String, BrandDefaults> = BTreeMap::new();
        for record in records {
            let brand = normalise_brand(&record.brand);
            let reg_rate = parse_number(&record.reg_rate.replace('X', ""));
            let offer = parse_number(&record.offer);

            let entry = brands.entry(brand.clone()).or_insert(BrandDefaults {
                brand,
                historical_max_offer: None,
                historical_max_regular_rate: None,
            });
            entry.historical_max_offer = max_opt(entry.historical_max_offer, offer);
            entry.historical_max_regular_rate =
                max_opt(entry.historical_max_regular_rate, reg_rate);
        }
        Self { brands }
    }

    /// Sorted, de-duplicated brand names.
    pub fn brands(&self) -> Vec<&str> {
        self.brands.keys().map(String::as_str).collect()
    }

    pub fn defaults(&self, brand: &str) -> Option<&BrandDefaults> {
        self.brands.get(&normalise_brand(brand))
    }

    pub fn max_offer(&self, brand: &str) -> Option<Rate> {
        self.defaults(brand).and_then(|d| d.historical_max_offer)
    }

    pub fn max_regular_rate(&self, brand: &str) -> Option<Rate> {
        self.defaults(brand)
            .and_then(|d| d.historical_max_regular_rate)
    }

    pub fn all(&self) -> impl Iterator<Item = &BrandDefaults> {
        self.brands.values()
    }

    pub fn len(&self) -> usize {
        self.brands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}

fn normalise_brand(raw: &str) -> String {
    raw.replace('"', "").trim().to_string()
}

fn parse_number(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim()).ok()
}

fn max_opt(a: Option<Decimal>, b: Option<Decimal>) -> Option<Decimal> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) => x,
        (None, y) => y,
    }
}
