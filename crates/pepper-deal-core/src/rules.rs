//! Calculator rule sets.
//!
//! The deal calculator went through revisions that disagree on how the delay
//! bonus combines with the buyer rate and on whether coin value scales with
//! quantity. Each revision is a variant here so callers pick one explicitly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSet {
    /// Bonus boosts the buyer rate proportionally; coin value is taken per
    /// coin program as given.
    #[default]
    Multiplicative,
    /// First revision: bonus is added to the buyer rate and per-card coin
    /// value is multiplied by quantity.
    Additive,
}

impl RuleSet {
    pub fn effective_buyer_rate(self, buyer_rate: Rate, bonus: Rate) -> Rate {
        match self {
            RuleSet::Multiplicative => buyer_rate * (Decimal::ONE + bonus),
            RuleSet::Additive => buyer_rate + bonus,
        }
    }

    /// Coin cash value attributed to the whole deal. `None` on overflow.
    pub fn deal_coin_value(self, cash_value: Money, quantity: u32) -> Option<Money> {
        match self {
            RuleSet::Multiplicative => Some(cash_value),
            RuleSet::Additive => cash_value.checked_mul(Decimal::from(quantity)),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RuleSet::Multiplicative => "multiplicative delay bonus",
            RuleSet::Additive => "additive delay bonus (legacy)",
        }
    }
}
