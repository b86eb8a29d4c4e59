//! Payment-delay bonus tiers.
//!
//! Buyers pay a small premium for deferring the cash payout. Only the listed
//! tiers carry a bonus; any other delay is accepted and earns nothing.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Rate;

/// Recognised payment-delay tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayTier {
    /// Standard payout cycle, no extra delay
    Standard,
    TwoWeeks,
    FourWeeks,
    EightWeeks,
    SixteenWeeks,
}

impl DelayTier {
    pub const ALL: [DelayTier; 5] = [
        DelayTier::Standard,
        DelayTier::TwoWeeks,
        DelayTier::FourWeeks,
        DelayTier::EightWeeks,
        DelayTier::SixteenWeeks,
    ];

    pub fn from_weeks(weeks: u32) -> Option<Self> {
        match weeks {
            0 => Some(DelayTier::Standard),
            2 => Some(DelayTier::TwoWeeks),
            4 => Some(DelayTier::FourWeeks),
            8 => Some(DelayTier::EightWeeks),
            16 => Some(DelayTier::SixteenWeeks),
            _ => None,
        }
    }

    pub fn weeks(self) -> u32 {
        match self {
            DelayTier::Standard => 0,
            DelayTier::TwoWeeks => 2,
            DelayTier::FourWeeks => 4,
            DelayTier::EightWeeks => 8,
            DelayTier::SixteenWeeks => 16,
        }
    }

    pub fn bonus(self) -> Rate {
        match self {
            DelayTier::Standard => Decimal::ZERO,
            DelayTier::TwoWeeks => dec!(0.0038),
            DelayTier::FourWeeks => dec!(0.0075),
            DelayTier::EightWeeks => dec!(0.015),
            DelayTier::SixteenWeeks => dec!(0.03),
        }
    }
}

/// Bonus rate for a delay of `weeks`. Unlisted delays fall back to zero.
pub fn delay_bonus(weeks: u32) -> Rate {
    DelayTier::from_weeks(weeks)
        .map(DelayTier::bonus)
        .unwrap_or(Decimal::ZERO)
}

/// One row of the tier table, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayTierRow {
    pub tier: DelayTier,
    pub weeks: u32,
    pub bonus: Rate,
}

pub fn tier_table() -> Vec<DelayTierRow> {
    DelayTier::ALL
        .iter()
        .map(|&tier| DelayTierRow {
            tier,
            weeks: tier.weeks(),
            bonus: tier.bonus(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_table_exact() {
        assert_eq!(delay_bonus(0), Decimal::ZERO);
        assert_eq!(delay_bonus(2), dec!(0.0038));
        assert_eq!(delay_bonus(4), dec!(0.0075));
        assert_eq!(delay_bonus(8), dec!(0.015));
        assert_eq!(delay_bonus(16), dec!(0.03));
    }

    #[test]
    fn test_unlisted_delay_gives_zero() {
        for weeks in [1, 3, 5, 6, 12, 17, 52, u32::MAX] {
            assert_eq!(delay_bonus(weeks), Decimal::ZERO, "weeks = {weeks}");
            assert!(DelayTier::from_weeks(weeks).is_none());
        }
    }

    #[test]
    fn test_weeks_round_trip_through_tier() {
        for tier in DelayTier::ALL {
            assert_eq!(DelayTier::from_weeks(tier.weeks()), Some(tier));
        }
    }

    #[test]
    fn test_tier_table_is_sorted_by_weeks() {
        let table = tier_table();
        assert_eq!(table.len(), 5);
        assert!(table.windows(2).all(|w| w[0].weeks < w[1].weeks));
        assert!(table.windows(2).all(|w| w[0].bonus < w[1].bonus));
    }
}
