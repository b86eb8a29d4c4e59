//! Deal profitability: resale proceeds, purchase cost and coin rebate combined
//! into profit and ROI under several coin-redemption assumptions.
//!
//! Scenarios reported:
//! - full redemption (100% of coin face value)
//! - standard redemption (91.5%, the typical realised rate)
//! - the caller's expected redemption rate
//!
//! All calculations use `rust_decimal::Decimal` for precision. No `f64`.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::coins::{self, CoinProgramTerms};
use crate::delay::{self, DelayTier};
use crate::deposit;
use crate::holidays::HolidayCalendar;
use crate::rules::RuleSet;
use crate::types::{with_metadata, Coins, ComputationOutput, Money, Rate};
use crate::{PepperDealError, PepperDealResult};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Redemption percentages always reported alongside the caller's own.
pub const FULL_REDEMPTION_RATE: Rate = dec!(100);
pub const STANDARD_REDEMPTION_RATE: Rate = dec!(91.5);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// The resale side of a deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealTerms {
    /// Face value per card
    pub face_value: Money,
    pub quantity: u32,
    /// Fraction of face value the buyer pays, before any delay bonus
    pub buyer_rate: Rate,
    /// 0, 2, 4, 8 or 16; anything else earns no bonus
    #[serde(default)]
    pub payment_delay_weeks: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitInput {
    pub deal: DealTerms,
    pub coins: CoinProgramTerms,
    /// Reference date for the payout schedule
    pub today: NaiveDate,
    #[serde(default)]
    pub rule_set: RuleSet,
    /// Explicit holiday list; the US federal calendar is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holidays: Option<Vec<NaiveDate>>,
}

/// Profit under one coin-redemption assumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedemptionScenario {
    pub label: String,
    /// Percentage of coin face value realised
    pub redemption_rate: Rate,
    pub coin_value: Money,
    pub profit: Money,
    /// Profit as a percentage of purchase cost
    pub roi: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitReport {
    pub rule_set: RuleSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_tier: Option<DelayTier>,
    pub delay_bonus: Rate,
    pub effective_buyer_rate: Rate,
    pub sale_proceeds: Money,
    pub purchase_cost: Money,
    pub cash_profit: Money,
    /// Coin value at 100% redemption, attributed to the deal
    pub coin_cash_value: Money,
    pub total_coins: Coins,
    pub instant_coins: Coins,
    pub future_coins: Coins,
    pub deposit_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shifted_by_holiday: Option<NaiveDate>,
    pub future_payout_date: NaiveDate,
    /// Date by which both cash and coins have landed
    pub at_whole_date: NaiveDate,
    pub full_redemption: RedemptionScenario,
    pub standard_redemption: RedemptionScenario,
    pub expected_redemption: RedemptionScenario,
    /// Sale proceeds plus expected profit. Counts proceeds twice, as the deal
    /// sheet always has.
    pub paper_pl: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Calculate deal profitability against the default holiday calendar: US
/// federal holidays for this year and next, unless the input lists its own.
pub fn calculate_profit(input: &ProfitInput) -> PepperDealResult<ComputationOutput<ProfitReport>> {
    let calendar = match &input.holidays {
        Some(dates) => HolidayCalendar::from_dates(dates.iter().copied()),
        None => {
            let year = input.today.year();
            HolidayCalendar::us_federal([year, year + 1])
        }
    };
    calculate_profit_with_calendar(input, &calendar)
}

pub fn calculate_profit_with_calendar(
    input: &ProfitInput,
    calendar: &HolidayCalendar,
) -> PepperDealResult<ComputationOutput<ProfitReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_deal(&input.deal)?;
    let deal = &input.deal;
    let rules = input.rule_set;

    if deal.face_value != input.coins.face_value {
        warnings.push(format!(
            "Deal face value {} differs from coin program face value {}",
            deal.face_value, input.coins.face_value
        ));
    }

    // -- Coins ---------------------------------------------------------------
    let valuation = coins::value_coins(&input.coins)?;

    // -- Sale side -----------------------------------------------------------
    let delay_tier = DelayTier::from_weeks(deal.payment_delay_weeks);
    if delay_tier.is_none() {
        warnings.push(format!(
            "Payment delay of {} weeks is not a recognised tier; no delay bonus applied",
            deal.payment_delay_weeks
        ));
    }
    let delay_bonus = delay::delay_bonus(deal.payment_delay_weeks);
    let effective_buyer_rate = rules.effective_buyer_rate(deal.buyer_rate, delay_bonus);

    let quantity = Decimal::from(deal.quantity);
    let purchase_cost = deal
        .face_value
        .checked_mul(quantity)
        .ok_or_else(|| PepperDealError::overflow("purchase cost"))?;
    let sale_proceeds = deal
        .face_value
        .checked_mul(effective_buyer_rate)
        .and_then(|v| v.checked_mul(quantity))
        .ok_or_else(|| PepperDealError::overflow("sale proceeds"))?;
    let cash_profit = sale_proceeds
        .checked_sub(purchase_cost)
        .ok_or_else(|| PepperDealError::overflow("cash profit"))?;

    if purchase_cost.is_zero() {
        return Err(PepperDealError::DivisionByZero {
            context: "ROI purchase cost".into(),
        });
    }

    // -- Redemption scenarios ------------------------------------------------
    let coin_cash_value = rules
        .deal_coin_value(valuation.cash_value, deal.quantity)
        .ok_or_else(|| PepperDealError::overflow("deal coin value"))?;
    let scenario = |label: &str, rate: Rate| -> PepperDealResult<RedemptionScenario> {
        // rate / 100 is at most 1, so the product cannot exceed the coin value
        let coin_value = coin_cash_value * (rate / dec!(100));
        let profit = cash_profit
            .checked_add(coin_value)
            .ok_or_else(|| PepperDealError::overflow("scenario profit"))?;
        let roi = profit
            .checked_div(purchase_cost)
            .and_then(|r| r.checked_mul(dec!(100)))
            .ok_or_else(|| PepperDealError::overflow("scenario ROI"))?;
        Ok(RedemptionScenario {
            label: label.to_string(),
            redemption_rate: rate,
            coin_value,
            profit,
            roi,
        })
    };
    let full_redemption = scenario("full", FULL_REDEMPTION_RATE)?;
    let standard_redemption = scenario("standard", STANDARD_REDEMPTION_RATE)?;
    let expected_redemption = scenario("expected", valuation.redemption_rate)?;

    if cash_profit < Decimal::ZERO && full_redemption.profit < Decimal::ZERO {
        warnings.push("Deal loses money even at full coin redemption".into());
    }

    // -- Dates ---------------------------------------------------------------
    let schedule = deposit::deposit_date(input.today, deal.payment_delay_weeks, calendar)?;
    if let Some(holiday) = schedule.shifted_by_holiday {
        warnings.push(format!(
            "Deposit moved back one day for the holiday on {holiday}"
        ));
    }
    let at_whole_date = schedule.deposit_date.max(valuation.bonus_date);

    let paper_pl = sale_proceeds
        .checked_add(expected_redemption.profit)
        .ok_or_else(|| PepperDealError::overflow("paper P&L"))?;

    let output = ProfitReport {
        rule_set: rules,
        delay_tier,
        delay_bonus,
        effective_buyer_rate,
        sale_proceeds,
        purchase_cost,
        cash_profit,
        coin_cash_value,
        total_coins: valuation.total_coins,
        instant_coins: valuation.instant_coins,
        future_coins: valuation.future_coins,
        deposit_date: schedule.deposit_date,
        shifted_by_holiday: schedule.shifted_by_holiday,
        future_payout_date: valuation.bonus_date,
        at_whole_date,
        full_redemption,
        standard_redemption,
        expected_redemption,
        paper_pl,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let methodology = format!("Gift card resale with Pepper coin rebate, {}", rules.label());
    Ok(with_metadata(&methodology, input, warnings, elapsed, output))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_deal(deal: &DealTerms) -> PepperDealResult<()> {
    if deal.face_value <= Decimal::ZERO {
        return Err(PepperDealError::InvalidInput {
            field: "deal.face_value".into(),
            reason: "Face value must be positive".into(),
        });
    }
    if deal.quantity == 0 {
        return Err(PepperDealError::InvalidInput {
            field: "deal.quantity".into(),
            reason: "Quantity must be at least 1".into(),
        });
    }
    if deal.buyer_rate < Decimal::ZERO || deal.buyer_rate > Decimal::ONE {
        return Err(PepperDealError::InvalidInput {
            field: "deal.buyer_rate".into(),
            reason: "Buyer rate must be a fraction between 0 and 1".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Wednesday, no holiday in the payout week
    fn today() -> NaiveDate {
        date(2024, 6, 5)
    }

    fn base_input() -> ProfitInput {
        ProfitInput {
            deal: DealTerms {
                face_value: dec!(500),
                quantity: 1,
                buyer_rate: dec!(0.85),
                payment_delay_weeks: 2,
            },
            coins: CoinProgramTerms::new(dec!(500), 15, 2, dec!(91.5), today()).unwrap(),
            today: today(),
            rule_set: RuleSet::Multiplicative,
            holidays: None,
        }
    }

    #[test]
    fn test_reference_deal() {
        let out = calculate_profit(&base_input()).unwrap().result;
        assert_eq!(out.effective_buyer_rate, dec!(0.85323));
        assert_eq!(out.sale_proceeds, dec!(426.615));
        assert_eq!(out.purchase_cost, dec!(500));
        assert_eq!(out.cash_profit, dec!(-73.385));
        assert_eq!(out.coin_cash_value, dec!(75));
        assert_eq!(out.full_redemption.profit, dec!(1.615));
        assert_eq!(out.full_redemption.roi, dec!(0.323));
    }

    #[test]
    fn test_cash_profit_identity() {
        let out = calculate_profit(&base_input()).unwrap().result;
        assert_eq!(out.sale_proceeds - out.purchase_cost, out.cash_profit);
    }

    #[test]
    fn test_standard_redemption_profit() {
        let out = calculate_profit(&base_input()).unwrap().result;
        // 75 * 0.915 = 68.625
        assert_eq!(out.standard_redemption.coin_value, dec!(68.625));
        assert_eq!(out.standard_redemption.profit, dec!(-4.76));
    }

    #[test]
    fn test_zero_delay_keeps_buyer_rate() {
        let mut input = base_input();
        input.deal.payment_delay_weeks = 0;
        let out = calculate_profit(&input).unwrap().result;
        assert_eq!(out.delay_bonus, Decimal::ZERO);
        assert_eq!(out.effective_buyer_rate, dec!(0.85));
        assert_eq!(out.delay_tier, Some(DelayTier::Standard));
    }

    #[test]
    fn test_unrecognised_delay_warns_and_still_delays_deposit() {
        let mut input = base_input();
        input.deal.payment_delay_weeks = 3;
        let res = calculate_profit(&input).unwrap();
        assert_eq!(res.result.delay_bonus, Decimal::ZERO);
        assert_eq!(res.result.delay_tier, None);
        assert_eq!(res.result.deposit_date, date(2024, 7, 4));
        assert!(res.warnings.iter().any(|w| w.contains("not a recognised tier")));
    }

    #[test]
    fn test_scenarios_ordered_by_redemption() {
        let mut input = base_input();
        input.coins.redemption_rate = dec!(80);
        let out = calculate_profit(&input).unwrap().result;
        assert!(out.full_redemption.profit >= out.standard_redemption.profit);
        assert!(out.standard_redemption.profit >= out.expected_redemption.profit);
    }

    #[test]
    fn test_paper_pl_adds_proceeds_to_expected_profit() {
        // Known quirk: proceeds are counted on top of a profit figure that
        // already nets them against cost.
        let out = calculate_profit(&base_input()).unwrap().result;
        assert_eq!(
            out.paper_pl,
            out.sale_proceeds + out.expected_redemption.profit
        );
        assert_eq!(out.paper_pl, dec!(421.855));
    }

    #[test]
    fn test_dates_and_at_whole() {
        let out = calculate_profit(&base_input()).unwrap().result;
        // Sunday 06-09, Thursday 06-13, plus two weeks
        assert_eq!(out.deposit_date, date(2024, 6, 27));
        assert_eq!(out.future_payout_date, date(2024, 6, 19));
        assert_eq!(out.at_whole_date, date(2024, 6, 27));
    }

    #[test]
    fn test_at_whole_follows_coins_when_later() {
        let mut input = base_input();
        input.deal.payment_delay_weeks = 0;
        let out = calculate_profit(&input).unwrap().result;
        assert_eq!(out.deposit_date, date(2024, 6, 13));
        assert_eq!(out.at_whole_date, date(2024, 6, 19));
    }

    #[test]
    fn test_legacy_rules_scale_coins_by_quantity() {
        let mut input = base_input();
        input.rule_set = RuleSet::Additive;
        input.deal.quantity = 2;
        let out = calculate_profit(&input).unwrap().result;
        assert_eq!(out.effective_buyer_rate, dec!(0.8538));
        assert_eq!(out.sale_proceeds, dec!(853.8));
        assert_eq!(out.coin_cash_value, dec!(150));
        assert_eq!(out.full_redemption.profit, dec!(3.8));
    }

    #[test]
    fn test_face_value_mismatch_warns() {
        let mut input = base_input();
        input.deal.face_value = dec!(250);
        let res = calculate_profit(&input).unwrap();
        assert!(res.warnings.iter().any(|w| w.contains("differs")));
    }

    #[test]
    fn test_explicit_holidays_override_federal() {
        let mut input = base_input();
        input.holidays = Some(vec![date(2024, 6, 12)]);
        let out = calculate_profit(&input).unwrap().result;
        assert_eq!(out.shifted_by_holiday, Some(date(2024, 6, 12)));
        assert_eq!(out.deposit_date, date(2024, 6, 28));
    }

    #[test]
    fn test_invalid_deal_inputs_rejected() {
        let mut input = base_input();
        input.deal.quantity = 0;
        assert!(matches!(
            calculate_profit(&input),
            Err(PepperDealError::InvalidInput { .. })
        ));

        let mut input = base_input();
        input.deal.buyer_rate = dec!(1.2);
        assert!(calculate_profit(&input).is_err());

        let mut input = base_input();
        input.deal.face_value = dec!(-5);
        assert!(calculate_profit(&input).is_err());
    }

    #[test]
    fn test_huge_face_value_returns_overflow_error() {
        let mut input = base_input();
        input.deal.face_value = dec!(1e27);
        input.coins.face_value = dec!(1e27);
        let err = calculate_profit(&input).unwrap_err();
        assert!(matches!(err, PepperDealError::ArithmeticOverflow { .. }));
    }

    #[test]
    fn test_purchase_cost_overflow_returns_error() {
        let mut input = base_input();
        input.deal.face_value = dec!(1e25);
        input.deal.quantity = u32::MAX;
        let err = calculate_profit(&input).unwrap_err();
        assert!(
            matches!(err, PepperDealError::ArithmeticOverflow { ref context } if context == "purchase cost")
        );
    }

    #[test]
    fn test_envelope_metadata() {
        let res = calculate_profit(&base_input()).unwrap();
        assert!(res.methodology.contains("multiplicative"));
        assert_eq!(res.metadata.precision, "rust_decimal_128bit");
        assert!(res.assumptions.get("deal").is_some());
    }
}
