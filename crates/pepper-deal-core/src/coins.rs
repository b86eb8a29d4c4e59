//! Pepper coin valuation.
//!
//! Coins accrue at `20 * multiplier` coins per dollar of face value and redeem
//! at 2000 coins per dollar. The portion earned at the program's regular rate
//! lands immediately; anything above it is deferred until the bonus date.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Coins, Money, Rate};
use crate::{PepperDealError, PepperDealResult};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Coins earned per dollar of face value at 1X.
pub const BASE_COINS_PER_DOLLAR: Decimal = dec!(20);

/// Coins required to redeem one dollar at 100% redemption.
pub const COINS_PER_DOLLAR_REDEMPTION: Decimal = dec!(2000);

/// Weeks until the deferred coin portion is credited.
pub const BONUS_DELAY_WEEKS: u64 = 2;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Terms of the coin program attached to a deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinProgramTerms {
    /// Face value the coins are earned on.
    pub face_value: Money,
    /// Promotional "X" rate for this deal.
    pub multiplier: u32,
    /// Baseline "X" rate, credited without delay.
    pub regular_rate: u32,
    /// Expected redemption as a percentage in (0, 100].
    pub redemption_rate: Rate,
    /// Date the deferred portion becomes available.
    pub bonus_date: NaiveDate,
}

impl CoinProgramTerms {
    /// Build terms with the bonus date derived from `today`.
    pub fn new(
        face_value: Money,
        multiplier: u32,
        regular_rate: u32,
        redemption_rate: Rate,
        today: NaiveDate,
    ) -> PepperDealResult<Self> {
        Ok(Self {
            face_value,
            multiplier,
            regular_rate,
            redemption_rate,
            bonus_date: bonus_date_for(today, multiplier, regular_rate)?,
        })
    }

    /// Redemption rate as a fraction of coin face value.
    pub fn redemption_fraction(&self) -> Rate {
        self.redemption_rate / dec!(100)
    }
}

/// Coin counts and their cash equivalent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinValuation {
    pub total_coins: Coins,
    /// Dollar value of all coins at 100% redemption.
    pub cash_value: Money,
    pub instant_coins: Coins,
    pub future_coins: Coins,
    pub bonus_date: NaiveDate,
    pub redemption_rate: Rate,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The deferred portion only exists when the multiplier beats the regular
/// rate; otherwise everything is credited today.
pub fn bonus_date_for(
    today: NaiveDate,
    multiplier: u32,
    regular_rate: u32,
) -> PepperDealResult<NaiveDate> {
    if multiplier == regular_rate {
        return Ok(today);
    }
    today
        .checked_add_days(Days::new(BONUS_DELAY_WEEKS * 7))
        .ok_or_else(|| PepperDealError::DateError(format!("bonus date overflows after {today}")))
}

/// Value the coins earned under `terms`.
pub fn value_coins(terms: &CoinProgramTerms) -> PepperDealResult<CoinValuation> {
    validate_terms(terms)?;

    let coins_per_face_dollar = |rate: u32| {
        terms
            .face_value
            .checked_mul(BASE_COINS_PER_DOLLAR)
            .and_then(|c| c.checked_mul(Decimal::from(rate)))
    };
    let total_coins = coins_per_face_dollar(terms.multiplier)
        .ok_or_else(|| PepperDealError::overflow("total coins"))?;
    let instant_coins = coins_per_face_dollar(terms.regular_rate)
        .ok_or_else(|| PepperDealError::overflow("instant coins"))?;
    let future_coins = total_coins - instant_coins;

    Ok(CoinValuation {
        total_coins,
        cash_value: total_coins / COINS_PER_DOLLAR_REDEMPTION,
        instant_coins,
        future_coins,
        bonus_date: terms.bonus_date,
        redemption_rate: terms.redemption_rate,
    })
}

fn validate_terms(terms: &CoinProgramTerms) -> PepperDealResult<()> {
    if terms.face_value <= Decimal::ZERO {
        return Err(PepperDealError::InvalidInput {
            field: "coins.face_value".into(),
            reason: "Face value must be positive".into(),
        });
    }
    if terms.multiplier == 0 {
        return Err(PepperDealError::InvalidInput {
            field: "coins.multiplier".into(),
            reason: "Multiplier must be positive".into(),
        });
    }
    if terms.regular_rate == 0 {
        return Err(PepperDealError::InvalidInput {
            field: "coins.regular_rate".into(),
            reason: "Regular rate must be positive".into(),
        });
    }
    // A multiplier below the regular rate would mean negative deferred coins.
    if terms.multiplier < terms.regular_rate {
        return Err(PepperDealError::InvalidInput {
            field: "coins.multiplier".into(),
            reason: format!(
                "Multiplier {}X is below the regular rate {}X",
                terms.multiplier, terms.regular_rate
            ),
        });
    }
    if terms.redemption_rate <= Decimal::ZERO || terms.redemption_rate > dec!(100) {
        return Err(PepperDealError::InvalidInput {
            field: "coins.redemption_rate".into(),
            reason: "Redemption rate must be a percentage in (0, 100]".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
