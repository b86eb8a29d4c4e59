use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, ValueEnum};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use pepper_deal_core::coins::CoinProgramTerms;
use pepper_deal_core::delay::{self, DelayTier};
use pepper_deal_core::deposit;
use pepper_deal_core::holidays::HolidayCalendar;
use pepper_deal_core::profit::{self, DealTerms, ProfitInput};
use pepper_deal_core::reference::BrandDefaults;
use pepper_deal_core::rules::RuleSet;

use crate::input;

/// Regular rate assumed when neither a flag nor brand history supplies one.
const FALLBACK_REGULAR_RATE: u32 = 1;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RulesArg {
    /// Delay bonus scales the buyer rate (current)
    Multiplicative,
    /// Delay bonus is added to the buyer rate (legacy)
    Additive,
}

impl From<RulesArg> for RuleSet {
    fn from(arg: RulesArg) -> Self {
        match arg {
            RulesArg::Multiplicative => RuleSet::Multiplicative,
            RulesArg::Additive => RuleSet::Additive,
        }
    }
}

/// Arguments for a deal profitability report
#[derive(Args)]
pub struct ProfitArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Face value per card in dollars
    #[arg(long, default_value = "500")]
    pub face_value: Decimal,

    /// Number of cards
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,

    /// Fraction of face value the buyer pays (e.g. 0.85)
    #[arg(long, default_value = "0.85")]
    pub buyer_rate: Decimal,

    /// Payment delay in weeks: 0, 2, 4, 8 or 16
    #[arg(long, default_value_t = 0)]
    pub delay_weeks: u32,

    /// Pepper multiplier (X)
    #[arg(long, default_value_t = 15)]
    pub multiplier: u32,

    /// Regular coin rate (X); defaults to the brand's historical maximum
    #[arg(long)]
    pub regular_rate: Option<u32>,

    /// Expected coin redemption, as a percentage
    #[arg(long, default_value = "91.5")]
    pub redemption_rate: Decimal,

    /// Reference date (YYYY-MM-DD); defaults to the local date
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Calculator rule set
    #[arg(long, value_enum, default_value = "multiplicative")]
    pub rules: RulesArg,

    /// Daily-deals archive CSV used for brand defaults
    #[arg(long)]
    pub brands: Option<String>,

    /// Brand to pull defaults for (requires --brands)
    #[arg(long, requires = "brands")]
    pub brand: Option<String>,

    /// Holiday date overriding the federal calendar (repeatable)
    #[arg(long = "holiday")]
    pub holidays: Vec<NaiveDate>,
}

pub fn run_profit(args: ProfitArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut brand_defaults = None;
    let profit_input: ProfitInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        if let (Some(path), Some(brand)) = (&args.brands, &args.brand) {
            let table = input::brands::read_brand_table(path)?;
            let defaults = table
                .defaults(brand)
                .cloned()
                .ok_or_else(|| format!("Brand '{}' not found in {}", brand, path))?;
            brand_defaults = Some(defaults);
        }
        input_from_flags(&args, brand_defaults.as_ref())?
    };

    let result = profit::calculate_profit(&profit_input)?;
    let mut value = serde_json::to_value(result)?;
    if let Some(defaults) = brand_defaults {
        value["brand"] = serde_json::to_value(defaults)?;
    }
    Ok(value)
}

fn input_from_flags(
    args: &ProfitArgs,
    brand: Option<&BrandDefaults>,
) -> Result<ProfitInput, Box<dyn std::error::Error>> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let regular_rate = match args.regular_rate {
        Some(rate) => rate,
        None => brand
            .and_then(|d| d.historical_max_regular_rate)
            .and_then(|r| r.to_u32())
            .unwrap_or(FALLBACK_REGULAR_RATE),
    };

    let coins = CoinProgramTerms::new(
        args.face_value,
        args.multiplier,
        regular_rate,
        args.redemption_rate,
        today,
    )?;

    Ok(ProfitInput {
        deal: DealTerms {
            face_value: args.face_value,
            quantity: args.quantity,
            buyer_rate: args.buyer_rate,
            payment_delay_weeks: args.delay_weeks,
        },
        coins,
        today,
        rule_set: args.rules.into(),
        holidays: if args.holidays.is_empty() {
            None
        } else {
            Some(args.holidays.clone())
        },
    })
}

/// Arguments for the expected deposit date
#[derive(Args)]
pub struct DepositDateArgs {
    /// Reference date (YYYY-MM-DD); defaults to the local date
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Payment delay in weeks
    #[arg(long, default_value_t = 0)]
    pub delay_weeks: u32,

    /// Holiday date overriding the federal calendar (repeatable)
    #[arg(long = "holiday")]
    pub holidays: Vec<NaiveDate>,
}

pub fn run_deposit_date(args: DepositDateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let calendar = if args.holidays.is_empty() {
        let year = today.year();
        HolidayCalendar::us_federal([year, year + 1])
    } else {
        HolidayCalendar::from_dates(args.holidays)
    };
    let schedule = deposit::deposit_date(today, args.delay_weeks, &calendar)?;
    Ok(serde_json::to_value(schedule)?)
}

/// Arguments for the delay bonus lookup
#[derive(Args)]
pub struct DelayBonusArgs {
    /// Delay in weeks; prints the full tier table when omitted
    #[arg(long)]
    pub weeks: Option<u32>,
}

pub fn run_delay_bonus(args: DelayBonusArgs) -> Result<Value, Box<dyn std::error::Error>> {
    match args.weeks {
        Some(weeks) => Ok(json!({
            "weeks": weeks,
            "tier": DelayTier::from_weeks(weeks),
            "bonus": delay::delay_bonus(weeks),
        })),
        None => Ok(serde_json::to_value(delay::tier_table())?),
    }
}
