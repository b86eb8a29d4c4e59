use chrono::{Datelike, NaiveDate};
use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use pepper_deal_core::holidays::HolidayCalendar;
use pepper_deal_core::reference::{BrandRateRecord, BrandRateTable};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Deal profitability
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_profit(input_json: String) -> NapiResult<String> {
    let input: pepper_deal_core::profit::ProfitInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        pepper_deal_core::profit::calculate_profit(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Payout schedule
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct DepositDateRequest {
    today: NaiveDate,
    #[serde(default)]
    delay_weeks: u32,
    #[serde(default)]
    holidays: Option<Vec<NaiveDate>>,
}

#[napi]
pub fn deposit_date(input_json: String) -> NapiResult<String> {
    let req: DepositDateRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let calendar = match req.holidays {
        Some(dates) => HolidayCalendar::from_dates(dates),
        None => HolidayCalendar::us_federal([req.today.year(), req.today.year() + 1]),
    };
    let schedule = pepper_deal_core::deposit::deposit_date(req.today, req.delay_weeks, &calendar)
        .map_err(to_napi_error)?;
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

/// Delay bonus as a decimal string, e.g. "0.0038".
#[napi]
pub fn delay_bonus(weeks: u32) -> String {
    pepper_deal_core::delay::delay_bonus(weeks).to_string()
}

// ---------------------------------------------------------------------------
// Brand reference
// ---------------------------------------------------------------------------

/// `records_json` is an array of archive rows (`Brand`, `Reg Rate`, `Offer`).
#[napi]
pub fn brand_defaults(records_json: String, brand: String) -> NapiResult<Option<String>> {
    let records: Vec<BrandRateRecord> =
        serde_json::from_str(&records_json).map_err(to_napi_error)?;
    let table = BrandRateTable::from_records(records);
    table
        .defaults(&brand)
        .map(|d| serde_json::to_string(d).map_err(to_napi_error))
        .transpose()
}
