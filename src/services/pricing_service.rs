use chrono::NaiveDate;
use regex::Regex;

use crate::errors::RentalError;

/// Format of booking dates on the wire.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

// chrono alone accepts unpadded fields, short years and leading spaces.
const DATE_SHAPE: &str = r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$";

/// Share of the base rental cost paid out as a driver incentive, in percent.
pub const DRIVER_INCENTIVE_PERCENT: i64 = 5;

/// Inclusive range of rental days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
}

pub struct PricingService;

impl PricingService {
    /// Parse `dd/mm/yyyy` start and end dates into an inclusive day count
    pub fn parse_period(start_rent: &str, end_rent: &str) -> Result<RentalPeriod, RentalError> {
        let start = parse_date("start_rent", start_rent)?;
        let end = parse_date("end_rent", end_rent)?;

        let days = (end - start).num_days() + 1;
        if days <= 0 {
            return Err(RentalError::InvalidDateRange);
        }

        Ok(RentalPeriod { start, end, days })
    }

    /// Calculate total rental cost (days x car daily rate)
    pub fn calculate_total_cost(days: i64, daily_rent: i64) -> Result<i64, RentalError> {
        days.checked_mul(daily_rent)
            .ok_or(RentalError::AmountOverflow)
    }

    /// Calculate membership discount; the total cost itself is left untouched
    pub fn calculate_discount(
        total_cost: i64,
        discount_percent: Option<i64>,
    ) -> Result<i64, RentalError> {
        match discount_percent {
            Some(percent) => percent_of(total_cost, percent),
            None => Ok(0),
        }
    }

    /// Calculate total driver cost (days x driver daily cost), zero without a driver
    pub fn calculate_driver_cost(
        days: i64,
        driver_daily_cost: Option<i64>,
    ) -> Result<i64, RentalError> {
        match driver_daily_cost {
            Some(cost) => days.checked_mul(cost).ok_or(RentalError::AmountOverflow),
            None => Ok(0),
        }
    }

    /// Calculate driver incentive (5% of days x car daily rate)
    pub fn calculate_incentive(days: i64, daily_rent: i64) -> Result<i64, RentalError> {
        let base = Self::calculate_total_cost(days, daily_rent)?;
        percent_of(base, DRIVER_INCENTIVE_PERCENT)
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, RentalError> {
    let invalid = || RentalError::InvalidDateFormat {
        field,
        value: value.to_string(),
    };

    if !has_date_shape(value) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

fn has_date_shape(value: &str) -> bool {
    Regex::new(DATE_SHAPE).is_ok_and(|re| re.is_match(value))
}

// Truncating integer percentage.
fn percent_of(amount: i64, percent: i64) -> Result<i64, RentalError> {
    amount
        .checked_mul(percent)
        .map(|scaled| scaled / 100)
        .ok_or(RentalError::AmountOverflow)
}
