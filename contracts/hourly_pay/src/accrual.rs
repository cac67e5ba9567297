//-----------------------------------------------------------------------------
// Day-period arithmetic
//-----------------------------------------------------------------------------

use crate::errors::HourlyPayError;

pub const SECONDS_PER_HOUR: u64 = 3_600;
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Start of the day period containing `timestamp`.
///
/// Periods are 24 hours long and begin at `offset` seconds past midnight UTC.
/// Timestamps before the very first anchor belong to a period clamped to 0.
pub fn period_start(timestamp: u64, offset: u64) -> u64 {
    if timestamp < offset {
        return 0;
    }
    timestamp - (timestamp - offset) % SECONDS_PER_DAY
}

/// First boundary strictly after `current`.
///
/// Re-aligned to `offset`, so a changed time-of-day anchor only moves
/// boundaries forward and the tracked period never goes backwards.
pub fn next_period_start(current: u64, offset: u64) -> u64 {
    period_start(current.saturating_add(SECONDS_PER_DAY), offset)
}

/// Payable seconds in one day period for a limit expressed in hours.
pub fn daily_cap_seconds(daily_hour_limit: u32) -> u64 {
    u64::from(daily_hour_limit) * SECONDS_PER_HOUR
}

/// Converts worked seconds into token units at an hourly `rate`, rounding down.
pub fn wages_for(rate: i128, seconds: u64) -> Result<i128, HourlyPayError> {
    rate.checked_mul(i128::from(seconds))
        .map(|total| total / i128::from(SECONDS_PER_HOUR))
        .ok_or(HourlyPayError::ArithmeticOverflow)
}

/// Pay for `seconds` worked on top of `already_worked` in the same period.
///
/// Taken as a difference of period totals so that splitting a period into
/// several sessions pays exactly what one session of the same length would.
pub fn wages_for_span(
    rate: i128,
    already_worked: u64,
    seconds: u64,
) -> Result<i128, HourlyPayError> {
    let before = wages_for(rate, already_worked)?;
    let after = wages_for(rate, already_worked.saturating_add(seconds))?;
    Ok(after - before)
}

/// What closing a work session produced.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Settlement {
    /// Seconds credited against the tracked period's allowance.
    pub credited_seconds: u64,
    /// Session seconds that earned nothing (over the cap or in lapsed periods).
    pub forfeited_seconds: u64,
    /// Day-period boundaries the tracked period advanced over.
    pub periods_crossed: u32,
    /// Token units added to earnings.
    pub amount: i128,
}
