use hifitime::Epoch;
use std::str::FromStr;

use crate::{
    constants::{JulianYear, J2000_GREGORIAN_UTC, SECONDS_PER_JULIAN_YEAR},
    heliorbit_errors::HeliorbitError,
};

/// Reference epoch J2000.0 as used by the planetary element table: 2000-01-01T12:00:00 UTC.
pub fn j2000() -> Epoch {
    let (year, month, day, hour) = J2000_GREGORIAN_UTC;
    Epoch::from_gregorian_utc_hms(year, month, day, hour, 0, 0)
}

/// Current wall-clock instant.
///
/// Return
/// ------
/// * the system time as an [`Epoch`], or [`HeliorbitError::InvalidEpoch`] if the clock
///   cannot be read.
pub fn now() -> Result<Epoch, HeliorbitError> {
    Epoch::now().map_err(|e| HeliorbitError::InvalidEpoch(e.to_string()))
}

/// Elapsed time between two epochs in Julian years (365.25 days).
///
/// Argument
/// --------
/// * `from`: start instant
/// * `to`: end instant
///
/// Return
/// ------
/// * `to − from` in Julian years, negative when `to` precedes `from`
pub fn julian_years_between(from: Epoch, to: Epoch) -> JulianYear {
    (to - from).to_seconds() / SECONDS_PER_JULIAN_YEAR
}

/// Parse an epoch such as `2025-10-18T00:00:00 UTC` or `2025-10-18T00:00:00`.
///
/// Strings without an explicit time scale are read as UTC by hifitime.
pub fn parse_epoch(date: &str) -> Result<Epoch, HeliorbitError> {
    Epoch::from_str(date.trim()).map_err(|e| HeliorbitError::InvalidEpoch(format!("{date}: {e}")))
}
