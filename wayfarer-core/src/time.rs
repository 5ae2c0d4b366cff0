//! Minute-resolution clock times used by day itineraries.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const MINUTES_PER_HOUR: u16 = 60;
const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

/// A wall-clock time within a single day, stored as minutes after midnight.
///
/// Serialises as an `"HH:MM"` string.
///
/// # Examples
/// ```
/// use wayfarer_core::TimeOfDay;
///
/// let opening = TimeOfDay::from_hm(9, 30).expect("valid time");
/// assert_eq!(opening.minutes(), 570);
/// assert_eq!(opening.to_string(), "09:30");
/// assert_eq!("09:30".parse::<TimeOfDay>(), Ok(opening));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct TimeOfDay(u16);

/// Errors returned when parsing a [`TimeOfDay`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeOfDayError {
    /// The input was not of the form `HH:MM`.
    #[error("time '{0}' is not in HH:MM format")]
    Malformed(String),
    /// Hours or minutes were out of range.
    #[error("time '{0}' is outside 00:00..=23:59")]
    OutOfRange(String),
}

impl TimeOfDay {
    /// Midnight, the start of the day.
    pub const MIDNIGHT: Self = Self(0);

    /// Construct from minutes after midnight. Returns `None` past `23:59`.
    #[must_use]
    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < MINUTES_PER_DAY {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Construct from an hour and minute pair.
    #[must_use]
    pub const fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour >= 24 || minute >= MINUTES_PER_HOUR {
            return None;
        }
        Self::from_minutes(hour * MINUTES_PER_HOUR + minute)
    }

    /// Minutes after midnight.
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    /// Hour component in `0..24`.
    #[must_use]
    pub const fn hour(self) -> u16 {
        self.0.div_euclid(MINUTES_PER_HOUR)
    }

    /// Minute component in `0..60`.
    #[must_use]
    pub const fn minute(self) -> u16 {
        self.0.rem_euclid(MINUTES_PER_HOUR)
    }

    /// Add `minutes`, returning `None` when the result leaves the day.
    #[must_use]
    pub fn checked_add_minutes(self, minutes: u16) -> Option<Self> {
        self.0.checked_add(minutes).and_then(Self::from_minutes)
    }

    /// Minutes from `self` until `later`, saturating at zero.
    #[must_use]
    pub const fn minutes_until(self, later: Self) -> u16 {
        later.0.saturating_sub(self.0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TimeOfDayError::Malformed(s.to_owned());
        let (raw_hour, raw_minute) = s.trim().split_once(':').ok_or_else(malformed)?;
        let hour: u16 = raw_hour.parse().map_err(|_| malformed())?;
        let minute: u16 = raw_minute.parse().map_err(|_| malformed())?;
        Self::from_hm(hour, minute).ok_or_else(|| TimeOfDayError::OutOfRange(s.to_owned()))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeOfDayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("00:00", 0)]
    #[case("09:00", 540)]
    #[case("18:30", 1110)]
    #[case("23:59", 1439)]
    fn parses_clock_strings(#[case] input: &str, #[case] minutes: u16) {
        let time: TimeOfDay = input.parse().expect("valid time");
        assert_eq!(time.minutes(), minutes);
        assert_eq!(time.to_string(), input);
    }

    #[rstest]
    #[case("9")]
    #[case("ab:cd")]
    #[case("")]
    fn rejects_malformed_input(#[case] input: &str) {
        let err = input.parse::<TimeOfDay>().expect_err("malformed");
        assert!(matches!(err, TimeOfDayError::Malformed(_)));
    }

    #[rstest]
    #[case("24:00")]
    #[case("12:60")]
    fn rejects_out_of_range_input(#[case] input: &str) {
        let err = input.parse::<TimeOfDay>().expect_err("out of range");
        assert!(matches!(err, TimeOfDayError::OutOfRange(_)));
    }

    #[rstest]
    fn addition_stays_within_the_day() {
        let late = TimeOfDay::from_hm(23, 30).expect("valid time");
        assert_eq!(late.checked_add_minutes(29).map(TimeOfDay::minutes), Some(1439));
        assert!(late.checked_add_minutes(30).is_none());
    }

    #[rstest]
    fn minutes_until_saturates() {
        let nine = TimeOfDay::from_hm(9, 0).expect("valid time");
        let six = TimeOfDay::from_hm(18, 0).expect("valid time");
        assert_eq!(nine.minutes_until(six), 540);
        assert_eq!(six.minutes_until(nine), 0);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serialises_as_clock_string() {
        let time = TimeOfDay::from_hm(12, 5).expect("valid time");
        let json = serde_json::to_string(&time).expect("serialise");
        assert_eq!(json, "\"12:05\"");
        let back: TimeOfDay = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, time);
    }
}
