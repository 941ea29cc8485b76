//! Date ranges for the generated time series

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{GeneratorError, GeneratorResult};

/// Sampling frequency of a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// One point per calendar day
    #[default]
    #[serde(rename = "D", alias = "daily")]
    Daily,
    /// One point per week, anchored on Sunday
    #[serde(rename = "W", alias = "weekly")]
    Weekly,
}

impl Frequency {
    fn step_days(self) -> u64 {
        match self {
            Frequency::Daily => 1,
            Frequency::Weekly => 7,
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "D" | "d" | "daily" | "Daily" => Ok(Frequency::Daily),
            "W" | "w" | "weekly" | "Weekly" => Ok(Frequency::Weekly),
            other => Err(format!("unknown frequency: {}", other)),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "D"),
            Frequency::Weekly => write!(f, "W"),
        }
    }
}

/// `periods` dates beginning at `start`.
///
/// Weekly ranges land on Sundays: the first date is the first Sunday on
/// or after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub periods: usize,
    #[serde(default)]
    pub frequency: Frequency,
}

impl DateRange {
    pub fn new(start: NaiveDate, periods: usize, frequency: Frequency) -> Self {
        Self {
            start,
            periods,
            frequency,
        }
    }

    pub fn daily(start: NaiveDate, periods: usize) -> Self {
        Self::new(start, periods, Frequency::Daily)
    }

    pub fn weekly(start: NaiveDate, periods: usize) -> Self {
        Self::new(start, periods, Frequency::Weekly)
    }

    /// Reject empty ranges. `name` identifies the range in the error.
    pub fn validate(&self, name: &'static str) -> GeneratorResult<()> {
        if self.periods == 0 {
            return Err(GeneratorError::invalid(name, "date range has zero periods"));
        }
        Ok(())
    }

    /// First date actually emitted by the range.
    pub fn first(&self) -> GeneratorResult<NaiveDate> {
        match self.frequency {
            Frequency::Daily => Ok(self.start),
            Frequency::Weekly => {
                let offset = (7 - self.start.weekday().num_days_from_sunday()) % 7;
                self.offset(self.start, u64::from(offset))
            }
        }
    }

    /// Materialize every date of the range.
    pub fn dates(&self) -> GeneratorResult<Vec<NaiveDate>> {
        let first = self.first()?;
        let step = self.frequency.step_days();
        (0..self.periods as u64)
            .map(|i| self.offset(first, i * step))
            .collect()
    }

    fn offset(&self, date: NaiveDate, days: u64) -> GeneratorResult<NaiveDate> {
        date.checked_add_days(Days::new(days))
            .ok_or(GeneratorError::DateOutOfRange {
                start: self.start,
                periods: self.periods,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn jan1() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_daily_range_is_consecutive() {
        let dates = DateRange::daily(jan1(), 30).dates().unwrap();
        assert_eq!(dates.len(), 30);
        assert_eq!(dates[0], jan1());
        assert_eq!(dates[29], NaiveDate::from_ymd_opt(2024, 1, 30).unwrap());
    }

    #[test]
    fn test_weekly_range_rolls_forward_to_sunday() {
        // 2024-01-01 is a Monday
        let dates = DateRange::weekly(jan1(), 20).dates().unwrap();
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert!(dates.iter().all(|d| d.weekday() == Weekday::Sun));
        assert_eq!(dates[19], NaiveDate::from_ymd_opt(2024, 5, 19).unwrap());
    }

    #[test]
    fn test_weekly_range_keeps_sunday_start() {
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let dates = DateRange::weekly(sunday, 2).dates().unwrap();
        assert_eq!(dates[0], sunday);
    }

    #[test]
    fn test_zero_periods_rejected() {
        let err = DateRange::daily(jan1(), 0).validate("trend_range").unwrap_err();
        assert!(err.to_string().contains("trend_range"));
    }

    #[test]
    fn test_overflow_reported() {
        let range = DateRange::daily(NaiveDate::MAX, 2);
        assert!(matches!(
            range.dates(),
            Err(GeneratorError::DateOutOfRange { periods: 2, .. })
        ));
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!("W".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!("daily".parse::<Frequency>().unwrap(), Frequency::Daily);
        assert!("M".parse::<Frequency>().is_err());
    }
}
