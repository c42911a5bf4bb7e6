//! Calendar walking for delivery scheduling.
//!
//! Plans follow the customer's chosen weekdays, not a fixed calendar cadence:
//! a 24-delivery plan restricted to three weekdays spans eight calendar weeks.
//! [`DeliveryCalendar`] walks forward one day at a time from the start date
//! and yields only the dates a delivery may land on.

use crate::config::policy::parse_weekday;
use crate::errors::{Error, Result};
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Iterator over valid delivery dates.
///
/// Yields dates whose weekday is in the allowed set and is not the holiday
/// weekday, starting from the start date inclusive. The iterator itself is
/// infinite; callers bound it with the number of delivery days they need.
#[derive(Debug, Clone)]
pub struct DeliveryCalendar {
    current: NaiveDate,
    allowed: Vec<Weekday>,
    holiday: Weekday,
}

impl DeliveryCalendar {
    /// Creates a walker starting at `start` (inclusive).
    ///
    /// Fails with [`Error::Config`] when the allowed set is empty or contains
    /// nothing but the holiday weekday, since the walker would otherwise
    /// never yield a date.
    pub fn new(start: NaiveDate, allowed: &[Weekday], holiday: Weekday) -> Result<Self> {
        if allowed.is_empty() {
            return Err(Error::Config {
                message: "Delivery-day set is empty".to_string(),
            });
        }
        if allowed.iter().all(|day| *day == holiday) {
            return Err(Error::Config {
                message: format!("Delivery-day set contains only the holiday weekday ({holiday})"),
            });
        }

        Ok(Self {
            current: start,
            allowed: allowed.to_vec(),
            holiday,
        })
    }

    fn is_valid_day(&self, date: NaiveDate) -> bool {
        let weekday = date.weekday();
        weekday != self.holiday && self.allowed.contains(&weekday)
    }
}

impl Iterator for DeliveryCalendar {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let date = self.current;
            // Construction guarantees at least one non-holiday weekday is
            // allowed, so this terminates within seven days.
            self.current = self.current.checked_add_days(Days::new(1))?;
            if self.is_valid_day(date) {
                return Some(date);
            }
        }
    }
}

/// Parses the comma-separated `delivery_days` column into weekdays,
/// preserving order ("monday,wednesday,friday").
pub fn parse_weekday_list(csv: &str) -> Result<Vec<Weekday>> {
    csv.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(parse_weekday)
        .collect()
}

/// Joins weekdays back into the comma-separated column format.
#[must_use]
pub fn format_weekday_list(days: &[Weekday]) -> String {
    days.iter()
        .map(|day| match day {
            Weekday::Mon => "monday",
            Weekday::Tue => "tuesday",
            Weekday::Wed => "wednesday",
            Weekday::Thu => "thursday",
            Weekday::Fri => "friday",
            Weekday::Sat => "saturday",
            Weekday::Sun => "sunday",
        })
        .collect::<Vec<_>>()
        .join(",")
}
