//! Date source for the `\today` macro.

use chrono::{Local, NaiveDate};

/// Supplies the current date to the converter.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock date in the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Long-form date, as LaTeX prints `\today` (e.g. `October 18, 2026`).
pub fn format_today(clock: &dyn Clock) -> String {
    clock.today().format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed_date() {
        let clock = FixedClock::ymd(2026, 10, 8).unwrap();
        assert_eq!(format_today(&clock), "October 8, 2026");
    }

    #[test]
    fn test_invalid_date() {
        assert!(FixedClock::ymd(2026, 2, 30).is_none());
    }
}
