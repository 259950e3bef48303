use chrono::{Duration, Months, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::record::NormalizedRecord;

/// Lookback window measured backwards from a reference timestamp.
///
/// `Days` is an exact day count; `Months` follows calendar arithmetic, so
/// six months back from March 31 lands on September 30, not a fixed number
/// of days earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowSpec {
    Days(u32),
    Months(u32),
}

impl WindowSpec {
    pub fn label(&self) -> String {
        match *self {
            WindowSpec::Days(1) => "Last day".to_string(),
            WindowSpec::Days(days) => format!("Last {days} days"),
            WindowSpec::Months(1) => "Last month".to_string(),
            WindowSpec::Months(months) => format!("Last {months} months"),
        }
    }

    /// Resolves the inclusive lower bound of the window. Windows reaching
    /// past the representable calendar saturate at the earliest timestamp
    /// rather than failing, which leaves every dated record in range.
    pub fn cutoff(&self, as_of: NaiveDateTime) -> NaiveDateTime {
        match *self {
            WindowSpec::Days(days) => as_of
                .checked_sub_signed(Duration::days(i64::from(days)))
                .unwrap_or(NaiveDateTime::MIN),
            WindowSpec::Months(months) => as_of
                .checked_sub_months(Months::new(months))
                .unwrap_or(NaiveDateTime::MIN),
        }
    }
}

/// Keeps the records dated on or after the window cutoff.
///
/// Records without a parseable date never satisfy the bound, so they are
/// excluded from every windowed result no matter how wide the window is.
pub fn windowed(
    records: Vec<NormalizedRecord>,
    window: WindowSpec,
    as_of: NaiveDateTime,
) -> Vec<NormalizedRecord> {
    let cutoff = window.cutoff(as_of);
    records
        .into_iter()
        .filter(|record| matches!(record.date, Some(date) if date >= cutoff))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn day_window_counts_exact_days() {
        let cutoff = WindowSpec::Days(30).cutoff(at(2024, 3, 31));
        assert_eq!(cutoff, at(2024, 3, 1));
    }

    #[test]
    fn month_window_follows_the_calendar() {
        let cutoff = WindowSpec::Months(6).cutoff(at(2024, 3, 31));
        assert_eq!(cutoff, at(2023, 9, 30));
    }

    #[test]
    fn oversized_window_saturates_instead_of_failing() {
        let cutoff = WindowSpec::Days(u32::MAX).cutoff(at(2024, 1, 1));
        assert_eq!(cutoff, NaiveDateTime::MIN);
    }
}
