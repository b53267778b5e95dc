use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

/// Half-month reporting window: days 1-15 or day 16 to end of month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuincenaHalf {
    First,
    Second,
}

/// A quincena identifies one half of a calendar month, e.g. `2026-08-Q1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quincena {
    pub year: i32,
    pub month: u32,
    pub half: QuincenaHalf,
}

impl Quincena {
    /// The quincena a given date falls into
    pub fn for_date(date: NaiveDate) -> Self {
        let half = if date.day() <= 15 {
            QuincenaHalf::First
        } else {
            QuincenaHalf::Second
        };

        Self {
            year: date.year(),
            month: date.month(),
            half,
        }
    }

    /// The quincena containing the current UTC date
    pub fn current() -> Self {
        Self::for_date(Utc::now().date_naive())
    }

    /// Parse the `YYYY-MM-Q1` / `YYYY-MM-Q2` form
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input.splitn(3, '-');
        let year = parts.next()?.parse::<i32>().ok()?;
        let month = parts.next()?.parse::<u32>().ok()?;
        let half = match parts.next()? {
            "Q1" => QuincenaHalf::First,
            "Q2" => QuincenaHalf::Second,
            _ => return None,
        };

        // Reject impossible months early
        NaiveDate::from_ymd_opt(year, month, 1)?;

        Some(Self { year, month, half })
    }

    /// Half-open window `[start, end)` of the quincena in UTC
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        // Day 1 and day 16 exist in every month
        let month_start = NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap();
        let mid = NaiveDate::from_ymd_opt(self.year, self.month, 16).unwrap();

        let (start, end) = match self.half {
            QuincenaHalf::First => (month_start, mid),
            QuincenaHalf::Second => (mid, next_month_start(self.year, self.month)),
        };

        (
            Utc.from_utc_datetime(&start.and_hms_opt(0, 0, 0).unwrap()),
            Utc.from_utc_datetime(&end.and_hms_opt(0, 0, 0).unwrap()),
        )
    }
}

impl std::fmt::Display for Quincena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let half = match self.half {
            QuincenaHalf::First => "Q1",
            QuincenaHalf::Second => "Q2",
        };
        write!(f, "{}-{:02}-{}", self.year, self.month, half)
    }
}

fn next_month_start(year: i32, month: u32) -> NaiveDate {
    if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_date_splits_at_day_15() {
        let q = Quincena::for_date(NaiveDate::from_ymd_opt(2026, 8, 15).unwrap());
        assert_eq!(q.half, QuincenaHalf::First);

        let q = Quincena::for_date(NaiveDate::from_ymd_opt(2026, 8, 16).unwrap());
        assert_eq!(q.half, QuincenaHalf::Second);
    }

    #[test]
    fn test_parse_round_trip() {
        let q = Quincena::parse("2026-08-Q1").unwrap();
        assert_eq!(q.year, 2026);
        assert_eq!(q.month, 8);
        assert_eq!(q.half, QuincenaHalf::First);
        assert_eq!(q.to_string(), "2026-08-Q1");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Quincena::parse("2026-08-Q3").is_none());
        assert!(Quincena::parse("2026-13-Q1").is_none());
        assert!(Quincena::parse("agosto").is_none());
        assert!(Quincena::parse("").is_none());
    }

    #[test]
    fn test_first_half_bounds() {
        let q = Quincena::parse("2026-02-Q1").unwrap();
        let (start, end) = q.bounds();
        assert_eq!(start.to_rfc3339(), "2026-02-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2026-02-16T00:00:00+00:00");
    }

    #[test]
    fn test_second_half_runs_to_month_end() {
        let q = Quincena::parse("2026-02-Q2").unwrap();
        let (start, end) = q.bounds();
        assert_eq!(start.to_rfc3339(), "2026-02-16T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2026-03-01T00:00:00+00:00");
    }

    #[test]
    fn test_december_second_half_crosses_year() {
        let q = Quincena::parse("2025-12-Q2").unwrap();
        let (_, end) = q.bounds();
        assert_eq!(end.to_rfc3339(), "2026-01-01T00:00:00+00:00");
    }
}
