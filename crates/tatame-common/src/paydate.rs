//! Day-granularity payment dates in the `dd/mm/yyyy` wire format.
//!
//! The hosted store holds `paymentDate` as a day-first string written by the
//! legacy registration client. That format, including its parse path, is
//! load-bearing: existing documents must keep round-tripping unchanged.

use chrono::NaiveDate;
use std::fmt;

/// A calendar date carried as `dd/mm/yyyy` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayDate(NaiveDate);

impl PayDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Parse a stored `dd/mm/yyyy` string.
    ///
    /// The segments are reversed and rejoined with `-` so the ISO parser can
    /// take over. Anything that doesn't fit yields `None` — a bad stored date
    /// must never fail the read that carried it.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts: Vec<&str> = raw.split('/').collect();
        if parts.len() != 3 {
            return None;
        }
        parts.reverse();
        NaiveDate::parse_from_str(&parts.join("-"), "%Y-%m-%d")
            .ok()
            .map(Self)
    }
}

impl fmt::Display for PayDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use chrono::Datelike;
        write!(
            f,
            "{:02}/{:02}/{:04}",
            self.0.day(),
            self.0.month(),
            self.0.year()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_first() {
        let d = PayDate::parse("10/01/2024").expect("should parse");
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn round_trips_canonical_form() {
        for raw in ["10/01/2024", "01/12/1999", "28/02/2023"] {
            let parsed = PayDate::parse(raw).expect("should parse");
            assert_eq!(parsed.to_string(), raw);
        }
    }

    #[test]
    fn pads_on_display() {
        let d = PayDate::new(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(d.to_string(), "05/03/2024");
    }

    #[test]
    fn rejects_garbage() {
        assert!(PayDate::parse("").is_none());
        assert!(PayDate::parse("not a date").is_none());
        assert!(PayDate::parse("2024-01-10").is_none()); // ISO, wrong separator
        assert!(PayDate::parse("10/01").is_none()); // missing year
        assert!(PayDate::parse("31/02/2024").is_none()); // no such day
    }
}
