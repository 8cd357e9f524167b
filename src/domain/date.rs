use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::domain::entities::player::BirthDate;

/// Day zero of the save format's serial day count.
fn epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1900, 2, 1)
}

/// Converts a serial day count into a calendar date.
pub fn days_to_date(serial: i64) -> Option<BirthDate> {
    let date = epoch()?.checked_add_signed(TimeDelta::try_days(serial)?)?;
    Some(BirthDate {
        year: date.year(),
        month: date.month(),
        day: date.day(),
    })
}

pub fn date_to_days(year: i32, month: u32, day: u32) -> Option<i64> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.signed_duration_since(epoch()?).num_days())
}

pub fn format_date(date: BirthDate) -> String {
    format!("{}.{}.{}", date.day, date.month, date.year)
}

/// `day.month.year`, or an empty string when the serial is out of range.
pub fn days_to_date_string(serial: i64) -> String {
    days_to_date(serial).map(format_date).unwrap_or_default()
}

pub fn ingame_date_text(earliest: i64, latest: i64) -> String {
    if earliest == latest {
        format!("Estimated date is {}.", days_to_date_string(earliest))
    } else {
        format!(
            "Estimated date is between {} and {}.",
            days_to_date_string(earliest),
            days_to_date_string(latest)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_zero_is_first_of_february_1900() {
        assert_eq!(
            days_to_date(0),
            Some(BirthDate {
                year: 1900,
                month: 2,
                day: 1
            })
        );
        assert_eq!(days_to_date_string(28), "1.3.1900");
    }

    #[test]
    fn leap_days_are_counted() {
        let serial = date_to_days(2000, 2, 29).expect("valid date");
        assert_eq!(days_to_date_string(serial), "29.2.2000");
        assert_eq!(days_to_date_string(serial + 1), "1.3.2000");
    }

    #[test]
    fn date_to_days_inverts_days_to_date() {
        let serial = date_to_days(1987, 11, 3).expect("valid date");
        let date = days_to_date(serial).expect("in range");
        assert_eq!((date.year, date.month, date.day), (1987, 11, 3));
    }

    #[test]
    fn out_of_range_serial_formats_empty() {
        assert_eq!(days_to_date(i64::MAX), None);
        assert_eq!(days_to_date_string(i64::MAX), "");
    }

    #[test]
    fn ingame_date_text_collapses_equal_bounds() {
        assert_eq!(ingame_date_text(0, 0), "Estimated date is 1.2.1900.");
        assert_eq!(
            ingame_date_text(0, 1),
            "Estimated date is between 1.2.1900 and 2.2.1900."
        );
    }
}
