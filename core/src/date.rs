// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Pure calendar arithmetic over local dates.
//!
//! Everything here works on [`NaiveDate`], a calendar date with no time zone
//! attached, so a day computed near midnight never drifts across a UTC offset.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::Error;

/// NOTE: Used as the storage key, so it must stay stable across releases.
pub(crate) const STABLE_FORMAT_DATEONLY: &str = "%Y-%m-%d";

const DISPLAY_FORMAT: &str = "%A, %B %-d, %Y";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Gregorian leap year rule.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the year, 365 or 366.
pub const fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// The 1-based ordinal of the date within its year.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// The calendar date of the `day`-th day of `year`, if it exists.
pub fn date_of(year: i32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_yo_opt(year, day)
}

/// The canonical key of the `day`-th day of `year`.
pub fn day_key(year: i32, day: u32) -> Result<DayKey, Error> {
    date_of(year, day)
        .map(DayKey)
        .ok_or(Error::InvalidDay { year, day })
}

/// Human readable form such as `Friday, March 15, 2024`.
pub fn format_display_date(year: i32, day: u32) -> Result<String, Error> {
    let date = date_of(year, day).ok_or(Error::InvalidDay { year, day })?;
    Ok(date.format(DISPLAY_FORMAT).to_string())
}

/// English name of a 1-based month.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// Whether the date falls on Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Identifies one calendar day, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The 1-based ordinal within [`DayKey::year`].
    pub fn day(&self) -> u32 {
        self.0.ordinal()
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(STABLE_FORMAT_DATEONLY))
    }
}

impl FromStr for DayKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s, STABLE_FORMAT_DATEONLY)
            .map_err(|_| Error::InvalidDayKey(s.to_owned()))?;

        // reject unpadded forms like `2024-3-5`, they would not round-trip
        let key = Self(date);
        if key.to_string() != s {
            return Err(Error::InvalidDayKey(s.to_owned()));
        }
        Ok(key)
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_gregorian_leap_rule() {
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(2100));
        assert!(is_leap_year(2400));
    }

    #[test]
    fn counts_days_in_year() {
        assert_eq!(days_in_year(2024), 366);
        assert_eq!(days_in_year(2023), 365);
    }

    #[test]
    fn computes_day_of_year() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(day_of_year(date), 60);

        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(day_of_year(date), 365);

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(day_of_year(date), 1);
    }

    #[test]
    fn builds_day_keys() {
        assert_eq!(day_key(2024, 1).unwrap().to_string(), "2024-01-01");
        assert_eq!(day_key(2024, 60).unwrap().to_string(), "2024-02-29");
        assert_eq!(day_key(2024, 75).unwrap().to_string(), "2024-03-15");
        assert_eq!(day_key(2024, 366).unwrap().to_string(), "2024-12-31");
    }

    #[test]
    fn rejects_days_outside_the_year() {
        assert!(matches!(
            day_key(2023, 366),
            Err(Error::InvalidDay { year: 2023, day: 366 })
        ));
        assert!(day_key(2023, 0).is_err());
        assert!(format_display_date(2023, 400).is_err());
    }

    #[test]
    fn day_keys_round_trip_for_every_day() {
        for year in [1900, 2000, 2023, 2024] {
            for day in 1..=days_in_year(year) {
                let key = day_key(year, day).unwrap();
                let parsed: DayKey = key.to_string().parse().unwrap();
                assert_eq!(parsed, key);
                assert_eq!(parsed.year(), year);
                assert_eq!(parsed.day(), day);
                assert_eq!(parsed.date(), date_of(year, day).unwrap());
            }
        }
    }

    #[test]
    fn rejects_malformed_day_keys() {
        for s in ["", "2024-3-5", "2024-02-30", "2024/03/05", "yesterday", "2024-03-05T00:00"] {
            assert!(s.parse::<DayKey>().is_err(), "{s} should be rejected");
        }
    }

    #[test]
    fn formats_display_date() {
        assert_eq!(
            format_display_date(2024, 75).unwrap(),
            "Friday, March 15, 2024"
        );
        assert_eq!(
            format_display_date(2023, 1).unwrap(),
            "Sunday, January 1, 2023"
        );
    }

    #[test]
    fn names_months() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
    }

    #[test]
    fn detects_weekends() {
        let sat = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
        let sun = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        let mon = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
        assert!(is_weekend(sat));
        assert!(is_weekend(sun));
        assert!(!is_weekend(mon));
    }

    #[test]
    fn serializes_day_key_as_string() {
        let key = day_key(2024, 75).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), r#""2024-03-15""#);
        let back: DayKey = serde_json::from_str(r#""2024-03-15""#).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<DayKey>(r#""nope""#).is_err());
    }
}
