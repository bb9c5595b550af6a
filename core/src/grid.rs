// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The render model of one year: every day grouped by month, classified
//! relative to today and decorated with its annotation.

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::date::{date_of, day_of_year, days_in_year, is_weekend, month_name};
use crate::{Annotation, DayKey, Marks};

/// The 1-based ordinal of `today` within `year`.
///
/// Past years yield `day count + 1` so every day counts as passed, future
/// years yield `0` so none does.
pub fn today_index(year: i32, today: NaiveDate) -> u32 {
    match year.cmp(&today.year()) {
        Ordering::Equal => day_of_year(today),
        Ordering::Less => days_in_year(year) + 1,
        Ordering::Greater => 0,
    }
}

/// How far the year has advanced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub day_count: u32,
    pub today_index: u32,
    pub days_passed: u32,
    pub days_remaining: u32,

    /// Percentage of passed days, rounded to one decimal.
    pub percentage: f64,
}

impl Progress {
    pub fn new(day_count: u32, today_index: u32) -> Self {
        // a future year has today_index 0, clamp so nothing goes negative
        let days_passed = today_index.saturating_sub(1).min(day_count);
        let days_remaining = day_count - days_passed;
        let percentage = if day_count == 0 {
            0.0
        } else {
            (f64::from(days_passed) * 1000.0 / f64::from(day_count)).round() / 10.0
        };

        Self {
            day_count,
            today_index,
            days_passed,
            days_remaining,
            percentage,
        }
    }

    /// The percentage with exactly one decimal, e.g. `16.1`.
    pub fn percentage_text(&self) -> String {
        format!("{:.1}", self.percentage)
    }
}

/// Where a day sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Past,
    Today,
    Upcoming,
}

impl DayStatus {
    pub fn classify(day: u32, today_index: u32) -> Self {
        match day.cmp(&today_index) {
            Ordering::Less => DayStatus::Past,
            Ordering::Equal => DayStatus::Today,
            Ordering::Greater => DayStatus::Upcoming,
        }
    }
}

/// The visual attributes of an annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMark {
    pub color: Option<String>,
    pub emoji: Option<String>,
    pub has_note: bool,
}

impl From<&Annotation> for CellMark {
    fn from(annotation: &Annotation) -> Self {
        Self {
            color: annotation.color.clone(),
            emoji: annotation.emoji.clone(),
            has_note: annotation.has_note(),
        }
    }
}

/// One day of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    /// 1-based ordinal within the year.
    pub day: u32,
    pub date: NaiveDate,
    pub key: DayKey,
    pub status: DayStatus,
    pub weekend: bool,
    pub mark: Option<CellMark>,
}

/// Consecutive days sharing a month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGroup {
    /// 1-based month.
    pub month: u32,
    pub name: &'static str,
    pub days: Vec<DayCell>,
}

/// Every day of a year, ready to be drawn.
#[derive(Debug, Clone)]
pub struct YearGrid {
    year: i32,
    progress: Progress,
    months: Vec<MonthGroup>,
}

impl YearGrid {
    /// Build the grid of `year` as seen on `today`.
    pub fn build(year: i32, marks: &Marks, today: NaiveDate) -> Self {
        Self::with_today_index(year, marks, today_index(year, today))
    }

    pub fn with_today_index(year: i32, marks: &Marks, today_index: u32) -> Self {
        let day_count = days_in_year(year);
        let mut months: Vec<MonthGroup> = Vec::with_capacity(12);

        for day in 1..=day_count {
            let Some(date) = date_of(year, day) else {
                tracing::warn!(year, day, "day outside the supported calendar range");
                break;
            };

            let key = DayKey::new(date);
            let cell = DayCell {
                day,
                date,
                key,
                status: DayStatus::classify(day, today_index),
                weekend: is_weekend(date),
                mark: marks.get(&key).map(CellMark::from),
            };

            match months.last_mut() {
                Some(group) if group.month == date.month() => group.days.push(cell),
                _ => months.push(MonthGroup {
                    month: date.month(),
                    name: month_name(date.month()),
                    days: vec![cell],
                }),
            }
        }

        Self {
            year,
            progress: Progress::new(day_count, today_index),
            months,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn today_index(&self) -> u32 {
        self.progress.today_index
    }

    pub fn day_count(&self) -> u32 {
        self.progress.day_count
    }

    pub fn months(&self) -> &[MonthGroup] {
        &self.months
    }

    /// All days in order.
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.months.iter().flat_map(|m| m.days.iter())
    }

    pub fn cell(&self, day: u32) -> Option<&DayCell> {
        let (month, index) = self.locate(day)?;
        self.months.get(month)?.days.get(index)
    }

    /// Whether any day carries an annotation.
    pub fn has_marks(&self) -> bool {
        self.cells().any(|c| c.mark.is_some())
    }

    /// Re-read a single day's annotation without rebuilding the grid.
    pub fn refresh_day(&mut self, day: u32, marks: &Marks) -> Option<&DayCell> {
        let (month, index) = self.locate(day)?;
        let cell = self.months.get_mut(month)?.days.get_mut(index)?;
        cell.mark = marks.get(&cell.key).map(CellMark::from);
        Some(cell)
    }

    fn locate(&self, day: u32) -> Option<(usize, usize)> {
        let date = date_of(self.year, day)?;
        let month = self.months.iter().position(|m| m.month == date.month())?;
        Some((month, date.day0() as usize))
    }
}
