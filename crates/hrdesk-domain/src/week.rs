//! Sunday-Saturday week window arithmetic.
//!
//! Everything here works on calendar dates (`NaiveDate`). Callers resolve
//! "today" in the work timezone first, so no instant is ever shifted across
//! a day boundary.

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use serde::Serialize;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const DAY_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One column of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekDay {
    pub date: NaiveDate,
    pub day_name: &'static str,
    pub day_short: &'static str,
}

/// The seven days from a Sunday through the following Saturday, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    sunday: NaiveDate,
}

impl WeekWindow {
    /// The window containing `today`.
    pub fn containing(today: NaiveDate) -> Self {
        let offset = today.weekday().num_days_from_sunday();
        Self {
            sunday: today - TimeDelta::days(i64::from(offset)),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.sunday
    }

    pub fn end(&self) -> NaiveDate {
        self.sunday + TimeDelta::days(6)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start() <= date && date <= self.end()
    }

    /// Whether the inclusive range `[start, end]` shares at least one day with the window.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end() && end >= self.start()
    }

    pub fn days(&self) -> [WeekDay; 7] {
        std::array::from_fn(|i| WeekDay {
            date: self.sunday + TimeDelta::days(i as i64),
            day_name: DAY_NAMES[i],
            day_short: DAY_SHORT[i],
        })
    }

    /// Days of `[start, end]` that fall inside the window, in order.
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let from = start.max(self.start());
        let to = end.min(self.end());
        if from > to {
            return Vec::new();
        }
        from.iter_days().take_while(|d| *d <= to).collect()
    }

    /// Days eligible for generated WFH assignments: the whole week except Friday.
    pub fn assignable_days(&self) -> Vec<NaiveDate> {
        self.days()
            .into_iter()
            .map(|d| d.date)
            .filter(|d| d.weekday() != Weekday::Fri)
            .collect()
    }
}
