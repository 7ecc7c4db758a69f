//! Calendar fixtures.
//!
//! Week-sensitive tests pin "today" instead of reading the clock. The
//! reference week runs Sunday 2024-03-03 through Saturday 2024-03-09.

use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Wednesday of the reference week.
pub fn reference_today() -> NaiveDate {
    date(2024, 3, 6)
}

pub fn reference_sunday() -> NaiveDate {
    date(2024, 3, 3)
}

pub fn reference_saturday() -> NaiveDate {
    date(2024, 3, 9)
}
