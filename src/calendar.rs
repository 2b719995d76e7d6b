// src/calendar.rs
//
//! Validated date/hour values for addressing the archive.
//!
//! Archive keys are laid out by ordinal day (`product/YYYY/DDD/HH/...`), so
//! the interesting computation here is the calendar date to day-of-year
//! mapping.
//! Validation happens once, at construction; everything downstream can format
//! the fields without a failure path.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Errors from constructing a [`DataHour`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    /// The year/month/day triple does not name a real calendar day.
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: u16, month: u8, day: u8 },

    /// Hour outside 0-23.
    #[error("hour {0} out of range (expected 0-23)")]
    InvalidHour(u8),
}

/// One hour of one calendar day, checked against the real calendar.
///
/// Fields are private so an invalid combination (Feb 30, hour 24) cannot
/// exist; `new` is the only way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataHour {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    // 1-based ordinal day, cached at construction
    ordinal: u16,
}

impl DataHour {
    /// Validate and build. Rejects impossible dates (month 13, Feb 30,
    /// Apr 31, Feb 29 off leap years) and hours above 23.
    pub fn new(year: u16, month: u8, day: u8, hour: u8) -> Result<Self, DateError> {
        let date = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
            .ok_or(DateError::InvalidDate { year, month, day })?;
        if hour > 23 {
            return Err(DateError::InvalidHour(hour));
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            ordinal: date.ordinal() as u16,
        })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Day of year as the archive spells it: zero-padded, three digits,
    /// "001" through "366".
    pub fn day_of_year(&self) -> String {
        format!("{:03}", self.ordinal)
    }
}

impl std::fmt::Display for DataHour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}Z",
            self.year, self.month, self.day, self.hour
        )
    }
}
