//! Entry dates in the ledger's `yy-mm-dd` form
//!
//! Two-digit years always belong to the 2000s.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Century prefixed to stored two-digit years
pub const CENTURY: i32 = 2000;

/// Calendar date of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryDate(NaiveDate);

impl EntryDate {
    /// Wrap a calendar date; only years 2000-2099 can be written as `yy`
    pub fn new(date: NaiveDate) -> Result<Self, DateParseError> {
        if (CENTURY..CENTURY + 100).contains(&date.year()) {
            Ok(Self(date))
        } else {
            Err(DateParseError::OutOfRange(date.year()))
        }
    }

    /// Build from a two-digit year, month and day
    pub fn from_ymd(short_year: u32, month: u32, day: u32) -> Option<Self> {
        if short_year > 99 {
            return None;
        }
        NaiveDate::from_ymd_opt(CENTURY + short_year as i32, month, day).map(Self)
    }

    /// Parse `yy-mm-dd`; every part must be exactly two digits
    pub fn parse(s: &str) -> Result<Self, DateParseError> {
        let s = s.trim();
        let invalid = || DateParseError::InvalidFormat(s.to_string());

        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }
        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if part.len() != 2 || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            *slot = part.parse().map_err(|_| invalid())?;
        }

        Self::from_ymd(numbers[0], numbers[1], numbers[2]).ok_or_else(invalid)
    }

    /// The full calendar date
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// `yymmdd` as an integer, the ordering key for the chronology rule
    pub fn sort_key(&self) -> u32 {
        let short_year = (self.0.year() - CENTURY) as u32;
        short_year * 10_000 + self.0.month() * 100 + self.0.day()
    }
}

impl fmt::Display for EntryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}-{:02}-{:02}",
            self.0.year() - CENTURY,
            self.0.month(),
            self.0.day()
        )
    }
}

impl FromStr for EntryDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for EntryDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntryDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Error type for date parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    InvalidFormat(String),
    OutOfRange(i32),
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateParseError::InvalidFormat(s) => {
                write!(f, "Invalid date '{}': expected yy-mm-dd", s)
            }
            DateParseError::OutOfRange(year) => {
                write!(f, "Year {} cannot be written as yy-mm-dd", year)
            }
        }
    }
}

impl std::error::Error for DateParseError {}
