//! Report periods: a calendar month (`yy-mm`) or a calendar year (`yy`)

use std::fmt;
use std::str::FromStr;

use crate::error::{PassbookError, PassbookResult};
use crate::models::EntryDate;

/// One calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPeriod {
    short_year: u32,
    month: u32,
}

impl MonthPeriod {
    pub fn new(short_year: u32, month: u32) -> PassbookResult<Self> {
        if short_year > 99 || !(1..=12).contains(&month) {
            return Err(PassbookError::Validation(format!(
                "Invalid month {:02}-{:02}",
                short_year, month
            )));
        }
        Ok(Self { short_year, month })
    }

    /// Parse `yy-mm`
    pub fn parse(s: &str) -> PassbookResult<Self> {
        let s = s.trim();
        let invalid = || PassbookError::Validation(format!("Expected yy-mm, got '{}'", s));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        Self::new(two_digits(year).ok_or_else(invalid)?, two_digits(month).ok_or_else(invalid)?)
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn start(&self) -> PassbookResult<EntryDate> {
        self.date(1)
    }

    /// Last day of the month
    pub fn end(&self) -> PassbookResult<EntryDate> {
        let next = if self.month == 12 {
            MonthPeriod::new(self.short_year + 1, 1)
        } else {
            MonthPeriod::new(self.short_year, self.month + 1)
        };
        match next {
            Ok(next) => next
                .start()?
                .date()
                .pred_opt()
                .and_then(|d| EntryDate::new(d).ok())
                .ok_or_else(|| self.out_of_range()),
            // December 2099
            Err(_) => self.date(31),
        }
    }

    /// `yymm`, as used in report file names
    pub fn compact(&self) -> String {
        format!("{:02}{:02}", self.short_year, self.month)
    }

    fn date(&self, day: u32) -> PassbookResult<EntryDate> {
        EntryDate::from_ymd(self.short_year, self.month, day).ok_or_else(|| self.out_of_range())
    }

    fn out_of_range(&self) -> PassbookError {
        PassbookError::Validation(format!("No calendar dates for {}", self))
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.short_year, self.month)
    }
}

impl FromStr for MonthPeriod {
    type Err = PassbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearPeriod {
    short_year: u32,
}

impl YearPeriod {
    pub fn new(short_year: u32) -> PassbookResult<Self> {
        if short_year > 99 {
            return Err(PassbookError::Validation(format!(
                "Year must be two digits, got {}",
                short_year
            )));
        }
        Ok(Self { short_year })
    }

    /// Parse `yy`
    pub fn parse(s: &str) -> PassbookResult<Self> {
        let s = s.trim();
        two_digits(s)
            .ok_or_else(|| PassbookError::Validation(format!("Expected yy, got '{}'", s)))
            .and_then(Self::new)
    }

    pub fn start(&self) -> PassbookResult<EntryDate> {
        self.month(1)?.start()
    }

    pub fn end(&self) -> PassbookResult<EntryDate> {
        self.month(12)?.end()
    }

    pub fn month(&self, month: u32) -> PassbookResult<MonthPeriod> {
        MonthPeriod::new(self.short_year, month)
    }

    /// `yy`, as used in report file names
    pub fn compact(&self) -> String {
        format!("{:02}", self.short_year)
    }
}

impl fmt::Display for YearPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.short_year)
    }
}

impl FromStr for YearPeriod {
    type Err = PassbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn two_digits(s: &str) -> Option<u32> {
    if s.len() == 2 && s.chars().all(|c| c.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}
