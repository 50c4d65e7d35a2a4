//! Reporting periods derived from transaction dates
//!
//! Month labels look like "2025-01" and quarter labels like "2025Q1".

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The quarter this month falls in
    pub fn quarter(&self) -> Quarter {
        Quarter {
            year: self.year,
            quarter: (self.month - 1) / 3 + 1,
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:04}-{:02}", self.year, self.month))
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("Invalid month '{}'. Use YYYY-MM", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in month '{}'", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month number in '{}'", s))?;
        if !(1..=12).contains(&month) {
            return Err(format!("Month must be 1-12, got {}", month));
        }
        Ok(Self { year, month })
    }
}

impl TryFrom<String> for Month {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A calendar quarter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Quarter {
    pub year: i32,
    /// 1 through 4
    pub quarter: u32,
}

impl Quarter {
    pub fn of(date: NaiveDate) -> Self {
        Month::of(date).quarter()
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:04}Q{}", self.year, self.quarter))
    }
}

impl FromStr for Quarter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, quarter) = s
            .trim()
            .split_once(['Q', 'q'])
            .ok_or_else(|| format!("Invalid quarter '{}'. Use YYYYQn", s))?;
        let year: i32 = year
            .trim_end_matches('-')
            .parse()
            .map_err(|_| format!("Invalid year in quarter '{}'", s))?;
        let quarter: u32 = quarter
            .parse()
            .map_err(|_| format!("Invalid quarter number in '{}'", s))?;
        if !(1..=4).contains(&quarter) {
            return Err(format!("Quarter must be 1-4, got {}", quarter));
        }
        Ok(Self { year, quarter })
    }
}

impl TryFrom<String> for Quarter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for Quarter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
