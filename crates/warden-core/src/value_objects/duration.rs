//! Compact timeout durations (`30s`, `5m`, `2h`, `7d`)

use chrono::TimeDelta;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Unit letter of a compact duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl DurationUnit {
    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            's' => Some(Self::Seconds),
            'm' => Some(Self::Minutes),
            'h' => Some(Self::Hours),
            'd' => Some(Self::Days),
            _ => None,
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Self::Seconds => "second",
            Self::Minutes => "minute",
            Self::Hours => "hour",
            Self::Days => "day",
        }
    }
}

/// A parsed timeout duration: integer magnitude plus unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutDuration {
    amount: u32,
    unit: DurationUnit,
}

impl TimeoutDuration {
    /// Parse `<integer><unit>` where unit is one of `s`, `m`, `h`, `d`
    ///
    /// The magnitude must be a positive integer. The unit letter is matched
    /// case-insensitively.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let input = input.trim();
        let invalid = || DomainError::InvalidDuration(input.to_string());

        let unit_letter = input.chars().last().ok_or_else(invalid)?;
        let magnitude = &input[..input.len() - unit_letter.len_utf8()];

        if magnitude.is_empty() || !magnitude.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let amount: u32 = magnitude.parse().map_err(|_| invalid())?;
        if amount == 0 {
            return Err(invalid());
        }
        let unit = DurationUnit::from_letter(unit_letter).ok_or_else(invalid)?;

        Ok(Self { amount, unit })
    }

    /// Magnitude as entered
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Unit as entered
    pub fn unit(&self) -> DurationUnit {
        self.unit
    }

    /// Length of the timeout
    pub fn as_delta(&self) -> TimeDelta {
        let amount = i64::from(self.amount);
        match self.unit {
            DurationUnit::Seconds => TimeDelta::seconds(amount),
            DurationUnit::Minutes => TimeDelta::minutes(amount),
            DurationUnit::Hours => TimeDelta::hours(amount),
            DurationUnit::Days => TimeDelta::days(amount),
        }
    }
}

impl FromStr for TimeoutDuration {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeoutDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.amount == 1 { "" } else { "s" };
        write!(f, "{} {}{}", self.amount, self.unit.noun(), plural)
    }
}
