use crate::{DateExprError, Result};
use chrono::FixedOffset;
use chrono_tz::Tz;
use std::{fmt::Display, str::FromStr};

/// Timezone associated with a date expression.
///
/// Covers the accepted specifier shapes as a closed set: nothing (UTC),
/// a fixed `±hhmm` offset, or an IANA region id. A pre-resolved
/// [`FixedOffset`] or [`Tz`] converts via `From`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Timezone {
    /// Coordinated Universal Time, the default.
    #[default]
    Utc,
    /// Fixed offset from UTC, e.g. `-0800` or `+0530`.
    Fixed(FixedOffset),
    /// IANA region timezone, e.g. `America/Los_Angeles`.
    Named(Tz),
}

impl Timezone {
    /// Parses a `±hhmm` offset string.
    fn parse_fixed(s: &str) -> Option<FixedOffset> {
        let (sign, digits) = match s.split_at_checked(1)? {
            ("+", rest) => (1, rest),
            ("-", rest) => (-1, rest),
            _ => return None,
        };

        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let hours: i32 = digits[..2].parse().ok()?;
        let minutes: i32 = digits[2..].parse().ok()?;
        if hours > 23 || minutes > 59 {
            return None;
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
    }
}

impl FromStr for Timezone {
    type Err = DateExprError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "UTC" {
            Ok(Self::Utc)
        } else if s.starts_with(['+', '-']) {
            Self::parse_fixed(s)
                .map(Self::Fixed)
                .ok_or_else(|| DateExprError::InvalidTimezone(s.to_owned()))
        } else {
            Tz::from_str(s)
                .map(Self::Named)
                .map_err(|_| DateExprError::InvalidTimezone(s.to_owned()))
        }
    }
}

impl TryFrom<&str> for Timezone {
    type Error = DateExprError;

    fn try_from(value: &str) -> Result<Self> {
        Self::from_str(value)
    }
}

impl From<FixedOffset> for Timezone {
    fn from(value: FixedOffset) -> Self {
        Self::Fixed(value)
    }
}

impl From<Tz> for Timezone {
    fn from(value: Tz) -> Self {
        Self::Named(value)
    }
}

impl Display for Timezone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utc => write!(f, "UTC"),
            Self::Fixed(offset) => {
                let seconds = offset.local_minus_utc();
                let (sign, seconds) = if seconds < 0 { ('-', -seconds) } else { ('+', seconds) };
                write!(f, "{sign}{:02}{:02}", seconds / 3600, seconds % 3600 / 60)
            }
            Self::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}
